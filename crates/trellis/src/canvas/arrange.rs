//! Automatic placement of canvas nodes.
//!
//! Nodes are layered with [`layer_graph`], then placed by the regular flow
//! layout: an outer stripe along the canvas direction holds one inner stripe
//! per layer, and each inner stripe holds that layer's node elements. Once
//! laid out, the nodes go back into the plane as manual elements at the
//! positions the stripes gave them.

use log::{debug, info};

use trellis_core::{
    geometry::Point,
    style::{Flow, LayoutStyle},
};

use crate::{
    canvas::{
        Canvas, NodeId,
        layering::{Adjacency, NodeTable, layer_graph},
    },
    tree::{ElementKind, Tree},
};

impl Adjacency for Canvas {
    type Node = NodeId;

    fn nodes(&self) -> Vec<NodeId> {
        self.node_ids().collect()
    }

    fn input_nodes(&self, node: NodeId) -> Vec<NodeId> {
        Canvas::input_nodes(self, node)
    }

    fn output_nodes(&self, node: NodeId) -> Vec<NodeId> {
        Canvas::output_nodes(self, node)
    }
}

impl Canvas {
    /// Arranges every node into layers following the cables between them.
    ///
    /// Sources end up in the first layer, and every other node one layer
    /// past the deepest node feeding it.
    pub fn auto_layout(&self, tree: &mut Tree) {
        info!(nodes_count = self.node_count(); "Auto layout started");
        let layering = layer_graph(self);
        self.layout_nodes(tree, layering.table());
        info!(layers_count = layering.table().len(); "Auto layout complete");
    }

    /// Positions the nodes of `table` layer by layer.
    pub fn layout_nodes(&self, tree: &mut Tree, table: &NodeTable<NodeId>) {
        let config = self.config();
        let direction = config.direction();
        let across = direction.other();

        let outer = tree.create(
            ElementKind::stripe(),
            LayoutStyle::default()
                .with_direction(direction)
                .with_spacing(direction, config.layer_spacing()),
        );
        let mut saved: Vec<(NodeId, LayoutStyle)> = Vec::new();
        for layer in table {
            let inner = tree.create(
                ElementKind::stripe(),
                LayoutStyle::default()
                    .with_direction(across)
                    .with_spacing(across, config.node_spacing()),
            );
            tree.append(outer, inner);

            for node in layer {
                let element = self.node_element(*node);
                tree.remove(element);
                let style = tree.get(element).style().clone();
                saved.push((*node, style.clone()));
                tree.set_style(
                    element,
                    style
                        .with_flow(Flow::Flow)
                        .with_align(direction, config.layer_align()),
                );
                tree.append(inner, element);
            }
        }

        let size = tree.layout(outer);
        debug!(width = size.width(), height = size.height(); "Layers laid out");

        let origin = config.padding().origin();
        let placed: Vec<(NodeId, LayoutStyle, Point)> = saved
            .into_iter()
            .map(|(node, style)| {
                let element = self.node_element(node);
                let position = tree.absolute_position(element).add_point(origin);
                tree.remove(element);
                (node, style, position)
            })
            .collect();

        for node in self.node_ids() {
            let Some((_, style, position)) =
                placed.iter().find(|(placed_node, _, _)| *placed_node == node)
            else {
                continue;
            };
            let element = self.node_element(node);
            tree.set_style(element, style.clone().with_flow(Flow::Manual));
            tree.append(self.plane(), element);
            tree.set_position(element, *position);
        }
        tree.destroy(outer);
    }
}
