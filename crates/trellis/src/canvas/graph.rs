//! Nodes, plugs and cables of a node canvas.
//!
//! The canvas owns three insertion-ordered tables. A node lists its input
//! and output plugs, a plug lists the cables attached to it, and a cable
//! names its two plugs. Removing a node walks these relations so no cable
//! or plug is left pointing at it.

use indexmap::IndexMap;
use log::{debug, trace};

use trellis_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    style::{Flow, LayoutStyle},
};

use crate::{
    TrellisError,
    config::CanvasConfig,
    tree::{ElementId, ElementKind, Tree},
};

/// Handle to a node of a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Handle to a plug of a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlugId(u32);

/// Handle to a cable of a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CableId(u32);

/// Whether a plug receives or emits cables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlugDirection {
    Input,
    Output,
}

#[derive(Debug)]
struct Node {
    name: Id,
    element: ElementId,
    inputs: Vec<PlugId>,
    outputs: Vec<PlugId>,
}

/// A named connection point on a node.
#[derive(Debug)]
pub struct Plug {
    name: Id,
    node: NodeId,
    direction: PlugDirection,
    cables: Vec<CableId>,
}

impl Plug {
    /// Name of the plug, nested under its node's name.
    pub fn name(&self) -> Id {
        self.name
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn direction(&self) -> PlugDirection {
        self.direction
    }
}

/// A directed edge from an output plug to an input plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cable {
    output: PlugId,
    input: PlugId,
}

impl Cable {
    pub fn output(&self) -> PlugId {
        self.output
    }

    pub fn input(&self) -> PlugId {
        self.input
    }
}

/// A node graph whose nodes are manual elements of a plane.
#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    plane: ElementId,
    nodes: IndexMap<NodeId, Node>,
    plugs: IndexMap<PlugId, Plug>,
    cables: IndexMap<CableId, Cable>,
    next_id: u32,
}

impl Canvas {
    /// Creates an empty canvas with its own plane element in `tree`.
    pub fn new(tree: &mut Tree, config: CanvasConfig) -> Self {
        let plane = tree.create(ElementKind::stripe(), LayoutStyle::default());
        tree.set_name(plane, "canvas");
        Self {
            config,
            plane,
            nodes: IndexMap::new(),
            plugs: IndexMap::new(),
            cables: IndexMap::new(),
            next_id: 0,
        }
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn node_entry(&self, node: NodeId) -> &Node {
        self.nodes
            .get(&node)
            .unwrap_or_else(|| panic!("unknown node {node:?}"))
    }

    /// The container hosting every node element.
    pub fn plane(&self) -> ElementId {
        self.plane
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Nodes in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_name(&self, node: NodeId) -> Id {
        self.node_entry(node).name
    }

    /// The element backing `node` in the tree.
    pub fn node_element(&self, node: NodeId) -> ElementId {
        self.node_entry(node).element
    }

    pub fn inputs(&self, node: NodeId) -> &[PlugId] {
        &self.node_entry(node).inputs
    }

    pub fn outputs(&self, node: NodeId) -> &[PlugId] {
        &self.node_entry(node).outputs
    }

    pub fn plug(&self, plug: PlugId) -> &Plug {
        self.plugs
            .get(&plug)
            .unwrap_or_else(|| panic!("unknown plug {plug:?}"))
    }

    pub fn cable(&self, cable: CableId) -> &Cable {
        self.cables
            .get(&cable)
            .unwrap_or_else(|| panic!("unknown cable {cable:?}"))
    }

    /// Cables attached to `plug`, in connection order.
    pub fn cables(&self, plug: PlugId) -> &[CableId] {
        &self.plug(plug).cables
    }

    pub fn cable_count(&self) -> usize {
        self.cables.len()
    }

    /// Adds a node of the given size to the plane, at the plane origin.
    pub fn add_node(&mut self, tree: &mut Tree, name: &str, size: Size) -> NodeId {
        let element = tree.create_leaf(LayoutStyle::default().with_flow(Flow::Manual), size);
        tree.set_name(element, name);
        tree.append(self.plane, element);

        let id = NodeId(self.allocate());
        self.nodes.insert(
            id,
            Node {
                name: Id::new(name),
                element,
                inputs: Vec::new(),
                outputs: Vec::new(),
            },
        );
        trace!(node:? = id, name; "Node added");
        id
    }

    /// Removes `node`, its plugs, every cable touching them and its element.
    pub fn remove_node(&mut self, tree: &mut Tree, node: NodeId) {
        let entry = self
            .nodes
            .shift_remove(&node)
            .unwrap_or_else(|| panic!("unknown node {node:?}"));

        for plug in entry.inputs.iter().chain(entry.outputs.iter()) {
            let attached = self.plug(*plug).cables.clone();
            for cable in attached {
                self.drop_cable(cable);
            }
            self.plugs.shift_remove(plug);
        }
        tree.destroy(entry.element);
        debug!(node:? = node; "Node removed");
    }

    fn add_plug(&mut self, node: NodeId, name: &str, direction: PlugDirection) -> PlugId {
        let plug_name = self.node_name(node).create_nested(Id::new(name));
        let id = PlugId(self.allocate());
        self.plugs.insert(
            id,
            Plug {
                name: plug_name,
                node,
                direction,
                cables: Vec::new(),
            },
        );

        let entry = self
            .nodes
            .get_mut(&node)
            .unwrap_or_else(|| panic!("unknown node {node:?}"));
        match direction {
            PlugDirection::Input => entry.inputs.push(id),
            PlugDirection::Output => entry.outputs.push(id),
        }
        id
    }

    /// Adds an input plug named `name` to `node`.
    pub fn add_input(&mut self, node: NodeId, name: &str) -> PlugId {
        self.add_plug(node, name, PlugDirection::Input)
    }

    /// Adds an output plug named `name` to `node`.
    pub fn add_output(&mut self, node: NodeId, name: &str) -> PlugId {
        self.add_plug(node, name, PlugDirection::Output)
    }

    /// Connects an output plug to an input plug.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::PlugDirection`] if `output` is not an output
    /// plug or `input` is not an input plug, and
    /// [`TrellisError::DuplicateCable`] if the two are already connected.
    pub fn connect(&mut self, output: PlugId, input: PlugId) -> Result<CableId, TrellisError> {
        let out_plug = self.plug(output);
        let in_plug = self.plug(input);
        if out_plug.direction != PlugDirection::Output || in_plug.direction != PlugDirection::Input
        {
            return Err(TrellisError::PlugDirection {
                output: out_plug.name,
                input: in_plug.name,
            });
        }
        if self.find_cable(output, input).is_some() {
            return Err(TrellisError::DuplicateCable {
                output: out_plug.name,
                input: in_plug.name,
            });
        }

        let id = CableId(self.allocate());
        self.cables.insert(id, Cable { output, input });
        for plug in [output, input] {
            if let Some(entry) = self.plugs.get_mut(&plug) {
                entry.cables.push(id);
            }
        }
        debug!(output:? = output, input:? = input; "Plugs connected");
        Ok(id)
    }

    fn find_cable(&self, output: PlugId, input: PlugId) -> Option<CableId> {
        self.cables(output)
            .iter()
            .copied()
            .find(|cable| self.cable(*cable).input == input)
    }

    /// Removes the cable between `output` and `input`. Returns whether one existed.
    pub fn disconnect(&mut self, output: PlugId, input: PlugId) -> bool {
        match self.find_cable(output, input) {
            Some(cable) => {
                self.drop_cable(cable);
                true
            }
            None => false,
        }
    }

    fn drop_cable(&mut self, cable: CableId) {
        let Some(Cable { output, input }) = self.cables.shift_remove(&cable) else {
            return;
        };
        for plug in [output, input] {
            if let Some(entry) = self.plugs.get_mut(&plug) {
                entry.cables.retain(|attached| *attached != cable);
            }
        }
    }

    /// Nodes connected to the plugs of `node` in `direction`, without
    /// duplicates, in plug then cable order.
    fn neighbours(&self, node: NodeId, direction: PlugDirection) -> Vec<NodeId> {
        let entry = self.node_entry(node);
        let plugs = match direction {
            PlugDirection::Input => &entry.inputs,
            PlugDirection::Output => &entry.outputs,
        };

        let mut result = Vec::new();
        for plug in plugs {
            for cable in self.cables(*plug) {
                let cable = self.cable(*cable);
                let other = match direction {
                    PlugDirection::Input => cable.output,
                    PlugDirection::Output => cable.input,
                };
                let other_node = self.plug(other).node;
                if !result.contains(&other_node) {
                    result.push(other_node);
                }
            }
        }
        result
    }

    /// Nodes feeding cables into `node`.
    pub fn input_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbours(node, PlugDirection::Input)
    }

    /// Nodes receiving cables from `node`.
    pub fn output_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbours(node, PlugDirection::Output)
    }

    /// Places `node` at `position` in plane coordinates.
    pub fn move_node(&self, tree: &mut Tree, node: NodeId, position: Point) {
        tree.set_position(self.node_element(node), position);
    }

    /// Box enclosing every node, in plane coordinates. `None` when empty.
    pub fn content_bounds(&self, tree: &Tree) -> Option<Bounds> {
        self.nodes
            .values()
            .map(|node| {
                let element = tree.get(node.element);
                Bounds::new_from_top_left(element.position(), element.size())
            })
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}
