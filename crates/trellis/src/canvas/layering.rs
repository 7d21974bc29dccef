//! Layer assignment for directed node graphs.
//!
//! Nodes are ordered topologically into depth layers: a node sits one layer
//! past the deepest of its inputs. The graph is walked breadth-first from
//! every node whose inputs are all resolved. When only cycles remain, the
//! node with the fewest unresolved inputs is forced through, and nodes are
//! never revisited, so every cycle gets the depths of its first visit.
//!
//! The algorithm only needs neighbour queries, provided through the
//! [`Adjacency`] trait.

use std::{collections::VecDeque, fmt::Debug, hash::Hash};

use indexmap::IndexMap;
use log::{debug, trace, warn};

/// Read-only view of a directed graph.
pub trait Adjacency {
    type Node: Copy + Eq + Hash + Debug;

    /// Every node, in a stable order that decides tie-breaks.
    fn nodes(&self) -> Vec<Self::Node>;

    /// Distinct nodes with an edge into `node`.
    fn input_nodes(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Distinct nodes with an edge out of `node`.
    fn output_nodes(&self, node: Self::Node) -> Vec<Self::Node>;
}

/// Per-node state of one layering run.
#[derive(Debug, Clone)]
pub struct NodeInfo<N> {
    depth: usize,
    index: usize,
    done: bool,
    inputs: Vec<N>,
    outputs: Vec<N>,
    connections: usize,
    remaining: usize,
}

impl<N> NodeInfo<N> {
    fn new(inputs: Vec<N>, outputs: Vec<N>) -> Self {
        Self {
            depth: 0,
            index: 0,
            done: false,
            connections: inputs.len() + outputs.len(),
            remaining: inputs.len(),
            inputs,
            outputs,
        }
    }

    /// Layer the node was placed in.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Slot of the node inside its layer.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn inputs(&self) -> &[N] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[N] {
        &self.outputs
    }

    /// Number of distinct neighbours, inputs and outputs together.
    pub fn connections(&self) -> usize {
        self.connections
    }

    /// Inputs not yet placed.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

/// Node states, in the graph's node order.
pub type NodeMap<N> = IndexMap<N, NodeInfo<N>>;

/// Layers from depth zero, each listing its nodes in slot order.
pub type NodeTable<N> = Vec<Vec<N>>;

/// Result of assigning every node of a graph to a layer.
#[derive(Debug, Clone)]
pub struct Layering<N> {
    nodes: NodeMap<N>,
    table: NodeTable<N>,
    /// Nodes processed so far; capped at the node count.
    visits: usize,
}

impl<N: Copy + Eq + Hash + Debug> Layering<N> {
    /// Builds the per-node state of `graph`, without ordering anything yet.
    pub fn collect_nodes<G>(graph: &G) -> Self
    where
        G: Adjacency<Node = N>,
    {
        let nodes: NodeMap<N> = graph
            .nodes()
            .into_iter()
            .map(|node| {
                let info = NodeInfo::new(graph.input_nodes(node), graph.output_nodes(node));
                (node, info)
            })
            .collect();
        debug!(nodes_count = nodes.len(); "Collected graph nodes");
        Self {
            nodes,
            table: Vec::new(),
            visits: 0,
        }
    }

    /// Assigns every collected node to a layer.
    pub fn order_nodes(&mut self) {
        while self.visits < self.nodes.len() {
            let Some(node) = self.next_node() else {
                break;
            };
            self.visit(node);
        }
        debug!(layers_count = self.table.len(); "Ordered graph nodes");
    }

    /// Picks the next node to start a walk from: the first node with all
    /// inputs resolved, or, when only cycles remain, the one with the
    /// fewest unresolved inputs.
    pub fn next_node(&self) -> Option<N> {
        let pending = self.nodes.iter().filter(|(_, info)| !info.done);

        let mut fallback: Option<(N, usize)> = None;
        for (node, info) in pending {
            if info.remaining == 0 {
                return Some(*node);
            }
            if fallback.is_none_or(|(_, remaining)| info.remaining < remaining) {
                fallback = Some((*node, info.remaining));
            }
        }

        fallback.map(|(node, remaining)| {
            warn!(node:? = node, remaining; "Graph has a cycle, placing node with unresolved inputs");
            node
        })
    }

    /// Walks the graph breadth-first from `start`, placing every node whose
    /// inputs become resolved along the way.
    fn visit(&mut self, start: N) {
        let mut queue = VecDeque::from([start]);
        self.info_mut(start).done = true;

        while let Some(node) = queue.pop_front() {
            self.visits += 1;
            let info = self.info_mut(node);
            let depth = info.depth;
            let outputs = info.outputs.clone();

            self.process_node(node);

            for output in outputs {
                let next = self.info_mut(output);
                if next.done {
                    continue;
                }
                next.depth = next.depth.max(depth + 1);
                next.remaining = next.remaining.saturating_sub(1);
                if next.remaining == 0 {
                    next.done = true;
                    queue.push_back(output);
                }
            }
        }
    }

    /// Appends `node` to the layer of its depth.
    fn process_node(&mut self, node: N) {
        let depth = self.info_mut(node).depth;
        if self.table.len() <= depth {
            self.table.resize_with(depth + 1, Vec::new);
        }
        let layer = &mut self.table[depth];
        let index = layer.len();
        layer.push(node);
        self.info_mut(node).index = index;
        trace!(node:? = node, depth, index; "Node placed");
    }

    fn info_mut(&mut self, node: N) -> &mut NodeInfo<N> {
        self.nodes
            .get_mut(&node)
            .unwrap_or_else(|| panic!("node {node:?} is not part of the graph"))
    }

    pub fn nodes(&self) -> &NodeMap<N> {
        &self.nodes
    }

    pub fn table(&self) -> &NodeTable<N> {
        &self.table
    }

    /// Number of nodes processed by [`order_nodes`](Self::order_nodes).
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// Layer of `node`, if it belongs to the graph.
    pub fn depth(&self, node: N) -> Option<usize> {
        self.nodes.get(&node).map(NodeInfo::depth)
    }

    /// Slot of `node` inside its layer, if it belongs to the graph.
    pub fn index(&self, node: N) -> Option<usize> {
        self.nodes.get(&node).map(NodeInfo::index)
    }
}

/// Collects and orders `graph` in one go.
pub fn layer_graph<G: Adjacency>(graph: &G) -> Layering<G::Node> {
    let mut layering = Layering::collect_nodes(graph);
    layering.order_nodes();
    layering
}
