//! Node graph canvas with layered auto-layout.
//!
//! A [`Canvas`] keeps a graph of nodes connected through typed plugs and
//! backs each node with a manual element of its plane, so hosts position,
//! draw and hit-test nodes like any other element. [`Canvas::auto_layout`]
//! arranges the nodes into layers following the direction of the cables.
//!
//! ```
//! use trellis::{canvas::Canvas, config::CanvasConfig, tree::Tree};
//! use trellis_core::geometry::Size;
//!
//! let mut tree = Tree::new();
//! let mut canvas = Canvas::new(&mut tree, CanvasConfig::default());
//!
//! let source = canvas.add_node(&mut tree, "source", Size::new(80.0, 40.0));
//! let sink = canvas.add_node(&mut tree, "sink", Size::new(80.0, 40.0));
//! let out = canvas.add_output(source, "out");
//! let input = canvas.add_input(sink, "in");
//! canvas.connect(out, input).expect("output to input");
//!
//! canvas.auto_layout(&mut tree);
//! let source_x = tree.get(canvas.node_element(source)).position().x();
//! let sink_x = tree.get(canvas.node_element(sink)).position().x();
//! assert!(source_x < sink_x);
//! ```

mod arrange;
mod graph;
pub mod layering;

pub use graph::{Cable, CableId, Canvas, NodeId, Plug, PlugDirection, PlugId};
