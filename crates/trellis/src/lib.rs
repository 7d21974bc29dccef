//! Trellis - Flow layout and node-graph auto-layout for retained-mode UIs.
//!
//! Elements live in a [`tree::Tree`] arena. Containers arrange their
//! children in sequence along one axis, with alignment, spacing and flexible
//! sizing, and can hide children without removing them. On top of that, a
//! [`canvas::Canvas`] holds a graph of connected nodes and lays it out in
//! layers.
//!
//! # Examples
//!
//! ```
//! use trellis::tree::{ElementKind, Tree};
//! use trellis_core::{
//!     geometry::{Dimension, Point, Size},
//!     style::{LayoutStyle, Sizing},
//! };
//!
//! let mut tree = Tree::new();
//! let toolbar = tree.create(
//!     ElementKind::stripe(),
//!     LayoutStyle::row().with_spacing(Dimension::X, 4.0),
//! );
//! let icon = tree.create_leaf(LayoutStyle::default(), Size::new(16.0, 16.0));
//! let title = tree.create_leaf(
//!     LayoutStyle::default().with_sizing(Dimension::X, Sizing::Expand),
//!     Size::new(40.0, 16.0),
//! );
//! tree.append(toolbar, icon);
//! tree.append(toolbar, title);
//!
//! tree.layout_in(toolbar, Size::new(200.0, 16.0));
//! assert_eq!(tree.get(title).position(), Point::new(20.0, 0.0));
//! assert_eq!(tree.get(title).size().width(), 180.0);
//!
//! assert_eq!(tree.pinpoint(toolbar, Point::new(5.0, 5.0), true), Some(icon));
//! ```

pub mod canvas;
pub mod config;
pub mod layout;
pub mod tree;

mod error;

pub use trellis_core::{geometry, identifier, style};

pub use error::TrellisError;
