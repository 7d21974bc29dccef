//! Box-model settings consumed by the layout passes.
//!
//! A [`LayoutStyle`] describes how one element wants to be sized and placed
//! by its parent, and, when the element is a container, how it arranges its
//! own children. Styles are plain values: build them with the `with_*`
//! methods or deserialize them from configuration.
//!
//! ```
//! # use trellis_core::style::{Align, Dimension, LayoutStyle, Sizing};
//! let toolbar = LayoutStyle::default()
//!     .with_direction(Dimension::X)
//!     .with_sizing(Dimension::X, Sizing::Expand)
//!     .with_align(Dimension::Y, Align::Center)
//!     .with_spacing(Dimension::X, 4.0);
//!
//! assert_eq!(toolbar.sizing(Dimension::X), Sizing::Expand);
//! assert_eq!(toolbar.align(Dimension::Y).factor(), 0.5);
//! ```

use serde::Deserialize;

pub use crate::geometry::Dimension;
use crate::geometry::{Insets, Size};

/// Alignment of an element inside the space its parent gives it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    /// Fraction of the free space placed before the element.
    pub fn factor(self) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Center => 0.5,
            Align::End => 1.0,
        }
    }
}

/// Role of an element inside its parent container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Laid out in sequence with its siblings.
    #[default]
    Flow,
    /// Aligned against the parent's content box, on top of the sequence.
    Free,
    /// Positioned by the caller; layout only sizes it.
    Manual,
}

impl Flow {
    /// Whether elements with this role take part in the active sequence.
    pub fn is_sequenced(self) -> bool {
        self == Flow::Flow
    }
}

/// Sizing policy of an element along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sizing {
    /// Use the declared size regardless of content.
    Fixed,
    /// Use the measured size.
    #[default]
    Shrink,
    /// Start from the measured size and take a weighted share of the leftover.
    Expand,
}

/// A value stored once per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Axes<T> {
    x: T,
    y: T,
}

impl<T: Copy> Axes<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Uses the same value on both axes.
    pub fn splat(value: T) -> Self {
        Self { x: value, y: value }
    }

    pub fn get(&self, dim: Dimension) -> T {
        match dim {
            Dimension::X => self.x,
            Dimension::Y => self.y,
        }
    }

    pub fn set(&mut self, dim: Dimension, value: T) {
        match dim {
            Dimension::X => self.x = value,
            Dimension::Y => self.y = value,
        }
    }
}

/// All layout settings of one element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
    flow: Flow,
    direction: Dimension,
    sizing: Axes<Sizing>,
    size: Size,
    weight: f32,
    align: Axes<Align>,
    spacing: Axes<f32>,
    padding: Insets,
    pivot: Axes<bool>,
    opaque: bool,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            flow: Flow::Flow,
            direction: Dimension::X,
            sizing: Axes::splat(Sizing::Shrink),
            size: Size::default(),
            weight: 1.0,
            align: Axes::splat(Align::Start),
            spacing: Axes::splat(0.0),
            padding: Insets::default(),
            pivot: Axes::splat(false),
            opaque: true,
        }
    }
}

impl LayoutStyle {
    /// Style of a horizontal container (children left to right).
    pub fn row() -> Self {
        Self::default().with_direction(Dimension::X)
    }

    /// Style of a vertical container (children top to bottom).
    pub fn column() -> Self {
        Self::default().with_direction(Dimension::Y)
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Primary axis along which a container sequences its children.
    pub fn direction(&self) -> Dimension {
        self.direction
    }

    pub fn sizing(&self, dim: Dimension) -> Sizing {
        self.sizing.get(dim)
    }

    /// Declared size, used on axes whose sizing is [`Sizing::Fixed`].
    pub fn size(&self) -> Size {
        self.size
    }

    /// Flex weight used when the parent distributes leftover space.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn align(&self, dim: Dimension) -> Align {
        self.align.get(dim)
    }

    /// Gap inserted between consecutive children along `dim`.
    pub fn spacing(&self, dim: Dimension) -> f32 {
        self.spacing.get(dim)
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Whether children are placed from the far edge of `dim`.
    pub fn pivot(&self, dim: Dimension) -> bool {
        self.pivot.get(dim)
    }

    /// Whether the element can be returned by an opaque hit-test.
    pub fn opaque(&self) -> bool {
        self.opaque
    }

    /// Whether the element takes a share of leftover space along `dim`.
    pub fn is_flexible(&self, dim: Dimension) -> bool {
        self.sizing(dim) == Sizing::Expand
    }

    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flow = flow;
        self
    }

    pub fn with_direction(mut self, direction: Dimension) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_sizing(mut self, dim: Dimension, sizing: Sizing) -> Self {
        self.sizing.set(dim, sizing);
        self
    }

    /// Declares a size and makes both axes [`Sizing::Fixed`].
    pub fn with_fixed_size(mut self, size: Size) -> Self {
        self.size = size;
        self.sizing = Axes::splat(Sizing::Fixed);
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_align(mut self, dim: Dimension, align: Align) -> Self {
        self.align.set(dim, align);
        self
    }

    pub fn with_spacing(mut self, dim: Dimension, spacing: f32) -> Self {
        self.spacing.set(dim, spacing);
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_pivot(mut self, dim: Dimension, pivot: bool) -> Self {
        self.pivot.set(dim, pivot);
        self
    }

    pub fn with_opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    pub fn set_flow(&mut self, flow: Flow) {
        self.flow = flow;
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}
