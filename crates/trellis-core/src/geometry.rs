//! Geometric primitives for element sizing and positioning.
//!
//! This module provides the value types every layout pass reads and writes.
//!
//! # Overview
//!
//! - [`Dimension`] - One of the two layout axes
//! - [`Point`] - A 2D coordinate, relative to the parent element unless stated otherwise
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Trellis uses screen coordinates:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Layout code is written once per axis: most types expose an `along`
//! accessor taking a [`Dimension`] so containers can treat their primary and
//! secondary axes uniformly.

use serde::Deserialize;

/// One of the two layout axes.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Dimension;
/// assert_eq!(Dimension::X.other(), Dimension::Y);
/// assert_eq!(Dimension::Y.other(), Dimension::X);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Horizontal axis, left to right.
    #[default]
    X,
    /// Vertical axis, top to bottom.
    Y,
}

impl Dimension {
    /// Both axes in `[X, Y]` order.
    pub const ALL: [Dimension; 2] = [Dimension::X, Dimension::Y];

    /// Returns the opposite axis.
    pub fn other(self) -> Self {
        match self {
            Dimension::X => Dimension::Y,
            Dimension::Y => Dimension::X,
        }
    }
}

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::{Dimension, Point};
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.along(Dimension::Y), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Coordinate along `dim`.
    pub fn along(self, dim: Dimension) -> f32 {
        match dim {
            Dimension::X => self.x,
            Dimension::Y => self.y,
        }
    }

    /// Copy of the point moved to `value` along `dim`.
    pub fn with_along(mut self, dim: Dimension, value: f32) -> Self {
        match dim {
            Dimension::X => self.x = value,
            Dimension::Y => self.y = value,
        }
        self
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Offsets this point by `other`, e.g. a child position by its parent's.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Converts a point into the frame whose origin is `other`.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Extent of an element: its content, natural or assigned size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Width for X, height for Y.
    pub fn along(self, dim: Dimension) -> f32 {
        match dim {
            Dimension::X => self.width,
            Dimension::Y => self.height,
        }
    }

    /// Returns a copy with the extent along `dim` replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::{Dimension, Size};
    /// let size = Size::new(10.0, 20.0).with_along(Dimension::X, 42.0);
    /// assert_eq!(size.width(), 42.0);
    /// assert_eq!(size.height(), 20.0);
    /// ```
    pub fn with_along(mut self, dim: Dimension, value: f32) -> Self {
        match dim {
            Dimension::X => self.width = value,
            Dimension::Y => self.height = value,
        }
        self
    }

    /// Per-axis maximum, used to size overlays around their largest child.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Grows a content size into the outer size of a padded container.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Content box left inside `insets`, clamped at zero.
    pub fn sub_padding(self, insets: Insets) -> Self {
        Self {
            width: (self.width - insets.horizontal_sum()).max(0.0),
            height: (self.height - insets.vertical_sum()).max(0.0),
        }
    }

    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Axis-aligned box of an element, as used for hit-testing and for the
/// extent of a canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Box of an element placed at `top_left` with the given size.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Top-left corner.
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Checks whether a point lies inside the bounds.
    ///
    /// The minimum edges are inclusive and the maximum edges exclusive, so two
    /// adjacent boxes never both contain the point on their shared edge.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
    /// assert!(bounds.contains(Point::new(10.0, 29.9)));
    /// assert!(!bounds.contains(Point::new(30.0, 15.0)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x && point.x < self.max_x && point.y >= self.min_y && point.y < self.max_y
    }

    /// Smallest box covering both, e.g. two nodes of a canvas.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::{Bounds, Point, Size};
    /// let source = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(40.0, 20.0));
    /// let sink = Bounds::new_from_top_left(Point::new(90.0, 30.0), Size::new(60.0, 20.0));
    ///
    /// let extent = source.merge(&sink);
    /// assert_eq!(extent.width(), 150.0);
    /// assert_eq!(extent.height(), 50.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Container padding, or the margin around an auto-laid-out canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Sides in CSS order: top, right, bottom, left.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Leading edge along `dim`: left for X, top for Y.
    pub fn start(self, dim: Dimension) -> f32 {
        match dim {
            Dimension::X => self.left,
            Dimension::Y => self.top,
        }
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }

    /// Offset of the content box from the outer top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Whether any side is negative, which configuration rejects.
    pub fn has_negative(self) -> bool {
        self.top < 0.0 || self.right < 0.0 || self.bottom < 0.0 || self.left < 0.0
    }
}
