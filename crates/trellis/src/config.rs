//! Configuration types for Trellis layout.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! their own settings files. Every field is optional and falls back to the
//! defaults below.
//!
//! # Overview
//!
//! - [`LayoutConfig`] - Top-level configuration combining canvas and stripe settings.
//! - [`CanvasConfig`] - Controls automatic layout of node graphs.
//! - [`StripeDefaults`] - Spacing and padding for containers built by the host.
//!
//! # Example
//!
//! ```
//! # use trellis::config::LayoutConfig;
//! let config = LayoutConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.canvas().layer_spacing(), 50.0);
//! ```

use serde::Deserialize;

use trellis_core::{
    geometry::{Dimension, Insets},
    style::{Align, LayoutStyle},
};

use crate::TrellisError;

/// Top-level layout configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    /// Node graph auto-layout section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Container defaults section.
    #[serde(default)]
    stripe: StripeDefaults,
}

impl LayoutConfig {
    pub fn new(canvas: CanvasConfig, stripe: StripeDefaults) -> Self {
        Self { canvas, stripe }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the container defaults.
    pub fn stripe(&self) -> &StripeDefaults {
        &self.stripe
    }

    /// Checks that no spacing or padding is negative.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), TrellisError> {
        self.canvas.validate()?;
        self.stripe.validate()
    }
}

/// Settings for the layered auto-layout of a node canvas.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Axis along which successive layers are placed.
    direction: Dimension,
    /// Gap between two layers.
    layer_spacing: f32,
    /// Gap between two nodes of the same layer.
    node_spacing: f32,
    /// Margin between the plane origin and the laid out graph.
    padding: Insets,
    /// Alignment of nodes across a layer.
    layer_align: Align,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            direction: Dimension::X,
            layer_spacing: 50.0,
            node_spacing: 20.0,
            padding: Insets::uniform(20.0),
            layer_align: Align::Start,
        }
    }
}

impl CanvasConfig {
    pub fn direction(&self) -> Dimension {
        self.direction
    }

    pub fn layer_spacing(&self) -> f32 {
        self.layer_spacing
    }

    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn layer_align(&self) -> Align {
        self.layer_align
    }

    pub fn with_direction(mut self, direction: Dimension) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_layer_spacing(mut self, spacing: f32) -> Self {
        self.layer_spacing = spacing;
        self
    }

    pub fn with_node_spacing(mut self, spacing: f32) -> Self {
        self.node_spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_layer_align(mut self, align: Align) -> Self {
        self.layer_align = align;
        self
    }

    /// # Errors
    ///
    /// Returns [`TrellisError::InvalidConfig`] for negative spacings or padding.
    pub fn validate(&self) -> Result<(), TrellisError> {
        if self.layer_spacing < 0.0 {
            return Err(TrellisError::InvalidConfig(format!(
                "canvas.layer_spacing must not be negative, got {}",
                self.layer_spacing
            )));
        }
        if self.node_spacing < 0.0 {
            return Err(TrellisError::InvalidConfig(format!(
                "canvas.node_spacing must not be negative, got {}",
                self.node_spacing
            )));
        }
        if self.padding.has_negative() {
            return Err(TrellisError::InvalidConfig(
                "canvas.padding must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Spacing and padding applied to host-built containers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StripeDefaults {
    spacing: f32,
    padding: Insets,
}

impl StripeDefaults {
    pub fn new(spacing: f32, padding: Insets) -> Self {
        Self { spacing, padding }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Applies these defaults to a container style along its direction.
    pub fn apply(&self, style: LayoutStyle) -> LayoutStyle {
        let direction = style.direction();
        style
            .with_spacing(direction, self.spacing)
            .with_padding(self.padding)
    }

    fn validate(&self) -> Result<(), TrellisError> {
        if self.spacing < 0.0 {
            return Err(TrellisError::InvalidConfig(format!(
                "stripe.spacing must not be negative, got {}",
                self.spacing
            )));
        }
        if self.padding.has_negative() {
            return Err(TrellisError::InvalidConfig(
                "stripe.padding must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
