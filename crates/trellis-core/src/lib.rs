//! Trellis Core Types
//!
//! This crate provides the value types shared by the Trellis layout engine.
//! It includes:
//!
//! - **Geometry**: Points, sizes, bounds and insets ([`geometry`] module)
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Style**: Per-element box-model settings ([`style::LayoutStyle`])

pub mod geometry;
pub mod identifier;
pub mod style;
