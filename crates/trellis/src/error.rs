//! Error types for Trellis operations.
//!
//! Layout passes never fail; misuse of element handles is a programming error
//! and panics. [`TrellisError`] covers the recoverable cases: editing the node
//! graph and validating configuration.

use thiserror::Error;

use trellis_core::identifier::Id;

/// The main error type for Trellis operations.
#[derive(Debug, Error, PartialEq)]
pub enum TrellisError {
    #[error("Cannot connect `{output}` to `{input}`: expected an output plug and an input plug")]
    PlugDirection { output: Id, input: Id },

    #[error("Plugs `{output}` and `{input}` are already connected")]
    DuplicateCable { output: Id, input: Id },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
