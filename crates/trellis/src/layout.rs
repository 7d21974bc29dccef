//! Flow layout.
//!
//! Containers arrange their children with a [`Stripe`], whose
//! [`FlowSequence`] tracks which children currently take part in the flow.
//! The passes themselves are methods on [`Tree`](crate::tree::Tree):
//! structural edits, `measure`/`layout`, and hit-testing with `pinpoint`.

mod pass;
mod pinpoint;
mod sequence;
mod stripe;

pub use sequence::FlowSequence;
pub use stripe::Stripe;
