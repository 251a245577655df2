//! Wire envelopes, identifiers, and domain models for the QuoteHub API.

pub mod envelope;
pub mod id;
pub mod model;

pub use envelope::*;
pub use id::*;
pub use model::*;
