//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers and error types that form the vocabulary of
//! the HEM recalculation domain: activity keys used as matrix lookup keys,
//! impact method identifiers, and run identifiers.

mod errors;
mod ids;
mod keys;

pub use errors::ValidationError;
pub use ids::RunId;
pub use keys::{ActivityKey, MethodId};
