//! Classification module - hierarchical classification paths.
//!
//! # Components
//!
//! - `ClassificationTree` - maps every `"code:name"` key to its root-to-leaf path
//! - `ClassificationEntry` - one row of the flat, pre-sorted classification table
//! - `unpack_classification` - picks one system's code out of an activity's classification list

mod tree;
mod unpack;

pub use tree::{ClassificationEntry, ClassificationError, ClassificationPath, ClassificationTree};
pub use unpack::unpack_classification;
