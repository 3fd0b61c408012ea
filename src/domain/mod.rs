//! Domain layer containing the recalculation logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (activity keys, method ids, errors)
//! - `classification` - Classification tree paths and classification unpacking
//! - `scenario` - Scenario specifications and resolution
//! - `exchange` - Exchange pairs severed per scenario, skip set
//! - `matrix` - Sparse matrices, index dictionaries, scenario matrix surgery
//! - `calculation` - Demands, variant labels, score table, progress arithmetic
//! - `results` - Results table and contribution summaries

pub mod calculation;
pub mod classification;
pub mod exchange;
pub mod foundation;
pub mod matrix;
pub mod results;
pub mod scenario;
