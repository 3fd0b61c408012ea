//! Matrix module - sparse matrices and scenario matrix surgery.
//!
//! Matrices are built in two phases: a `TripletMatrix` that is cheap to
//! edit, converted once into the compressed form the solver reads
//! (`CsrMatrix` for the technosphere, `CscMatrix` for the biosphere).
//! Compressed matrices are never edited in place.

mod builder;
mod errors;
mod index;
mod sparse;

pub use builder::{ScenarioMatrices, ScenarioMatrixBuilder};
pub use errors::MatrixError;
pub use index::{IndexNamespace, MatrixIndex, ReverseIndex};
pub use sparse::{CscMatrix, CsrMatrix, TripletMatrix};
