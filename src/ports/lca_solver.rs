//! LCA Solver Port - the matrix-based calculation backend.
//!
//! The solver holds one *active* technosphere matrix, one active biosphere
//! matrix and one active impact method. The recalculation core swaps these
//! in and out between calculations, so a solver must be owned exclusively
//! by one run at a time.

use thiserror::Error;

use crate::domain::calculation::Demand;
use crate::domain::foundation::MethodId;
use crate::domain::matrix::{CscMatrix, CsrMatrix, MatrixError, MatrixIndex, ReverseIndex};

/// Errors raised by a solver backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("Technosphere matrix is not square ({nrows}x{ncols})")]
    NotSquare { nrows: usize, ncols: usize },

    #[error("Technosphere matrix is singular")]
    Singular,

    #[error("Matrix shape {nrows}x{ncols} does not match the solver index ({expected_rows}x{expected_cols})")]
    ShapeMismatch {
        nrows: usize,
        ncols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("No inventory has been computed")]
    NoInventory,

    #[error("No impact method is active")]
    NoMethod,

    #[error("No characterization result is available")]
    NotCharacterized,

    #[error("Unknown impact method: {0}")]
    UnknownMethod(MethodId),

    #[error("Index lookup failed: {0}")]
    Index(#[from] MatrixError),

    #[error("Solver backend error: {0}")]
    Backend(String),
}

/// Port for the LCA calculation backend.
///
/// # Contract
///
/// - Installing a technosphere matrix invalidates any cached factorization.
///   Callers must call [`decompose_technosphere`](Self::decompose_technosphere)
///   afterwards before relying on factorization reuse.
/// - [`recompute_inventory`](Self::recompute_inventory) reuses the cached
///   factorization when present.
/// - [`activity_scores`](Self::activity_scores) is indexed like
///   `reverse_index().activities`.
pub trait LcaSolver {
    /// Key-to-position dictionaries of the active matrices.
    fn index(&self) -> &MatrixIndex;

    /// Position-to-key lists used to label calculation output.
    fn reverse_index(&self) -> &ReverseIndex {
        self.index().reverse()
    }

    fn technosphere_matrix(&self) -> &CsrMatrix;

    fn biosphere_matrix(&self) -> &CscMatrix;

    /// Installs a technosphere matrix and drops the cached factorization.
    fn set_technosphere_matrix(&mut self, matrix: CsrMatrix) -> Result<(), SolverError>;

    /// Installs a biosphere matrix. Takes effect with the next inventory.
    fn set_biosphere_matrix(&mut self, matrix: CscMatrix) -> Result<(), SolverError>;

    /// Drops any cached factorization.
    fn clear_factorization(&mut self);

    /// Factorizes the active technosphere matrix and caches the result.
    fn decompose_technosphere(&mut self) -> Result<(), SolverError>;

    /// Solves the system for `demand` and computes its inventory with the
    /// active biosphere matrix.
    fn recompute_inventory(&mut self, demand: &Demand) -> Result<(), SolverError>;

    /// Makes `method` the active impact method.
    fn switch_method(&mut self, method: &MethodId) -> Result<(), SolverError>;

    /// Characterizes the current inventory with the active method.
    fn characterize(&mut self) -> Result<(), SolverError>;

    /// Characterized score per activity column of the last characterization.
    fn activity_scores(&self) -> Result<&[f64], SolverError>;
}
