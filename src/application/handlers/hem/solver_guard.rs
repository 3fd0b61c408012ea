//! Scoped save/restore of a solver's active matrices.

use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

use crate::domain::matrix::{CscMatrix, CsrMatrix};
use crate::ports::LcaSolver;

/// Exclusive borrow of a solver that puts its original matrices back when
/// dropped, on success and on every error path alike.
///
/// Restoring the technosphere also drops whatever factorization the
/// scenario runs left cached.
pub struct SolverMatrixGuard<'s, S: LcaSolver + ?Sized> {
    solver: &'s mut S,
    technosphere: Option<CsrMatrix>,
    biosphere: Option<CscMatrix>,
}

impl<'s, S: LcaSolver + ?Sized> SolverMatrixGuard<'s, S> {
    /// Saves both the technosphere and the biosphere matrix.
    pub fn new(solver: &'s mut S) -> Self {
        let technosphere = Some(solver.technosphere_matrix().clone());
        let biosphere = Some(solver.biosphere_matrix().clone());
        Self {
            solver,
            technosphere,
            biosphere,
        }
    }

    /// Saves only the biosphere matrix.
    pub fn biosphere_only(solver: &'s mut S) -> Self {
        let biosphere = Some(solver.biosphere_matrix().clone());
        Self {
            solver,
            technosphere: None,
            biosphere,
        }
    }

    /// The saved biosphere matrix.
    pub fn original_biosphere(&self) -> Option<&CscMatrix> {
        self.biosphere.as_ref()
    }
}

impl<S: LcaSolver + ?Sized> Deref for SolverMatrixGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.solver
    }
}

impl<S: LcaSolver + ?Sized> DerefMut for SolverMatrixGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.solver
    }
}

impl<S: LcaSolver + ?Sized> Drop for SolverMatrixGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(technosphere) = self.technosphere.take() {
            if let Err(e) = self.solver.set_technosphere_matrix(technosphere) {
                warn!(error = %e, "Failed to restore original technosphere matrix");
            }
            self.solver.clear_factorization();
        }
        if let Some(biosphere) = self.biosphere.take() {
            if let Err(e) = self.solver.set_biosphere_matrix(biosphere) {
                warn!(error = %e, "Failed to restore original biosphere matrix");
            }
        }
        debug!("Solver matrices restored");
    }
}
