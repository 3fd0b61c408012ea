//! Scenario Matrix Builder.

use tracing::debug;

use super::{CscMatrix, CsrMatrix, MatrixError, MatrixIndex, TripletMatrix};
use crate::domain::exchange::ExchangePair;

/// Technosphere and biosphere matrices of one scenario variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioMatrices {
    pub technosphere: CsrMatrix,
    pub biosphere: CscMatrix,
}

/// Derives scenario matrices from a base pair by zeroing exchange pairs.
///
/// The base matrices are expanded into editable triplet form once; every
/// scenario edits its own copy and is compressed once at the end.
pub struct ScenarioMatrixBuilder<'a> {
    index: &'a MatrixIndex,
    technosphere: TripletMatrix,
    biosphere: TripletMatrix,
}

impl<'a> ScenarioMatrixBuilder<'a> {
    pub fn new(
        technosphere: &CsrMatrix,
        biosphere: &CscMatrix,
        index: &'a MatrixIndex,
    ) -> Result<Self, MatrixError> {
        check_shape(technosphere.shape(), index.technosphere_shape())?;
        check_shape(biosphere.shape(), index.biosphere_shape())?;
        Ok(Self {
            index,
            technosphere: technosphere.to_triplets(),
            biosphere: biosphere.to_triplets(),
        })
    }

    /// Zeroes every listed pair:
    /// - elementary flow `from`: `biosphere[flow, activity(to)]`;
    /// - `from == to`: left alone, the technosphere diagonal is never zeroed;
    /// - otherwise: `technosphere[product(from), activity(to)]`.
    ///
    /// # Errors
    /// Returns `MatrixError::KeyNotIndexed` for any key missing from the
    /// index.
    pub fn build(&self, pairs: &[ExchangePair]) -> Result<ScenarioMatrices, MatrixError> {
        let mut technosphere = self.technosphere.clone();
        let mut biosphere = self.biosphere.clone();
        let mut zeroed = 0usize;
        let mut diagonal = 0usize;

        for pair in pairs {
            if self.index.is_biosphere(&pair.from) {
                let row = self.index.biosphere(&pair.from)?;
                let col = self.index.activity(&pair.to)?;
                zeroed += usize::from(biosphere.zero(row, col)?);
            } else if pair.is_diagonal() {
                diagonal += 1;
            } else {
                let row = self.index.product(&pair.from)?;
                let col = self.index.activity(&pair.to)?;
                zeroed += usize::from(technosphere.zero(row, col)?);
            }
        }

        debug!(
            pairs = pairs.len(),
            zeroed,
            diagonal_skipped = diagonal,
            "Built scenario matrices"
        );

        Ok(ScenarioMatrices {
            technosphere: technosphere.to_csr(),
            biosphere: biosphere.to_csc(),
        })
    }
}

fn check_shape(actual: (usize, usize), expected: (usize, usize)) -> Result<(), MatrixError> {
    if actual != expected {
        return Err(MatrixError::ShapeMismatch {
            nrows: actual.0,
            ncols: actual.1,
            expected_rows: expected.0,
            expected_cols: expected.1,
        });
    }
    Ok(())
}
