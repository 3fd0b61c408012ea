//! Matrix errors.

use thiserror::Error;

use super::IndexNamespace;
use crate::domain::foundation::ActivityKey;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("Entry ({row}, {col}) is outside a {nrows}x{ncols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    #[error("Key {key} is not in the {namespace} index")]
    KeyNotIndexed {
        namespace: IndexNamespace,
        key: ActivityKey,
    },

    #[error("Duplicate key {key} in the {namespace} index")]
    DuplicateKey {
        namespace: IndexNamespace,
        key: ActivityKey,
    },

    #[error("Matrix shape {nrows}x{ncols} does not match index shape {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        nrows: usize,
        ncols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
}
