//! Sparse matrix representations.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::MatrixError;

/// Mutation-friendly sparse matrix keyed by `(row, col)`.
///
/// Entries are kept ordered by row then column, so conversion to CSR is a
/// single pass. Explicit zeros are never stored: writing `0.0` removes the
/// entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripletMatrix {
    nrows: usize,
    ncols: usize,
    entries: BTreeMap<(usize, usize), f64>,
}

impl TripletMatrix {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            entries: BTreeMap::new(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        Ok(())
    }

    /// Sets an entry, replacing any previous value.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        if value == 0.0 {
            self.entries.remove(&(row, col));
        } else {
            self.entries.insert((row, col), value);
        }
        Ok(())
    }

    /// Adds to an entry. Repeated exchanges between the same pair of
    /// activities accumulate.
    pub fn add(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        let current = self.entries.get(&(row, col)).copied().unwrap_or(0.0);
        self.set(row, col, current + value)
    }

    /// Removes an entry. Returns true if a non-zero entry was removed.
    pub fn zero(&mut self, row: usize, col: usize) -> Result<bool, MatrixError> {
        self.check_bounds(row, col)?;
        Ok(self.entries.remove(&(row, col)).is_some())
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.entries.get(&(row, col)).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries.iter().map(|(&(r, c), &v)| (r, c, v))
    }

    /// Compresses by rows.
    pub fn to_csr(&self) -> CsrMatrix {
        let mut indptr = vec![0usize; self.nrows + 1];
        let mut indices = Vec::with_capacity(self.entries.len());
        let mut data = Vec::with_capacity(self.entries.len());

        for (&(row, col), &value) in &self.entries {
            indptr[row + 1] += 1;
            indices.push(col);
            data.push(value);
        }
        for i in 0..self.nrows {
            indptr[i + 1] += indptr[i];
        }

        CsrMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            indptr: indptr.into(),
            indices: indices.into(),
            data: data.into(),
        }
    }

    /// Compresses by columns.
    pub fn to_csc(&self) -> CscMatrix {
        let mut indptr = vec![0usize; self.ncols + 1];
        for &(_, col) in self.entries.keys() {
            indptr[col + 1] += 1;
        }
        for j in 0..self.ncols {
            indptr[j + 1] += indptr[j];
        }

        let mut next = indptr.clone();
        let mut indices = vec![0usize; self.entries.len()];
        let mut data = vec![0.0f64; self.entries.len()];
        // Row-major iteration keeps row indices sorted inside each column.
        for (&(row, col), &value) in &self.entries {
            let slot = next[col];
            indices[slot] = row;
            data[slot] = value;
            next[col] += 1;
        }

        CscMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            indptr: indptr.into(),
            indices: indices.into(),
            data: data.into(),
        }
    }
}

/// Compressed sparse row matrix. Row slices are contiguous.
///
/// Immutable once built; clones share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    nrows: usize,
    ncols: usize,
    indptr: Arc<[usize]>,
    indices: Arc<[usize]>,
    data: Arc<[f64]>,
}

impl CsrMatrix {
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether both matrices point at the same storage.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Non-zero `(col, value)` entries of `row`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = if row < self.nrows {
            self.indptr[row]..self.indptr[row + 1]
        } else {
            0..0
        };
        range.map(move |k| (self.indices[k], self.data[k]))
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.nrows {
            return 0.0;
        }
        let (start, end) = (self.indptr[row], self.indptr[row + 1]);
        match self.indices[start..end].binary_search(&col) {
            Ok(pos) => self.data[start + pos],
            Err(_) => 0.0,
        }
    }

    /// All non-zero entries as `(row, col, value)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.nrows).flat_map(move |r| self.row(r).map(move |(c, v)| (r, c, v)))
    }

    pub fn to_triplets(&self) -> TripletMatrix {
        TripletMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            entries: self.iter().map(|(r, c, v)| ((r, c), v)).collect(),
        }
    }
}

/// Compressed sparse column matrix. Column slices are contiguous.
///
/// Immutable once built; clones share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix {
    nrows: usize,
    ncols: usize,
    indptr: Arc<[usize]>,
    indices: Arc<[usize]>,
    data: Arc<[f64]>,
}

impl CscMatrix {
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether both matrices point at the same storage.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Non-zero `(row, value)` entries of `col`.
    pub fn col(&self, col: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = if col < self.ncols {
            self.indptr[col]..self.indptr[col + 1]
        } else {
            0..0
        };
        range.map(move |k| (self.indices[k], self.data[k]))
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        if col >= self.ncols {
            return 0.0;
        }
        let (start, end) = (self.indptr[col], self.indptr[col + 1]);
        match self.indices[start..end].binary_search(&row) {
            Ok(pos) => self.data[start + pos],
            Err(_) => 0.0,
        }
    }

    /// All non-zero entries as `(row, col, value)`, column-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.ncols).flat_map(move |c| self.col(c).map(move |(r, v)| (r, c, v)))
    }

    pub fn to_triplets(&self) -> TripletMatrix {
        TripletMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            entries: self.iter().map(|(r, c, v)| ((r, c), v)).collect(),
        }
    }
}
