//! Key-to-position dictionaries for matrix rows and columns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::MatrixError;
use crate::domain::foundation::ActivityKey;

/// Which dictionary a key is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexNamespace {
    /// Technosphere and biosphere columns.
    Activity,
    /// Technosphere rows.
    Product,
    /// Biosphere rows.
    Biosphere,
}

impl fmt::Display for IndexNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndexNamespace::Activity => "activity",
            IndexNamespace::Product => "product",
            IndexNamespace::Biosphere => "biosphere",
        };
        f.write_str(s)
    }
}

/// Maps activity, product and biosphere keys to matrix positions.
#[derive(Debug, Clone, Default)]
pub struct MatrixIndex {
    activity: HashMap<ActivityKey, usize>,
    product: HashMap<ActivityKey, usize>,
    biosphere: HashMap<ActivityKey, usize>,
    reverse: ReverseIndex,
}

/// Position-to-key lookup, the inverse of `MatrixIndex`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseIndex {
    pub activities: Vec<ActivityKey>,
    pub products: Vec<ActivityKey>,
    pub biosphere: Vec<ActivityKey>,
}

impl MatrixIndex {
    /// Builds the index from keys listed in position order.
    ///
    /// # Errors
    /// Returns `MatrixError::DuplicateKey` if a key repeats within one
    /// namespace.
    pub fn new(
        activities: Vec<ActivityKey>,
        products: Vec<ActivityKey>,
        biosphere: Vec<ActivityKey>,
    ) -> Result<Self, MatrixError> {
        Ok(Self {
            activity: Self::positions(&activities, IndexNamespace::Activity)?,
            product: Self::positions(&products, IndexNamespace::Product)?,
            biosphere: Self::positions(&biosphere, IndexNamespace::Biosphere)?,
            reverse: ReverseIndex {
                activities,
                products,
                biosphere,
            },
        })
    }

    fn positions(
        keys: &[ActivityKey],
        namespace: IndexNamespace,
    ) -> Result<HashMap<ActivityKey, usize>, MatrixError> {
        let mut map = HashMap::with_capacity(keys.len());
        for (pos, key) in keys.iter().enumerate() {
            if map.insert(key.clone(), pos).is_some() {
                return Err(MatrixError::DuplicateKey {
                    namespace,
                    key: key.clone(),
                });
            }
        }
        Ok(map)
    }

    /// Position of `key` in `namespace`. A miss is a data-integrity error,
    /// never a default.
    pub fn position(&self, namespace: IndexNamespace, key: &ActivityKey) -> Result<usize, MatrixError> {
        let map = match namespace {
            IndexNamespace::Activity => &self.activity,
            IndexNamespace::Product => &self.product,
            IndexNamespace::Biosphere => &self.biosphere,
        };
        map.get(key).copied().ok_or_else(|| MatrixError::KeyNotIndexed {
            namespace,
            key: key.clone(),
        })
    }

    pub fn activity(&self, key: &ActivityKey) -> Result<usize, MatrixError> {
        self.position(IndexNamespace::Activity, key)
    }

    pub fn product(&self, key: &ActivityKey) -> Result<usize, MatrixError> {
        self.position(IndexNamespace::Product, key)
    }

    pub fn biosphere(&self, key: &ActivityKey) -> Result<usize, MatrixError> {
        self.position(IndexNamespace::Biosphere, key)
    }

    /// True if `key` is an elementary flow.
    pub fn is_biosphere(&self, key: &ActivityKey) -> bool {
        self.biosphere.contains_key(key)
    }

    pub fn reverse(&self) -> &ReverseIndex {
        &self.reverse
    }

    /// `(rows, cols)` of the technosphere matrix.
    pub fn technosphere_shape(&self) -> (usize, usize) {
        (self.product.len(), self.activity.len())
    }

    /// `(rows, cols)` of the biosphere matrix.
    pub fn biosphere_shape(&self) -> (usize, usize) {
        (self.biosphere.len(), self.activity.len())
    }
}
