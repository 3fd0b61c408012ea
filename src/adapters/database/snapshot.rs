//! Database snapshot file format.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::classification::ClassificationEntry;
use crate::domain::foundation::{ActivityKey, MethodId};
use crate::ports::{ActivityRecord, ExchangeRecord};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// An elementary flow (biosphere matrix row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiosphereFlow {
    pub key: ActivityKey,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Characterization factors of one impact method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMethod {
    pub id: MethodId,
    pub factors: Vec<(ActivityKey, f64)>,
}

/// Everything the in-memory adapters need, loadable from one JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    pub activities: Vec<ActivityRecord>,
    #[serde(default)]
    pub exchanges: Vec<ExchangeRecord>,
    #[serde(default)]
    pub biosphere_flows: Vec<BiosphereFlow>,
    #[serde(default)]
    pub methods: Vec<ImpactMethod>,
    /// Flat classification table, sorted so every code follows its prefixes.
    #[serde(default)]
    pub classification_tree: Vec<ClassificationEntry>,
}

impl DatabaseSnapshot {
    pub fn from_json(source: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source)
    }
}
