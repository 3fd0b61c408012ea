//! YAML run file: what to calculate.
//!
//! ```yaml
//! functional_unit: [ecoinvent, 9f2c1e]
//! amount: 1.0
//! methods:
//!   - [IPCC 2021, climate change, GWP 100a]
//! scenarios:
//!   - Meat
//!   - [Mining, Coal, Ores]
//!   - Metals: ["41:Basic metals", "42"]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::foundation::{ActivityKey, MethodId};
use crate::domain::scenario::ScenarioSpec;

#[derive(Debug, Error)]
pub enum RunFileError {
    #[error("Failed to read run file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid run file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunFile {
    pub functional_unit: ActivityKey,
    #[serde(default = "default_amount")]
    pub amount: f64,
    pub methods: Vec<MethodId>,
    pub scenarios: Vec<ScenarioSpec>,
}

fn default_amount() -> f64 {
    1.0
}

impl RunFile {
    pub fn from_yaml(source: &str) -> Result<Self, RunFileError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RunFileError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| RunFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&source)
    }
}
