//! Analysis run configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::ValidationError;

/// Inputs, outputs and options of a HEM analysis run
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// JSON database snapshot
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// YAML run file: functional unit, methods, scenarios
    #[serde(default)]
    pub run_file: Option<PathBuf>,

    /// Where to write the JSON report; stdout when unset
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Classification system scenarios are matched in
    #[serde(default = "default_classification_system")]
    pub classification_system: String,

    /// Label unmatched activities `Other`
    #[serde(default)]
    pub assign_other: bool,

    /// Number of groups listed per contribution summary
    #[serde(default = "default_contribution_top_n")]
    pub contribution_top_n: usize,

    /// Report calculation progress
    #[serde(default = "default_progress")]
    pub progress: bool,

    /// Minimum time between progress reports
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            run_file: None,
            output_path: None,
            classification_system: default_classification_system(),
            assign_other: false,
            contribution_top_n: default_contribution_top_n(),
            progress: default_progress(),
            progress_interval_ms: default_progress_interval_ms(),
        }
    }
}

fn default_classification_system() -> String {
    "CPC".to_string()
}

fn default_contribution_top_n() -> usize {
    3
}

fn default_progress() -> bool {
    true
}

fn default_progress_interval_ms() -> u64 {
    1000
}

impl RunConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.snapshot_path.is_none() {
            return Err(ValidationError::MissingRequired("run.snapshot_path"));
        }
        if self.run_file.is_none() {
            return Err(ValidationError::MissingRequired("run.run_file"));
        }
        if self.classification_system.trim().is_empty() {
            return Err(ValidationError::EmptyClassificationSystem);
        }
        if self.contribution_top_n == 0 {
            return Err(ValidationError::InvalidTopN);
        }
        Ok(())
    }
}
