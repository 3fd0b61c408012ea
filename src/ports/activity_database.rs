//! Activity Database Port - activity listing and exchange traversal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::ActivityKey;
use crate::domain::results::ActivityMetadata;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatabaseError {
    #[error("Activity not found: {0}")]
    ActivityNotFound(ActivityKey),

    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

/// Type of an exchange between two activities or an activity and a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeKind {
    Production,
    Technosphere,
    Biosphere,
}

/// One exchange: `input` flows into `output`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub input: ActivityKey,
    pub output: ActivityKey,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: ExchangeKind,
}

/// An activity as listed by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub key: ActivityKey,
    pub name: String,
    #[serde(default)]
    pub reference_product: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_production_amount")]
    pub production_amount: f64,
    /// `(system, value)` pairs, e.g. `("CPC", "0111: Wheat")`.
    #[serde(default)]
    pub classifications: Vec<(String, String)>,
}

fn default_production_amount() -> f64 {
    1.0
}

impl ActivityRecord {
    pub fn metadata(&self) -> ActivityMetadata {
        ActivityMetadata {
            name: self.name.clone(),
            reference_product: self.reference_product.clone(),
            unit: self.unit.clone(),
            location: self.location.clone(),
        }
    }
}

/// Port for reading activities and their exchanges.
///
/// # Contract
///
/// - `activities` lists every activity sorted by key.
/// - `exchanges` returns the exchanges whose output is the activity.
/// - `upstream` returns the technosphere exchanges that consume the
///   activity as an input.
pub trait ActivityDatabase: Send + Sync {
    fn activities(&self) -> Result<Vec<ActivityRecord>, DatabaseError>;

    fn activity(&self, key: &ActivityKey) -> Result<ActivityRecord, DatabaseError>;

    fn exchanges(&self, key: &ActivityKey) -> Result<Vec<ExchangeRecord>, DatabaseError>;

    fn upstream(&self, key: &ActivityKey) -> Result<Vec<ExchangeRecord>, DatabaseError>;

    /// Technosphere inputs of the activity (production excluded).
    fn technosphere_inputs(&self, key: &ActivityKey) -> Result<Vec<ExchangeRecord>, DatabaseError> {
        Ok(self
            .exchanges(key)?
            .into_iter()
            .filter(|e| e.kind == ExchangeKind::Technosphere)
            .collect())
    }

    /// Elementary flow exchanges of the activity.
    fn biosphere_inputs(&self, key: &ActivityKey) -> Result<Vec<ExchangeRecord>, DatabaseError> {
        Ok(self
            .exchanges(key)?
            .into_iter()
            .filter(|e| e.kind == ExchangeKind::Biosphere)
            .collect())
    }
}
