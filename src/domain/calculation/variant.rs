//! Matrix variant labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a matrix variant plays in the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Unmodified matrices.
    Original,
    /// Technosphere and biosphere links of the scenario severed.
    Remaining,
    /// Only the scenario's biosphere links severed.
    DirectRemaining,
}

impl VariantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Original => "original",
            VariantKind::Remaining => "remaining",
            VariantKind::DirectRemaining => "direct_remaining",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names one matrix variant: `original`, or `(scenario, kind)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantLabel {
    scenario: Option<String>,
    kind: VariantKind,
}

impl VariantLabel {
    pub fn original() -> Self {
        Self {
            scenario: None,
            kind: VariantKind::Original,
        }
    }

    pub fn remaining(scenario: impl Into<String>) -> Self {
        Self {
            scenario: Some(scenario.into()),
            kind: VariantKind::Remaining,
        }
    }

    pub fn direct_remaining(scenario: impl Into<String>) -> Self {
        Self {
            scenario: Some(scenario.into()),
            kind: VariantKind::DirectRemaining,
        }
    }

    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    /// The last element of the label, which names the results column.
    pub fn kind(&self) -> VariantKind {
        self.kind
    }
}

impl fmt::Display for VariantLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scenario {
            Some(scenario) => write!(f, "{}/{}", scenario, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}
