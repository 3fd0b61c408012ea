//! Scenario specification and assignment errors.

use thiserror::Error;

/// Precondition violations in scenario specifications and inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("Scenario name cannot be empty")]
    EmptyName,

    #[error("Fallback group must contain at least one scenario")]
    EmptyFallback,

    #[error("Aggregate group must have exactly one name, found {0}")]
    AggregateKeyCount(usize),

    #[error("Aggregate group '{0}' has no members")]
    EmptyAggregate(String),

    #[error("No activity is classified under system '{0}'")]
    MissingClassificationSystem(String),

    #[error("Scenario specification could not be parsed: {0}")]
    Parse(String),
}
