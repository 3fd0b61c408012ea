//! Scenario assignment - the per-activity result of scenario resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::ActivityKey;

/// Label of the "catch-all" scenario when `assign_other` is enabled.
pub const OTHER_LABEL: &str = "Other";

/// Label for activities no scenario matched when `assign_other` is disabled.
pub const UNASSIGNED_LABEL: &str = "No Scenario Assigned";

/// Scenario an activity was assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScenarioLabel {
    Named(String),
    Other,
    Unassigned,
}

impl ScenarioLabel {
    pub fn as_str(&self) -> &str {
        match self {
            ScenarioLabel::Named(name) => name,
            ScenarioLabel::Other => OTHER_LABEL,
            ScenarioLabel::Unassigned => UNASSIGNED_LABEL,
        }
    }

    /// The scenario name if the label is a real scenario.
    pub fn scenario(&self) -> Option<&str> {
        match self {
            ScenarioLabel::Named(name) => Some(name),
            ScenarioLabel::Other | ScenarioLabel::Unassigned => None,
        }
    }
}

impl fmt::Display for ScenarioLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ScenarioLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScenarioLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            OTHER_LABEL => ScenarioLabel::Other,
            UNASSIGNED_LABEL => ScenarioLabel::Unassigned,
            _ => ScenarioLabel::Named(raw),
        })
    }
}

/// Scenario labels for every activity plus the ordered list of scenario
/// names that were actually assigned to at least one activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAssignment {
    labels: BTreeMap<ActivityKey, ScenarioLabel>,
    active: Vec<String>,
}

impl ScenarioAssignment {
    pub(crate) fn new(labels: BTreeMap<ActivityKey, ScenarioLabel>, active: Vec<String>) -> Self {
        Self { labels, active }
    }

    pub fn label(&self, key: &ActivityKey) -> Option<&ScenarioLabel> {
        self.labels.get(key)
    }

    /// Scenario names in specification order, pruned to those in use.
    pub fn active_scenarios(&self) -> &[String] {
        &self.active
    }

    /// Activities assigned to `scenario`, in key order.
    pub fn members<'a>(&'a self, scenario: &'a str) -> impl Iterator<Item = &'a ActivityKey> + 'a {
        self.labels
            .iter()
            .filter(move |(_, label)| label.scenario() == Some(scenario))
            .map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActivityKey, &ScenarioLabel)> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_labels_have_no_scenario() {
        assert_eq!(ScenarioLabel::Other.scenario(), None);
        assert_eq!(ScenarioLabel::Unassigned.scenario(), None);
        assert_eq!(ScenarioLabel::Named("Meat".into()).scenario(), Some("Meat"));
    }

    #[test]
    fn labels_serialize_as_plain_strings() {
        let json = serde_json::to_string(&vec![
            ScenarioLabel::Named("Meat".into()),
            ScenarioLabel::Other,
            ScenarioLabel::Unassigned,
        ])
        .unwrap();
        assert_eq!(json, r#"["Meat","Other","No Scenario Assigned"]"#);

        let back: Vec<ScenarioLabel> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[1], ScenarioLabel::Other);
    }

    #[test]
    fn members_filters_by_scenario() {
        let mut labels = BTreeMap::new();
        labels.insert(ActivityKey::new("db", "a"), ScenarioLabel::Named("Meat".into()));
        labels.insert(ActivityKey::new("db", "b"), ScenarioLabel::Unassigned);
        labels.insert(ActivityKey::new("db", "c"), ScenarioLabel::Named("Meat".into()));
        let assignment = ScenarioAssignment::new(labels, vec!["Meat".into()]);

        let members: Vec<_> = assignment.members("Meat").map(|k| k.code()).collect();
        assert_eq!(members, vec!["a", "c"]);
    }
}
