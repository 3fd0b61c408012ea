//! Scenario Resolver.

use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use super::{ScenarioAssignment, ScenarioLabel, ScenarioSpec};
use crate::domain::classification::{ClassificationPath, ClassificationTree};
use crate::domain::foundation::ActivityKey;

/// Resolves one classification path against a specification list.
///
/// Entries are tried in order and the first match wins:
/// - `Name` matches if it appears in the path;
/// - `Fallback([main, subs..])` tries `subs` first and `main` only if none
///   of them matched, so a matching sub-scenario always beats `main`;
/// - `Aggregate { name, members }` reports `name` if any member matches.
///
/// Returns `None` if nothing in `specs` matches.
pub fn resolve(path: &ClassificationPath, specs: &[ScenarioSpec]) -> Option<String> {
    for spec in specs {
        match spec {
            ScenarioSpec::Name(name) => {
                if path.contains(name) {
                    return Some(name.clone());
                }
            }
            ScenarioSpec::Fallback(group) => {
                if let Some((main, subs)) = group.split_first() {
                    let found = resolve(path, subs)
                        .or_else(|| resolve(path, std::slice::from_ref(main)));
                    if found.is_some() {
                        return found;
                    }
                }
            }
            ScenarioSpec::Aggregate { name, members } => {
                if resolve(path, members).is_some() {
                    return Some(name.clone());
                }
            }
        }
    }
    None
}

/// Assigns activities to scenarios via their classification paths.
pub struct ScenarioResolver<'a> {
    tree: &'a ClassificationTree,
    assign_other: bool,
}

impl<'a> ScenarioResolver<'a> {
    /// `assign_other` selects the sentinel for unmatched activities:
    /// `Other` when true, `Unassigned` otherwise.
    pub fn new(tree: &'a ClassificationTree, assign_other: bool) -> Self {
        Self { tree, assign_other }
    }

    /// Label for a single classification key (`"code:name"`). Keys missing
    /// from the tree never match.
    pub fn resolve_item(&self, classification: Option<&str>, specs: &[ScenarioSpec]) -> ScenarioLabel {
        let found = classification
            .and_then(|key| self.tree.path(key))
            .and_then(|path| resolve(path, specs));

        match found {
            Some(name) => ScenarioLabel::Named(name),
            None if self.assign_other => ScenarioLabel::Other,
            None => ScenarioLabel::Unassigned,
        }
    }

    /// Labels every item and prunes the flattened scenario name list down
    /// to scenarios that at least one item was assigned to.
    pub fn assign<'k, I>(&self, items: I, specs: &[ScenarioSpec]) -> ScenarioAssignment
    where
        I: IntoIterator<Item = (&'k ActivityKey, Option<&'k str>)>,
    {
        let labels: BTreeMap<ActivityKey, ScenarioLabel> = items
            .into_iter()
            .map(|(key, classification)| (key.clone(), self.resolve_item(classification, specs)))
            .collect();

        let used: HashSet<&str> = labels.values().filter_map(ScenarioLabel::scenario).collect();
        let mut seen = HashSet::new();
        let active: Vec<String> = specs
            .iter()
            .flat_map(ScenarioSpec::scenario_names)
            .filter(|name| used.contains(name.as_str()) && seen.insert(name.clone()))
            .collect();

        debug!(
            activities = labels.len(),
            active_scenarios = active.len(),
            "Resolved scenario assignment"
        );

        ScenarioAssignment::new(labels, active)
    }
}
