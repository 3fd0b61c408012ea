//! Exchange pairs, per-scenario pair lists and the skip set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::calculation::VariantLabel;
use crate::domain::foundation::ActivityKey;

/// Directed link `from -> to` to be severed in a scenario variant.
///
/// For technosphere links `from` is the product supplier and `to` the
/// consuming activity; for biosphere links `from` is the elementary flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExchangePair {
    pub from: ActivityKey,
    pub to: ActivityKey,
}

impl ExchangePair {
    pub fn new(from: ActivityKey, to: ActivityKey) -> Self {
        Self { from, to }
    }

    /// True for self-links, which land on the technosphere diagonal.
    pub fn is_diagonal(&self) -> bool {
        self.from == self.to
    }
}

/// Activities known to score zero without solving: they have no
/// technosphere and no biosphere inputs.
pub type SkipSet = BTreeSet<ActivityKey>;

/// Exchange pairs grouped per `(scenario, remaining)` label, in scenario
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioPairs {
    groups: Vec<(VariantLabel, Vec<ExchangePair>)>,
}

impl ScenarioPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scenario's pair list. A label already present is replaced
    /// in place.
    pub fn insert(&mut self, label: VariantLabel, pairs: Vec<ExchangePair>) {
        match self.groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = pairs,
            None => self.groups.push((label, pairs)),
        }
    }

    pub fn get(&self, label: &VariantLabel) -> Option<&[ExchangePair]> {
        self.groups
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, pairs)| pairs.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariantLabel, &[ExchangePair])> {
        self.groups.iter().map(|(l, p)| (l, p.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of pairs across all scenarios.
    pub fn pair_count(&self) -> usize {
        self.groups.iter().map(|(_, p)| p.len()).sum()
    }
}
