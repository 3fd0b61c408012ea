//! Score table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::VariantLabel;
use crate::domain::foundation::{ActivityKey, MethodId};

/// Identifies one calculation: demand activity under one matrix variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScoreKey {
    pub activity: ActivityKey,
    pub variant: VariantLabel,
}

impl ScoreKey {
    pub fn new(activity: ActivityKey, variant: VariantLabel) -> Self {
        Self { activity, variant }
    }
}

/// Result of one impact method for one calculation.
///
/// `contributions` lists the non-zero characterized score of every
/// contributing activity (column sums of the characterized inventory), in
/// matrix order; `score` is their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodScore {
    pub method: MethodId,
    pub score: f64,
    pub contributions: Vec<(ActivityKey, f64)>,
}

impl MethodScore {
    pub fn from_contributions(method: MethodId, contributions: Vec<(ActivityKey, f64)>) -> Self {
        let score = contributions.iter().map(|(_, v)| v).sum();
        Self {
            method,
            score,
            contributions,
        }
    }

    /// Stub recorded for skipped activities.
    pub fn zero(method: MethodId) -> Self {
        Self {
            method,
            score: 0.0,
            contributions: Vec::new(),
        }
    }
}

/// Accumulated scores keyed by `(activity, variant)`.
///
/// Keeps first-insertion order; writing an existing key replaces its
/// scores without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    entries: Vec<(ScoreKey, Vec<MethodScore>)>,
    positions: HashMap<ScoreKey, usize>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ScoreKey, scores: Vec<MethodScore>) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 = scores,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, scores));
            }
        }
    }

    /// Merges `other` into `self`, `other` winning on shared keys.
    pub fn merge(&mut self, other: ScoreTable) {
        for (key, scores) in other.entries {
            self.insert(key, scores);
        }
    }

    pub fn get(&self, activity: &ActivityKey, variant: &VariantLabel) -> Option<&[MethodScore]> {
        let key = ScoreKey::new(activity.clone(), variant.clone());
        self.positions
            .get(&key)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// Score of one method, if that calculation was run.
    pub fn score(&self, activity: &ActivityKey, variant: &VariantLabel, method: &MethodId) -> Option<f64> {
        self.get(activity, variant)?
            .iter()
            .find(|s| &s.method == method)
            .map(|s| s.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScoreKey, &[MethodScore])> {
        self.entries.iter().map(|(k, s)| (k, s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
