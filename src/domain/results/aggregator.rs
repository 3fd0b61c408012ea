//! Results Aggregator.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

use super::{
    ActivityMetadata, ContributionGroup, ContributionSummary, ResultColumn, ResultRow,
    ResultsTable,
};
use crate::domain::calculation::{ScoreTable, VariantKind};
use crate::domain::foundation::ActivityKey;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResultsError {
    #[error("No metadata for contributing activity {0}")]
    MissingMetadata(ActivityKey),
}

/// Turns a score table into a results table and contribution summaries.
#[derive(Debug, Clone)]
pub struct ResultsAggregator {
    top_n: usize,
    group_by: ContributionGroup,
}

impl Default for ResultsAggregator {
    fn default() -> Self {
        Self::new(3, ContributionGroup::Location)
    }
}

impl ResultsAggregator {
    pub fn new(top_n: usize, group_by: ContributionGroup) -> Self {
        Self { top_n, group_by }
    }

    /// Reshapes per-activity contributions into one row per activity.
    ///
    /// # Algorithm
    /// Every method score of every entry is written to the column named by
    /// the last element of its variant label (`original`, `remaining`,
    /// `direct_remaining`); a later write to the same column replaces the
    /// earlier one. Rows that are zero in all three columns are dropped,
    /// `target` and `direct_target` are derived, metadata is joined, and
    /// rows are sorted by descending `|original|`.
    ///
    /// # Errors
    /// Returns `ResultsError::MissingMetadata` if a remaining row has no
    /// metadata entry.
    pub fn process(
        &self,
        scores: &ScoreTable,
        metadata: &HashMap<ActivityKey, ActivityMetadata>,
    ) -> Result<ResultsTable, ResultsError> {
        let mut columns: HashMap<VariantKind, BTreeMap<&ActivityKey, f64>> = HashMap::new();
        let mut replaced = 0usize;

        for (key, method_scores) in scores.iter() {
            for method_score in method_scores {
                let column: BTreeMap<&ActivityKey, f64> = method_score
                    .contributions
                    .iter()
                    .map(|(k, v)| (k, *v))
                    .collect();
                if columns.insert(key.variant.kind(), column).is_some() {
                    replaced += 1;
                }
            }
        }
        if replaced > 0 {
            warn!(replaced, "Score columns overwritten by later variants or methods");
        }

        let keys: BTreeSet<&ActivityKey> = columns.values().flat_map(|c| c.keys().copied()).collect();
        let value = |kind: VariantKind, key: &ActivityKey| {
            columns
                .get(&kind)
                .and_then(|c| c.get(key))
                .copied()
                .unwrap_or(0.0)
        };

        let mut rows = Vec::new();
        for key in keys {
            let original = value(VariantKind::Original, key);
            let remaining = value(VariantKind::Remaining, key);
            let direct_remaining = value(VariantKind::DirectRemaining, key);
            if original == 0.0 && remaining == 0.0 && direct_remaining == 0.0 {
                continue;
            }
            let metadata = metadata
                .get(key)
                .cloned()
                .ok_or_else(|| ResultsError::MissingMetadata(key.clone()))?;

            rows.push(ResultRow {
                key: key.clone(),
                original,
                remaining,
                direct_remaining,
                target: original - remaining,
                direct_target: original - direct_remaining,
                metadata,
            });
        }

        rows.sort_by(|a, b| b.original.abs().total_cmp(&a.original.abs()));
        debug!(rows = rows.len(), "Aggregated results table");

        Ok(ResultsTable { rows })
    }

    /// Contribution summary of every reported column.
    pub fn contributions(&self, table: &ResultsTable) -> Vec<ContributionSummary> {
        ResultColumn::REPORTED
            .iter()
            .map(|&column| ContributionSummary::compute(table, column, self.group_by, self.top_n))
            .collect()
    }
}
