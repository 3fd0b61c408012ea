//! Contribution summaries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ActivityMetadata, ResultColumn, ResultsTable};

/// Descriptive dimension result rows are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionGroup {
    #[default]
    Location,
    ReferenceProduct,
    Name,
}

impl ContributionGroup {
    fn of<'a>(&self, metadata: &'a ActivityMetadata) -> &'a str {
        match self {
            ContributionGroup::Location => &metadata.location,
            ContributionGroup::ReferenceProduct => &metadata.reference_product,
            ContributionGroup::Name => &metadata.name,
        }
    }
}

/// Summed value of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupContribution {
    pub group: String,
    pub value: f64,
}

/// Largest groups of one column by absolute value, with everything else
/// folded into `remainder`. `remainder + sum(top)` equals the column total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionSummary {
    pub column: ResultColumn,
    pub remainder: f64,
    pub top: Vec<GroupContribution>,
}

impl ContributionSummary {
    /// Groups `column` by `group_by`, keeps the `top_n` groups with the
    /// largest absolute sums (ties broken by group name) and folds the rest
    /// into the remainder.
    pub fn compute(
        table: &ResultsTable,
        column: ResultColumn,
        group_by: ContributionGroup,
        top_n: usize,
    ) -> Self {
        let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
        for row in &table.rows {
            *groups.entry(group_by.of(&row.metadata)).or_insert(0.0) += row.value(column);
        }

        let total: f64 = groups.values().sum();
        let mut ranked: Vec<(&str, f64)> = groups.into_iter().collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        ranked.truncate(top_n);

        let top: Vec<GroupContribution> = ranked
            .into_iter()
            .map(|(group, value)| GroupContribution {
                group: group.to_string(),
                value,
            })
            .collect();
        let remainder = total - top.iter().map(|g| g.value).sum::<f64>();

        Self {
            column,
            remainder,
            top,
        }
    }

    pub fn total(&self) -> f64 {
        self.remainder + self.top.iter().map(|g| g.value).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ActivityKey;
    use crate::domain::results::ResultRow;
    use proptest::prelude::*;

    fn row(code: &str, location: &str, original: f64) -> ResultRow {
        ResultRow {
            key: ActivityKey::new("db", code),
            original,
            remaining: 0.0,
            direct_remaining: 0.0,
            target: original,
            direct_target: original,
            metadata: ActivityMetadata {
                location: location.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn keeps_top_groups_by_absolute_value() {
        let table = ResultsTable {
            rows: vec![
                row("a", "CH", 1.0),
                row("b", "DE", -6.0),
                row("c", "CH", 2.0),
                row("d", "FR", 0.5),
                row("e", "US", 4.0),
            ],
        };

        let summary = ContributionSummary::compute(&table, ResultColumn::Original, ContributionGroup::Location, 2);
        let groups: Vec<_> = summary.top.iter().map(|g| (g.group.as_str(), g.value)).collect();
        assert_eq!(groups, vec![("DE", -6.0), ("US", 4.0)]);
        assert_eq!(summary.remainder, 3.5);
    }

    #[test]
    fn fewer_groups_than_limit_leave_zero_remainder() {
        let table = ResultsTable {
            rows: vec![row("a", "CH", 1.0), row("b", "CH", 2.0)],
        };
        let summary = ContributionSummary::compute(&table, ResultColumn::Original, ContributionGroup::Location, 3);
        assert_eq!(summary.top.len(), 1);
        assert_eq!(summary.remainder, 0.0);
    }

    #[test]
    fn empty_table_is_all_remainder() {
        let summary = ContributionSummary::compute(
            &ResultsTable::default(),
            ResultColumn::Target,
            ContributionGroup::Location,
            3,
        );
        assert!(summary.top.is_empty());
        assert_eq!(summary.total(), 0.0);
    }

    proptest! {
        #[test]
        fn summary_totals_match_column_sum(
            values in prop::collection::vec((0usize..6, -1.0e6f64..1.0e6), 0..40),
            top_n in 0usize..5,
        ) {
            let locations = ["CH", "DE", "FR", "US", "CN", "GLO"];
            let rows: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, &(loc, v))| row(&i.to_string(), locations[loc], v))
                .collect();
            let table = ResultsTable { rows };

            let summary = ContributionSummary::compute(&table, ResultColumn::Original, ContributionGroup::Location, top_n);
            let expected = table.column_total(ResultColumn::Original);
            prop_assert!(summary.top.len() <= top_n);
            prop_assert!((summary.total() - expected).abs() <= 1e-6 * (1.0 + expected.abs()).max(1.0e3));
        }
    }
}
