//! Results table types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ActivityKey;

/// Human-readable description of an activity joined into result rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityMetadata {
    pub name: String,
    pub reference_product: String,
    pub unit: String,
    pub location: String,
}

/// Numeric column of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultColumn {
    Original,
    Remaining,
    DirectRemaining,
    /// `original - remaining`
    Target,
    /// `original - direct_remaining`
    DirectTarget,
}

impl ResultColumn {
    /// Columns in reporting order.
    pub const REPORTED: [ResultColumn; 5] = [
        ResultColumn::Original,
        ResultColumn::Remaining,
        ResultColumn::Target,
        ResultColumn::DirectRemaining,
        ResultColumn::DirectTarget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultColumn::Original => "original",
            ResultColumn::Remaining => "remaining",
            ResultColumn::DirectRemaining => "direct_remaining",
            ResultColumn::Target => "target",
            ResultColumn::DirectTarget => "direct_target",
        }
    }
}

impl fmt::Display for ResultColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contributing activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub key: ActivityKey,
    pub original: f64,
    pub remaining: f64,
    pub direct_remaining: f64,
    pub target: f64,
    pub direct_target: f64,
    pub metadata: ActivityMetadata,
}

impl ResultRow {
    pub fn value(&self, column: ResultColumn) -> f64 {
        match column {
            ResultColumn::Original => self.original,
            ResultColumn::Remaining => self.remaining,
            ResultColumn::DirectRemaining => self.direct_remaining,
            ResultColumn::Target => self.target,
            ResultColumn::DirectTarget => self.direct_target,
        }
    }
}

/// Rows sorted by descending `|original|`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsTable {
    pub rows: Vec<ResultRow>,
}

impl ResultsTable {
    pub fn column_total(&self, column: ResultColumn) -> f64 {
        self.rows.iter().map(|r| r.value(column)).sum()
    }

    pub fn row(&self, key: &ActivityKey) -> Option<&ResultRow> {
        self.rows.iter().find(|r| &r.key == key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
