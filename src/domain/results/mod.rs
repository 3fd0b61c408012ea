//! Results module - reshaping scores into reporting tables.
//!
//! # Components
//!
//! - `ResultsAggregator` - score table -> `ResultsTable` with derived target columns
//! - `ContributionSummary` - top-N groups of one column plus a remainder row
//!
//! All functions here are pure: activity metadata is passed in by the caller.

mod aggregator;
mod contribution;
mod table;

pub use aggregator::{ResultsAggregator, ResultsError};
pub use contribution::{ContributionGroup, ContributionSummary, GroupContribution};
pub use table::{ActivityMetadata, ResultColumn, ResultRow, ResultsTable};
