//! Progress Observer Port - passive reporting hooks.
//!
//! Observers are called between iterations of the calculation loop. They
//! must not influence results and should return quickly.

use crate::domain::calculation::{CalculationPlan, CalculationSummary, ProgressSnapshot, VariantLabel};

/// Receives progress of engine runs and scenario batches. All hooks default
/// to doing nothing.
pub trait ProgressObserver: Send + Sync {
    fn run_started(&self, _plan: &CalculationPlan) {}

    /// Called at most once per reporting interval.
    fn progress(&self, _snapshot: &ProgressSnapshot) {}

    fn run_finished(&self, _summary: &CalculationSummary) {}

    /// `position` is 1-based.
    fn scenario_started(&self, _position: usize, _total: usize, _label: &VariantLabel) {}

    fn scenario_finished(
        &self,
        _position: usize,
        _total: usize,
        _label: &VariantLabel,
        _summary: &CalculationSummary,
    ) {
    }

    fn batch_finished(&self, _summary: &CalculationSummary) {}
}
