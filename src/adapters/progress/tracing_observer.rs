//! Progress observer that logs through `tracing`.

use tracing::info;

use super::format::{format_count, format_duration, Spinner};
use crate::domain::calculation::{
    CalculationPlan, CalculationSummary, ProgressSnapshot, VariantLabel,
};
use crate::ports::ProgressObserver;

/// Emits run, scenario and periodic progress events at `info` level.
#[derive(Debug, Default)]
pub struct TracingProgressObserver {
    spinner: Spinner,
}

impl TracingProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// One progress line: `●∙∙∙ 1.2k LCA/s | 45.0% | ETA: 3m07s | duration: 42s`.
    pub fn progress_line(&self, snapshot: &ProgressSnapshot) -> String {
        let eta = snapshot
            .eta
            .map(format_duration)
            .unwrap_or_else(|| "estimating...".to_string());
        format!(
            "{} {} LCA/s | {:.1}% | ETA: {} | duration: {}",
            self.spinner.tick(),
            format_count(snapshot.throughput),
            snapshot.percent(),
            eta,
            format_duration(snapshot.elapsed)
        )
    }
}

impl ProgressObserver for TracingProgressObserver {
    fn run_started(&self, plan: &CalculationPlan) {
        info!(
            activities = plan.activities,
            methods = plan.methods,
            variants = plan.variants,
            total = %format_count(plan.total() as f64),
            "Starting multi-LCA run"
        );
    }

    fn progress(&self, snapshot: &ProgressSnapshot) {
        info!(completed = snapshot.completed, "{}", self.progress_line(snapshot));
    }

    fn run_finished(&self, summary: &CalculationSummary) {
        info!(
            duration = %format_duration(summary.elapsed),
            throughput = %format_count(summary.throughput),
            "Multi-LCA run finished"
        );
    }

    fn scenario_started(&self, position: usize, total: usize, label: &VariantLabel) {
        info!(position, total, scenario = %label, "Running scenario");
    }

    fn scenario_finished(
        &self,
        position: usize,
        total: usize,
        label: &VariantLabel,
        summary: &CalculationSummary,
    ) {
        info!(
            position,
            total,
            scenario = %label,
            duration = %format_duration(summary.elapsed),
            throughput = %format_count(summary.throughput),
            "Scenario finished"
        );
    }

    fn batch_finished(&self, summary: &CalculationSummary) {
        info!(
            calculations = summary.plan.total(),
            duration = %format_duration(summary.elapsed),
            throughput = %format_count(summary.throughput),
            "Scenario batch finished"
        );
    }
}
