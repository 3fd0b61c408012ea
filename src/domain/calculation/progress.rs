//! Progress arithmetic for long calculation runs.

use std::time::Duration;

/// Elapsed time below which no ETA is estimated.
pub const ETA_WARMUP: Duration = Duration::from_secs(5);

/// Size of one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationPlan {
    pub activities: usize,
    pub methods: usize,
    pub variants: usize,
}

impl CalculationPlan {
    /// Number of single LCA calculations in the run.
    pub fn total(&self) -> usize {
        self.activities * self.methods * self.variants
    }

    /// Calculations performed per demand.
    pub fn per_activity(&self) -> usize {
        self.methods * self.variants
    }
}

/// Progress of a run after `completed` demands.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub plan: CalculationPlan,
    pub completed: usize,
    pub elapsed: Duration,
    /// Calculations per second, never below 1.
    pub throughput: f64,
    /// `None` while the run is still warming up.
    pub eta: Option<Duration>,
}

impl ProgressSnapshot {
    pub fn compute(plan: CalculationPlan, completed: usize, elapsed: Duration) -> Self {
        let throughput = throughput(completed * plan.per_activity(), elapsed);
        let eta = if elapsed < ETA_WARMUP {
            None
        } else {
            let remaining = plan.activities.saturating_sub(completed) * plan.per_activity();
            Some(Duration::from_secs_f64((remaining as f64 / throughput).max(1.0)))
        };

        Self {
            plan,
            completed,
            elapsed,
            throughput,
            eta,
        }
    }

    /// Share of demands completed, in percent.
    pub fn percent(&self) -> f64 {
        if self.plan.activities == 0 {
            return 100.0;
        }
        self.completed as f64 / self.plan.activities as f64 * 100.0
    }
}

/// Final numbers of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationSummary {
    pub plan: CalculationPlan,
    pub elapsed: Duration,
    pub throughput: f64,
}

impl CalculationSummary {
    pub fn new(plan: CalculationPlan, elapsed: Duration) -> Self {
        Self {
            plan,
            elapsed,
            throughput: throughput(plan.total(), elapsed),
        }
    }
}

fn throughput(calculations: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 1.0;
    }
    (calculations as f64 / secs).max(1.0)
}
