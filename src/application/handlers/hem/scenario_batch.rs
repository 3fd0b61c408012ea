//! ScenarioBatchDriver - one engine run per technosphere scenario.

use std::time::Instant;
use tracing::info;

use super::{CalculationError, MultiLcaEngine, SolverMatrixGuard, TechnosphereScenario};
use crate::domain::calculation::{CalculationPlan, CalculationSetup, CalculationSummary, ScoreTable};
use crate::ports::LcaSolver;

/// Runs technosphere scenarios one after the other on a shared solver.
pub struct ScenarioBatchDriver {
    engine: MultiLcaEngine,
}

impl ScenarioBatchDriver {
    pub fn new(engine: MultiLcaEngine) -> Self {
        Self { engine }
    }

    /// For each scenario: drop the cached factorization, install the
    /// scenario technosphere, factorize it, and run the engine with the
    /// scenario's own biosphere as the single variant. Results merge into
    /// one table keyed by `(activity, scenario label)`.
    ///
    /// The original technosphere and biosphere are back in place when this
    /// returns, whether it succeeded or not.
    pub fn run<S: LcaSolver + ?Sized>(
        &self,
        solver: &mut S,
        setup: &CalculationSetup,
        scenarios: &[TechnosphereScenario],
    ) -> Result<ScoreTable, CalculationError> {
        let observer = self.engine.observer();
        let total = scenarios.len();
        let started = Instant::now();
        let mut table = ScoreTable::new();

        {
            let mut solver = SolverMatrixGuard::new(solver);

            for (i, scenario) in scenarios.iter().enumerate() {
                let position = i + 1;
                let scenario_started = Instant::now();
                observer.scenario_started(position, total, &scenario.label);

                solver.clear_factorization();
                solver.set_technosphere_matrix(scenario.matrices.technosphere.clone())?;
                solver.decompose_technosphere()?;

                let variants = [(scenario.label.clone(), scenario.matrices.biosphere.clone())];
                let scores = self.engine.run(&mut *solver, setup, &scenario.skip, &variants)?;
                table.merge(scores);

                let plan = CalculationPlan {
                    activities: setup.demands.len(),
                    methods: setup.methods.len(),
                    variants: 1,
                };
                observer.scenario_finished(
                    position,
                    total,
                    &scenario.label,
                    &CalculationSummary::new(plan, scenario_started.elapsed()),
                );
            }
        }

        let summary = CalculationSummary::new(
            CalculationPlan {
                activities: setup.demands.len(),
                methods: setup.methods.len(),
                variants: total,
            },
            started.elapsed(),
        );
        info!(
            scenarios = total,
            calculations = summary.plan.total(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Scenario batch complete"
        );
        observer.batch_finished(&summary);

        Ok(table)
    }
}
