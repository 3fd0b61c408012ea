//! Scenario matrix generation for a whole pair set.

use tracing::debug;

use crate::domain::calculation::VariantLabel;
use crate::domain::exchange::{ScenarioPairs, SkipSet};
use crate::domain::matrix::{CscMatrix, MatrixError, ScenarioMatrices, ScenarioMatrixBuilder};
use crate::ports::LcaSolver;

/// One technosphere scenario for the batch driver.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnosphereScenario {
    pub label: VariantLabel,
    pub matrices: ScenarioMatrices,
    pub skip: SkipSet,
}

/// Every matrix variant of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioMatrixSet {
    /// `original` followed by one `(scenario, direct_remaining)` per scenario.
    pub biosphere_variants: Vec<(VariantLabel, CscMatrix)>,
    /// One `(scenario, remaining)` entry per scenario.
    pub technosphere_scenarios: Vec<TechnosphereScenario>,
}

/// Builds scenario matrices from the solver's current matrices.
///
/// Each scenario's biosphere is used twice: alone against the original
/// technosphere (`direct_remaining`) and together with its own
/// technosphere (`remaining`).
pub fn generate_scenario_matrices<S: LcaSolver + ?Sized>(
    solver: &S,
    pairs: &ScenarioPairs,
    skip: &SkipSet,
) -> Result<ScenarioMatrixSet, MatrixError> {
    let builder = ScenarioMatrixBuilder::new(
        solver.technosphere_matrix(),
        solver.biosphere_matrix(),
        solver.index(),
    )?;

    let mut biosphere_variants = vec![(VariantLabel::original(), solver.biosphere_matrix().clone())];
    let mut technosphere_scenarios = Vec::with_capacity(pairs.len());

    for (label, scenario_pairs) in pairs.iter() {
        let matrices = builder.build(scenario_pairs)?;
        if let Some(scenario) = label.scenario() {
            biosphere_variants.push((
                VariantLabel::direct_remaining(scenario),
                matrices.biosphere.clone(),
            ));
        }
        technosphere_scenarios.push(TechnosphereScenario {
            label: label.clone(),
            matrices,
            skip: skip.clone(),
        });
    }

    debug!(
        biosphere_variants = biosphere_variants.len(),
        technosphere_scenarios = technosphere_scenarios.len(),
        "Generated scenario matrices"
    );

    Ok(ScenarioMatrixSet {
        biosphere_variants,
        technosphere_scenarios,
    })
}
