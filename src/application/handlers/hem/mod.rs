//! HEM recalculation handlers.
//!
//! Leaf-first: pair extraction, scenario matrix generation, the multi-LCA
//! engine, the scenario batch driver, and the end-to-end run handler that
//! chains them.

mod extract_exchange_pairs;
mod generate_scenario_matrices;
mod multi_lca;
mod run_hem_analysis;
mod scenario_batch;
mod solver_guard;

#[cfg(test)]
pub(crate) mod test_support;

pub use extract_exchange_pairs::{ExchangePairExtractor, ExtractedPairs};
pub use generate_scenario_matrices::{
    generate_scenario_matrices, ScenarioMatrixSet, TechnosphereScenario,
};
pub use multi_lca::{CalculationError, MultiLcaEngine, DEFAULT_PROGRESS_INTERVAL};
pub use run_hem_analysis::{
    HemAnalysisError, HemAnalysisReport, RunHemAnalysisCommand, RunHemAnalysisHandler,
    RunHemAnalysisResult,
};
pub use scenario_batch::ScenarioBatchDriver;
pub use solver_guard::SolverMatrixGuard;
