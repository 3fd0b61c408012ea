//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    generate_scenario_matrices, CalculationError, ExchangePairExtractor, ExtractedPairs,
    HemAnalysisError, HemAnalysisReport, MultiLcaEngine, RunHemAnalysisCommand,
    RunHemAnalysisHandler, RunHemAnalysisResult, ScenarioBatchDriver, ScenarioMatrixSet,
    SolverMatrixGuard, TechnosphereScenario, DEFAULT_PROGRESS_INTERVAL,
};
