//! Command handlers.

pub mod hem;

pub use hem::{
    generate_scenario_matrices, CalculationError, ExchangePairExtractor, ExtractedPairs,
    HemAnalysisError, HemAnalysisReport, MultiLcaEngine, RunHemAnalysisCommand,
    RunHemAnalysisHandler, RunHemAnalysisResult, ScenarioBatchDriver, ScenarioMatrixSet,
    SolverMatrixGuard, TechnosphereScenario, DEFAULT_PROGRESS_INTERVAL,
};
