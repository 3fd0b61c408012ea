//! RunHemAnalysisHandler - the full hypothetical extraction run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, info_span};

use super::{
    generate_scenario_matrices, CalculationError, ExchangePairExtractor, MultiLcaEngine,
    ScenarioBatchDriver, DEFAULT_PROGRESS_INTERVAL,
};
use crate::domain::calculation::{CalculationSetup, Demand, ScoreTable};
use crate::domain::classification::{unpack_classification, ClassificationTree};
use crate::domain::foundation::{ActivityKey, MethodId, RunId, ValidationError};
use crate::domain::matrix::MatrixError;
use crate::domain::results::{
    ActivityMetadata, ContributionSummary, ResultsAggregator, ResultsError, ResultsTable,
};
use crate::domain::scenario::{ScenarioAssignment, ScenarioError, ScenarioResolver, ScenarioSpec};
use crate::ports::{ActivityDatabase, DatabaseError, LcaSolver, ProgressObserver, SolverError};

/// Command to run a HEM analysis for one functional unit.
#[derive(Debug, Clone)]
pub struct RunHemAnalysisCommand {
    /// Activity whose output is demanded.
    pub functional_unit: ActivityKey,
    pub amount: f64,
    pub methods: Vec<MethodId>,
    pub scenarios: Vec<ScenarioSpec>,
    /// Classification system scenarios are matched in, e.g. `"CPC"`.
    pub classification_system: String,
    /// Label unmatched activities `Other` instead of unassigned.
    pub assign_other: bool,
}

/// Outcome of a HEM analysis run.
#[derive(Debug, Clone)]
pub struct RunHemAnalysisResult {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub assignment: ScenarioAssignment,
    /// Activities that scored zero without solving.
    pub skipped: Vec<ActivityKey>,
    pub scores: ScoreTable,
    pub results: ResultsTable,
    pub contributions: Vec<ContributionSummary>,
}

/// Serializable report of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct HemAnalysisReport<'a> {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub scenarios: &'a [String],
    pub skipped: &'a [ActivityKey],
    pub results: &'a ResultsTable,
    pub contributions: &'a [ContributionSummary],
}

impl RunHemAnalysisResult {
    pub fn report(&self) -> HemAnalysisReport<'_> {
        HemAnalysisReport {
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at: self.finished_at,
            scenarios: self.assignment.active_scenarios(),
            skipped: &self.skipped,
            results: &self.results,
            contributions: &self.contributions,
        }
    }
}

/// Error type for HEM analysis runs.
#[derive(Debug, Error)]
pub enum HemAnalysisError {
    #[error("Invalid command: {0}")]
    Validation(#[from] ValidationError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Results error: {0}")]
    Results(#[from] ResultsError),
}

/// Handler for HEM analysis runs.
pub struct RunHemAnalysisHandler {
    database: Arc<dyn ActivityDatabase>,
    tree: Arc<ClassificationTree>,
    observer: Arc<dyn ProgressObserver>,
    aggregator: ResultsAggregator,
    progress_interval: Duration,
}

impl RunHemAnalysisHandler {
    pub fn new(
        database: Arc<dyn ActivityDatabase>,
        tree: Arc<ClassificationTree>,
        observer: Arc<dyn ProgressObserver>,
    ) -> Self {
        Self {
            database,
            tree,
            observer,
            aggregator: ResultsAggregator::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_aggregator(mut self, aggregator: ResultsAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    fn engine(&self) -> MultiLcaEngine {
        MultiLcaEngine::new(self.observer.clone()).with_progress_interval(self.progress_interval)
    }

    pub fn handle<S: LcaSolver + ?Sized>(
        &self,
        cmd: RunHemAnalysisCommand,
        solver: &mut S,
    ) -> Result<RunHemAnalysisResult, HemAnalysisError> {
        let run_id = RunId::new();
        let started_at = Utc::now();
        let span = info_span!("hem_analysis", run_id = %run_id);
        let _entered = span.enter();

        // 1. Validate command
        validate(&cmd)?;
        self.database.activity(&cmd.functional_unit)?;

        // 2. Unpack classifications
        let activities = self.database.activities()?;
        let classified: Vec<(ActivityKey, Option<String>)> = activities
            .iter()
            .map(|a| {
                (
                    a.key.clone(),
                    unpack_classification(&a.classifications, &cmd.classification_system),
                )
            })
            .collect();
        if classified.iter().all(|(_, code)| code.is_none()) {
            return Err(ScenarioError::MissingClassificationSystem(cmd.classification_system).into());
        }

        // 3. Resolve scenarios
        let resolver = ScenarioResolver::new(&self.tree, cmd.assign_other);
        let assignment = resolver.assign(
            classified.iter().map(|(key, code)| (key, code.as_deref())),
            &cmd.scenarios,
        );
        info!(
            activities = assignment.len(),
            scenarios = ?assignment.active_scenarios(),
            "Scenarios resolved"
        );

        // 4. Extract exchange pairs
        let extracted = ExchangePairExtractor::new(self.database.clone()).extract(&assignment)?;

        // 5. Derive scenario matrices
        let matrices = generate_scenario_matrices(&*solver, &extracted.pairs, &extracted.skip)?;

        // 6. Original and direct scores, then technosphere scenarios
        let setup = CalculationSetup::new(
            vec![Demand::single(cmd.functional_unit.clone(), cmd.amount)],
            cmd.methods,
        );
        solver.decompose_technosphere()?;
        let mut scores = self.engine().run(
            &mut *solver,
            &setup,
            &extracted.skip,
            &matrices.biosphere_variants,
        )?;
        let hem_scores = ScenarioBatchDriver::new(self.engine()).run(
            &mut *solver,
            &setup,
            &matrices.technosphere_scenarios,
        )?;
        scores.merge(hem_scores);

        // 7. Aggregate
        let metadata: HashMap<ActivityKey, ActivityMetadata> = activities
            .iter()
            .map(|a| (a.key.clone(), a.metadata()))
            .collect();
        let results = self.aggregator.process(&scores, &metadata)?;
        let contributions = self.aggregator.contributions(&results);

        info!(
            rows = results.len(),
            calculations = scores.len(),
            "HEM analysis complete"
        );

        Ok(RunHemAnalysisResult {
            run_id,
            started_at,
            finished_at: Utc::now(),
            assignment,
            skipped: extracted.skip.into_iter().collect(),
            scores,
            results,
            contributions,
        })
    }
}

fn validate(cmd: &RunHemAnalysisCommand) -> Result<(), ValidationError> {
    if cmd.methods.is_empty() {
        return Err(ValidationError::empty_field("methods"));
    }
    if cmd.scenarios.is_empty() {
        return Err(ValidationError::empty_field("scenarios"));
    }
    if cmd.classification_system.trim().is_empty() {
        return Err(ValidationError::empty_field("classification_system"));
    }
    if !cmd.amount.is_finite() || cmd.amount == 0.0 {
        return Err(ValidationError::invalid_format(
            "amount",
            format!("expected a finite non-zero amount, got {}", cmd.amount),
        ));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::progress::NoopProgressObserver;
    use crate::application::handlers::hem::test_support::{chain_database, chain_solver, gwp, key, snapshot};
    use crate::domain::calculation::VariantLabel;
    use crate::domain::results::ResultColumn;

    fn handler() -> RunHemAnalysisHandler {
        let tree = ClassificationTree::build(&snapshot().classification_tree).unwrap();
        RunHemAnalysisHandler::new(
            Arc::new(chain_database()),
            Arc::new(tree),
            Arc::new(NoopProgressObserver),
        )
    }

    fn command(scenarios: Vec<ScenarioSpec>) -> RunHemAnalysisCommand {
        RunHemAnalysisCommand {
            functional_unit: key("meal"),
            amount: 1.0,
            methods: vec![gwp()],
            scenarios,
            classification_system: "CPC".into(),
            assign_other: false,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn runs_all_variants_and_aggregates() {
        let mut solver = chain_solver();
        let cmd = command(vec![ScenarioSpec::name("Meat"), ScenarioSpec::name("Crops")]);

        let result = handler().handle(cmd, &mut solver).unwrap();

        assert_eq!(result.assignment.active_scenarios(), &["Meat", "Crops"]);
        assert_eq!(result.skipped, vec![key("pork")]);

        let meal = key("meal");
        assert!(close(result.scores.score(&meal, &VariantLabel::original(), &gwp()).unwrap(), 10.7));
        assert!(close(result.scores.score(&meal, &VariantLabel::direct_remaining("Meat"), &gwp()).unwrap(), 3.2));
        assert!(close(result.scores.score(&meal, &VariantLabel::remaining("Meat"), &gwp()).unwrap(), 0.2));
        assert!(close(result.scores.score(&meal, &VariantLabel::remaining("Crops"), &gwp()).unwrap(), 7.7));
        assert_eq!(result.scores.len(), 5);

        let keys: Vec<_> = result.results.rows.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, vec![key("beef"), key("feed"), key("meal")]);
        let feed = result.results.row(&key("feed")).unwrap();
        assert!(close(feed.target, 3.0));
        assert!(close(feed.direct_target, 3.0));
        assert_eq!(feed.metadata.location, "US");
        assert!(close(result.results.column_total(ResultColumn::Original), 10.7));
        assert_eq!(result.contributions.len(), 5);
    }

    #[test]
    fn solver_matrices_are_untouched_after_run() {
        let mut solver = chain_solver();
        let technosphere = solver.technosphere_matrix().clone();
        let biosphere = solver.biosphere_matrix().clone();

        handler()
            .handle(command(vec![ScenarioSpec::name("Meat")]), &mut solver)
            .unwrap();

        assert_eq!(solver.technosphere_matrix(), &technosphere);
        assert_eq!(solver.biosphere_matrix(), &biosphere);
    }

    #[test]
    fn missing_classification_system_is_fatal() {
        let mut solver = chain_solver();
        let mut cmd = command(vec![ScenarioSpec::name("Meat")]);
        cmd.classification_system = "ISIC".into();

        let err = handler().handle(cmd, &mut solver).unwrap_err();
        assert!(matches!(
            err,
            HemAnalysisError::Scenario(ScenarioError::MissingClassificationSystem(ref s)) if s == "ISIC"
        ));
    }

    #[test]
    fn unknown_functional_unit_is_rejected() {
        let mut solver = chain_solver();
        let mut cmd = command(vec![ScenarioSpec::name("Meat")]);
        cmd.functional_unit = key("soup");

        let err = handler().handle(cmd, &mut solver).unwrap_err();
        assert!(matches!(err, HemAnalysisError::Database(DatabaseError::ActivityNotFound(_))));
    }

    #[test]
    fn empty_method_list_is_rejected() {
        let mut solver = chain_solver();
        let mut cmd = command(vec![ScenarioSpec::name("Meat")]);
        cmd.methods.clear();

        let err = handler().handle(cmd, &mut solver).unwrap_err();
        assert!(matches!(err, HemAnalysisError::Validation(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn unmatched_scenarios_produce_original_scores_only() {
        let mut solver = chain_solver();
        let result = handler()
            .handle(command(vec![ScenarioSpec::name("Fish")]), &mut solver)
            .unwrap();

        assert!(result.assignment.active_scenarios().is_empty());
        assert_eq!(result.scores.len(), 1);
        let beef = result.results.row(&key("beef")).unwrap();
        assert!(close(beef.target, beef.original));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut solver = chain_solver();
        let result = handler()
            .handle(command(vec![ScenarioSpec::name("Meat")]), &mut solver)
            .unwrap();

        let json = serde_json::to_value(result.report()).unwrap();
        assert_eq!(json["scenarios"][0], "Meat");
        assert!(json["results"]["rows"].as_array().unwrap().len() >= 2);
    }
}
