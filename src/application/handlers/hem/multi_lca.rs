//! MultiLcaEngine - scores for every demand × biosphere variant × method.

use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use super::SolverMatrixGuard;
use crate::domain::calculation::{
    CalculationPlan, CalculationSetup, CalculationSummary, Demand, MethodScore,
    ProgressSnapshot, ScoreKey, ScoreTable, VariantLabel,
};
use crate::domain::exchange::SkipSet;
use crate::domain::foundation::MethodId;
use crate::domain::matrix::CscMatrix;
use crate::ports::{LcaSolver, ProgressObserver, SolverError};

/// Minimum time between two progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("Demand at position {position} has no entries")]
    EmptyDemand { position: usize },

    #[error("Solver failed: {0}")]
    Solver(#[from] SolverError),
}

/// Runs batches of LCA calculations on one exclusively borrowed solver.
pub struct MultiLcaEngine {
    observer: Arc<dyn ProgressObserver>,
    progress_interval: Duration,
}

impl MultiLcaEngine {
    pub fn new(observer: Arc<dyn ProgressObserver>) -> Self {
        Self {
            observer,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn observer(&self) -> &Arc<dyn ProgressObserver> {
        &self.observer
    }

    /// Runs against the solver's current biosphere, labelled `original`.
    pub fn run_original<S: LcaSolver + ?Sized>(
        &self,
        solver: &mut S,
        setup: &CalculationSetup,
        skip: &SkipSet,
    ) -> Result<ScoreTable, CalculationError> {
        let variants = [(VariantLabel::original(), solver.biosphere_matrix().clone())];
        self.run(solver, setup, skip, &variants)
    }

    /// Scores every demand under every biosphere variant and method.
    ///
    /// # Algorithm
    /// For each demand, for each variant: a demand whose reference activity
    /// is in `skip` gets a zero score for every method without touching
    /// the solver. Otherwise the variant's biosphere is installed, the
    /// inventory recomputed, and every method characterized in turn; the
    /// per-activity scores are labelled through the solver's reverse index.
    ///
    /// The solver's biosphere matrix is restored before returning, also on
    /// error. The technosphere factorization is reused throughout.
    ///
    /// # Errors
    /// - `EmptyDemand` if any demand has no entries (checked before any
    ///   calculation)
    /// - `Solver` for any backend failure
    pub fn run<S: LcaSolver + ?Sized>(
        &self,
        solver: &mut S,
        setup: &CalculationSetup,
        skip: &SkipSet,
        variants: &[(VariantLabel, CscMatrix)],
    ) -> Result<ScoreTable, CalculationError> {
        // 1. Validate every demand up front
        if let Some(position) = setup.demands.iter().position(Demand::is_empty) {
            return Err(CalculationError::EmptyDemand { position });
        }

        let plan = CalculationPlan {
            activities: setup.demands.len(),
            methods: setup.methods.len(),
            variants: variants.len(),
        };
        self.observer.run_started(&plan);

        let started = Instant::now();
        let mut last_report = started;
        let mut table = ScoreTable::new();
        let zero_scores: Vec<MethodScore> =
            setup.methods.iter().cloned().map(MethodScore::zero).collect();

        // 2. Calculate with the biosphere guarded
        {
            let mut solver = SolverMatrixGuard::biosphere_only(solver);
            let mut installed: Option<usize> = None;

            for (position, demand) in setup.demands.iter().enumerate() {
                let activity = demand
                    .reference_key()
                    .ok_or(CalculationError::EmptyDemand { position })?;

                for (variant, (label, biosphere)) in variants.iter().enumerate() {
                    let key = ScoreKey::new(activity.clone(), label.clone());
                    if skip.contains(activity) {
                        table.insert(key, zero_scores.clone());
                        continue;
                    }

                    if installed != Some(variant) {
                        solver.set_biosphere_matrix(biosphere.clone())?;
                        installed = Some(variant);
                    }
                    solver.recompute_inventory(demand)?;
                    table.insert(key, characterize_all(&mut *solver, &setup.methods)?);
                }

                if last_report.elapsed() >= self.progress_interval {
                    self.observer.progress(&ProgressSnapshot::compute(
                        plan,
                        position + 1,
                        started.elapsed(),
                    ));
                    last_report = Instant::now();
                }
            }
        }

        // 3. Report
        let summary = CalculationSummary::new(plan, started.elapsed());
        debug!(
            calculations = plan.total(),
            entries = table.len(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Multi-LCA run complete"
        );
        self.observer.run_finished(&summary);

        Ok(table)
    }
}

/// Characterizes the current inventory with every method. Zero
/// contributions are left out.
fn characterize_all<S: LcaSolver + ?Sized>(
    solver: &mut S,
    methods: &[MethodId],
) -> Result<Vec<MethodScore>, SolverError> {
    let mut scores = Vec::with_capacity(methods.len());
    for method in methods {
        solver.switch_method(method)?;
        solver.characterize()?;

        let activities = &solver.reverse_index().activities;
        let contributions = solver
            .activity_scores()?
            .iter()
            .zip(activities)
            .filter(|(score, _)| **score != 0.0)
            .map(|(score, key)| (key.clone(), *score))
            .collect();
        scores.push(MethodScore::from_contributions(method.clone(), contributions));
    }
    Ok(scores)
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::progress::NoopProgressObserver;
    use crate::adapters::solver::InMemoryLcaSolver;
    use crate::application::handlers::hem::test_support::{chain_solver, co2, flow_count, gwp, key};
    use crate::domain::matrix::{CsrMatrix, MatrixIndex};
    use std::sync::Mutex;

    fn engine() -> MultiLcaEngine {
        MultiLcaEngine::new(Arc::new(NoopProgressObserver))
    }

    fn setup(codes: &[&str]) -> CalculationSetup {
        CalculationSetup::new(
            codes.iter().map(|c| Demand::single(key(c), 1.0)).collect(),
            vec![gwp(), flow_count()],
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Delegating solver that counts inventory recomputations and keeps
    /// every installed biosphere matrix.
    struct CountingSolver {
        inner: InMemoryLcaSolver,
        inventories: usize,
        installed: Vec<CscMatrix>,
    }

    impl CountingSolver {
        fn new(inner: InMemoryLcaSolver) -> Self {
            Self {
                inner,
                inventories: 0,
                installed: Vec::new(),
            }
        }
    }

    impl LcaSolver for CountingSolver {
        fn index(&self) -> &MatrixIndex {
            self.inner.index()
        }
        fn technosphere_matrix(&self) -> &CsrMatrix {
            self.inner.technosphere_matrix()
        }
        fn biosphere_matrix(&self) -> &CscMatrix {
            self.inner.biosphere_matrix()
        }
        fn set_technosphere_matrix(&mut self, matrix: CsrMatrix) -> Result<(), SolverError> {
            self.inner.set_technosphere_matrix(matrix)
        }
        fn set_biosphere_matrix(&mut self, matrix: CscMatrix) -> Result<(), SolverError> {
            self.installed.push(matrix.clone());
            self.inner.set_biosphere_matrix(matrix)
        }
        fn clear_factorization(&mut self) {
            self.inner.clear_factorization()
        }
        fn decompose_technosphere(&mut self) -> Result<(), SolverError> {
            self.inner.decompose_technosphere()
        }
        fn recompute_inventory(&mut self, demand: &Demand) -> Result<(), SolverError> {
            self.inventories += 1;
            self.inner.recompute_inventory(demand)
        }
        fn switch_method(&mut self, method: &MethodId) -> Result<(), SolverError> {
            self.inner.switch_method(method)
        }
        fn characterize(&mut self) -> Result<(), SolverError> {
            self.inner.characterize()
        }
        fn activity_scores(&self) -> Result<&[f64], SolverError> {
            self.inner.activity_scores()
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn run_started(&self, plan: &CalculationPlan) {
            self.events.lock().unwrap().push(format!("start {}", plan.total()));
        }
        fn progress(&self, snapshot: &ProgressSnapshot) {
            self.events.lock().unwrap().push(format!("progress {}", snapshot.completed));
        }
        fn run_finished(&self, _summary: &CalculationSummary) {
            self.events.lock().unwrap().push("finish".into());
        }
    }

    #[test]
    fn original_scores_split_by_contributing_activity() {
        let mut solver = chain_solver();
        solver.decompose_technosphere().unwrap();

        let table = engine()
            .run_original(&mut solver, &setup(&["meal"]), &SkipSet::new())
            .unwrap();

        let scores = table.get(&key("meal"), &VariantLabel::original()).unwrap();
        assert_eq!(scores.len(), 2);
        assert!(close(scores[0].score, 10.7));
        assert!(close(scores[1].score, 3.7));

        let contributions: Vec<_> = scores[0].contributions.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(contributions, vec![key("beef"), key("feed"), key("meal")]);
    }

    #[test]
    fn skipped_demand_scores_zero_without_solving() {
        let mut solver = CountingSolver::new(chain_solver());
        let skip: SkipSet = [key("pork")].into_iter().collect();

        let table = engine()
            .run_original(&mut solver, &setup(&["pork", "meal"]), &skip)
            .unwrap();

        let pork = table.get(&key("pork"), &VariantLabel::original()).unwrap();
        assert_eq!(pork.len(), 2);
        assert!(pork.iter().all(|s| s.score == 0.0 && s.contributions.is_empty()));
        assert_eq!(solver.inventories, 1);
    }

    #[test]
    fn unrelated_biosphere_edits_leave_scores_unchanged() {
        let mut solver = chain_solver();
        let original = solver.biosphere_matrix().clone();
        let mut edited = original.to_triplets();
        let row = solver.index().biosphere(&co2()).unwrap();
        let col = solver.index().activity(&key("meal")).unwrap();
        edited.zero(row, col).unwrap();

        let variants = [
            (VariantLabel::original(), original),
            (VariantLabel::remaining("Meals"), edited.to_csc()),
        ];
        let table = engine()
            .run(&mut solver, &setup(&["feed"]), &SkipSet::new(), &variants)
            .unwrap();

        assert_eq!(
            table.get(&key("feed"), &VariantLabel::original()),
            table.get(&key("feed"), &VariantLabel::remaining("Meals"))
        );
    }

    #[test]
    fn variant_installs_share_storage() {
        let mut solver = CountingSolver::new(chain_solver());
        let original = solver.biosphere_matrix().clone();
        let mut edited = original.to_triplets();
        let row = solver.index().biosphere(&co2()).unwrap();
        let col = solver.index().activity(&key("feed")).unwrap();
        edited.zero(row, col).unwrap();
        let variants = [
            (VariantLabel::original(), original.clone()),
            (VariantLabel::direct_remaining("Crops"), edited.to_csc()),
        ];

        engine()
            .run(&mut solver, &setup(&["meal", "beef", "feed"]), &SkipSet::new(), &variants)
            .unwrap();

        // two variants per demand, then the restore
        assert_eq!(solver.installed.len(), 7);
        for (n, matrix) in solver.installed[..6].iter().enumerate() {
            assert!(matrix.shares_storage(&variants[n % 2].1));
        }
        assert!(solver.installed[6].shares_storage(&original));
    }

    #[test]
    fn biosphere_is_restored_after_run() {
        let mut solver = chain_solver();
        let original = solver.biosphere_matrix().clone();
        let (rows, cols) = original.shape();
        let variants = [(
            VariantLabel::direct_remaining("Meat"),
            crate::domain::matrix::TripletMatrix::new(rows, cols).to_csc(),
        )];

        let table = engine()
            .run(&mut solver, &setup(&["meal"]), &SkipSet::new(), &variants)
            .unwrap();

        assert_eq!(
            table.score(&key("meal"), &VariantLabel::direct_remaining("Meat"), &gwp()),
            Some(0.0)
        );
        assert_eq!(solver.biosphere_matrix(), &original);
    }

    #[test]
    fn empty_demand_fails_before_calculating() {
        let mut solver = CountingSolver::new(chain_solver());
        let mut setup = setup(&["meal"]);
        setup.demands.push(Demand::default());

        let err = engine()
            .run_original(&mut solver, &setup, &SkipSet::new())
            .unwrap_err();

        assert_eq!(err, CalculationError::EmptyDemand { position: 1 });
        assert_eq!(solver.inventories, 0);
    }

    #[test]
    fn unknown_method_propagates() {
        let mut solver = chain_solver();
        let setup = CalculationSetup::new(
            vec![Demand::single(key("meal"), 1.0)],
            vec![MethodId::new(["ReCiPe"]).unwrap()],
        );
        let err = engine()
            .run_original(&mut solver, &setup, &SkipSet::new())
            .unwrap_err();
        assert!(matches!(err, CalculationError::Solver(SolverError::UnknownMethod(_))));
    }

    #[test]
    fn reports_progress_through_observer() {
        let observer = Arc::new(RecordingObserver::default());
        let engine = MultiLcaEngine::new(observer.clone()).with_progress_interval(Duration::ZERO);
        let mut solver = chain_solver();

        engine
            .run_original(&mut solver, &setup(&["meal", "beef"]), &SkipSet::new())
            .unwrap();

        let events = observer.events.lock().unwrap().clone();
        assert_eq!(events, vec!["start 4", "progress 1", "progress 2", "finish"]);
    }
}
