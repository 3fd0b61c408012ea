//! Reference `LcaSolver` on dense nalgebra LU factorization.
//!
//! Fine for the database sizes the test suite and small studies use; a
//! production backend would wrap a sparse direct solver behind the same
//! port.

use nalgebra::{DMatrix, DVector, Dyn, LU};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::adapters::database::DatabaseSnapshot;
use crate::domain::calculation::Demand;
use crate::domain::foundation::{ActivityKey, MethodId};
use crate::domain::matrix::{CscMatrix, CsrMatrix, MatrixIndex, TripletMatrix};
use crate::ports::{ExchangeKind, LcaSolver, SolverError};

type Factorization = LU<f64, Dyn, Dyn>;

/// In-memory solver holding the active matrices, impact methods and the
/// state of the last calculation.
pub struct InMemoryLcaSolver {
    index: MatrixIndex,
    technosphere: CsrMatrix,
    biosphere: CscMatrix,
    methods: HashMap<MethodId, Vec<(ActivityKey, f64)>>,
    factorization: Option<Factorization>,
    /// Per activity column: `(flow row, B[row, col] * supply[col])`.
    inventory: Option<Vec<Vec<(usize, f64)>>>,
    characterization: Option<Vec<f64>>,
    scores: Option<Vec<f64>>,
}

impl InMemoryLcaSolver {
    pub fn new(
        index: MatrixIndex,
        technosphere: CsrMatrix,
        biosphere: CscMatrix,
        methods: HashMap<MethodId, Vec<(ActivityKey, f64)>>,
    ) -> Result<Self, SolverError> {
        check_shape(technosphere.shape(), index.technosphere_shape())?;
        check_shape(biosphere.shape(), index.biosphere_shape())?;
        Ok(Self {
            index,
            technosphere,
            biosphere,
            methods,
            factorization: None,
            inventory: None,
            characterization: None,
            scores: None,
        })
    }

    /// Builds the matrices from a snapshot.
    ///
    /// Activities and flows are indexed in key order; every activity
    /// supplies one product at the same position. An activity without
    /// production exchanges gets its `production_amount` on the diagonal.
    /// Technosphere inputs enter with a negative sign.
    pub fn from_snapshot(snapshot: &DatabaseSnapshot) -> Result<Self, SolverError> {
        let mut activities: Vec<ActivityKey> =
            snapshot.activities.iter().map(|a| a.key.clone()).collect();
        activities.sort();
        let mut flows: Vec<ActivityKey> =
            snapshot.biosphere_flows.iter().map(|f| f.key.clone()).collect();
        flows.sort();

        let index = MatrixIndex::new(activities.clone(), activities, flows)?;
        let (nprod, nact) = index.technosphere_shape();
        let mut technosphere = TripletMatrix::new(nprod, nact);
        let mut biosphere = TripletMatrix::new(index.biosphere_shape().0, nact);

        for exchange in &snapshot.exchanges {
            let col = index.activity(&exchange.output)?;
            match exchange.kind {
                ExchangeKind::Production => {
                    technosphere.add(index.product(&exchange.input)?, col, exchange.amount)?
                }
                ExchangeKind::Technosphere => {
                    technosphere.add(index.product(&exchange.input)?, col, -exchange.amount)?
                }
                ExchangeKind::Biosphere => {
                    biosphere.add(index.biosphere(&exchange.input)?, col, exchange.amount)?
                }
            }
        }

        let producers: HashSet<&ActivityKey> = snapshot
            .exchanges
            .iter()
            .filter(|e| e.kind == ExchangeKind::Production)
            .map(|e| &e.output)
            .collect();
        for activity in &snapshot.activities {
            if !producers.contains(&activity.key) {
                let pos = index.activity(&activity.key)?;
                technosphere.add(pos, pos, activity.production_amount)?;
            }
        }

        let methods = snapshot
            .methods
            .iter()
            .map(|m| (m.id.clone(), m.factors.clone()))
            .collect();

        debug!(
            activities = nact,
            flows = index.biosphere_shape().0,
            technosphere_nnz = technosphere.nnz(),
            biosphere_nnz = biosphere.nnz(),
            "Solver matrices built from snapshot"
        );

        Self::new(index, technosphere.to_csr(), biosphere.to_csc(), methods)
    }

    pub fn has_factorization(&self) -> bool {
        self.factorization.is_some()
    }

    fn factorize(matrix: &CsrMatrix) -> Result<Factorization, SolverError> {
        let (nrows, ncols) = matrix.shape();
        if nrows != ncols {
            return Err(SolverError::NotSquare { nrows, ncols });
        }
        let mut dense = DMatrix::<f64>::zeros(nrows, ncols);
        for (row, col, value) in matrix.iter() {
            dense[(row, col)] = value;
        }
        let lu = dense.lu();
        if !lu.is_invertible() {
            return Err(SolverError::Singular);
        }
        Ok(lu)
    }

    fn demand_vector(&self, demand: &Demand) -> Result<DVector<f64>, SolverError> {
        let mut vector = DVector::<f64>::zeros(self.index.technosphere_shape().0);
        for (key, amount) in demand.entries() {
            vector[self.index.product(key)?] += amount;
        }
        Ok(vector)
    }
}

fn check_shape(actual: (usize, usize), expected: (usize, usize)) -> Result<(), SolverError> {
    if actual != expected {
        return Err(SolverError::ShapeMismatch {
            nrows: actual.0,
            ncols: actual.1,
            expected_rows: expected.0,
            expected_cols: expected.1,
        });
    }
    Ok(())
}

impl LcaSolver for InMemoryLcaSolver {
    fn index(&self) -> &MatrixIndex {
        &self.index
    }

    fn technosphere_matrix(&self) -> &CsrMatrix {
        &self.technosphere
    }

    fn biosphere_matrix(&self) -> &CscMatrix {
        &self.biosphere
    }

    fn set_technosphere_matrix(&mut self, matrix: CsrMatrix) -> Result<(), SolverError> {
        check_shape(matrix.shape(), self.index.technosphere_shape())?;
        self.technosphere = matrix;
        self.factorization = None;
        Ok(())
    }

    fn set_biosphere_matrix(&mut self, matrix: CscMatrix) -> Result<(), SolverError> {
        check_shape(matrix.shape(), self.index.biosphere_shape())?;
        self.biosphere = matrix;
        Ok(())
    }

    fn clear_factorization(&mut self) {
        self.factorization = None;
    }

    fn decompose_technosphere(&mut self) -> Result<(), SolverError> {
        self.factorization = Some(Self::factorize(&self.technosphere)?);
        Ok(())
    }

    fn recompute_inventory(&mut self, demand: &Demand) -> Result<(), SolverError> {
        let demand = self.demand_vector(demand)?;
        let supply = match &self.factorization {
            Some(lu) => lu.solve(&demand),
            None => Self::factorize(&self.technosphere)?.solve(&demand),
        }
        .ok_or(SolverError::Singular)?;

        let ncols = self.biosphere.shape().1;
        let inventory: Vec<Vec<(usize, f64)>> = (0..ncols)
            .map(|col| {
                self.biosphere
                    .col(col)
                    .map(|(row, value)| (row, value * supply[col]))
                    .collect()
            })
            .collect();

        self.inventory = Some(inventory);
        self.scores = None;
        Ok(())
    }

    fn switch_method(&mut self, method: &MethodId) -> Result<(), SolverError> {
        let factors = self
            .methods
            .get(method)
            .ok_or_else(|| SolverError::UnknownMethod(method.clone()))?;

        let mut characterization = vec![0.0; self.index.biosphere_shape().0];
        // Methods cover flows beyond this database; unindexed ones carry no weight here.
        for (flow, factor) in factors {
            if let Ok(row) = self.index.biosphere(flow) {
                characterization[row] += factor;
            }
        }

        self.characterization = Some(characterization);
        self.scores = None;
        Ok(())
    }

    fn characterize(&mut self) -> Result<(), SolverError> {
        let inventory = self.inventory.as_ref().ok_or(SolverError::NoInventory)?;
        let factors = self.characterization.as_ref().ok_or(SolverError::NoMethod)?;

        let scores: Vec<f64> = inventory
            .iter()
            .map(|column| column.iter().map(|&(row, value)| factors[row] * value).sum::<f64>())
            .collect();

        self.scores = Some(scores);
        Ok(())
    }

    fn activity_scores(&self) -> Result<&[f64], SolverError> {
        self.scores.as_deref().ok_or(SolverError::NotCharacterized)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::{BiosphereFlow, ImpactMethod};
    use crate::ports::{ActivityRecord, ExchangeRecord};

    fn key(code: &str) -> ActivityKey {
        ActivityKey::new("db", code)
    }

    fn co2() -> ActivityKey {
        ActivityKey::new("biosphere3", "co2")
    }

    fn gwp() -> MethodId {
        MethodId::new(["IPCC", "GWP100"]).unwrap()
    }

    fn activity(code: &str) -> ActivityRecord {
        ActivityRecord {
            key: key(code),
            name: code.to_string(),
            reference_product: code.to_string(),
            unit: "kg".into(),
            location: "GLO".into(),
            production_amount: 1.0,
            classifications: vec![],
        }
    }

    fn exchange(input: ActivityKey, output: &str, amount: f64, kind: ExchangeKind) -> ExchangeRecord {
        ExchangeRecord {
            input,
            output: key(output),
            amount,
            kind,
        }
    }

    /// `b` uses 2 of `a`; `a` emits 3 co2, `b` emits 1 co2.
    fn snapshot() -> DatabaseSnapshot {
        DatabaseSnapshot {
            activities: vec![activity("a"), activity("b")],
            exchanges: vec![
                exchange(key("a"), "b", 2.0, ExchangeKind::Technosphere),
                exchange(co2(), "a", 3.0, ExchangeKind::Biosphere),
                exchange(co2(), "b", 1.0, ExchangeKind::Biosphere),
            ],
            biosphere_flows: vec![BiosphereFlow {
                key: co2(),
                name: "Carbon dioxide".into(),
                unit: "kg".into(),
                categories: vec!["air".into()],
            }],
            methods: vec![ImpactMethod {
                id: gwp(),
                factors: vec![(co2(), 1.0), (ActivityKey::new("biosphere3", "ch4"), 28.0)],
            }],
            classification_tree: vec![],
        }
    }

    fn scores_for(solver: &mut InMemoryLcaSolver, code: &str) -> Vec<f64> {
        solver
            .recompute_inventory(&Demand::single(key(code), 1.0))
            .unwrap();
        solver.switch_method(&gwp()).unwrap();
        solver.characterize().unwrap();
        solver.activity_scores().unwrap().to_vec()
    }

    #[test]
    fn builds_technosphere_with_signs() {
        let solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        let tech = solver.technosphere_matrix();
        assert_eq!(tech.get(0, 0), 1.0);
        assert_eq!(tech.get(1, 1), 1.0);
        assert_eq!(tech.get(0, 1), -2.0);
        assert_eq!(solver.biosphere_matrix().get(0, 0), 3.0);
    }

    #[test]
    fn production_exchange_replaces_default_diagonal() {
        let mut snap = snapshot();
        snap.activities[1].production_amount = 5.0;
        snap.exchanges
            .push(exchange(key("b"), "b", 4.0, ExchangeKind::Production));

        let solver = InMemoryLcaSolver::from_snapshot(&snap).unwrap();
        let tech = solver.technosphere_matrix();
        assert_eq!(tech.get(0, 0), 1.0);
        assert_eq!(tech.get(1, 1), 4.0);
    }

    #[test]
    fn scores_are_column_contributions() {
        let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        solver.decompose_technosphere().unwrap();

        let scores = scores_for(&mut solver, "b");
        assert!((scores[0] - 6.0).abs() < 1e-12);
        assert!((scores[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn solves_without_cached_factorization() {
        let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        assert!(!solver.has_factorization());

        let scores = scores_for(&mut solver, "a");
        assert!((scores[0] - 3.0).abs() < 1e-12);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn installing_technosphere_drops_factorization() {
        let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        solver.decompose_technosphere().unwrap();

        let mut triplets = solver.technosphere_matrix().to_triplets();
        triplets.zero(0, 1).unwrap();
        solver.set_technosphere_matrix(triplets.to_csr()).unwrap();

        assert!(!solver.has_factorization());
        let scores = scores_for(&mut solver, "b");
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn inventory_uses_biosphere_active_at_recompute() {
        let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        let original = solver.biosphere_matrix().clone();
        solver.recompute_inventory(&Demand::single(key("b"), 1.0)).unwrap();

        let mut triplets = original.to_triplets();
        triplets.zero(0, 0).unwrap();
        solver.set_biosphere_matrix(triplets.to_csc()).unwrap();

        solver.switch_method(&gwp()).unwrap();
        solver.characterize().unwrap();
        assert!((solver.activity_scores().unwrap()[0] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_wrong_shapes() {
        let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        let err = solver
            .set_technosphere_matrix(TripletMatrix::new(3, 3).to_csr())
            .unwrap_err();
        assert!(matches!(err, SolverError::ShapeMismatch { nrows: 3, .. }));
    }

    #[test]
    fn singular_technosphere_is_reported() {
        let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        solver
            .set_technosphere_matrix(TripletMatrix::new(2, 2).to_csr())
            .unwrap();
        assert_eq!(solver.decompose_technosphere(), Err(SolverError::Singular));
    }

    #[test]
    fn characterize_requires_inventory_and_method() {
        let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        assert_eq!(solver.characterize(), Err(SolverError::NoInventory));

        solver.recompute_inventory(&Demand::single(key("a"), 1.0)).unwrap();
        assert_eq!(solver.characterize(), Err(SolverError::NoMethod));
        assert_eq!(solver.activity_scores(), Err(SolverError::NotCharacterized));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap();
        let other = MethodId::new(["ReCiPe"]).unwrap();
        assert_eq!(
            solver.switch_method(&other),
            Err(SolverError::UnknownMethod(other.clone()))
        );
    }

    #[test]
    fn exchange_with_unknown_key_fails_build() {
        let mut snapshot = snapshot();
        snapshot
            .exchanges
            .push(exchange(key("zz"), "a", 1.0, ExchangeKind::Technosphere));
        assert!(matches!(
            InMemoryLcaSolver::from_snapshot(&snapshot),
            Err(SolverError::Index(_))
        ));
    }
}
