//! Functional units and calculation setup.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActivityKey, MethodId};

/// Amounts of activity outputs to solve the system for. Normally holds a
/// single `(activity, amount)` entry; the first entry names the demand in
/// the score table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Demand(Vec<(ActivityKey, f64)>);

impl Demand {
    pub fn single(key: ActivityKey, amount: f64) -> Self {
        Self(vec![(key, amount)])
    }

    pub fn from_entries(entries: Vec<(ActivityKey, f64)>) -> Self {
        Self(entries)
    }

    /// The activity this demand is reported under.
    pub fn reference_key(&self) -> Option<&ActivityKey> {
        self.0.first().map(|(key, _)| key)
    }

    pub fn entries(&self) -> &[(ActivityKey, f64)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered demands and impact methods for one engine run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationSetup {
    pub demands: Vec<Demand>,
    pub methods: Vec<MethodId>,
}

impl CalculationSetup {
    pub fn new(demands: Vec<Demand>, methods: Vec<MethodId>) -> Self {
        Self { demands, methods }
    }
}
