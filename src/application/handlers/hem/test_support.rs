//! Shared fixture: a small food supply chain.
//!
//! `meal` uses 0.5 `beef` and 0.1 `pork`; `beef` uses 3 `feed`. Emissions:
//! `feed` 2 co2, `beef` 1 co2 + 0.5 ch4, `meal` 0.2 co2. `pork` has no
//! inputs at all. Under GWP (co2 1, ch4 28) one meal scores 10.7:
//! beef 7.5, feed 3.0, meal 0.2.

use crate::adapters::database::{BiosphereFlow, DatabaseSnapshot, ImpactMethod, InMemoryActivityDatabase};
use crate::adapters::solver::InMemoryLcaSolver;
use crate::domain::classification::ClassificationEntry;
use crate::domain::foundation::{ActivityKey, MethodId};
use crate::ports::{ActivityRecord, ExchangeKind, ExchangeRecord};

pub fn key(code: &str) -> ActivityKey {
    ActivityKey::new("food", code)
}

pub fn co2() -> ActivityKey {
    ActivityKey::new("biosphere3", "co2")
}

pub fn ch4() -> ActivityKey {
    ActivityKey::new("biosphere3", "ch4")
}

pub fn gwp() -> MethodId {
    MethodId::new(["IPCC", "GWP100"]).unwrap()
}

pub fn flow_count() -> MethodId {
    MethodId::new(["Inventory", "co2 only"]).unwrap()
}

fn activity(code: &str, cpc: &str, location: &str) -> ActivityRecord {
    ActivityRecord {
        key: key(code),
        name: format!("{code} production"),
        reference_product: code.to_string(),
        unit: "kg".into(),
        location: location.into(),
        production_amount: 1.0,
        classifications: vec![("CPC".into(), cpc.into())],
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

fn flow(key: ActivityKey, name: &str) -> BiosphereFlow {
    BiosphereFlow {
        key,
        name: name.into(),
        unit: "kg".into(),
        categories: vec!["air".into()],
    }
}

pub fn snapshot() -> DatabaseSnapshot {
    use ExchangeKind::*;
    DatabaseSnapshot {
        activities: vec![
            activity("feed", "0121: Maize", "US"),
            activity("beef", "0111: Beef", "BR"),
            activity("pork", "0112: Pork", "DE"),
            activity("meal", "0211: Dishes", "DE"),
        ],
        exchanges: vec![
            exchange(key("feed"), "beef", 3.0, Technosphere),
            exchange(key("beef"), "meal", 0.5, Technosphere),
            exchange(key("pork"), "meal", 0.1, Technosphere),
            exchange(co2(), "feed", 2.0, Biosphere),
            exchange(co2(), "beef", 1.0, Biosphere),
            exchange(ch4(), "beef", 0.5, Biosphere),
            exchange(co2(), "meal", 0.2, Biosphere),
        ],
        biosphere_flows: vec![flow(co2(), "Carbon dioxide"), flow(ch4(), "Methane")],
        methods: vec![
            ImpactMethod {
                id: gwp(),
                factors: vec![(co2(), 1.0), (ch4(), 28.0)],
            },
            ImpactMethod {
                id: flow_count(),
                factors: vec![(co2(), 1.0)],
            },
        ],
        classification_tree: [
            ("01", "Food"),
            ("011", "Meat"),
            ("0111", "Beef"),
            ("0112", "Pork"),
            ("012", "Crops"),
            ("0121", "Maize"),
            ("02", "Prepared"),
            ("021", "Meals"),
            ("0211", "Dishes"),
        ]
        .iter()
        .map(|(code, name)| ClassificationEntry::new(*code, *name))
        .collect(),
    }
}

pub fn chain_solver() -> InMemoryLcaSolver {
    InMemoryLcaSolver::from_snapshot(&snapshot()).unwrap()
}

pub fn chain_database() -> InMemoryActivityDatabase {
    InMemoryActivityDatabase::from_snapshot(&snapshot())
}
