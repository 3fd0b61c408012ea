//! In-memory activity database.

use std::collections::{BTreeMap, HashMap};

use super::DatabaseSnapshot;
use crate::domain::foundation::ActivityKey;
use crate::ports::{
    ActivityDatabase, ActivityRecord, DatabaseError, ExchangeKind, ExchangeRecord,
};

/// `ActivityDatabase` backed by a snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityDatabase {
    activities: BTreeMap<ActivityKey, ActivityRecord>,
    by_output: HashMap<ActivityKey, Vec<ExchangeRecord>>,
    consumers: HashMap<ActivityKey, Vec<ExchangeRecord>>,
}

impl InMemoryActivityDatabase {
    pub fn new(activities: Vec<ActivityRecord>, exchanges: Vec<ExchangeRecord>) -> Self {
        let activities = activities.into_iter().map(|a| (a.key.clone(), a)).collect();
        let mut by_output: HashMap<ActivityKey, Vec<ExchangeRecord>> = HashMap::new();
        let mut consumers: HashMap<ActivityKey, Vec<ExchangeRecord>> = HashMap::new();

        for exchange in exchanges {
            if exchange.kind == ExchangeKind::Technosphere {
                consumers
                    .entry(exchange.input.clone())
                    .or_default()
                    .push(exchange.clone());
            }
            by_output
                .entry(exchange.output.clone())
                .or_default()
                .push(exchange);
        }

        Self {
            activities,
            by_output,
            consumers,
        }
    }

    pub fn from_snapshot(snapshot: &DatabaseSnapshot) -> Self {
        Self::new(snapshot.activities.clone(), snapshot.exchanges.clone())
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    fn require(&self, key: &ActivityKey) -> Result<(), DatabaseError> {
        if self.activities.contains_key(key) {
            Ok(())
        } else {
            Err(DatabaseError::ActivityNotFound(key.clone()))
        }
    }
}

impl ActivityDatabase for InMemoryActivityDatabase {
    fn activities(&self) -> Result<Vec<ActivityRecord>, DatabaseError> {
        Ok(self.activities.values().cloned().collect())
    }

    fn activity(&self, key: &ActivityKey) -> Result<ActivityRecord, DatabaseError> {
        self.activities
            .get(key)
            .cloned()
            .ok_or_else(|| DatabaseError::ActivityNotFound(key.clone()))
    }

    fn exchanges(&self, key: &ActivityKey) -> Result<Vec<ExchangeRecord>, DatabaseError> {
        self.require(key)?;
        Ok(self.by_output.get(key).cloned().unwrap_or_default())
    }

    fn upstream(&self, key: &ActivityKey) -> Result<Vec<ExchangeRecord>, DatabaseError> {
        self.require(key)?;
        Ok(self.consumers.get(key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: &str) -> ActivityKey {
        ActivityKey::new("db", code)
    }

    fn activity(code: &str) -> ActivityRecord {
        ActivityRecord {
            key: key(code),
            name: code.to_string(),
            reference_product: String::new(),
            unit: "kg".into(),
            location: "GLO".into(),
            production_amount: 1.0,
            classifications: vec![],
        }
    }

    fn exchange(input: ActivityKey, output: &str, kind: ExchangeKind) -> ExchangeRecord {
        ExchangeRecord {
            input,
            output: key(output),
            amount: 1.0,
            kind,
        }
    }

    fn database() -> InMemoryActivityDatabase {
        InMemoryActivityDatabase::new(
            vec![activity("b"), activity("a")],
            vec![
                exchange(key("a"), "a", ExchangeKind::Production),
                exchange(key("a"), "b", ExchangeKind::Technosphere),
                exchange(ActivityKey::new("biosphere3", "co2"), "b", ExchangeKind::Biosphere),
            ],
        )
    }

    #[test]
    fn lists_activities_sorted_by_key() {
        let codes: Vec<_> = database()
            .activities()
            .unwrap()
            .into_iter()
            .map(|a| a.key.code().to_string())
            .collect();
        assert_eq!(codes, vec!["a", "b"]);
    }

    #[test]
    fn splits_exchanges_by_kind() {
        let db = database();
        assert_eq!(db.technosphere_inputs(&key("b")).unwrap().len(), 1);
        assert_eq!(db.biosphere_inputs(&key("b")).unwrap().len(), 1);
        assert!(db.technosphere_inputs(&key("a")).unwrap().is_empty());
        assert_eq!(db.exchanges(&key("a")).unwrap().len(), 1);
    }

    #[test]
    fn upstream_lists_consumers() {
        let db = database();
        let upstream = db.upstream(&key("a")).unwrap();
        assert_eq!(upstream.len(), 1);
        assert_eq!(upstream[0].output, key("b"));
        assert!(db.upstream(&key("b")).unwrap().is_empty());
    }

    #[test]
    fn unknown_activity_is_not_found() {
        let db = database();
        assert!(matches!(
            db.exchanges(&key("zz")),
            Err(DatabaseError::ActivityNotFound(_))
        ));
        assert!(db.activity(&key("zz")).is_err());
    }
}
