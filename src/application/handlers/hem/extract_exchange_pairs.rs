//! ExchangePairExtractor - exchange pairs and skip set per scenario.

use std::sync::Arc;
use tracing::debug;

use crate::domain::calculation::VariantLabel;
use crate::domain::exchange::{ExchangePair, ScenarioPairs, SkipSet};
use crate::domain::scenario::ScenarioAssignment;
use crate::ports::{ActivityDatabase, DatabaseError};

/// Pairs to sever per scenario, plus the activities that need no solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedPairs {
    pub pairs: ScenarioPairs,
    pub skip: SkipSet,
}

/// Walks the exchanges of every activity assigned to an active scenario.
pub struct ExchangePairExtractor {
    database: Arc<dyn ActivityDatabase>,
}

impl ExchangePairExtractor {
    pub fn new(database: Arc<dyn ActivityDatabase>) -> Self {
        Self { database }
    }

    /// For every member of every active scenario:
    /// - no technosphere and no biosphere inputs: added to the skip set;
    /// - otherwise every consumer yields `(member, consumer)` and every
    ///   elementary flow input yields `(flow, member)`.
    ///
    /// Pairs are grouped under `(scenario, remaining)`. `Other` and
    /// unassigned activities are never visited.
    pub fn extract(&self, assignment: &ScenarioAssignment) -> Result<ExtractedPairs, DatabaseError> {
        let mut extracted = ExtractedPairs::default();

        for scenario in assignment.active_scenarios() {
            let mut pairs = Vec::new();

            for member in assignment.members(scenario) {
                let technosphere = self.database.technosphere_inputs(member)?;
                let biosphere = self.database.biosphere_inputs(member)?;
                if technosphere.is_empty() && biosphere.is_empty() {
                    extracted.skip.insert(member.clone());
                    continue;
                }

                for exchange in self.database.upstream(member)? {
                    pairs.push(ExchangePair::new(member.clone(), exchange.output));
                }
                for exchange in biosphere {
                    pairs.push(ExchangePair::new(exchange.input, member.clone()));
                }
            }

            debug!(scenario = %scenario, pairs = pairs.len(), "Extracted exchange pairs");
            extracted
                .pairs
                .insert(VariantLabel::remaining(scenario.as_str()), pairs);
        }

        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::hem::test_support::{ch4, chain_database, co2, key, snapshot};
    use crate::domain::classification::ClassificationTree;
    use crate::domain::scenario::{ScenarioResolver, ScenarioSpec};
    use crate::domain::foundation::ActivityKey;

    fn assignment(specs: &[ScenarioSpec]) -> ScenarioAssignment {
        let snapshot = snapshot();
        let tree = ClassificationTree::build(&snapshot.classification_tree).unwrap();
        let resolver = ScenarioResolver::new(&tree, true);
        let items: Vec<(ActivityKey, Option<String>)> = snapshot
            .activities
            .iter()
            .map(|a| {
                let cpc = a.classifications[0].1.replace(": ", ":");
                (a.key.clone(), Some(cpc))
            })
            .collect();
        resolver.assign(items.iter().map(|(k, c)| (k, c.as_deref())), specs)
    }

    fn extractor() -> ExchangePairExtractor {
        ExchangePairExtractor::new(Arc::new(chain_database()))
    }

    #[test]
    fn meat_scenario_severs_consumers_and_emissions() {
        let extracted = extractor()
            .extract(&assignment(&[ScenarioSpec::name("Meat")]))
            .unwrap();

        let pairs = extracted.pairs.get(&VariantLabel::remaining("Meat")).unwrap();
        assert_eq!(
            pairs,
            &[
                ExchangePair::new(key("beef"), key("meal")),
                ExchangePair::new(co2(), key("beef")),
                ExchangePair::new(ch4(), key("beef")),
            ]
        );
    }

    #[test]
    fn activity_without_inputs_is_skipped_not_paired() {
        let extracted = extractor()
            .extract(&assignment(&[ScenarioSpec::name("Meat")]))
            .unwrap();

        assert!(extracted.skip.contains(&key("pork")));
        for (_, pairs) in extracted.pairs.iter() {
            assert!(pairs.iter().all(|p| p.from != key("pork") && p.to != key("pork")));
        }
    }

    #[test]
    fn groups_follow_active_scenario_order() {
        let specs = [ScenarioSpec::name("Crops"), ScenarioSpec::name("Meat"), ScenarioSpec::name("Fish")];
        let extracted = extractor().extract(&assignment(&specs)).unwrap();

        let labels: Vec<_> = extracted.pairs.iter().map(|(l, _)| l.clone()).collect();
        assert_eq!(labels, vec![VariantLabel::remaining("Crops"), VariantLabel::remaining("Meat")]);
        assert_eq!(
            extracted.pairs.get(&VariantLabel::remaining("Crops")).unwrap(),
            &[
                ExchangePair::new(key("feed"), key("beef")),
                ExchangePair::new(co2(), key("feed")),
            ]
        );
    }

    #[test]
    fn other_activities_are_not_visited() {
        let extracted = extractor()
            .extract(&assignment(&[ScenarioSpec::name("Crops")]))
            .unwrap();

        assert_eq!(extracted.pairs.len(), 1);
        assert!(extracted.skip.is_empty());
    }
}
