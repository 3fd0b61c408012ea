//! Scenario specification.
//!
//! In files a specification is written as plain YAML/JSON values:
//!
//! ```yaml
//! - "011:Meat"                       # Name
//! - ["Mining", "Coal", "Ores"]       # Fallback: sub-scenarios first, then "Mining"
//! - Metals: ["41:Basic metals", "42"] # Aggregate: any member matches -> "Metals"
//! ```
//!
//! Unquoted integers are read as names (`- 41` is `"41"`). Codes with
//! leading zeros must be quoted.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::ScenarioError;

/// One entry of a scenario specification. Entries nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSpec")]
pub enum ScenarioSpec {
    /// Matches when the name appears in an item's classification path.
    Name(String),

    /// `[main, sub_1, .., sub_n]`: the sub-scenarios are tried first, the
    /// main scenario only if none of them matched.
    Fallback(Vec<ScenarioSpec>),

    /// Reports `name` whenever any member matches.
    Aggregate {
        name: String,
        members: Vec<ScenarioSpec>,
    },
}

impl ScenarioSpec {
    pub fn name(name: impl Into<String>) -> Self {
        ScenarioSpec::Name(name.into())
    }

    pub fn fallback(specs: Vec<ScenarioSpec>) -> Self {
        ScenarioSpec::Fallback(specs)
    }

    pub fn aggregate(name: impl Into<String>, members: Vec<ScenarioSpec>) -> Self {
        ScenarioSpec::Aggregate {
            name: name.into(),
            members,
        }
    }

    /// Parses a top-level specification list from YAML (JSON is valid YAML).
    /// Errors name the position of the failing entry.
    pub fn parse_list(source: &str) -> Result<Vec<ScenarioSpec>, ScenarioError> {
        let entries: Vec<serde_yaml::Value> =
            serde_yaml::from_str(source).map_err(|e| ScenarioError::Parse(e.to_string()))?;
        entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                let rendered = serde_yaml::to_string(&entry)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default();
                serde_yaml::from_value(entry).map_err(|e| {
                    ScenarioError::Parse(format!("entry {position} ({rendered}): {e}"))
                })
            })
            .collect()
    }

    /// Every concrete scenario name this entry can resolve to, in
    /// specification order. Fallback groups contribute all their members,
    /// aggregates only their own name.
    pub fn scenario_names(&self) -> Vec<String> {
        match self {
            ScenarioSpec::Name(name) => vec![name.clone()],
            ScenarioSpec::Fallback(specs) => specs.iter().flat_map(|s| s.scenario_names()).collect(),
            ScenarioSpec::Aggregate { name, .. } => vec![name.clone()],
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpec {
    Name(String),
    Code(u64),
    Group(Vec<RawSpec>),
    Aggregate(BTreeMap<String, RawSpec>),
}

impl TryFrom<RawSpec> for ScenarioSpec {
    type Error = ScenarioError;

    fn try_from(raw: RawSpec) -> Result<Self, Self::Error> {
        match raw {
            RawSpec::Name(name) => {
                if name.trim().is_empty() {
                    return Err(ScenarioError::EmptyName);
                }
                Ok(ScenarioSpec::Name(name))
            }
            RawSpec::Code(code) => Ok(ScenarioSpec::Name(code.to_string())),
            RawSpec::Group(items) => {
                if items.is_empty() {
                    return Err(ScenarioError::EmptyFallback);
                }
                let specs = items
                    .into_iter()
                    .map(ScenarioSpec::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ScenarioSpec::Fallback(specs))
            }
            RawSpec::Aggregate(map) => {
                if map.len() != 1 {
                    return Err(ScenarioError::AggregateKeyCount(map.len()));
                }
                let Some((name, value)) = map.into_iter().next() else {
                    return Err(ScenarioError::AggregateKeyCount(0));
                };
                if name.trim().is_empty() {
                    return Err(ScenarioError::EmptyName);
                }
                let members = match value {
                    RawSpec::Group(items) => items
                        .into_iter()
                        .map(ScenarioSpec::try_from)
                        .collect::<Result<Vec<_>, _>>()?,
                    single => vec![ScenarioSpec::try_from(single)?],
                };
                if members.is_empty() {
                    return Err(ScenarioError::EmptyAggregate(name));
                }
                Ok(ScenarioSpec::Aggregate { name, members })
            }
        }
    }
}
