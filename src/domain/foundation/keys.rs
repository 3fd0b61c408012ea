//! Activity keys and impact method identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Identifies a process or elementary flow as `(database, code)`.
///
/// Keys are the only way rows and columns of the technosphere and biosphere
/// matrices are addressed; the solver's index dictionaries map them to
/// positions. Serialized as a two-element array `["database", "code"]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ActivityKey {
    database: String,
    code: String,
}

impl ActivityKey {
    /// Creates a key without validation.
    pub fn new(database: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            code: code.into(),
        }
    }

    /// Creates a key, rejecting empty components.
    pub fn try_new(
        database: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let key = Self::new(database, code);
        if key.database.trim().is_empty() {
            return Err(ValidationError::empty_field("database"));
        }
        if key.code.trim().is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        Ok(key)
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl From<(String, String)> for ActivityKey {
    fn from((database, code): (String, String)) -> Self {
        Self { database, code }
    }
}

impl From<ActivityKey> for (String, String) {
    fn from(key: ActivityKey) -> Self {
        (key.database, key.code)
    }
}

impl fmt::Display for ActivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', '{}')", self.database, self.code)
    }
}

/// Identifies an impact assessment method as an ordered path of names,
/// e.g. `["IPCC 2021", "climate change", "GWP 100a"]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(Vec<String>);

impl MethodId {
    /// Creates a method identifier from its path segments.
    pub fn new<I, S>(segments: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ValidationError::invalid_format("method", "no path segments"));
        }
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(ValidationError::empty_field("method segment"));
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" | "))
    }
}
