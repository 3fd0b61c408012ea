//! Classification Tree Builder.
//!
//! Turns a flat, ordered table of `(code, name)` rows into a lookup from
//! `"code:name"` to the full ancestor path. The depth of a row is the length
//! of its code; the table must list every code after all of its strict
//! prefixes (the order of the published CPC structure file). The builder
//! checks that ordering while it walks and refuses to produce a tree from a
//! table that violates it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building a classification tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("Classification row {row} has an empty code")]
    EmptyCode { row: usize },

    #[error("Classification '{key}' (row {row}) is not nested under its parent '{parent}'")]
    NotNested {
        row: usize,
        key: String,
        parent: String,
    },

    #[error("Classification '{key}' (row {row}) lands at root level with depth {depth}, expected {root_depth}")]
    MisplacedRoot {
        row: usize,
        key: String,
        depth: usize,
        root_depth: usize,
    },

    #[error("Classification '{key}' (row {row}) would clip {clip} levels from a path of {path_len}")]
    ClipOverflow {
        row: usize,
        key: String,
        clip: usize,
        path_len: usize,
    },
}

/// One row of the flat classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    pub code: String,
    pub name: String,
}

impl ClassificationEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// The tree key, `"code:name"`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.code, self.name)
    }

    fn depth(&self) -> usize {
        self.code.chars().count()
    }
}

/// Root-to-leaf sequence of classification keys. The last element is the
/// key the path was looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationPath(Vec<String>);

impl ClassificationPath {
    pub fn elements(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// True if `name` matches any element of the path.
    ///
    /// An element `"011:Meat"` is matched by the full key, by its code
    /// (`"011"`) and by its label (`"Meat"`).
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|element| {
            if element == name {
                return true;
            }
            match element.split_once(':') {
                Some((code, label)) => code == name || label == name,
                None => false,
            }
        })
    }

    fn with(&self, key: String) -> Self {
        let mut elements = self.0.clone();
        elements.push(key);
        Self(elements)
    }

    fn clipped(&self, n: usize) -> Self {
        Self(self.0[..self.0.len() - n].to_vec())
    }
}

impl<S: Into<String>> FromIterator<S> for ClassificationPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Lookup from classification key to its path.
#[derive(Debug, Clone, Default)]
pub struct ClassificationTree {
    paths: HashMap<String, ClassificationPath>,
}

impl ClassificationTree {
    /// Builds the tree from rows sorted so that every code follows all of
    /// its strict prefixes.
    ///
    /// # Algorithm
    /// Track the previous row's path and depth. A deeper row is a child of
    /// the previous path. A row at the same or a shallower depth clips
    /// `last_depth - depth + 1` elements off the previous path before its own
    /// key is appended.
    ///
    /// # Errors
    /// Returns `ClassificationError` as soon as a row contradicts the
    /// ordering invariant. Duplicate keys overwrite earlier ones.
    pub fn build<'a, I>(entries: I) -> Result<Self, ClassificationError>
    where
        I: IntoIterator<Item = &'a ClassificationEntry>,
    {
        let mut paths = HashMap::new();
        let mut last_path = ClassificationPath::default();
        let mut last_depth = 0usize;
        let mut root_depth: Option<usize> = None;

        for (row, entry) in entries.into_iter().enumerate() {
            let depth = entry.depth();
            if depth == 0 {
                return Err(ClassificationError::EmptyCode { row });
            }
            let key = entry.key();

            let path = if depth > last_depth {
                last_path.with(key.clone())
            } else {
                let clip = last_depth - depth + 1;
                if clip > last_path.len() {
                    return Err(ClassificationError::ClipOverflow {
                        row,
                        key,
                        clip,
                        path_len: last_path.len(),
                    });
                }
                last_path.clipped(clip).with(key.clone())
            };

            Self::check_nesting(row, entry, &path, &mut root_depth)?;

            last_depth = depth;
            paths.insert(key, path.clone());
            last_path = path;
        }

        Ok(Self { paths })
    }

    fn check_nesting(
        row: usize,
        entry: &ClassificationEntry,
        path: &ClassificationPath,
        root_depth: &mut Option<usize>,
    ) -> Result<(), ClassificationError> {
        if let [.., parent, _] = path.elements() {
            let parent_code = parent.split_once(':').map_or(parent.as_str(), |(c, _)| c);
            let nested = entry.depth() > parent_code.chars().count()
                && entry.code.starts_with(parent_code);
            if !nested {
                return Err(ClassificationError::NotNested {
                    row,
                    key: entry.key(),
                    parent: parent.clone(),
                });
            }
        } else {
            let depth = entry.depth();
            let expected = *root_depth.get_or_insert(depth);
            if depth != expected {
                return Err(ClassificationError::MisplacedRoot {
                    row,
                    key: entry.key(),
                    depth,
                    root_depth: expected,
                });
            }
        }
        Ok(())
    }

    /// Path of a classification key, if the key is part of the tree.
    pub fn path(&self, key: &str) -> Option<&ClassificationPath> {
        self.paths.get(key)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
