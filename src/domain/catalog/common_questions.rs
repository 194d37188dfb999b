//! Common-question equivalence table.
//!
//! Maps a normalized question text to the set of product names that a "yes"
//! to that question also disqualifies. Two questions are the same common
//! question only when their normalized texts hit the same key, never by raw
//! text comparison.
//!
//! The table is data, not code: it can be loaded from YAML so catalog
//! authors extend it without touching the engine.
//!
//! ```yaml
//! "Have you been diagnosed with cancer in the past 5 years?":
//!   - Royal Neighbors Graded
//!   - Assurity Modified
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Normalizes question text into a table key.
///
/// Lowercases, drops every character outside `[a-z0-9 ]`, collapses runs of
/// spaces and trims.
pub fn normalize_question(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | ' '))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Errors loading a common-question table.
#[derive(Debug, Error)]
pub enum CommonQuestionTableError {
    #[error("Failed to read common-question table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse common-question table: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Common-question '{0}' normalizes to an empty key")]
    EmptyKey(String),
}

/// Normalized question key → product names it co-disqualifies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommonQuestionTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl CommonQuestionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds products to the entry for `question`, merging with any existing
    /// entry for the same normalized key.
    pub fn insert<I, S>(&mut self, question: &str, products: I) -> Result<(), CommonQuestionTableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = normalize_question(question);
        if key.is_empty() {
            return Err(CommonQuestionTableError::EmptyKey(question.to_string()));
        }
        self.entries
            .entry(key)
            .or_default()
            .extend(products.into_iter().map(Into::into));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_entry<I, S>(mut self, question: &str, products: I) -> Result<Self, CommonQuestionTableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(question, products)?;
        Ok(self)
    }

    /// Parses a YAML mapping of question text to product-name list.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CommonQuestionTableError> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        let raw: Option<BTreeMap<String, Vec<String>>> = serde_yaml::from_str(yaml)?;
        let mut table = Self::new();
        for (question, products) in raw.unwrap_or_default() {
            table.insert(&question, products)?;
        }
        Ok(table)
    }

    /// Reads and parses a YAML table from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CommonQuestionTableError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CommonQuestionTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Looks up the products co-disqualified by a "yes" to `question`.
    ///
    /// `question` is raw text; it is normalized before the lookup.
    pub fn lookup(&self, question: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(&normalize_question(question))
    }

    /// Every product name referenced by any entry.
    pub fn referenced_products(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .flat_map(|names| names.iter().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
