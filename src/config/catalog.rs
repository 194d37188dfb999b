//! Catalog source selection

use serde::Deserialize;
use std::path::PathBuf;

use super::error::InvalidSetting;

/// Where products come from.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSourceKind {
    /// The four products compiled into the binary
    #[default]
    Builtin,
    /// `insurance_products` and `disqualifying_questions` tables
    Postgres,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: CatalogSourceKind,

    /// YAML file mapping question text to product names. Absent means no
    /// question is shared between products.
    pub common_questions_path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), InvalidSetting> {
        if let Some(path) = &self.common_questions_path {
            if !path.is_file() {
                return Err(InvalidSetting::CommonQuestionsFile(path.clone()));
            }
        }
        Ok(())
    }
}
