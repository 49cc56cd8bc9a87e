//! Compiler configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{VgraphError, VgraphResult};

pub const DEFAULT_BASE_URI: &str = "http://localhost/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerConfig {
    /// Prefix for `d2rq:uriPattern` values that are not absolute
    pub base_uri: String,
    /// `allowDistinct` for databases that do not declare it
    pub default_allow_distinct: bool,
    /// Directory relative `d2rq:href` locations resolve against
    pub translation_table_root: Option<PathBuf>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            default_allow_distinct: true,
            translation_table_root: None,
        }
    }
}

impl CompilerConfig {
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    pub fn with_translation_table_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.translation_table_root = Some(root.into());
        self
    }

    pub fn from_json(json: &str) -> VgraphResult<Self> {
        serde_json::from_str(json).map_err(|e| VgraphError::Config(e.to_string()))
    }

    /// Prefix `pattern` with the base URI unless it already has a scheme
    pub fn absolutize(&self, pattern: &str) -> String {
        if crate::values::Pattern::is_relative(pattern) {
            format!("{}{}", self.base_uri, pattern)
        } else {
            pattern.to_string()
        }
    }
}
