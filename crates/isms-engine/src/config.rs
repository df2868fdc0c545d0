//! # Engine Configuration
//!
//! Resolution order, later layers winning:
//!
//! 1. Built-in defaults.
//! 2. A YAML file (`EngineConfig::from_yaml_file`).
//! 3. Environment: `ISMS_CATALOG_PATH`, `ISMS_SEARCH_LIMIT`.
//! 4. Explicit overrides applied by the caller (CLI flags).
//!
//! [`EngineConfig::validate`] runs after the last layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use isms_core::{IsmsError, IsmsResult};

pub const ENV_CATALOG_PATH: &str = "ISMS_CATALOG_PATH";
pub const ENV_SEARCH_LIMIT: &str = "ISMS_SEARCH_LIMIT";

const DEFAULT_SEARCH_LIMIT: usize = 10;
const DEFAULT_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// External catalog file. `None` uses the embedded catalog.
    pub catalog_path: Option<PathBuf>,
    /// Limit applied when a search request does not name one.
    pub default_search_limit: usize,
    /// Characters of criteria text shown per hit in text output.
    pub preview_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_search_limit: DEFAULT_SEARCH_LIMIT,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl EngineConfig {
    /// Read a YAML config file. Absent keys keep their defaults.
    pub fn from_yaml_file(path: &Path) -> IsmsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> IsmsResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
            .map_err(|e| IsmsError::InvalidInput(format!("invalid engine config: {e}")))
    }

    /// Overlay values from the process environment.
    pub fn with_env(self) -> IsmsResult<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn with_env_from<F>(mut self, lookup: F) -> IsmsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_CATALOG_PATH).filter(|v| !v.trim().is_empty()) {
            self.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_SEARCH_LIMIT) {
            self.default_search_limit = raw.trim().parse().map_err(|_| {
                IsmsError::InvalidInput(format!(
                    "{ENV_SEARCH_LIMIT} must be a positive integer, got {raw:?}"
                ))
            })?;
        }
        Ok(self)
    }

    /// Reject values no operation could use.
    pub fn validate(&self) -> IsmsResult<()> {
        if self.default_search_limit == 0 {
            return Err(IsmsError::InvalidInput(
                "default_search_limit must be a positive integer".into(),
            ));
        }
        if self.preview_chars == 0 {
            return Err(IsmsError::InvalidInput(
                "preview_chars must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}
