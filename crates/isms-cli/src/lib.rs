//! # isms-cli: ISMS-P Requirement Engine Command-Line Interface
//!
//! A thin clap shell over [`isms_engine::Engine`]. Each subcommand module
//! owns its argument struct and a `run_*` handler; handlers parse input
//! files, call one engine operation, and print the result.
//!
//! ## Subcommands
//!
//! - `search`: Rank requirements against a free-text query
//! - `show`: Full record of one requirement
//! - `evidence`: Render an evidence document with organizational facts
//! - `compliance`: Compliance rollup from a status file
//! - `report`: Audit report with remediation, checklist, related items
//! - `verify`: Load the catalog and print its counts
//!
//! ## Crate Policy
//!
//! - No business logic here; every decision lives in the engine crates.
//! - `--json` prints the serde form of the engine response, otherwise the
//!   Korean text rendering.

pub mod compliance;
pub mod evidence;
pub mod input;
pub mod output;
pub mod report;
pub mod search;
pub mod show;
pub mod verify;

use std::path::Path;

use anyhow::{Context, Result};

use isms_core::{Chapter, ChapterSelection};
use isms_engine::{Engine, EngineConfig};

pub use output::OutputFormat;

/// Resolve configuration and build the engine.
///
/// Layers: defaults, then the YAML file at `config_path`, then the
/// environment, then the explicit `catalog` and `search_limit` overrides.
pub fn load_engine(
    config_path: Option<&Path>,
    catalog: Option<&Path>,
    search_limit: Option<usize>,
) -> Result<Engine> {
    let mut config = match config_path {
        Some(path) => EngineConfig::from_yaml_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => EngineConfig::default(),
    }
    .with_env()?;

    if let Some(path) = catalog {
        config.catalog_path = Some(path.to_path_buf());
    }
    if let Some(limit) = search_limit {
        config.default_search_limit = limit;
    }

    tracing::debug!(?config, "engine configuration resolved");
    Engine::new(config).context("failed to initialize requirement engine")
}

/// `None` for an empty list, otherwise the selection of those chapters.
pub fn chapter_selection(chapters: &[Chapter]) -> Result<Option<ChapterSelection>> {
    if chapters.is_empty() {
        return Ok(None);
    }
    Ok(Some(ChapterSelection::new(chapters.iter().copied())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chapter_list_means_all() {
        assert!(chapter_selection(&[]).unwrap().is_none());
        let sel = chapter_selection(&[Chapter::PersonalInformation, Chapter::ManagementSystem])
            .unwrap()
            .unwrap();
        assert_eq!(sel.to_string(), "1, 3");
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("isms.yaml");
        std::fs::write(&path, "default_search_limit: 4\npreview_chars: 30\n").unwrap();

        let engine = load_engine(Some(&path), None, Some(2)).unwrap();
        assert_eq!(engine.config().default_search_limit, 2);
        assert_eq!(engine.config().preview_chars, 30);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_engine(Some(&dir.path().join("absent.yaml")), None, None).is_err());
    }
}
