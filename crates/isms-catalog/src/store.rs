//! # RequirementStore
//!
//! Immutable, indexed view over the validated catalog. Built once; shared
//! by reference (`Arc<RequirementStore>`) between components and threads.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use isms_core::{Chapter, IsmsError, IsmsResult};

use crate::loader::{self, CatalogFormat};
use crate::requirement::Requirement;

const EMBEDDED_CATALOG: &str = include_str!("../data/isms_p_requirements.yaml");

/// Number of rows shown in [`CatalogSummary::sample`].
const SAMPLE_SIZE: usize = 5;

/// Read-only access to the 101 requirements.
#[derive(Debug)]
pub struct RequirementStore {
    /// Sorted ascending by item code.
    requirements: Vec<Requirement>,
    index: HashMap<String, usize>,
}

impl RequirementStore {
    /// Store backed by the catalog compiled into this crate.
    pub fn embedded() -> IsmsResult<Self> {
        Self::from_text(EMBEDDED_CATALOG, CatalogFormat::Yaml, "embedded")
    }

    pub fn from_yaml_str(text: &str) -> IsmsResult<Self> {
        Self::from_text(text, CatalogFormat::Yaml, "yaml")
    }

    pub fn from_json_str(text: &str) -> IsmsResult<Self> {
        Self::from_text(text, CatalogFormat::Json, "json")
    }

    /// Load an external catalog file. The format follows the extension.
    pub fn from_path(path: &Path) -> IsmsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let source = path.display().to_string();
        Self::from_text(&text, CatalogFormat::from_path(path), &source)
    }

    fn from_text(text: &str, format: CatalogFormat, source: &str) -> IsmsResult<Self> {
        let rows = loader::parse_rows(text, format)?;
        let requirements = loader::validate_rows(rows)?;
        let index = requirements
            .iter()
            .enumerate()
            .map(|(i, req)| (req.code().to_string(), i))
            .collect();

        tracing::info!(
            source,
            requirements = requirements.len(),
            "requirement catalog loaded"
        );
        Ok(Self {
            requirements,
            index,
        })
    }

    /// Look up one requirement. Any string that is not a catalog code,
    /// including malformed ones, is `NotFound`.
    pub fn get(&self, item_code: &str) -> IsmsResult<&Requirement> {
        self.index
            .get(item_code)
            .map(|&i| &self.requirements[i])
            .ok_or_else(|| IsmsError::not_found(item_code))
    }

    pub fn contains(&self, item_code: &str) -> bool {
        self.index.contains_key(item_code)
    }

    /// Every requirement, ascending by item code.
    pub fn all(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    /// Requirements of one chapter, ascending by item code.
    pub fn by_chapter(&self, chapter: Chapter) -> impl Iterator<Item = &Requirement> + '_ {
        self.requirements
            .iter()
            .filter(move |req| req.chapter() == chapter)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Counts and a short sample of the loaded catalog.
    pub fn verify(&self) -> CatalogSummary {
        let chapters = Chapter::all()
            .iter()
            .map(|&chapter| ChapterSummary {
                chapter,
                name: chapter.name(),
                count: self.by_chapter(chapter).count(),
                expected: chapter.expected_count(),
            })
            .collect();
        let sample = self
            .requirements
            .iter()
            .take(SAMPLE_SIZE)
            .map(|req| SampleRow {
                item_code: req.code().to_string(),
                title: req.title.clone(),
            })
            .collect();

        CatalogSummary {
            total: self.len(),
            chapters,
            sample,
        }
    }
}

/// Result of [`RequirementStore::verify`].
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub chapters: Vec<ChapterSummary>,
    pub sample: Vec<SampleRow>,
}

/// Per-chapter row count.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterSummary {
    pub chapter: Chapter,
    pub name: &'static str,
    pub count: usize,
    pub expected: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    pub item_code: String,
    pub title: String,
}
