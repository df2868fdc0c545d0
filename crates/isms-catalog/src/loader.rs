//! # Catalog Loading and Startup Checks
//!
//! Parses catalog rows from YAML or JSON and enforces the startup
//! invariants before a store is built:
//!
//! 1. Every row has exactly the six requirement fields.
//! 2. Every item code is three positive numeric segments in chapter 1–3.
//! 3. Item codes are unique and titles are non-empty.
//! 4. There are exactly 101 rows, split 16 / 64 / 21 across the chapters.
//!
//! Any failure is an [`IsmsError::SchemaViolation`]; nothing is loaded
//! partially.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use isms_core::{Chapter, IsmsError, IsmsResult, ItemCode, REQUIREMENT_COUNT};

use crate::requirement::{Requirement, RequirementRow};

/// On-disk encoding of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// `.json` files are JSON; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parse raw rows without checking catalog-level invariants.
pub fn parse_rows(text: &str, format: CatalogFormat) -> IsmsResult<Vec<RequirementRow>> {
    let parsed = match format {
        CatalogFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        CatalogFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| violation(format!("catalog rows do not match the requirement schema: {e}")))
}

/// Validate rows and return requirements sorted by item code.
pub fn validate_rows(rows: Vec<RequirementRow>) -> IsmsResult<Vec<Requirement>> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut requirements = Vec::with_capacity(rows.len());

    for (idx, row) in rows.into_iter().enumerate() {
        let code = ItemCode::parse(&row.item_code)
            .map_err(|e| violation(format!("row {}: {e}", idx + 1)))?;
        if row.title.trim().is_empty() {
            return Err(violation(format!("row {}: {code} has an empty title", idx + 1)));
        }
        if !seen.insert(code.clone()) {
            return Err(violation(format!("duplicate item code {code}")));
        }
        requirements.push(Requirement::from_row(code, row));
    }

    if requirements.len() != REQUIREMENT_COUNT {
        return Err(violation(format!(
            "expected {REQUIREMENT_COUNT} requirements, found {}",
            requirements.len()
        )));
    }

    let mut per_chapter: BTreeMap<Chapter, usize> = BTreeMap::new();
    for req in &requirements {
        *per_chapter.entry(req.chapter()).or_default() += 1;
    }
    for chapter in Chapter::all() {
        let found = per_chapter.get(chapter).copied().unwrap_or(0);
        if found != chapter.expected_count() {
            return Err(violation(format!(
                "chapter {} expects {} requirements, found {found}",
                chapter.number(),
                chapter.expected_count()
            )));
        }
    }

    requirements.sort_by(|a, b| a.item_code.cmp(&b.item_code));
    Ok(requirements)
}

fn violation(message: String) -> IsmsError {
    tracing::warn!(reason = %message, "requirement catalog rejected");
    IsmsError::SchemaViolation(message)
}
