//! # Requirement Records
//!
//! A [`RequirementRow`] is one row exactly as it appears in a catalog file.
//! A [`Requirement`] is that row after its item code has been validated.

use serde::{Deserialize, Deserializer, Serialize};

use isms_core::{Chapter, ItemCode};

/// One catalog row, before validation. Exactly six fields are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementRow {
    pub item_code: String,
    pub title: String,
    pub certification_criteria: String,
    #[serde(deserialize_with = "checkpoint_list")]
    pub key_checkpoint: Vec<String>,
    pub evidence_example: String,
    pub defect_case: String,
}

/// A certification requirement. Immutable once the store is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub item_code: ItemCode,
    pub title: String,
    pub certification_criteria: String,
    pub key_checkpoint: Vec<String>,
    /// Evidence description; `{{name}}` markers are organizational facts.
    pub evidence_example: String,
    pub defect_case: String,
}

impl Requirement {
    pub(crate) fn from_row(item_code: ItemCode, row: RequirementRow) -> Self {
        Self {
            item_code,
            title: row.title,
            certification_criteria: row.certification_criteria,
            key_checkpoint: row.key_checkpoint,
            evidence_example: row.evidence_example,
            defect_case: row.defect_case,
        }
    }

    /// The item code as a string slice.
    pub fn code(&self) -> &str {
        self.item_code.as_str()
    }

    pub fn chapter(&self) -> Chapter {
        self.item_code.chapter()
    }

    /// Section name, e.g. `인증 및 권한관리` for `2.5.x`.
    pub fn section_name(&self) -> Option<&'static str> {
        self.item_code.section_name()
    }

    /// Checkpoints joined by newlines.
    pub fn checkpoint_text(&self) -> String {
        self.key_checkpoint.join("\n")
    }
}

/// Accept checkpoints either as a list or as one newline-separated string.
fn checkpoint_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::List(items) => items,
        Repr::Text(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
    })
}
