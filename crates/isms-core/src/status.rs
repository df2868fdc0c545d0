//! # Caller-Supplied Compliance State
//!
//! Status and fact maps are owned by the caller and passed into each
//! evaluation. The engine never stores them.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IsmsError;
use crate::identity::Chapter;

/// Self-assessed state of a single requirement.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceState {
    /// Out of scope for this organization; excluded from percentages.
    NotApplicable,
    /// No work done yet. Also the state of any requirement absent from the map.
    #[default]
    NotStarted,
    /// Work under way.
    InProgress,
    /// Control is implemented.
    Satisfied,
}

impl ComplianceState {
    /// All states in declaration order.
    pub fn all() -> &'static [ComplianceState] {
        &[
            Self::NotApplicable,
            Self::NotStarted,
            Self::InProgress,
            Self::Satisfied,
        ]
    }

    /// snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Satisfied => "satisfied",
        }
    }

    /// Korean label used in text output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotApplicable => "해당없음",
            Self::NotStarted => "미착수",
            Self::InProgress => "진행중",
            Self::Satisfied => "충족",
        }
    }

    /// `not_started` and `in_progress` count as unsatisfied.
    pub fn is_unsatisfied(&self) -> bool {
        matches!(self, Self::NotStarted | Self::InProgress)
    }
}

impl fmt::Display for ComplianceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceState {
    type Err = IsmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_applicable" => Ok(Self::NotApplicable),
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "satisfied" => Ok(Self::Satisfied),
            other => Err(IsmsError::InvalidInput(format!(
                "unknown compliance state: {other:?}"
            ))),
        }
    }
}

/// Status of one requirement plus an optional free-text note.
///
/// Deserializes from either a bare state (`"satisfied"`) or a mapping
/// (`{ state: in_progress, note: "..." }`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StatusRepr")]
pub struct ComplianceStatus {
    pub state: ComplianceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ComplianceStatus {
    pub fn new(state: ComplianceState) -> Self {
        Self { state, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl From<ComplianceState> for ComplianceStatus {
    fn from(state: ComplianceState) -> Self {
        Self::new(state)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusRepr {
    Bare(ComplianceState),
    Full {
        #[serde(alias = "status")]
        state: ComplianceState,
        #[serde(default)]
        note: Option<String>,
    },
}

impl From<StatusRepr> for ComplianceStatus {
    fn from(repr: StatusRepr) -> Self {
        match repr {
            StatusRepr::Bare(state) => Self::new(state),
            StatusRepr::Full { state, note } => Self { state, note },
        }
    }
}

/// Requirement code → status, as supplied by the caller.
pub type StatusMap = HashMap<String, ComplianceStatus>;

/// Organizational fact name → value, used to fill evidence templates.
pub type FactMap = HashMap<String, String>;

/// Non-empty set of chapters restricting a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Chapter>", into = "Vec<Chapter>")]
pub struct ChapterSelection(BTreeSet<Chapter>);

impl ChapterSelection {
    /// Build a selection. An empty set is rejected.
    pub fn new(chapters: impl IntoIterator<Item = Chapter>) -> Result<Self, IsmsError> {
        let set: BTreeSet<Chapter> = chapters.into_iter().collect();
        if set.is_empty() {
            return Err(IsmsError::InvalidInput(
                "chapter selection must name at least one chapter".into(),
            ));
        }
        Ok(Self(set))
    }

    /// Selection covering every chapter.
    pub fn all() -> Self {
        Self(Chapter::all().iter().copied().collect())
    }

    pub fn contains(&self, chapter: Chapter) -> bool {
        self.0.contains(&chapter)
    }

    /// Whether every chapter is selected.
    pub fn is_all(&self) -> bool {
        self.0.len() == Chapter::all().len()
    }

    /// Selected chapters in numeric order.
    pub fn chapters(&self) -> impl Iterator<Item = Chapter> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<Vec<Chapter>> for ChapterSelection {
    type Error = IsmsError;

    fn try_from(chapters: Vec<Chapter>) -> Result<Self, Self::Error> {
        Self::new(chapters)
    }
}

impl From<ChapterSelection> for Vec<Chapter> {
    fn from(selection: ChapterSelection) -> Self {
        selection.0.into_iter().collect()
    }
}

impl fmt::Display for ChapterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers: Vec<String> = self.0.iter().map(|c| c.number().to_string()).collect();
        f.write_str(&numbers.join(", "))
    }
}
