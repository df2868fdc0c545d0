//! Compliance report data types.

use serde::Serialize;

use isms_core::{Chapter, ChapterSelection, ComplianceState};

/// Counts by state for one group of requirements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplianceTally {
    pub total: usize,
    pub satisfied: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub not_applicable: usize,
    /// Satisfied share of applicable requirements, 0–100.
    pub percentage: f64,
}

impl ComplianceTally {
    pub(crate) fn record(&mut self, state: ComplianceState) {
        self.total += 1;
        match state {
            ComplianceState::Satisfied => self.satisfied += 1,
            ComplianceState::InProgress => self.in_progress += 1,
            ComplianceState::NotStarted => self.not_started += 1,
            ComplianceState::NotApplicable => self.not_applicable += 1,
        }
    }

    pub(crate) fn merge(&mut self, other: &ComplianceTally) {
        self.total += other.total;
        self.satisfied += other.satisfied;
        self.in_progress += other.in_progress;
        self.not_started += other.not_started;
        self.not_applicable += other.not_applicable;
    }

    /// Recompute `percentage` from the counts.
    pub(crate) fn finish(mut self) -> Self {
        let applicable = self.applicable();
        self.percentage = if applicable == 0 {
            0.0
        } else {
            self.satisfied as f64 * 100.0 / applicable as f64
        };
        self
    }

    /// Requirements that count toward the percentage.
    pub fn applicable(&self) -> usize {
        self.total - self.not_applicable
    }

    pub fn unsatisfied(&self) -> usize {
        self.in_progress + self.not_started
    }
}

/// Tally for one chapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterCompliance {
    pub chapter: Chapter,
    pub name: &'static str,
    #[serde(flatten)]
    pub tally: ComplianceTally,
}

/// Result of a compliance evaluation over a chapter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub scope: ChapterSelection,
    /// One entry per selected chapter, in chapter order.
    pub chapters: Vec<ChapterCompliance>,
    pub overall: ComplianceTally,
    /// Codes in `not_started` or `in_progress`, ascending.
    pub unsatisfied_items: Vec<String>,
}

impl ComplianceReport {
    pub fn chapter(&self, chapter: Chapter) -> Option<&ChapterCompliance> {
        self.chapters.iter().find(|c| c.chapter == chapter)
    }
}
