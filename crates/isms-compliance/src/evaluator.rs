//! # ComplianceEvaluator
//!
//! Aggregates a [`StatusMap`] against the catalog. Validation happens
//! before any counting so that a bad map never yields a partial report.

use std::sync::Arc;

use isms_catalog::RequirementStore;
use isms_core::{
    ChapterSelection, ComplianceState, ComplianceStatus, IsmsError, IsmsResult, ItemCode,
    StatusMap,
};

use crate::report::{ChapterCompliance, ComplianceReport, ComplianceTally};

/// Status the caller gave for `item_code`, or `not_started` if absent.
pub fn effective_status(statuses: &StatusMap, item_code: &str) -> ComplianceStatus {
    statuses.get(item_code).cloned().unwrap_or_default()
}

/// Computes compliance rollups. Cheap to clone; holds only the shared store.
#[derive(Debug, Clone)]
pub struct ComplianceEvaluator {
    store: Arc<RequirementStore>,
}

impl ComplianceEvaluator {
    pub fn new(store: Arc<RequirementStore>) -> Self {
        Self { store }
    }

    /// Evaluate over all three chapters.
    pub fn evaluate(&self, statuses: &StatusMap) -> IsmsResult<ComplianceReport> {
        self.evaluate_scoped(statuses, &ChapterSelection::all())
    }

    /// Evaluate over the selected chapters only.
    ///
    /// Every key of `statuses` must still be a catalog code, even when it
    /// falls outside `scope`.
    ///
    /// # Errors
    ///
    /// [`IsmsError::UnknownRequirement`] listing every unknown code.
    pub fn evaluate_scoped(
        &self,
        statuses: &StatusMap,
        scope: &ChapterSelection,
    ) -> IsmsResult<ComplianceReport> {
        self.check_known(statuses)?;

        let mut chapters = Vec::new();
        let mut overall = ComplianceTally::default();
        let mut unsatisfied_items = Vec::new();

        for chapter in scope.chapters() {
            let mut tally = ComplianceTally::default();
            for req in self.store.by_chapter(chapter) {
                let state = statuses
                    .get(req.code())
                    .map(|s| s.state)
                    .unwrap_or(ComplianceState::NotStarted);
                tally.record(state);
                if state.is_unsatisfied() {
                    unsatisfied_items.push(req.code().to_string());
                }
            }
            overall.merge(&tally);
            chapters.push(ChapterCompliance {
                chapter,
                name: chapter.name(),
                tally: tally.finish(),
            });
        }
        let overall = overall.finish();

        tracing::debug!(
            scope = %scope,
            supplied = statuses.len(),
            satisfied = overall.satisfied,
            applicable = overall.applicable(),
            "compliance evaluated"
        );

        Ok(ComplianceReport {
            scope: scope.clone(),
            chapters,
            overall,
            unsatisfied_items,
        })
    }

    fn check_known(&self, statuses: &StatusMap) -> IsmsResult<()> {
        let mut unknown: Vec<&String> = statuses
            .keys()
            .filter(|code| !self.store.contains(code))
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }

        // Well-formed codes in catalog order, then anything unparseable.
        unknown.sort_by(|a, b| match (ItemCode::parse(a), ItemCode::parse(b)) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        let item_codes: Vec<String> = unknown.into_iter().cloned().collect();
        tracing::debug!(count = item_codes.len(), "status map references unknown requirements");
        Err(IsmsError::UnknownRequirement { item_codes })
    }
}
