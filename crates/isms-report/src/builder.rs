//! # AuditReportBuilder
//!
//! Holds the shared store plus one instance of each component. `build`
//! takes all caller state as arguments and keeps nothing afterwards, so a
//! single builder can serve concurrent callers.

use std::sync::Arc;

use serde::Serialize;

use isms_catalog::RequirementStore;
use isms_compliance::{effective_status, ComplianceEvaluator, ComplianceReport};
use isms_core::{ChapterSelection, ComplianceState, FactMap, IsmsResult, StatusMap};
use isms_evidence::{EvidenceDocument, EvidenceSynthesizer};
use isms_search::SearchEngine;

use crate::hint::first_sentence;

/// Remediation entry for one unsatisfied requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationHint {
    pub item_code: String,
    pub title: String,
    pub state: ComplianceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub hint: String,
}

/// Search hit listed in the related-requirements section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedRequirement {
    pub item_code: String,
    pub title: String,
    pub score: u32,
}

/// Free-text query whose hits are listed alongside the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusQuery {
    pub query: String,
    pub limit: usize,
}

/// Optional sections and scope for [`AuditReportBuilder::build_with`].
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Restrict every section to these chapters. `None` means all.
    pub chapters: Option<ChapterSelection>,
    /// Render an evidence checklist for the unsatisfied items.
    pub facts: Option<FactMap>,
    pub focus: Option<FocusQuery>,
}

impl AuditOptions {
    pub fn chapters(mut self, chapters: ChapterSelection) -> Self {
        self.chapters = Some(chapters);
        self
    }

    pub fn facts(mut self, facts: FactMap) -> Self {
        self.facts = Some(facts);
        self
    }

    pub fn focus(mut self, query: impl Into<String>, limit: usize) -> Self {
        self.focus = Some(FocusQuery {
            query: query.into(),
            limit,
        });
        self
    }
}

/// Combined audit output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub scope: ChapterSelection,
    pub compliance: ComplianceReport,
    /// Ascending by item code, one per unsatisfied requirement in scope.
    pub remediation: Vec<RemediationHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_checklist: Option<Vec<EvidenceDocument>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<RelatedRequirement>>,
}

#[derive(Debug)]
pub struct AuditReportBuilder {
    store: Arc<RequirementStore>,
    evaluator: ComplianceEvaluator,
    search: SearchEngine,
}

impl AuditReportBuilder {
    pub fn new(store: Arc<RequirementStore>) -> Self {
        Self {
            evaluator: ComplianceEvaluator::new(Arc::clone(&store)),
            search: SearchEngine::new(Arc::clone(&store)),
            store,
        }
    }

    /// Compliance rollup plus remediation hints, optionally restricted to
    /// `chapters`.
    pub fn build(
        &self,
        statuses: &StatusMap,
        chapters: Option<&ChapterSelection>,
    ) -> IsmsResult<AuditReport> {
        let options = AuditOptions {
            chapters: chapters.cloned(),
            ..AuditOptions::default()
        };
        self.build_with(statuses, &options)
    }

    /// Full report with the optional sections requested in `options`.
    ///
    /// # Errors
    ///
    /// `UnknownRequirement` from the evaluator, or `InvalidInput` from the
    /// focus query. Either way no report is produced.
    pub fn build_with(&self, statuses: &StatusMap, options: &AuditOptions) -> IsmsResult<AuditReport> {
        let scope = options.chapters.clone().unwrap_or_else(ChapterSelection::all);
        let compliance = self.evaluator.evaluate_scoped(statuses, &scope)?;

        let related = match &options.focus {
            Some(focus) => Some(
                self.search
                    .search_in(&focus.query, focus.limit, &scope)?
                    .into_iter()
                    .map(|hit| RelatedRequirement {
                        item_code: hit.requirement.code().to_string(),
                        title: hit.requirement.title.clone(),
                        score: hit.score,
                    })
                    .collect(),
            ),
            None => None,
        };

        let mut remediation = Vec::with_capacity(compliance.unsatisfied_items.len());
        let mut checklist = options.facts.as_ref().map(|_| Vec::new());
        for code in &compliance.unsatisfied_items {
            let req = self.store.get(code)?;
            let status = effective_status(statuses, code);
            remediation.push(RemediationHint {
                item_code: code.clone(),
                title: req.title.clone(),
                state: status.state,
                note: status.note,
                hint: first_sentence(&req.defect_case),
            });
            if let (Some(list), Some(facts)) = (checklist.as_mut(), options.facts.as_ref()) {
                list.push(EvidenceSynthesizer::render(req, facts));
            }
        }

        tracing::debug!(
            scope = %scope,
            remediation = remediation.len(),
            checklist = checklist.as_ref().map_or(0, Vec::len),
            related = related.as_ref().map_or(0, Vec::len),
            "audit report built"
        );

        Ok(AuditReport {
            scope,
            compliance,
            remediation,
            evidence_checklist: checklist,
            focus: options.focus.clone(),
            related,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isms_core::{Chapter, ComplianceStatus, IsmsError};

    fn store() -> Arc<RequirementStore> {
        Arc::new(RequirementStore::embedded().unwrap())
    }

    fn status_map(pairs: &[(&str, ComplianceStatus)]) -> StatusMap {
        pairs
            .iter()
            .map(|(code, s)| (code.to_string(), s.clone()))
            .collect()
    }

    #[test]
    fn chapter_one_view_matches_evaluator() {
        let store = store();
        let builder = AuditReportBuilder::new(Arc::clone(&store));
        let statuses = status_map(&[
            ("1.1.1", ComplianceStatus::new(ComplianceState::Satisfied)),
            ("1.2.1", ComplianceStatus::new(ComplianceState::NotApplicable)),
            ("2.5.6", ComplianceStatus::new(ComplianceState::Satisfied)),
        ]);
        let chapter_one: StatusMap = statuses
            .iter()
            .filter(|(code, _)| code.starts_with("1."))
            .map(|(c, s)| (c.clone(), s.clone()))
            .collect();

        let scope = ChapterSelection::new([Chapter::ManagementSystem]).unwrap();
        let report = builder.build(&statuses, Some(&scope)).unwrap();
        let direct = ComplianceEvaluator::new(store).evaluate(&chapter_one).unwrap();

        assert_eq!(
            report.compliance.overall.percentage,
            direct.chapter(Chapter::ManagementSystem).unwrap().tally.percentage
        );
        assert_eq!(report.remediation.len(), 14);
        assert!(report.remediation.iter().all(|h| h.item_code.starts_with("1.")));
    }

    #[test]
    fn remediation_carries_state_note_and_hint() {
        let builder = AuditReportBuilder::new(store());
        let statuses = status_map(&[(
            "2.5.6",
            ComplianceStatus::new(ComplianceState::InProgress).with_note("분기 검토 미실시"),
        )]);
        let report = builder.build(&statuses, None).unwrap();
        assert_eq!(report.remediation.len(), 101);

        let entry = report
            .remediation
            .iter()
            .find(|h| h.item_code == "2.5.6")
            .unwrap();
        assert_eq!(entry.state, ComplianceState::InProgress);
        assert_eq!(entry.note.as_deref(), Some("분기 검토 미실시"));
        assert!(entry.hint.ends_with("경우."));
        assert!(!entry.hint.contains('\n'));
        assert!(report.evidence_checklist.is_none());
        assert!(report.related.is_none());
    }

    #[test]
    fn remediation_is_ascending() {
        let report = AuditReportBuilder::new(store())
            .build(&StatusMap::new(), None)
            .unwrap();
        let codes: Vec<_> = report.remediation.iter().map(|h| h.item_code.as_str()).collect();
        assert_eq!(codes, report.compliance.unsatisfied_items);
    }

    #[test]
    fn checklist_and_related_sections() {
        let builder = AuditReportBuilder::new(store());
        let mut facts = FactMap::new();
        facts.insert("organization_name".into(), "한빛정보".into());
        let scope = ChapterSelection::new([Chapter::PersonalInformation]).unwrap();
        let options = AuditOptions::default()
            .chapters(scope)
            .facts(facts)
            .focus("접근권한", 5);

        let report = builder.build_with(&StatusMap::new(), &options).unwrap();
        let checklist = report.evidence_checklist.as_ref().unwrap();
        assert_eq!(checklist.len(), 21);
        assert!(checklist.iter().all(|d| d.item_code.starts_with("3.")));

        let related = report.related.as_ref().unwrap();
        assert!(!related.is_empty());
        assert!(related.iter().all(|r| r.item_code.starts_with("3.")));
        assert_eq!(related[0].item_code, "3.2.3");
    }

    #[test]
    fn unknown_status_code_fails_whole_report() {
        let statuses = status_map(&[("7.7.7", ComplianceStatus::default())]);
        assert!(matches!(
            AuditReportBuilder::new(store()).build(&statuses, None),
            Err(IsmsError::UnknownRequirement { .. })
        ));
    }

    #[test]
    fn zero_focus_limit_fails_whole_report() {
        let options = AuditOptions::default().focus("백업", 0);
        assert!(matches!(
            AuditReportBuilder::new(store()).build_with(&StatusMap::new(), &options),
            Err(IsmsError::InvalidInput(_))
        ));
    }
}
