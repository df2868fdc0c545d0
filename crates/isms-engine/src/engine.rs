//! # Engine
//!
//! The five caller-facing operations. Each one validates its request,
//! delegates to a component, and returns a serializable response.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use isms_catalog::{CatalogSummary, Requirement, RequirementStore};
use isms_compliance::{ComplianceEvaluator, ComplianceReport};
use isms_core::{Chapter, ChapterSelection, FactMap, IsmsError, IsmsResult, StatusMap};
use isms_evidence::{EvidenceDocument, EvidenceSynthesizer};
use isms_report::{AuditOptions, AuditReport, AuditReportBuilder};
use isms_search::SearchEngine;

use crate::config::EngineConfig;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Input of `search_requirements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchRequest {
    pub query: String,
    /// Must be positive when given; defaults to the configured limit.
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub chapters: Option<ChapterSelection>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            chapters: None,
        }
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input of `generate_evidence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceRequest {
    pub item_code: String,
    #[serde(default)]
    pub facts: FactMap,
}

/// Input of `check_compliance`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplianceRequest {
    #[serde(default)]
    pub statuses: StatusMap,
    #[serde(default)]
    pub chapters: Option<ChapterSelection>,
}

/// Input of `create_audit_report`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditRequest {
    #[serde(default)]
    pub statuses: StatusMap,
    #[serde(default)]
    pub chapters: Option<ChapterSelection>,
    /// When present, adds an evidence checklist for unsatisfied items.
    #[serde(default)]
    pub facts: Option<FactMap>,
    /// When present, adds related requirements for this query.
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub focus_limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub item_code: String,
    pub title: String,
    pub score: u32,
    pub certification_criteria: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
}

/// Full requirement record with its chapter and section resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementDetail {
    pub item_code: String,
    pub chapter: Chapter,
    pub chapter_name: String,
    pub section: String,
    pub section_name: Option<String>,
    pub title: String,
    pub certification_criteria: String,
    pub key_checkpoint: Vec<String>,
    pub evidence_example: String,
    pub defect_case: String,
}

impl From<&Requirement> for RequirementDetail {
    fn from(req: &Requirement) -> Self {
        let chapter = req.chapter();
        Self {
            item_code: req.code().to_string(),
            chapter,
            chapter_name: chapter.name().to_string(),
            section: req.item_code.section_prefix(),
            section_name: req.section_name().map(String::from),
            title: req.title.clone(),
            certification_criteria: req.certification_criteria.clone(),
            key_checkpoint: req.key_checkpoint.clone(),
            evidence_example: req.evidence_example.clone(),
            defect_case: req.defect_case.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    store: Arc<RequirementStore>,
    search: SearchEngine,
    evaluator: ComplianceEvaluator,
    evidence: EvidenceSynthesizer,
    reports: AuditReportBuilder,
}

impl Engine {
    /// Validate `config`, load the catalog it names (or the embedded one),
    /// and build every component.
    pub fn new(config: EngineConfig) -> IsmsResult<Self> {
        config.validate()?;
        let store = match &config.catalog_path {
            Some(path) => RequirementStore::from_path(path)?,
            None => RequirementStore::embedded()?,
        };
        Ok(Self::with_store(Arc::new(store), config))
    }

    /// Engine over the embedded catalog with default settings.
    pub fn embedded() -> IsmsResult<Self> {
        Self::new(EngineConfig::default())
    }

    /// Build around an already-loaded store. `config.catalog_path` is
    /// ignored.
    pub fn with_store(store: Arc<RequirementStore>, config: EngineConfig) -> Self {
        Self {
            search: SearchEngine::new(Arc::clone(&store)),
            evaluator: ComplianceEvaluator::new(Arc::clone(&store)),
            evidence: EvidenceSynthesizer::new(Arc::clone(&store)),
            reports: AuditReportBuilder::new(Arc::clone(&store)),
            store,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<RequirementStore> {
        &self.store
    }

    /// Rank requirements against a free-text query.
    pub fn search_requirements(&self, request: &SearchRequest) -> IsmsResult<SearchResponse> {
        let limit = self.resolve_limit(request.limit)?;
        let hits = match &request.chapters {
            Some(chapters) => self.search.search_in(&request.query, limit, chapters)?,
            None => self.search.search(&request.query, limit)?,
        };
        let results = hits
            .into_iter()
            .map(|hit| SearchResult {
                item_code: hit.requirement.code().to_string(),
                title: hit.requirement.title.clone(),
                score: hit.score,
                certification_criteria: hit.requirement.certification_criteria.clone(),
            })
            .collect();

        Ok(SearchResponse {
            query: request.query.clone(),
            results,
        })
    }

    /// Full record for one requirement.
    pub fn get_requirement_detail(&self, item_code: &str) -> IsmsResult<RequirementDetail> {
        self.store.get(item_code).map(RequirementDetail::from)
    }

    pub fn generate_evidence(&self, request: &EvidenceRequest) -> IsmsResult<EvidenceDocument> {
        self.evidence.generate(&request.item_code, &request.facts)
    }

    /// Compliance rollup, scoped to `request.chapters` when given.
    pub fn check_compliance(&self, request: &ComplianceRequest) -> IsmsResult<ComplianceReport> {
        match &request.chapters {
            Some(chapters) => self.evaluator.evaluate_scoped(&request.statuses, chapters),
            None => self.evaluator.evaluate(&request.statuses),
        }
    }

    pub fn create_audit_report(&self, request: &AuditRequest) -> IsmsResult<AuditReport> {
        let mut options = AuditOptions {
            chapters: request.chapters.clone(),
            facts: request.facts.clone(),
            focus: None,
        };
        if let Some(query) = &request.focus {
            let limit = self.resolve_limit(request.focus_limit)?;
            options = options.focus(query.clone(), limit);
        } else if request.focus_limit.is_some() {
            return Err(IsmsError::InvalidInput(
                "focus_limit given without a focus query".into(),
            ));
        }
        self.reports.build_with(&request.statuses, &options)
    }

    /// Counts and sample rows of the loaded catalog.
    pub fn verify_catalog(&self) -> CatalogSummary {
        self.store.verify()
    }

    fn resolve_limit(&self, requested: Option<i64>) -> IsmsResult<usize> {
        match requested {
            None => Ok(self.config.default_search_limit),
            Some(n) if n > 0 => usize::try_from(n)
                .map_err(|_| IsmsError::InvalidInput(format!("limit {n} is out of range"))),
            Some(n) => Err(IsmsError::InvalidInput(format!(
                "limit must be a positive integer, got {n}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn limit_resolution() {
        let engine = Engine::embedded().unwrap();
        assert_eq!(engine.resolve_limit(None).unwrap(), 10);
        assert_eq!(engine.resolve_limit(Some(3)).unwrap(), 3);
        assert!(matches!(engine.resolve_limit(Some(0)), Err(IsmsError::InvalidInput(_))));
        assert!(matches!(engine.resolve_limit(Some(-4)), Err(IsmsError::InvalidInput(_))));
    }

    #[test]
    fn invalid_config_is_rejected_before_loading() {
        let config = EngineConfig {
            default_search_limit: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(Engine::new(config), Err(IsmsError::InvalidInput(_))));
    }

    #[test]
    fn detail_resolves_chapter_and_section() {
        let detail = Engine::embedded()
            .unwrap()
            .get_requirement_detail("3.4.1")
            .unwrap();
        assert_eq!(detail.chapter, Chapter::PersonalInformation);
        assert_eq!(detail.chapter_name, "개인정보 처리 단계별 요구사항");
        assert_eq!(detail.section, "3.4");
        assert_eq!(detail.section_name.as_deref(), Some("개인정보 파기 시 보호조치"));
        assert_eq!(detail.title, "개인정보 파기");
    }

    #[test]
    fn search_request_deserializes_with_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"query": "백업"}"#).unwrap();
        assert_eq!(req, SearchRequest::new("백업"));
        let req: SearchRequest =
            serde_json::from_str(r#"{"query": "백업", "limit": 2, "chapters": [2]}"#).unwrap();
        assert_eq!(req.limit, Some(2));
        assert!(serde_json::from_str::<SearchRequest>(r#"{"q": "x"}"#).is_err());
    }
}
