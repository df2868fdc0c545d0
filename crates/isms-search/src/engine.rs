//! # SearchEngine
//!
//! Linear weighted scan over the store. Lowercased field text is computed
//! once at construction; each query is then a pure function of that text.

use std::sync::Arc;

use serde::Serialize;

use isms_catalog::{Requirement, RequirementStore};
use isms_core::{ChapterSelection, IsmsError, IsmsResult};

use crate::query::tokenize;

/// Queries longer than this are rejected as malformed.
pub const MAX_QUERY_CHARS: usize = 512;

const TITLE_WEIGHT: u32 = 3;
const CRITERIA_WEIGHT: u32 = 2;
const CHECKPOINT_WEIGHT: u32 = 2;
const EVIDENCE_WEIGHT: u32 = 1;
const DEFECT_WEIGHT: u32 = 1;

/// One ranked result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub requirement: &'a Requirement,
    pub score: u32,
}

/// Lowercased copies of the searchable fields, paired with their weights.
#[derive(Debug)]
struct IndexedFields {
    fields: [(u32, String); 5],
}

impl IndexedFields {
    fn new(req: &Requirement) -> Self {
        Self {
            fields: [
                (TITLE_WEIGHT, req.title.to_lowercase()),
                (CRITERIA_WEIGHT, req.certification_criteria.to_lowercase()),
                (CHECKPOINT_WEIGHT, req.checkpoint_text().to_lowercase()),
                (EVIDENCE_WEIGHT, req.evidence_example.to_lowercase()),
                (DEFECT_WEIGHT, req.defect_case.to_lowercase()),
            ],
        }
    }

    fn score(&self, terms: &[String]) -> u32 {
        terms
            .iter()
            .map(|term| {
                self.fields
                    .iter()
                    .filter(|(_, text)| text.contains(term.as_str()))
                    .map(|(weight, _)| weight)
                    .sum::<u32>()
            })
            .sum()
    }
}

/// Ranks requirements against free-text queries.
#[derive(Debug)]
pub struct SearchEngine {
    store: Arc<RequirementStore>,
    /// Parallel to `store.all()`.
    indexed: Vec<IndexedFields>,
}

impl SearchEngine {
    pub fn new(store: Arc<RequirementStore>) -> Self {
        let indexed = store.all().map(IndexedFields::new).collect();
        Self { store, indexed }
    }

    pub fn store(&self) -> &Arc<RequirementStore> {
        &self.store
    }

    /// Rank every requirement against `query`, returning at most `limit`
    /// hits by descending score then ascending item code.
    ///
    /// # Errors
    ///
    /// [`IsmsError::InvalidInput`] when `limit` is zero or the query exceeds
    /// [`MAX_QUERY_CHARS`].
    pub fn search(&self, query: &str, limit: usize) -> IsmsResult<Vec<SearchHit<'_>>> {
        self.rank(query, limit, None)
    }

    /// As [`search`](Self::search), restricted to the selected chapters.
    pub fn search_in(
        &self,
        query: &str,
        limit: usize,
        chapters: &ChapterSelection,
    ) -> IsmsResult<Vec<SearchHit<'_>>> {
        self.rank(query, limit, Some(chapters))
    }

    fn rank(
        &self,
        query: &str,
        limit: usize,
        chapters: Option<&ChapterSelection>,
    ) -> IsmsResult<Vec<SearchHit<'_>>> {
        if limit == 0 {
            return Err(IsmsError::InvalidInput(
                "search limit must be a positive integer".into(),
            ));
        }
        if query.chars().count() > MAX_QUERY_CHARS {
            return Err(IsmsError::InvalidInput(format!(
                "query exceeds {MAX_QUERY_CHARS} characters"
            )));
        }

        let terms = tokenize(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .store
            .all()
            .zip(&self.indexed)
            .filter(|(req, _)| chapters.map_or(true, |sel| sel.contains(req.chapter())))
            .filter_map(|(req, fields)| {
                let score = fields.score(&terms);
                (score > 0).then_some(SearchHit {
                    requirement: req,
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.requirement.item_code.cmp(&b.requirement.item_code))
        });
        let matched = hits.len();
        hits.truncate(limit);

        tracing::debug!(query, terms = terms.len(), matched, returned = hits.len(), "search");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isms_core::Chapter;
    use proptest::prelude::*;

    fn engine() -> SearchEngine {
        SearchEngine::new(Arc::new(RequirementStore::embedded().unwrap()))
    }

    fn codes(hits: &[SearchHit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.requirement.code().to_string()).collect()
    }

    #[test]
    fn empty_query_returns_nothing() {
        let engine = engine();
        assert!(engine.search("", 5).unwrap().is_empty());
        assert!(engine.search("   ", 5).unwrap().is_empty());
        assert!(engine.search("?!", 5).unwrap().is_empty());
    }

    #[test]
    fn zero_limit_is_invalid_input() {
        let engine = engine();
        assert!(matches!(engine.search("백업", 0), Err(IsmsError::InvalidInput(_))));
        assert!(matches!(engine.search("", 0), Err(IsmsError::InvalidInput(_))));
    }

    #[test]
    fn overlong_query_is_invalid_input() {
        let query = "가".repeat(MAX_QUERY_CHARS + 1);
        assert!(matches!(engine().search(&query, 5), Err(IsmsError::InvalidInput(_))));
    }

    #[test]
    fn access_rights_query_finds_access_review() {
        let engine = engine();
        let hits = engine.search("접근권한", 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].requirement.code(), "2.5.6");
        assert_eq!(hits[0].requirement.title, "접근권한 검토");
        // Present in all five fields: 3 + 2 + 2 + 1 + 1.
        assert_eq!(hits[0].score, 9);
    }

    #[test]
    fn ties_break_by_item_code() {
        let engine = engine();
        let hits = engine.search("접근권한", 3).unwrap();
        assert_eq!(codes(&hits), vec!["2.5.6", "2.2.5", "2.6.3"]);
        assert_eq!(hits[1].score, hits[2].score);
    }

    #[test]
    fn term_counts_once_per_field_and_terms_add_up() {
        let engine = engine();
        let backup = engine.search("백업", 1).unwrap()[0].score;
        let both = engine.search("백업 암호화", 1).unwrap();
        assert_eq!(both[0].requirement.code(), "2.9.3");
        assert_eq!(backup, 9);
        assert_eq!(both[0].score, 9);
        // Repeating a term changes nothing.
        let repeated = engine.search("백업 백업 백업", 1).unwrap();
        assert_eq!(repeated[0].score, 9);
    }

    #[test]
    fn punctuation_and_case_are_ignored() {
        let engine = engine();
        assert_eq!(
            codes(&engine.search("\"백업\"?", 10).unwrap()),
            codes(&engine.search("백업", 10).unwrap())
        );
        assert_eq!(
            codes(&engine.search("db", 10).unwrap()),
            codes(&engine.search("DB", 10).unwrap())
        );
    }

    #[test]
    fn zero_score_requirements_are_excluded() {
        assert!(engine().search("zzzqqq", 10).unwrap().is_empty());
        assert_eq!(engine().search("가명정보", 10).unwrap().len(), 1);
    }

    #[test]
    fn chapter_filter_restricts_hits() {
        let engine = engine();
        let sel = ChapterSelection::new([Chapter::PersonalInformation]).unwrap();
        let hits = engine.search_in("접근권한", 10, &sel).unwrap();
        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .all(|h| h.requirement.chapter() == Chapter::PersonalInformation));
        assert_eq!(hits[0].requirement.code(), "3.2.3");
    }

    proptest! {
        #[test]
        fn results_sorted_and_bounded(
            words in prop::collection::vec(
                prop::sample::select(vec![
                    "접근권한", "개인정보", "백업", "암호화", "위험", "정책", "로그",
                    "교육", "DB", "파기", "없는단어", "!", "",
                ]),
                0..4,
            ),
            limit in 1usize..20,
        ) {
            let engine = engine();
            let query = words.join(" ");
            let hits = engine.search(&query, limit).unwrap();
            prop_assert!(hits.len() <= limit);
            for pair in hits.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(
                    a.score > b.score
                        || (a.score == b.score
                            && a.requirement.item_code < b.requirement.item_code)
                );
            }
            prop_assert!(hits.iter().all(|h| h.score > 0));
        }
    }
}
