//! # isms-search: Requirement Relevance Ranking
//!
//! Ranks requirements against a free-text query with a weighted
//! term-overlap score. There is no inverted index: with 101 records a
//! linear scan over pre-lowercased fields is cheaper than maintaining one.
//!
//! ## Scoring
//!
//! The query is split on whitespace into lowercase terms with surrounding
//! punctuation removed. For each requirement, every term adds the weight
//! of each field that contains it as a substring:
//!
//! | Field | Weight |
//! |-------|--------|
//! | `title` | 3 |
//! | `certification_criteria` | 2 |
//! | `key_checkpoint` | 2 |
//! | `evidence_example` | 1 |
//! | `defect_case` | 1 |
//!
//! A term counts at most once per field, so long fields gain nothing from
//! repetition. Zero scores are dropped; ties go to the lower item code.

pub mod engine;
pub mod query;

pub use engine::{SearchEngine, SearchHit, MAX_QUERY_CHARS};
pub use query::tokenize;
