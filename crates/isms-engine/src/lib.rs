//! # isms-engine: Requirement Engine Facade
//!
//! Single entry point for callers. [`Engine`] owns the shared requirement
//! store and one instance of each component, and exposes the five
//! operations:
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | `search_requirements` | [`SearchRequest`] | [`SearchResponse`] |
//! | `get_requirement_detail` | item code | [`RequirementDetail`] |
//! | `generate_evidence` | [`EvidenceRequest`] | `EvidenceDocument` |
//! | `check_compliance` | [`ComplianceRequest`] | `ComplianceReport` |
//! | `create_audit_report` | [`AuditRequest`] | `AuditReport` |
//!
//! Requests and responses are serde types so a transport layer can pass
//! them through as JSON. [`render`] turns every response into Korean plain
//! text.
//!
//! ## Concurrency
//!
//! `Engine` is `Send + Sync` and holds no per-call state. Share it behind an
//! `Arc` and call it from any number of threads.

pub mod config;
pub mod engine;
pub mod render;

pub use config::EngineConfig;
pub use engine::{
    AuditRequest, ComplianceRequest, Engine, EvidenceRequest, RequirementDetail, SearchRequest,
    SearchResponse, SearchResult,
};
