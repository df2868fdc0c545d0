//! # isms-report: Audit Report Composition
//!
//! Stateless composition over the other components. A report combines:
//!
//! - the compliance rollup for the selected chapters,
//! - one remediation hint per unsatisfied requirement, taken from the first
//!   sentence of its `defect_case`,
//! - optionally, an evidence checklist rendered with organizational facts,
//! - optionally, requirements related to a focus query.
//!
//! A chapter selection is a view. Requirements outside it are left out of
//! every section; nothing about global compliance state changes.

pub mod builder;
pub mod hint;

pub use builder::{
    AuditOptions, AuditReport, AuditReportBuilder, FocusQuery, RelatedRequirement,
    RemediationHint,
};
pub use hint::first_sentence;
