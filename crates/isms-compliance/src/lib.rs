//! # isms-compliance: Compliance Rollups
//!
//! Turns a caller-supplied map of requirement statuses into per-chapter
//! and overall compliance figures.
//!
//! ## Policy
//!
//! - Codes in the status map that the catalog does not know are rejected
//!   together, before any counting.
//! - Requirements missing from the map count as `not_started`.
//! - Percentage = satisfied / (total − not_applicable), or 0 when every
//!   requirement in the group is not applicable.
//! - Unsatisfied items (`not_started`, `in_progress`) are listed in
//!   ascending item-code order.
//!
//! The evaluator keeps no state between calls; identical input always
//! yields identical output.

pub mod evaluator;
pub mod report;

pub use evaluator::{effective_status, ComplianceEvaluator};
pub use report::{ChapterCompliance, ComplianceReport, ComplianceTally};
