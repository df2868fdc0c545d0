//! # isms-catalog: Requirement Store
//!
//! Holds the 101 ISMS-P certification requirements in an immutable,
//! indexed structure built once at startup. Every other component reads
//! requirements through [`RequirementStore`].
//!
//! ## Sources
//!
//! - The canonical catalog is compiled into the crate
//!   ([`RequirementStore::embedded`]).
//! - An external YAML or JSON file with the same six-field rows may replace
//!   it ([`RequirementStore::from_path`]).
//!
//! Either way the rows pass through the same startup checks in
//! [`loader`]; a catalog that fails them never becomes a store.

pub mod loader;
pub mod requirement;
pub mod store;

pub use loader::CatalogFormat;
pub use requirement::Requirement;
pub use store::{CatalogSummary, ChapterSummary, RequirementStore};
