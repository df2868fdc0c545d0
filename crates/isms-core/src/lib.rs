//! # isms-core: Foundational Types for the ISMS-P Engine
//!
//! Defines the type-system primitives shared by every other crate in the
//! workspace: the validated `ItemCode` identifier, the three-way `Chapter`
//! taxonomy, the caller-supplied `ComplianceStatus`, and the `IsmsError`
//! hierarchy. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validated identifiers.** `ItemCode` can only be constructed from
//!    three positive numeric segments. Ordering is segment-numeric, so
//!    `2.9.7` sorts before `2.10.1`.
//!
//! 2. **Single `Chapter` enum.** Three variants, exhaustive `match`
//!    everywhere. Expected per-chapter counts live next to the variants.
//!
//! 3. **Caller state is plain data.** `StatusMap` and `FactMap` are passed
//!    into every call; nothing here holds state between calls.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `isms-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod status;

pub use error::{IsmsError, IsmsResult};
pub use identity::{section_name, Chapter, ItemCode, REQUIREMENT_COUNT};
pub use status::{ChapterSelection, ComplianceState, ComplianceStatus, FactMap, StatusMap};
