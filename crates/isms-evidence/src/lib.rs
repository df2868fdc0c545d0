//! # isms-evidence: Evidence Synthesis
//!
//! Each requirement's `evidence_example` is a template. Placeholders are
//! written `{{name}}` where `name` is lowercase ASCII letters, digits and
//! underscores. Rendering substitutes organizational facts by name.
//!
//! A placeholder without a matching fact stays in the output verbatim and
//! is listed in `missing_facts`. That list is a signal to the caller, not
//! an error.

pub mod synthesizer;
pub mod template;

pub use synthesizer::{EvidenceDocument, EvidenceSynthesizer};
pub use template::{EvidenceTemplate, Rendered, Segment};
