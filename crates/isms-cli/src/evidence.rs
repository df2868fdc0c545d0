//! # `isms evidence`
//!
//! ```bash
//! isms evidence 1.1.1 --facts org.yaml --fact approval_date=2026-03-02
//! ```
//!
//! Exits with status 2 when placeholders were left unfilled, so scripts
//! can tell a complete document from a partial one.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use isms_engine::{render, Engine, EvidenceRequest};

use crate::input::collect_facts;
use crate::output::{emit, OutputFormat};

#[derive(Args, Debug)]
pub struct EvidenceArgs {
    /// Item code, e.g. 1.1.1.
    pub item_code: String,

    /// YAML/JSON file of organizational facts (name: value).
    #[arg(long)]
    pub facts: Option<PathBuf>,

    /// Single fact as KEY=VALUE. Repeatable; overrides --facts.
    #[arg(long = "fact", value_name = "KEY=VALUE")]
    pub fact: Vec<String>,

    /// Exit 0 even when facts are missing.
    #[arg(long)]
    pub allow_missing: bool,
}

pub fn run_evidence(args: &EvidenceArgs, engine: &Engine, format: OutputFormat) -> Result<u8> {
    let request = EvidenceRequest {
        item_code: args.item_code.trim().to_string(),
        facts: collect_facts(args.facts.as_deref(), &args.fact)?,
    };
    let doc = engine.generate_evidence(&request)?;
    emit(format, &doc, render::evidence)?;

    if doc.is_complete() || args.allow_missing {
        Ok(0)
    } else {
        tracing::warn!(
            item_code = %doc.item_code,
            missing = ?doc.missing_facts,
            "evidence document has unfilled placeholders"
        );
        Ok(2)
    }
}
