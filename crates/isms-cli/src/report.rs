//! # `isms report`
//!
//! ```bash
//! isms report --statuses status.yaml --chapter 2 --facts org.yaml --focus 백업
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use isms_core::{Chapter, StatusMap};
use isms_engine::{render, AuditRequest, Engine};

use crate::input::{collect_facts, read_optional};
use crate::output::{emit, OutputFormat};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// YAML/JSON status file; `-` reads stdin.
    #[arg(long)]
    pub statuses: Option<PathBuf>,

    /// Restrict to a chapter (1, 2 or 3). Repeatable.
    #[arg(long = "chapter", value_name = "N")]
    pub chapters: Vec<Chapter>,

    /// Facts file; enables the evidence checklist.
    #[arg(long)]
    pub facts: Option<PathBuf>,

    /// Single fact as KEY=VALUE. Repeatable; enables the evidence checklist.
    #[arg(long = "fact", value_name = "KEY=VALUE")]
    pub fact: Vec<String>,

    /// Query for the related-requirements section.
    #[arg(long)]
    pub focus: Option<String>,

    /// Hits in the related-requirements section.
    #[arg(long, requires = "focus", allow_negative_numbers = true)]
    pub focus_limit: Option<i64>,
}

pub fn run_report(args: &ReportArgs, engine: &Engine, format: OutputFormat) -> Result<u8> {
    let statuses: StatusMap = read_optional(args.statuses.as_deref())?;
    let facts = if args.facts.is_some() || !args.fact.is_empty() {
        Some(collect_facts(args.facts.as_deref(), &args.fact)?)
    } else {
        None
    };

    let request = AuditRequest {
        statuses,
        chapters: crate::chapter_selection(&args.chapters)?,
        facts,
        focus: args.focus.clone(),
        focus_limit: args.focus_limit,
    };
    let report = engine.create_audit_report(&request)?;
    emit(format, &report, render::audit)?;
    Ok(0)
}
