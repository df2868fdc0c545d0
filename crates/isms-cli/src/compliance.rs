//! # `isms compliance`
//!
//! ```bash
//! isms compliance --statuses status.yaml
//! isms compliance --statuses status.json --chapter 1 --json
//! ```
//!
//! A status file maps item codes to a state or `{state, note}`:
//!
//! ```yaml
//! "1.1.1": satisfied
//! "2.5.6":
//!   state: in_progress
//!   note: 분기 검토 일정 수립 중
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use isms_core::{Chapter, StatusMap};
use isms_engine::{render, ComplianceRequest, Engine};

use crate::input::read_optional;
use crate::output::{emit, OutputFormat};

#[derive(Args, Debug)]
pub struct ComplianceArgs {
    /// YAML/JSON status file; `-` reads stdin. Omitted = nothing started.
    #[arg(long)]
    pub statuses: Option<PathBuf>,

    /// Restrict to a chapter (1, 2 or 3). Repeatable.
    #[arg(long = "chapter", value_name = "N")]
    pub chapters: Vec<Chapter>,
}

pub fn run_compliance(args: &ComplianceArgs, engine: &Engine, format: OutputFormat) -> Result<u8> {
    let statuses: StatusMap = read_optional(args.statuses.as_deref())?;
    let request = ComplianceRequest {
        statuses,
        chapters: crate::chapter_selection(&args.chapters)?,
    };
    let report = engine.check_compliance(&request)?;
    emit(format, &report, render::compliance)?;
    Ok(0)
}
