//! # `isms search`
//!
//! ```bash
//! isms search 접근권한 --limit 3
//! isms search 개인정보 파기 --chapter 3 --json
//! ```

use anyhow::Result;
use clap::Args;

use isms_core::Chapter;
use isms_engine::{render, Engine, SearchRequest};

use crate::output::{emit, OutputFormat};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Query terms; joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum number of results (defaults to the configured limit).
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Restrict to a chapter (1, 2 or 3). Repeatable.
    #[arg(long = "chapter", value_name = "N")]
    pub chapters: Vec<Chapter>,
}

pub fn run_search(args: &SearchArgs, engine: &Engine, format: OutputFormat) -> Result<u8> {
    let request = SearchRequest {
        query: args.query.join(" "),
        limit: args.limit,
        chapters: crate::chapter_selection(&args.chapters)?,
    };
    let response = engine.search_requirements(&request)?;
    let preview = engine.config().preview_chars;
    emit(format, &response, |r| render::search(r, preview))?;
    Ok(0)
}
