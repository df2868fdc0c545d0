//! # `isms show`

use anyhow::Result;
use clap::Args;

use isms_engine::{render, Engine};

use crate::output::{emit, OutputFormat};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Item code, e.g. 2.5.6.
    pub item_code: String,
}

pub fn run_show(args: &ShowArgs, engine: &Engine, format: OutputFormat) -> Result<u8> {
    let detail = engine.get_requirement_detail(args.item_code.trim())?;
    emit(format, &detail, render::detail)?;
    Ok(0)
}
