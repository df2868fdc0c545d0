//! # `isms verify`
//!
//! Loads the configured catalog (which runs every startup check) and
//! prints its per-chapter counts and first rows.

use anyhow::Result;
use clap::Args;

use isms_engine::{render, Engine};

use crate::output::{emit, OutputFormat};

#[derive(Args, Debug)]
pub struct VerifyArgs {}

pub fn run_verify(_args: &VerifyArgs, engine: &Engine, format: OutputFormat) -> Result<u8> {
    let summary = engine.verify_catalog();
    emit(format, &summary, render::catalog_summary)?;
    Ok(0)
}
