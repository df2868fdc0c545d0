//! # isms CLI entry point
//!
//! Parses command-line arguments, initializes tracing, builds the engine
//! from the layered configuration, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use isms_cli::compliance::{run_compliance, ComplianceArgs};
use isms_cli::evidence::{run_evidence, EvidenceArgs};
use isms_cli::report::{run_report, ReportArgs};
use isms_cli::search::{run_search, SearchArgs};
use isms_cli::show::{run_show, ShowArgs};
use isms_cli::verify::{run_verify, VerifyArgs};
use isms_cli::{load_engine, OutputFormat};

/// ISMS-P requirement engine.
///
/// Searches the 101 ISMS-P certification requirements, renders evidence
/// documents, and computes compliance rollups and audit reports from a
/// status file.
#[derive(Parser, Debug)]
#[command(name = "isms", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// External requirement catalog (YAML or JSON) replacing the embedded one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Default search limit.
    #[arg(long, global = true)]
    search_limit: Option<usize>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank requirements against a free-text query.
    Search(SearchArgs),

    /// Show the full record of one requirement.
    Show(ShowArgs),

    /// Render the evidence document for a requirement.
    Evidence(EvidenceArgs),

    /// Compute compliance rollups from a status file.
    Compliance(ComplianceArgs),

    /// Build an audit report from a status file.
    Report(ReportArgs),

    /// Load the catalog and print its counts.
    Verify(VerifyArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "isms CLI starting");

    let engine = match load_engine(cli.config.as_deref(), cli.catalog.as_deref(), cli.search_limit)
    {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let format = OutputFormat::from_json_flag(cli.json);

    let result = match &cli.command {
        Commands::Search(args) => run_search(args, &engine, format),
        Commands::Show(args) => run_show(args, &engine, format),
        Commands::Evidence(args) => run_evidence(args, &engine, format),
        Commands::Compliance(args) => run_compliance(args, &engine, format),
        Commands::Report(args) => run_report(args, &engine, format),
        Commands::Verify(args) => run_verify(args, &engine, format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isms_core::Chapter;

    #[test]
    fn cli_parse_search_with_limit_and_chapters() {
        let cli = Cli::try_parse_from([
            "isms", "search", "개인정보", "파기", "--limit", "3", "--chapter", "3", "--chapter", "2",
        ])
        .unwrap();
        if let Commands::Search(args) = cli.command {
            assert_eq!(args.query, vec!["개인정보", "파기"]);
            assert_eq!(args.limit, Some(3));
            assert_eq!(
                args.chapters,
                vec![Chapter::PersonalInformation, Chapter::ProtectionMeasures]
            );
        } else {
            panic!("expected search");
        }
    }

    #[test]
    fn cli_parse_negative_limit_reaches_engine() {
        let cli = Cli::try_parse_from(["isms", "search", "백업", "--limit", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Search(ref a) if a.limit == Some(-1)));
    }

    #[test]
    fn cli_parse_rejects_unknown_chapter() {
        assert!(Cli::try_parse_from(["isms", "compliance", "--chapter", "4"]).is_err());
    }

    #[test]
    fn cli_parse_search_requires_query() {
        assert!(Cli::try_parse_from(["isms", "search"]).is_err());
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["isms", "verify", "--json", "-vv", "--log-json"]).unwrap();
        assert!(cli.json);
        assert!(cli.log_json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Verify(_)));
    }

    #[test]
    fn cli_parse_evidence_facts() {
        let cli = Cli::try_parse_from([
            "isms",
            "evidence",
            "1.1.1",
            "--fact",
            "organization_name=한빛정보",
            "--fact",
            "approval_date=2026-03-02",
            "--allow-missing",
        ])
        .unwrap();
        if let Commands::Evidence(args) = cli.command {
            assert_eq!(args.item_code, "1.1.1");
            assert_eq!(args.fact.len(), 2);
            assert!(args.allow_missing);
        } else {
            panic!("expected evidence");
        }
    }

    #[test]
    fn cli_parse_focus_limit_requires_focus() {
        assert!(Cli::try_parse_from(["isms", "report", "--focus-limit", "3"]).is_err());
        assert!(Cli::try_parse_from(["isms", "report", "--focus", "백업", "--focus-limit", "3"]).is_ok());
    }
}
