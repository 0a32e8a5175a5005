//! shapecheck — command-line structural matcher.
//!
//! Compiles a schema document and checks an actual document against it,
//! printing the per-path report as JSON.
//!
//! Usage:
//!   shapecheck check --schema schema.json --actual doc.json
//!   shapecheck check --schema schema.toml --actual doc.json --strict
//!   shapecheck check --schema schema.json --actual doc.json --config shapecheck.toml
//!   shapecheck parse-path 'items.[0].name'

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use shapecheck_contracts::{
    error::{MatchError, MatchResult},
    path::{Path, PathComponent},
};
use shapecheck_core::{CheckConfig, Schema};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Check JSON documents against structural schemas.
#[derive(Parser)]
#[command(
    name = "shapecheck",
    about = "Structural matcher for nested documents",
    long_about = "Compiles a schema of maps, sequences and scalars into path-addressed checks\n\
                  and reports every violation in a document, keyed by path."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a document against a schema and print the report.
    Check {
        /// Schema document (`.toml` is parsed as TOML, anything else as JSON).
        #[arg(long)]
        schema: PathBuf,
        /// JSON document to check.
        #[arg(long)]
        actual: PathBuf,
        /// TOML check configuration.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Reject keys the schema does not mention.
        #[arg(long)]
        strict: bool,
    },
    /// Parse a rendered path and print its components.
    ParsePath {
        path: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug (or trace) for per-check output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check {
            schema,
            actual,
            config,
            strict,
        } => run_check(&schema, &actual, config.as_deref(), strict),
        Command::ParsePath { path } => run_parse_path(&path).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("shapecheck error: {}", e);
            std::process::exit(2);
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_check(
    schema_path: &std::path::Path,
    actual_path: &std::path::Path,
    config_path: Option<&std::path::Path>,
    force_strict: bool,
) -> MatchResult<bool> {
    let mut config = match config_path {
        Some(path) => CheckConfig::from_file(path)?,
        None => CheckConfig::default(),
    };
    config.strict |= force_strict;
    debug!(?config, "loaded check configuration");

    let schema = Schema::from_file(schema_path)?;
    let matcher = config.compile(&schema)?;

    let contents = std::fs::read_to_string(actual_path).map_err(|e| MatchError::Document {
        reason: format!("failed to read document '{}': {}", actual_path.display(), e),
    })?;
    let actual: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| MatchError::Document {
            reason: format!("failed to parse document '{}': {}", actual_path.display(), e),
        })?;

    let results = config.check(&matcher, &actual);
    let passed = results.succeeded();
    info!(
        checks = results.len(),
        failures = results.failures().count(),
        passed,
        "check complete"
    );

    let rendered = serde_json::to_string_pretty(&results).map_err(|e| MatchError::Document {
        reason: format!("failed to render report: {e}"),
    })?;
    println!("{rendered}");
    Ok(passed)
}

fn run_parse_path(input: &str) -> MatchResult<()> {
    let path = Path::parse(input)?;
    if path.is_root() {
        println!("(root)");
    }
    for component in path.components() {
        match component {
            PathComponent::MapKey(key) => println!("map key   {key}"),
            PathComponent::SliceIndex(index) => println!("slice idx {index}"),
        }
    }
    Ok(())
}
