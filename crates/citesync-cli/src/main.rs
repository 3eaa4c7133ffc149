//! Citesync CLI
//!
//! Keeps `CITATION.cff` in step with the `[project]` table of `pyproject.toml`.
//! Every flag can also come from the environment, so the binary drops straight
//! into a CI step:
//!
//! ```text
//! PYPROJECT_PATH=./pyproject.toml CITATION_PATH=./CITATION.cff \
//! EXCLUDE_FIELDS=message CUSTOM_FIELDS='{"doi": "10.5281/zenodo.1"}' citesync
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use citesync_core::{MappingTable, SyncEngine};
use citesync_files::{sync, SyncRequest, ValidationStatus};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod config;
mod report;

#[derive(Parser, Debug)]
#[command(name = "citesync")]
#[command(
    author,
    version,
    about = "Synchronize CITATION.cff with pyproject.toml metadata"
)]
struct Cli {
    /// PEP 621 manifest to read
    #[arg(long, env = "PYPROJECT_PATH", default_value = "./pyproject.toml")]
    pyproject: PathBuf,

    /// Citation file to create or update
    #[arg(long, env = "CITATION_PATH", default_value = "./CITATION.cff")]
    citation: PathBuf,

    /// JSON object of fields written last, bypassing field selection
    #[arg(long, env = "CUSTOM_FIELDS", default_value = "{}")]
    custom_fields: String,

    /// Validate the generated record without writing it
    #[arg(long, env = "VALIDATE_ONLY", action = ArgAction::SetTrue, value_parser = config::parse_bool_flag)]
    validate_only: bool,

    /// Write even when nothing changed
    #[arg(long, env = "FORCE_UPDATE", action = ArgAction::SetTrue, value_parser = config::parse_bool_flag)]
    force_update: bool,

    /// Comma-separated CFF fields allowed to change (default: all)
    #[arg(long, env = "UPDATABLE_FIELDS", default_value = "")]
    updatable_fields: String,

    /// Comma-separated CFF fields never to change
    #[arg(long, env = "EXCLUDE_FIELDS", default_value = "")]
    exclude_fields: String,

    /// File receiving `key=value` step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,

    /// File receiving `CITATION_UPDATED=true` after a write
    #[arg(long, env = "GITHUB_ENV")]
    github_env: Option<PathBuf>,

    /// Print the field mapping table as JSON and exit
    #[arg(long)]
    print_mapping: bool,
}

fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    if cli.print_mapping {
        println!("{}", config::mapping_json(&MappingTable::standard())?);
        return Ok(ExitCode::SUCCESS);
    }

    // Configuration problems surface before any file is read.
    let updatable = config::parse_field_list(&cli.updatable_fields);
    let exclude = config::parse_field_list(&cli.exclude_fields);
    let engine = SyncEngine::with_fields(updatable.as_deref(), exclude.as_deref())?;
    let custom_fields =
        config::parse_custom_fields(&cli.custom_fields).context("Invalid JSON in CUSTOM_FIELDS")?;

    let request = SyncRequest {
        pyproject_path: cli.pyproject.clone(),
        citation_path: cli.citation.clone(),
        custom_fields,
        validate_only: cli.validate_only,
        force_update: cli.force_update,
    };

    let summary = match sync(&engine, &request) {
        Ok(outcome) => {
            if !outcome.validation.is_valid() {
                eprintln!("Validation error: {}", outcome.validation.reason());
            }
            report::Summary::from(&outcome)
        }
        Err(err) => {
            tracing::error!(error = %err, "sync failed");
            eprintln!("Error during sync: {err}");
            report::Summary::failed()
        }
    };

    if let Some(path) = &cli.github_output {
        report::append_outputs(path, &summary)?;
    }
    if summary.updated {
        if let Some(path) = &cli.github_env {
            report::append_env_flag(path)?;
        }
    }
    report::print_summary(&summary);

    Ok(match summary.validation_status {
        ValidationStatus::Valid => ExitCode::SUCCESS,
        ValidationStatus::Invalid | ValidationStatus::Error => ExitCode::FAILURE,
    })
}
