//! Reporting a run to the terminal and to CI step files.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use citesync_files::{SyncOutcome, ValidationStatus};
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub updated: bool,
    pub changes_detected: bool,
    pub validation_status: ValidationStatus,
}

impl Summary {
    /// A run that never got past loading.
    pub fn failed() -> Self {
        Self {
            updated: false,
            changes_detected: false,
            validation_status: ValidationStatus::Error,
        }
    }

    pub fn output_lines(&self) -> String {
        format!(
            "updated={}\nchanges-detected={}\nvalidation-status={}\n",
            self.updated, self.changes_detected, self.validation_status
        )
    }
}

impl From<&SyncOutcome> for Summary {
    fn from(outcome: &SyncOutcome) -> Self {
        Self {
            updated: outcome.updated,
            changes_detected: outcome.changes_detected,
            validation_status: outcome.validation_status,
        }
    }
}

fn append(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))
}

pub fn append_outputs(path: &Path, summary: &Summary) -> Result<()> {
    append(path, &summary.output_lines())
}

pub fn append_env_flag(path: &Path) -> Result<()> {
    append(path, "CITATION_UPDATED=true\n")
}

pub fn print_summary(summary: &Summary) {
    let status = match summary.validation_status {
        ValidationStatus::Valid => summary.validation_status.as_str().green().bold(),
        ValidationStatus::Invalid | ValidationStatus::Error => {
            summary.validation_status.as_str().red().bold()
        }
    };
    println!("Sync completed:");
    println!("  Updated: {}", summary.updated);
    println!("  Changes detected: {}", summary.changes_detected);
    println!("  Validation status: {status}");
}
