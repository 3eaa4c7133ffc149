//! A full sync run.
//!
//! ```text
//! LOADED ──► RESOLVED ──► VALIDATED ──┬──► NoOp
//!                          (valid |   │
//!                           invalid)  └──► Written
//! ```
//!
//! Load errors abort before anything is written. An invalid record is not an
//! error: in validate-only mode the run stops, otherwise the record is still
//! written and the status reported.

use std::path::PathBuf;

use citesync_core::{Record, SyncEngine};
use serde::Serialize;

use crate::error::SyncError;
use crate::record::{load_record, write_record};
use crate::source::load_source;
use crate::validate::{validate, ValidationReport, ValidationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Loaded,
    Resolved,
    Validated,
    NoOp,
    Written,
}

#[derive(Debug, Clone, Default)]
pub struct SyncRequest {
    pub pyproject_path: PathBuf,
    pub citation_path: PathBuf,
    /// Applied last, regardless of the field policy.
    pub custom_fields: Record,
    pub validate_only: bool,
    pub force_update: bool,
}

impl SyncRequest {
    pub fn new(pyproject_path: impl Into<PathBuf>, citation_path: impl Into<PathBuf>) -> Self {
        Self {
            pyproject_path: pyproject_path.into(),
            citation_path: citation_path.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub updated: bool,
    pub changes_detected: bool,
    pub validation_status: ValidationStatus,
    pub validation: ValidationReport,
    pub stage: SyncStage,
    /// The generated record, whether or not it was written.
    #[serde(skip)]
    pub record: Record,
}

pub fn sync(engine: &SyncEngine, request: &SyncRequest) -> Result<SyncOutcome, SyncError> {
    let source = load_source(&request.pyproject_path)?;
    let existing = load_record(&request.citation_path)?;
    advance(SyncStage::Loaded);

    let record = engine.generate(&source, existing.as_ref(), &request.custom_fields);
    advance(SyncStage::Resolved);

    let validation = validate(&record);
    let validation_status = validation.status();
    advance(SyncStage::Validated);

    if request.validate_only && !validation.is_valid() {
        return Ok(SyncOutcome {
            updated: false,
            changes_detected: false,
            validation_status,
            validation,
            stage: SyncStage::NoOp,
            record,
        });
    }

    let changes_detected = engine.changes_detected(existing.as_ref(), &record);
    let should_write = !request.validate_only && (changes_detected || request.force_update);

    let stage = if should_write {
        write_record(&request.citation_path, &record)?;
        SyncStage::Written
    } else {
        SyncStage::NoOp
    };
    advance(stage);

    Ok(SyncOutcome {
        updated: should_write,
        changes_detected,
        validation_status,
        validation,
        stage,
        record,
    })
}

fn advance(stage: SyncStage) {
    tracing::debug!(?stage, "sync stage");
}
