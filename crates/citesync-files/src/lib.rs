//! Citesync file plumbing
//!
//! Everything around the pure engine in `citesync-core`:
//! - [`source`]: `pyproject.toml` → `[project]` table
//! - [`record`]: `CITATION.cff` load/write (YAML, insertion order preserved)
//! - [`validate`]: CFF 1.2.0 JSON Schema validation
//! - [`sync`]: the LOADED → RESOLVED → VALIDATED → {no-op | written} run

pub mod error;
pub mod record;
pub mod source;
pub mod sync;
pub mod validate;

pub use error::SyncError;
pub use record::{load_record, render_record, write_record};
pub use source::{load_source, parse_source};
pub use sync::{sync, SyncOutcome, SyncRequest, SyncStage};
pub use validate::{validate, ValidationReport, ValidationStatus};
