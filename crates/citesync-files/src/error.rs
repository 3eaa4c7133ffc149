use std::path::PathBuf;

use citesync_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Error loading {}: {reason}", .path.display())]
    SourceLoad { path: PathBuf, reason: String },

    #[error("Error parsing {}: {reason}", .path.display())]
    RecordLoad { path: PathBuf, reason: String },

    #[error("Error writing {}: {reason}", .path.display())]
    RecordWrite { path: PathBuf, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
