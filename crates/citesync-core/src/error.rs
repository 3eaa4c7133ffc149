use std::fmt;

use thiserror::Error;

/// Which caller-supplied field list an [`CoreError::InvalidField`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRole {
    Updatable,
    Exclude,
}

impl fmt::Display for PolicyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyRole::Updatable => f.write_str("updatable"),
            PolicyRole::Exclude => f.write_str("exclude"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid {role} fields: {}. Valid fields are: {}", .unknown.join(", "), .valid.join(", "))]
    InvalidField {
        role: PolicyRole,
        unknown: Vec<String>,
        valid: Vec<String>,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// A defect in the mapping table itself, never caused by user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Unknown transform: {0}")]
    UnknownTransform(String),

    #[error("Source path `{0}` is mapped more than once")]
    DuplicateSourcePath(String),

    #[error("Rules `{first}` and `{second}` both map to `{target}` with priority {priority}")]
    PriorityTie {
        target: String,
        priority: u32,
        first: String,
        second: String,
    },
}
