//! CFF 1.2.0 schema validation.
//!
//! The schema covers the keys the sync engine writes: required keys, the
//! `cff-version` pin, the two author shapes (`oneOf` person / entity) and the
//! types of the optional keys. Unknown keys are allowed.

use std::fmt;
use std::sync::OnceLock;

use citesync_core::Record;
use serde::Serialize;
use serde_json::{json, Value};

static CFF_VALIDATOR: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// The CFF 1.2.0 subset as JSON Schema.
pub fn cff_schema() -> Value {
    json!({
        "type": "object",
        "required": ["cff-version", "message", "title", "authors"],
        "properties": {
            "cff-version": {"type": "string", "pattern": "^1\\.2\\.0$"},
            "message": {"type": "string"},
            "title": {"type": "string"},
            "authors": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "oneOf": [
                        {
                            "type": "object",
                            "required": ["given-names", "family-names"],
                            "properties": {
                                "given-names": {"type": "string"},
                                "family-names": {"type": "string"},
                                "email": {"type": "string"},
                                "orcid": {"type": "string"},
                                "affiliation": {"type": "string"}
                            }
                        },
                        {
                            "type": "object",
                            "required": ["name"],
                            "properties": {
                                "name": {"type": "string"},
                                "email": {"type": "string"}
                            }
                        }
                    ]
                }
            },
            "version": {"type": "string"},
            "date-released": {"type": "string"},
            "abstract": {"type": "string"},
            "keywords": {"type": "array", "items": {"type": "string"}},
            "license": {"type": "string"},
            "repository-code": {"type": "string", "format": "uri"},
            "url": {"type": "string", "format": "uri"},
            "doi": {"type": "string"}
        }
    })
}

fn cff_validator() -> &'static Result<jsonschema::Validator, String> {
    CFF_VALIDATOR.get_or_init(|| {
        jsonschema::validator_for(&cff_schema()).map_err(|e| e.to_string())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Invalid,
    /// The run never got as far as validating (load/parse failure).
    Error,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Invalid => "invalid",
            ValidationStatus::Error => "error",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn status(&self) -> ValidationStatus {
        if self.is_valid() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        }
    }

    /// All errors on one line, for logs and summaries.
    pub fn reason(&self) -> String {
        self.errors.join("; ")
    }
}

/// Validate `record` against [`cff_schema`], collecting every violation as
/// `<json path>: <message>`.
pub fn validate(record: &Record) -> ValidationReport {
    let instance = Value::Object(record.clone());
    let errors: Vec<String> = match cff_validator() {
        Ok(validator) => validator
            .iter_errors(&instance)
            .map(|error| {
                let path = error.instance_path.to_string();
                format!("${path}: {error}")
            })
            .collect(),
        Err(schema_error) => vec![format!("invalid CFF schema: {schema_error}")],
    };

    if let Some(first) = errors.first() {
        tracing::warn!(errors = errors.len(), first = %first, "citation record failed validation");
    }
    ValidationReport { errors }
}
