//! `pyproject.toml` loading.

use std::fs;
use std::path::Path;

use citesync_core::Record;
use serde_json::{Number, Value};

use crate::error::SyncError;

/// Read `path` and return its PEP 621 `[project]` table.
pub fn load_source(path: &Path) -> Result<Record, SyncError> {
    if !path.exists() {
        return Err(SyncError::SourceLoad {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| SyncError::SourceLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let project = parse_source(&text, path)?;
    tracing::debug!(path = %path.display(), keys = project.len(), "loaded [project] table");
    Ok(project)
}

/// Parse manifest text; `path` is only used for error messages.
pub fn parse_source(text: &str, path: &Path) -> Result<Record, SyncError> {
    let load_err = |reason: String| SyncError::SourceLoad {
        path: path.to_path_buf(),
        reason,
    };

    let manifest: toml::Table = toml::from_str(text).map_err(|e| load_err(e.to_string()))?;
    match manifest.get("project") {
        Some(toml::Value::Table(project)) => Ok(table_to_record(project)),
        Some(_) => Err(load_err("[project] is not a table".to_string())),
        None => Err(load_err("No [project] section found".to_string())),
    }
}

fn table_to_record(table: &toml::Table) -> Record {
    table
        .iter()
        .map(|(k, v)| (k.clone(), toml_to_json(v)))
        .collect()
}

fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number((*i).into()),
        toml::Value::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(table_to_record(table)),
    }
}
