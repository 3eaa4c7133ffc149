//! Parsing of the string-typed settings (env vars share these formats).

use std::convert::Infallible;

use anyhow::{bail, Result};
use citesync_core::{MappingTable, Record};
use serde_json::Value;

/// `"title, version,,"` → `["title", "version"]`; blank means no override.
pub fn parse_field_list(raw: &str) -> Option<Vec<String>> {
    let fields: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    (!fields.is_empty()).then_some(fields)
}

/// Only `true` (any case) switches a flag on; anything else reads as off.
pub fn parse_bool_flag(raw: &str) -> Result<bool, Infallible> {
    Ok(raw.trim().eq_ignore_ascii_case("true"))
}

pub fn parse_custom_fields(raw: &str) -> Result<Record> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Record::new());
    }
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(fields) => Ok(fields),
        other => bail!("expected a JSON object, got {other}"),
    }
}

pub fn mapping_json(table: &MappingTable) -> Result<String> {
    let mut dump = Record::new();
    dump.insert("rules".to_string(), serde_json::to_value(table.rules())?);
    dump.insert("computed".to_string(), serde_json::to_value(table.computed())?);
    Ok(serde_json::to_string_pretty(&dump)?)
}
