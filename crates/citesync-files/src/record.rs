//! `CITATION.cff` load/write.
//!
//! Records round-trip through `serde_json::Value` so the engine sees one value
//! model for both formats. Key order is insertion order on the way out, which
//! keeps diffs against hand-edited files small.

use std::fs;
use std::path::Path;

use citesync_core::Record;
use serde_json::Value;

use crate::error::SyncError;

/// Load an existing citation record.
///
/// `Ok(None)` when the file does not exist or holds an empty document.
pub fn load_record(path: &Path) -> Result<Option<Record>, SyncError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no existing citation file");
        return Ok(None);
    }

    let load_err = |reason: String| SyncError::RecordLoad {
        path: path.to_path_buf(),
        reason,
    };

    let text = fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&text).map_err(|e| load_err(e.to_string()))?;
    let json = serde_json::to_value(yaml).map_err(|e| load_err(e.to_string()))?;

    match json {
        Value::Null => Ok(None),
        Value::Object(record) => Ok(Some(record)),
        other => Err(load_err(format!(
            "expected a mapping at the top level, found {}",
            kind_name(&other)
        ))),
    }
}

/// Render `record` as YAML.
///
/// Plain scalars that a YAML 1.1 reader would turn into a boolean, date or
/// number (`yes`, `NO`, `2024-01-01`, `1_000`, `1:20`) are single-quoted so
/// other CFF tooling reads them back as strings.
pub fn render_record(record: &Record) -> Result<String, serde_yaml::Error> {
    Ok(quote_yaml11_scalars(&serde_yaml::to_string(record)?))
}

/// Write `record` as YAML, creating parent directories as needed.
pub fn write_record(path: &Path, record: &Record) -> Result<(), SyncError> {
    let write_err = |reason: String| SyncError::RecordWrite {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    let text = render_record(record).map_err(|e| write_err(e.to_string()))?;
    fs::write(path, text).map_err(|e| write_err(e.to_string()))?;

    tracing::info!(path = %path.display(), fields = record.len(), "wrote citation file");
    Ok(())
}

fn quote_yaml11_scalars(rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len());
    // Column a block scalar body must be indented past.
    let mut block_parent: Option<usize> = None;

    for line in rendered.lines() {
        let indent = line.len() - line.trim_start().len();
        if let Some(parent) = block_parent {
            if line.trim().is_empty() || indent > parent {
                out.push_str(line);
                out.push('\n');
                continue;
            }
            block_parent = None;
        }

        let mut pos = indent;
        while line[pos..].starts_with("- ") {
            pos += 2;
        }
        let rest = &line[pos..];
        let value_at = if rest.starts_with(['\'', '"']) {
            None
        } else if let Some(colon) = rest.find(": ") {
            Some((pos + colon + 2, pos))
        } else if pos > indent {
            Some((pos, pos - 2))
        } else {
            None
        };

        match value_at {
            Some((at, parent)) => {
                let value = &line[at..];
                if value.starts_with(['|', '>']) {
                    block_parent = Some(parent);
                    out.push_str(line);
                } else if is_yaml11_ambiguous(value) {
                    out.push_str(&line[..at]);
                    out.push('\'');
                    out.push_str(value);
                    out.push('\'');
                } else {
                    out.push_str(line);
                }
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

fn is_yaml11_ambiguous(scalar: &str) -> bool {
    const BOOLS: [&str; 16] = [
        "y", "Y", "yes", "Yes", "YES", "n", "N", "no", "No", "NO", "on", "On", "ON", "off", "Off",
        "OFF",
    ];
    BOOLS.contains(&scalar)
        || looks_like_date(scalar)
        || looks_like_sexagesimal(scalar)
        || looks_like_underscored_int(scalar)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY-M-D`, optionally followed by a time part.
fn looks_like_date(s: &str) -> bool {
    let mut parts = s.splitn(3, '-');
    let (Some(year), Some(month), Some(rest)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let day_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let tail = &rest[day_len..];
    year.len() == 4
        && all_digits(year)
        && (1..=2).contains(&month.len())
        && all_digits(month)
        && (1..=2).contains(&day_len)
        && (tail.is_empty() || tail.starts_with(['T', 't', ' ']))
}

/// Base-60 integers such as `1:20` or `190:20:30`.
fn looks_like_sexagesimal(s: &str) -> bool {
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    let parts: Vec<&str> = s.split(':').collect();
    parts.len() > 1
        && parts[0].bytes().all(|b| b.is_ascii_digit() || b == b'_')
        && parts[0].starts_with(|c: char| c.is_ascii_digit())
        && parts[1..]
            .iter()
            .all(|p| (1..=2).contains(&p.len()) && all_digits(p))
}

fn looks_like_underscored_int(s: &str) -> bool {
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    s.contains('_')
        && s.starts_with(|c: char| c.is_ascii_digit())
        && s.bytes().all(|b| b.is_ascii_digit() || b == b'_')
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
