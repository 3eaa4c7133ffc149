//! Record merging and change detection.

use serde_json::{Map, Value};

use crate::fields;
use crate::{Record, CFF_VERSION, DEFAULT_MESSAGE, UNKNOWN_AUTHOR, UNKNOWN_TITLE};

/// Layer `existing ◄ resolved ◄ computed ◄ custom`, then backfill required fields.
///
/// Keys already in `existing` keep their position; new keys are appended in
/// layer order. Custom overrides bypass the field policy entirely.
pub fn merge(
    existing: Option<&Record>,
    resolved: &Record,
    computed: &Record,
    custom: &Record,
) -> Record {
    let mut merged = existing.cloned().unwrap_or_default();
    for layer in [resolved, computed, custom] {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }
    backfill_required(&mut merged);
    merged
}

/// Fill whatever CFF still needs with fixed fallbacks.
///
/// An empty `authors` list is treated like a missing one.
fn backfill_required(record: &mut Record) {
    if !record.contains_key(fields::CFF_VERSION) {
        record.insert(
            fields::CFF_VERSION.to_string(),
            Value::String(CFF_VERSION.to_string()),
        );
    }
    if !record.contains_key(fields::MESSAGE) {
        record.insert(
            fields::MESSAGE.to_string(),
            Value::String(DEFAULT_MESSAGE.to_string()),
        );
    }
    if !record.contains_key(fields::TITLE) {
        record.insert(
            fields::TITLE.to_string(),
            Value::String(UNKNOWN_TITLE.to_string()),
        );
    }

    let authors_missing = match record.get(fields::AUTHORS) {
        None => true,
        Some(Value::Array(list)) => list.is_empty(),
        Some(_) => false,
    };
    if authors_missing {
        let mut placeholder = Map::new();
        placeholder.insert("name".to_string(), Value::String(UNKNOWN_AUTHOR.to_string()));
        record.insert(
            fields::AUTHORS.to_string(),
            Value::Array(vec![Value::Object(placeholder)]),
        );
    }
}

/// Structural equality ignoring fields that update on their own.
///
/// Key order does not matter.
pub fn records_equal(a: &Record, b: &Record) -> bool {
    let relevant = |record: &Record| {
        record
            .keys()
            .filter(|k| !fields::VOLATILE.contains(&k.as_str()))
            .count()
    };
    if relevant(a) != relevant(b) {
        return false;
    }
    a.iter()
        .filter(|(k, _)| !fields::VOLATILE.contains(&k.as_str()))
        .all(|(k, v)| b.get(k) == Some(v))
}
