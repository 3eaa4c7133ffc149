//! Priority-based conflict resolution.
//!
//! For each eligible target field, every rule whose source path is present
//! contributes a candidate; the lowest priority number wins and its transform
//! is applied. Absent paths are skipped outright, never defaulted.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::mapping::MappingTable;
use crate::policy::FieldPolicy;
use crate::transform::Transform;
use crate::Record;

struct Candidate<'a> {
    priority: u32,
    source_path: &'static str,
    raw: &'a Value,
    transform: Option<Transform>,
}

/// Walk `path` (dot separated) through nested tables.
///
/// A missing key, a non-table along the way, or an explicit `null` all mean
/// "absent".
pub fn lookup_path<'a>(source: &'a Record, path: &str) -> Option<&'a Value> {
    let mut keys = path.split('.');
    let mut current = source.get(keys.next()?)?;
    for key in keys {
        current = current.as_object()?.get(key)?;
    }
    (!current.is_null()).then_some(current)
}

/// Resolve every eligible mapped field from `source`.
///
/// Output is ordered by table order of the first rule for each field so that
/// fresh records come out in a stable, readable key order.
pub fn resolve(table: &MappingTable, source: &Record, policy: &FieldPolicy) -> Record {
    let mut order: Vec<&'static str> = Vec::new();
    let mut groups: BTreeMap<&'static str, Vec<Candidate<'_>>> = BTreeMap::new();

    for rule in table.rules() {
        if !policy.is_eligible(rule.target_field) {
            continue;
        }
        let Some(raw) = lookup_path(source, rule.source_path) else {
            continue;
        };
        if !groups.contains_key(rule.target_field) {
            order.push(rule.target_field);
        }
        groups.entry(rule.target_field).or_default().push(Candidate {
            priority: rule.priority,
            source_path: rule.source_path,
            raw,
            transform: rule.transform,
        });
    }

    let mut resolved = Record::new();
    for target in order {
        let Some(winner) = groups
            .get(target)
            .and_then(|candidates| candidates.iter().min_by_key(|c| c.priority))
        else {
            continue;
        };

        tracing::trace!(
            field = target,
            source = winner.source_path,
            priority = winner.priority,
            "resolved field"
        );
        let value = match winner.transform {
            Some(transform) => transform.apply(winner.raw),
            None => winner.raw.clone(),
        };
        resolved.insert(target.to_string(), value);
    }
    resolved
}
