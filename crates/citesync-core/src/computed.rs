//! Fields derived outside the mapping table.

use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::fields;
use crate::mapping::{ComputedKind, MappingTable};
use crate::policy::FieldPolicy;
use crate::{Record, CFF_VERSION, DEFAULT_MESSAGE};

/// Source of "today" for `date-released`.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Write the eligible computed fields into `working`.
///
/// `date-released` only moves when the source version differs from the one in
/// `existing` (no existing version counts as different).
pub fn apply_computed(
    table: &MappingTable,
    working: &mut Record,
    source: &Record,
    existing: Option<&Record>,
    policy: &FieldPolicy,
    clock: &dyn Clock,
) {
    for computed in table.computed() {
        if !policy.is_eligible(computed.target_field) {
            continue;
        }
        let value = match computed.kind {
            ComputedKind::Constant => Some(Value::String(CFF_VERSION.to_string())),
            ComputedKind::DefaultMessage => Some(Value::String(DEFAULT_MESSAGE.to_string())),
            ComputedKind::VersionTriggeredDate => release_date(source, existing, clock),
        };
        if let Some(value) = value {
            working.insert(computed.target_field.to_string(), value);
        }
    }
}

fn release_date(source: &Record, existing: Option<&Record>, clock: &dyn Clock) -> Option<Value> {
    let new_version = source.get(fields::VERSION).filter(|v| !v.is_null())?;
    let old_version = existing.and_then(|e| e.get(fields::VERSION));

    if old_version.map(version_text) == Some(version_text(new_version)) {
        return None;
    }

    let today = clock.today().format("%Y-%m-%d").to_string();
    tracing::debug!(
        old = ?old_version,
        new = %new_version,
        date = %today,
        "version changed; bumping date-released"
    );
    Some(Value::String(today))
}

/// YAML may hand back `1.0` as a number while TOML always has a string.
fn version_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
