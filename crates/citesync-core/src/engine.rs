//! One-stop facade over the resolution pipeline.

use crate::computed::{apply_computed, Clock, SystemClock};
use crate::error::CoreError;
use crate::mapping::MappingTable;
use crate::merge::{merge, records_equal};
use crate::policy::FieldPolicy;
use crate::resolve::resolve;
use crate::Record;

/// Holds a mapping table, a field policy and a clock; stateless across calls.
pub struct SyncEngine {
    table: MappingTable,
    policy: FieldPolicy,
    clock: Box<dyn Clock + Send + Sync>,
}

impl SyncEngine {
    /// Standard table, every field eligible, system clock.
    pub fn new() -> Self {
        let table = MappingTable::standard();
        let policy = FieldPolicy::all(&table);
        Self {
            table,
            policy,
            clock: Box::new(SystemClock),
        }
    }

    /// Standard table with caller-supplied updatable/exclude lists.
    pub fn with_fields<S: AsRef<str>>(
        updatable: Option<&[S]>,
        exclude: Option<&[S]>,
    ) -> Result<Self, CoreError> {
        let table = MappingTable::standard();
        let policy = FieldPolicy::build(&table, updatable, exclude)?;
        Ok(Self {
            table,
            policy,
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_table(mut self, table: MappingTable, policy: FieldPolicy) -> Self {
        self.table = table;
        self.policy = policy;
        self
    }

    pub fn with_clock<C: Clock + Send + Sync + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    /// Produce the new citation record from the `[project]` table.
    ///
    /// `existing` is read, never modified.
    pub fn generate(&self, source: &Record, existing: Option<&Record>, custom: &Record) -> Record {
        let resolved = resolve(&self.table, source, &self.policy);

        let mut computed = Record::new();
        apply_computed(
            &self.table,
            &mut computed,
            source,
            existing,
            &self.policy,
            self.clock.as_ref(),
        );

        tracing::debug!(
            resolved = resolved.len(),
            computed = computed.len(),
            custom = custom.len(),
            has_existing = existing.is_some(),
            "generated citation record"
        );
        merge(existing, &resolved, &computed, custom)
    }

    /// Whether writing `generated` would change `existing` in a way that matters.
    pub fn changes_detected(&self, existing: Option<&Record>, generated: &Record) -> bool {
        match existing {
            Some(existing) => !records_equal(existing, generated),
            None => true,
        }
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}
