//! Which CFF fields a sync is allowed to write.

use std::collections::BTreeSet;

use crate::error::{CoreError, PolicyRole};
use crate::mapping::MappingTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPolicy {
    updatable: BTreeSet<String>,
    excluded: BTreeSet<String>,
}

impl FieldPolicy {
    /// Every known field is eligible.
    pub fn all(table: &MappingTable) -> Self {
        Self {
            updatable: table
                .all_target_fields()
                .into_iter()
                .map(str::to_string)
                .collect(),
            excluded: BTreeSet::new(),
        }
    }

    /// `eligible = (updatable or every known field) - exclude`.
    ///
    /// An empty override counts as no override. Names unknown to `table` are
    /// rejected before anything else happens.
    pub fn build<S: AsRef<str>>(
        table: &MappingTable,
        updatable: Option<&[S]>,
        exclude: Option<&[S]>,
    ) -> Result<Self, CoreError> {
        let known = table.all_target_fields();

        let updatable = match updatable.filter(|u| !u.is_empty()) {
            Some(names) => check_known(&known, names, PolicyRole::Updatable)?,
            None => known.iter().map(|s| s.to_string()).collect(),
        };
        let excluded = match exclude.filter(|e| !e.is_empty()) {
            Some(names) => check_known(&known, names, PolicyRole::Exclude)?,
            None => BTreeSet::new(),
        };

        tracing::debug!(
            updatable = updatable.len(),
            excluded = excluded.len(),
            "built field policy"
        );
        Ok(Self {
            updatable,
            excluded,
        })
    }

    pub fn is_eligible(&self, field: &str) -> bool {
        self.updatable.contains(field) && !self.excluded.contains(field)
    }

    pub fn eligible(&self) -> BTreeSet<&str> {
        self.updatable
            .iter()
            .filter(|f| !self.excluded.contains(*f))
            .map(String::as_str)
            .collect()
    }

    pub fn updatable(&self) -> &BTreeSet<String> {
        &self.updatable
    }

    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }
}

fn check_known<S: AsRef<str>>(
    known: &BTreeSet<&'static str>,
    names: &[S],
    role: PolicyRole,
) -> Result<BTreeSet<String>, CoreError> {
    let requested: BTreeSet<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    let unknown: Vec<String> = requested
        .iter()
        .filter(|n| !known.contains(n.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(requested)
    } else {
        Err(CoreError::InvalidField {
            role,
            unknown,
            valid: known.iter().map(|s| s.to_string()).collect(),
        })
    }
}
