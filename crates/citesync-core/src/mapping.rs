//! The declarative PEP 621 → CFF mapping table.
//!
//! ```text
//! name                 ─► title                (1)
//! version              ─► version              (1)
//! description          ─► abstract             (1)
//! keywords             ─► keywords             (1)
//! authors              ─► authors              (1, parse_authors)
//! maintainers          ─► authors              (2, parse_authors)
//! license.text         ─► license              (1)
//! license              ─► license              (3, stringify)
//! license.file         ─► license-url          (1, file_url)
//! urls.Homepage        ─► url                  (1)
//! urls.Documentation   ─► url                  (2)
//! urls.Repository      ─► repository-code      (1)
//! urls.Source          ─► repository-code      (2)
//! urls.Download        ─► repository-artifact  (1)
//! ```
//!
//! Lower priority numbers win. PEP 621 fields without a CFF counterpart
//! (`readme`, `requires-python`, `dependencies`, `scripts`, `classifiers`, ...)
//! are deliberately absent.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::error::ConfigurationError;
use crate::fields;
use crate::transform::Transform;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingRule {
    /// Dotted path inside the `[project]` table.
    pub source_path: &'static str,
    pub target_field: &'static str,
    /// Lower wins.
    pub priority: u32,
    pub transform: Option<Transform>,
}

impl MappingRule {
    pub const fn new(
        source_path: &'static str,
        target_field: &'static str,
        priority: u32,
        transform: Option<Transform>,
    ) -> Self {
        Self {
            source_path,
            target_field,
            priority,
            transform,
        }
    }

    /// Build a rule from a transform *name*.
    pub fn named(
        source_path: &'static str,
        target_field: &'static str,
        priority: u32,
        transform: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        let transform = transform.map(str::parse::<Transform>).transpose()?;
        Ok(Self::new(source_path, target_field, priority, transform))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedKind {
    /// The supported `cff-version`.
    Constant,
    /// The fixed citation instruction.
    DefaultMessage,
    /// Today's date, but only when the version moved.
    VersionTriggeredDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComputedField {
    pub target_field: &'static str,
    pub kind: ComputedKind,
}

const STANDARD_RULES: [MappingRule; 14] = [
    MappingRule::new("name", "title", 1, None),
    MappingRule::new("version", fields::VERSION, 1, None),
    MappingRule::new("description", "abstract", 1, None),
    MappingRule::new("keywords", "keywords", 1, None),
    MappingRule::new("authors", fields::AUTHORS, 1, Some(Transform::ParseAuthors)),
    MappingRule::new("maintainers", fields::AUTHORS, 2, Some(Transform::ParseAuthors)),
    MappingRule::new("license.text", "license", 1, None),
    MappingRule::new("license", "license", 3, Some(Transform::Stringify)),
    MappingRule::new("license.file", "license-url", 1, Some(Transform::FileUrl)),
    MappingRule::new("urls.Homepage", "url", 1, None),
    MappingRule::new("urls.Documentation", "url", 2, None),
    MappingRule::new("urls.Repository", "repository-code", 1, None),
    MappingRule::new("urls.Source", "repository-code", 2, None),
    MappingRule::new("urls.Download", "repository-artifact", 1, None),
];

pub const COMPUTED_FIELDS: [ComputedField; 3] = [
    ComputedField {
        target_field: fields::DATE_RELEASED,
        kind: ComputedKind::VersionTriggeredDate,
    },
    ComputedField {
        target_field: fields::CFF_VERSION,
        kind: ComputedKind::Constant,
    },
    ComputedField {
        target_field: fields::MESSAGE,
        kind: ComputedKind::DefaultMessage,
    },
];

/// A validated set of mapping rules plus the computed fields.
#[derive(Debug, Clone)]
pub struct MappingTable {
    rules: Vec<MappingRule>,
    computed: Vec<ComputedField>,
}

impl MappingTable {
    /// The PEP 621 → CFF 1.2.0 table.
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
            computed: COMPUTED_FIELDS.to_vec(),
        }
    }

    /// Build a table from arbitrary rules, rejecting duplicate source paths and
    /// same-target/same-priority pairs (there is no tie-break).
    pub fn new(
        rules: Vec<MappingRule>,
        computed: Vec<ComputedField>,
    ) -> Result<Self, ConfigurationError> {
        let mut seen_paths = BTreeSet::new();
        let mut seen_slots: HashMap<(&str, u32), &str> = HashMap::new();

        for rule in &rules {
            if !seen_paths.insert(rule.source_path) {
                return Err(ConfigurationError::DuplicateSourcePath(
                    rule.source_path.to_string(),
                ));
            }
            if let Some(first) = seen_slots.insert((rule.target_field, rule.priority), rule.source_path)
            {
                return Err(ConfigurationError::PriorityTie {
                    target: rule.target_field.to_string(),
                    priority: rule.priority,
                    first: first.to_string(),
                    second: rule.source_path.to_string(),
                });
            }
        }

        Ok(Self { rules, computed })
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn computed(&self) -> &[ComputedField] {
        &self.computed
    }

    /// Every target field named by a rule or a computed field.
    pub fn all_target_fields(&self) -> BTreeSet<&'static str> {
        self.rules
            .iter()
            .map(|r| r.target_field)
            .chain(self.computed.iter().map(|c| c.target_field))
            .collect()
    }

    /// Rules feeding `target_field`, best priority first.
    pub fn rules_for(&self, target_field: &str) -> Vec<&MappingRule> {
        let mut rules: Vec<&MappingRule> = self
            .rules
            .iter()
            .filter(|r| r.target_field == target_field)
            .collect();
        rules.sort_by_key(|r| r.priority);
        rules
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::standard()
    }
}
