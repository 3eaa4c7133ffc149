//! Named value transforms applied to a winning candidate before assignment.
//!
//! The set is closed; [`Transform::from_str`] is kept so a table written with
//! names (or a typo in one) fails loudly instead of passing values through.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConfigurationError;
use crate::names::{split_name, PersonName};

/// Keys copied verbatim from a structured author entry.
const PASSTHROUGH_AUTHOR_KEYS: [&str; 3] = ["email", "orcid", "affiliation"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// PEP 621 `authors`/`maintainers` list → CFF person/entity list.
    ParseAuthors,
    /// `path` → `file://path`.
    FileUrl,
    /// Any value → string (strings unchanged).
    Stringify,
}

impl Transform {
    pub fn name(&self) -> &'static str {
        match self {
            Transform::ParseAuthors => "parse_authors",
            Transform::FileUrl => "file_url",
            Transform::Stringify => "stringify",
        }
    }

    pub fn apply(&self, value: &Value) -> Value {
        match self {
            Transform::ParseAuthors => Value::Array(parse_authors(value)),
            Transform::FileUrl => Value::String(file_url(&stringify(value))),
            Transform::Stringify => Value::String(stringify(value)),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parse_authors" => Ok(Transform::ParseAuthors),
            "file_url" => Ok(Transform::FileUrl),
            "stringify" | "parse_license_string" => Ok(Transform::Stringify),
            other => Err(ConfigurationError::UnknownTransform(other.to_string())),
        }
    }
}

/// Convert PEP 621 author entries into CFF author records.
///
/// Bare strings become `{name}` without splitting. Tables have their `name`
/// split into `given-names`/`family-names` when it has at least two tokens,
/// and `email`, `orcid`, `affiliation` copied through. Entries that yield no
/// recognised key are dropped. A non-array input yields an empty list.
pub fn parse_authors(value: &Value) -> Vec<Value> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    let mut authors = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(name) => {
                let mut person = Map::new();
                person.insert("name".to_string(), Value::String(name.clone()));
                authors.push(Value::Object(person));
            }
            Value::Object(fields) => {
                let person = parse_author_table(fields);
                if !person.is_empty() {
                    authors.push(Value::Object(person));
                }
            }
            _ => {}
        }
    }
    authors
}

fn parse_author_table(fields: &Map<String, Value>) -> Map<String, Value> {
    let mut person = Map::new();

    if let Some(name) = fields.get("name").and_then(Value::as_str) {
        match split_name(name) {
            PersonName::Split { given, family } => {
                person.insert("given-names".to_string(), Value::String(given));
                person.insert("family-names".to_string(), Value::String(family));
            }
            PersonName::Single(name) => {
                person.insert("name".to_string(), Value::String(name));
            }
        }
    }

    for key in PASSTHROUGH_AUTHOR_KEYS {
        if let Some(v) = fields.get(key) {
            person.insert(key.to_string(), v.clone());
        }
    }

    person
}

pub fn file_url(path: &str) -> String {
    format!("file://{path}")
}

/// Strings pass through; everything else gets its JSON rendering.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_authors_full_names() {
        let authors = json!([
            {"name": "Jane Smith", "email": "jane@example.com"},
            {"name": "John Doe", "email": "john@example.com", "orcid": "0000-0000-0000-0000"}
        ]);
        assert_eq!(
            Value::Array(parse_authors(&authors)),
            json!([
                {"given-names": "Jane", "family-names": "Smith", "email": "jane@example.com"},
                {
                    "given-names": "John",
                    "family-names": "Doe",
                    "email": "john@example.com",
                    "orcid": "0000-0000-0000-0000"
                }
            ])
        );
    }

    #[test]
    fn parse_authors_single_token_keeps_name() {
        let authors = json!([{"name": "SingleName"}]);
        assert_eq!(
            Value::Array(parse_authors(&authors)),
            json!([{"name": "SingleName"}])
        );
    }

    #[test]
    fn parse_authors_mixed_formats() {
        let authors = json!([
            "Jane Smith",
            {"name": "John Doe"},
            {"name": "Mary Jane Watson", "email": "mary@example.com"},
            {"name": "Dr. Alex Johnson III", "orcid": "0000-0000-0000-0000", "affiliation": "University"}
        ]);
        let parsed = parse_authors(&authors);
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0], json!({"name": "Jane Smith"}));
        assert_eq!(parsed[1], json!({"given-names": "John", "family-names": "Doe"}));
        assert_eq!(
            parsed[2],
            json!({"given-names": "Mary Jane", "family-names": "Watson", "email": "mary@example.com"})
        );
        assert_eq!(parsed[3]["given-names"], "Dr. Alex Johnson");
        assert_eq!(parsed[3]["family-names"], "III");
        assert_eq!(parsed[3]["affiliation"], "University");
    }

    #[test]
    fn parse_authors_drops_entries_without_known_keys() {
        let authors = json!([{"homepage": "https://x"}, 42, {"email": "only@x.com"}]);
        assert_eq!(
            Value::Array(parse_authors(&authors)),
            json!([{"email": "only@x.com"}])
        );
    }

    #[test]
    fn parse_authors_non_array_is_empty() {
        assert!(parse_authors(&json!("Jane Smith")).is_empty());
        assert!(parse_authors(&json!([])).is_empty());
    }

    #[test]
    fn file_url_prefixes_scheme() {
        assert_eq!(Transform::FileUrl.apply(&json!("LICENSE")), json!("file://LICENSE"));
    }

    #[test]
    fn stringify_leaves_strings_alone() {
        assert_eq!(Transform::Stringify.apply(&json!("MIT")), json!("MIT"));
        assert_eq!(
            Transform::Stringify.apply(&json!({"text": "MIT"})),
            json!(r#"{"text":"MIT"}"#)
        );
    }

    #[test]
    fn unknown_transform_name_is_a_configuration_error() {
        assert_eq!(
            "upper_case".parse::<Transform>(),
            Err(ConfigurationError::UnknownTransform("upper_case".into()))
        );
        assert_eq!("file_url".parse::<Transform>(), Ok(Transform::FileUrl));
    }
}
