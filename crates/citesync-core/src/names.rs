//! Whitespace-only personal name splitting.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonName {
    /// All tokens but the last, and the last.
    Split { given: String, family: String },
    /// Fewer than two tokens; carried through as-is.
    Single(String),
}

/// Split `full_name` into given/family parts.
///
/// No locale rules: `"Dr. Alex Johnson III"` gives family name `"III"`.
pub fn split_name(full_name: &str) -> PersonName {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    match tokens.split_last() {
        Some((family, given)) if !given.is_empty() => PersonName::Split {
            given: given.join(" "),
            family: (*family).to_string(),
        },
        _ => PersonName::Single(full_name.to_string()),
    }
}
