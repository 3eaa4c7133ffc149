//! Property-based tests for the citesync engine
//!
//! 1. Name splitting never loses tokens and never yields an empty family name
//! 2. The lowest priority candidate always wins
//! 3. Equality ignores date-released
//! 4. Generating twice from the same inputs is a no-op

use chrono::NaiveDate;
use citesync_core::*;
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Strategies
// ============================================================================

fn token_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z.]{1,10}".prop_map(|s| s)
}

fn name_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(token_strategy(), 0..6)
}

fn url_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,12}".prop_map(|s| format!("https://{s}.example"))
}

fn version_strategy() -> impl Strategy<Value = String> {
    (0u32..5, 0u32..20, 0u32..20).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap_or_default()
}

// ============================================================================
// Name splitting
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_split_preserves_tokens(tokens in name_strategy()) {
        let full = tokens.join("  ");
        match split_name(&full) {
            PersonName::Split { given, family } => {
                prop_assert!(tokens.len() >= 2);
                prop_assert!(!family.is_empty());
                prop_assert_eq!(&family, tokens.last().unwrap());
                prop_assert_eq!(given, tokens[..tokens.len() - 1].join(" "));
            }
            PersonName::Single(name) => {
                prop_assert!(tokens.len() < 2);
                prop_assert_eq!(name, full);
            }
        }
    }
}

// ============================================================================
// Conflict resolution
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_homepage_wins_when_present(
        homepage in prop::option::of(url_strategy()),
        docs in prop::option::of(url_strategy()),
    ) {
        let mut urls = serde_json::Map::new();
        if let Some(h) = &homepage {
            urls.insert("Homepage".into(), json!(h));
        }
        if let Some(d) = &docs {
            urls.insert("Documentation".into(), json!(d));
        }
        let source = record(json!({"urls": Value::Object(urls)}));

        let table = MappingTable::standard();
        let resolved = resolve(&table, &source, &FieldPolicy::all(&table));

        match (homepage, docs) {
            (Some(h), _) => prop_assert_eq!(&resolved["url"], &json!(h)),
            (None, Some(d)) => prop_assert_eq!(&resolved["url"], &json!(d)),
            (None, None) => prop_assert!(!resolved.contains_key("url")),
        }
    }
}

// ============================================================================
// Equality + idempotence
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_equality_ignores_release_date(
        d1 in "[0-9]{4}-[0-9]{2}-[0-9]{2}",
        d2 in "[0-9]{4}-[0-9]{2}-[0-9]{2}",
        title in "[a-z]{1,12}",
    ) {
        let a = record(json!({"title": &title, "date-released": d1}));
        let b = record(json!({"title": &title, "date-released": d2}));
        prop_assert!(records_equal(&a, &b));
    }

    #[test]
    fn prop_generate_is_idempotent(
        name in "[a-z][a-z0-9-]{0,15}",
        version in version_strategy(),
        author in name_strategy(),
        homepage in url_strategy(),
    ) {
        let engine = SyncEngine::new()
            .with_clock(FixedClock(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
        let source = record(json!({
            "name": name,
            "version": version,
            "authors": [{"name": author.join(" ")}],
            "urls": {"Homepage": homepage}
        }));

        let first = engine.generate(&source, None, &Record::new());
        let second = engine.generate(&source, Some(&first), &Record::new());
        prop_assert!(!engine.changes_detected(Some(&first), &second));
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
