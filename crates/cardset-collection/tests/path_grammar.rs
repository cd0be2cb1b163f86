//! Integration tests for parsing and serializing collection paths.

use cardset_collection_rs::description::{
    extract_filter_names_and_sort, CollectionDescription, DescriptionGrammar,
};

fn parse(path: &str) -> CollectionDescription {
    CollectionDescription::deserialize(path)
}

fn filters(names: &[&str]) -> CollectionDescription {
    CollectionDescription::with_filters(names.iter().copied()).unwrap()
}

// ============================================================================
// Equivalence
// ============================================================================

#[test]
fn test_union_and_concrete_filters() {
    assert_eq!(
        parse("starred+read/has-todo/"),
        filters(&["starred+read", "has-todo"])
    );
}

#[test]
fn test_sort_segment_variants() {
    let plain = CollectionDescription::new("", ["half-baked"], "tweet-order", false).unwrap();
    let reversed = CollectionDescription::new("", ["half-baked"], "tweet-order", true).unwrap();

    assert_eq!(parse("half-baked/sort/tweet-order/"), plain);
    assert_eq!(parse("half-baked/sort/reverse/tweet-order/"), reversed);
    assert_ne!(plain, reversed);
}

#[test]
fn test_filters_around_sort_segment() {
    let expected =
        CollectionDescription::new("", ["half-baked", "has-todo"], "tweet-order", false).unwrap();
    assert_eq!(parse("half-baked/sort/tweet-order/has-todo/"), expected);
}

#[test]
fn test_explicit_set_name() {
    let explicit = parse("main/half-baked/sort/tweet-order/");
    assert!(explicit.set_name_explicitly_set());
    assert_eq!(explicit.set_name(), "main");

    let implicit = parse("half-baked/sort/tweet-order/");
    assert!(!implicit.set_name_explicitly_set());
    assert_eq!(implicit.set_name(), "main");

    // Explicitness is not part of equivalence.
    assert_eq!(explicit, implicit);
}

#[test]
fn test_multi_part_filters() {
    assert_eq!(
        parse("updated/before/2020-10-02/"),
        filters(&["updated/before/2020-10-02"])
    );
    assert_eq!(
        parse("updated/between/2020-10-02/2020-11-03/"),
        filters(&["updated/between/2020-10-02/2020-11-03"])
    );
    assert_eq!(
        parse("starred/updated/after/2020-10-02/read/"),
        filters(&["starred", "updated/after/2020-10-02", "read"])
    );
}

#[test]
fn test_truncated_multi_part_filters_are_dropped() {
    for path in ["updated/", "updated/before/", "before/2020-10-02/"] {
        assert!(parse(path).filters().is_empty(), "{path}");
    }
}

#[test]
fn test_extra_segment() {
    let (description, extra) = CollectionDescription::deserialize_with_extra("starred/extra");
    assert_eq!(description, filters(&["starred"]));
    assert_eq!(extra, "extra");

    let (_, extra) = CollectionDescription::deserialize_with_extra("starred/");
    assert_eq!(extra, "");
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_and_idempotence() {
    let descriptions = [
        CollectionDescription::default(),
        CollectionDescription::new("everything", ["b", "a"], "recent", false).unwrap(),
        CollectionDescription::new("reading-list", ["starred+unread"], "default", true).unwrap(),
        CollectionDescription::new("", ["updated/between/2020-01-01/2020-02-01", "done"], "stars", true)
            .unwrap(),
        CollectionDescription::new("main", ["references/card-1"], "link-count", false).unwrap(),
    ];

    for description in descriptions {
        let once = description.serialize().to_string();
        let reparsed = parse(&once);
        assert_eq!(reparsed, description, "{once}");
        assert_eq!(parse(reparsed.serialize()).serialize(), once);
    }
}

#[test]
fn test_text_forms_agree() {
    let description: CollectionDescription = "sort/reverse/recent/starred/".parse().unwrap();
    assert_eq!(description.to_string(), "main/starred/sort/reverse/recent/");

    let json = serde_json::to_string(&description).unwrap();
    assert_eq!(json, "\"main/starred/sort/reverse/recent/\"");
    let back: CollectionDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(back, description);
}

// ============================================================================
// Custom grammars
// ============================================================================

#[test]
fn test_custom_grammar_tables() {
    let grammar = DescriptionGrammar::new(
        ["inbox"],
        [("rated", 1), ("between", 2)],
        ["rated"],
    );

    let description =
        CollectionDescription::deserialize_with_grammar("inbox/rated/between/1/5/x/", &grammar);
    assert_eq!(description.set_name(), "inbox");
    assert!(description.set_name_explicitly_set());
    assert_eq!(description.filters(), &["rated/between/1/5", "x"]);

    let extracted = extract_filter_names_and_sort(&["rated", "3", "sort", "score"], &grammar);
    assert_eq!(extracted.filters, vec!["rated/3"]);
    assert_eq!(extracted.sort_name, "score");
    assert!(!extracted.sort_reversed);
}
