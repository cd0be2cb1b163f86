//! Tests for collection resolution.

use std::sync::Arc;

use super::*;
use crate::card::{Card, CardUniverse, Section, SectionMetadata};
use crate::description::DescriptionGrammar;
use crate::sort::{SortCatalog, SortContext, SortDefinition, SortInfo};

// ==================== Test Helpers ====================

fn card(id: &str, stars: u32) -> Card {
    let mut card = Card::new(id, id.to_uppercase());
    card.star_count = stars;
    card
}

fn universe() -> CardUniverse {
    CardUniverse::new(vec![card("a", 1), card("b", 3), card("c", 2), card("d", 3)])
}

fn args() -> CollectionArgs {
    CollectionArgs::builder(universe())
        .set("main", ["a", "b", "c", "d"])
        .set("reading-list", ["d", "c"])
        .filters(
            FilterRegistry::new()
                .with_set("starred", ["a", "c", "d"])
                .with_set("read", ["c"])
                .with_set("on-reading-list", ["c", "d"])
                .with_set("done", Vec::<CardId>::new())
                .with_inverse("unread", "read"),
        )
        .set_filter_equivalent("reading-list", "on-reading-list")
        .build()
}

fn resolve(path: &str) -> Collection {
    Collection::new(CollectionDescription::deserialize(path), args())
}

fn labels(raw: &[&str]) -> Vec<String> {
    dedupe_labels(raw)
}

// ==================== Filtering ====================

#[test]
fn test_no_filters_returns_base_set() {
    let collection = resolve("main/");
    assert_eq!(collection.filtered_ids(), &["a", "b", "c", "d"]);
    assert!(!collection.is_fallback());
    assert_eq!(collection.pre_fallback_count(), 4);
}

#[test]
fn test_filters_keep_base_set_order() {
    let collection = resolve("starred/unread/");
    assert_eq!(collection.filtered_ids(), &["a", "d"]);
    assert_eq!(
        collection
            .filtered_cards()
            .iter()
            .map(|c| c.title.as_str())
            .collect::<Vec<_>>(),
        vec!["A", "D"]
    );
}

#[test]
fn test_unknown_set_is_empty() {
    let grammar = DescriptionGrammar::new(
        ["nowhere"],
        Vec::<(String, usize)>::new(),
        Vec::<String>::new(),
    );
    let collection = Collection::new(
        CollectionDescription::deserialize_with_grammar("nowhere/", &grammar),
        args(),
    );
    assert!(collection.filtered_ids().is_empty());
    assert!(collection.is_fallback());
}

#[test]
fn test_fallback_catalog_hit() {
    let args = CollectionArgs::builder(universe())
        .set("main", ["a", "b"])
        .filters(FilterRegistry::new().with_set("done", Vec::<CardId>::new()))
        .fallback("main/done/", ["c", "missing", "d"])
        .build();
    let collection = Collection::new(CollectionDescription::deserialize("done/"), args);

    assert!(collection.is_fallback());
    assert_eq!(collection.pre_fallback_count(), 0);
    // Ids the universe does not know are dropped.
    assert_eq!(collection.filtered_ids(), &["c", "d"]);
}

#[test]
fn test_fallback_catalog_miss_is_empty() {
    let collection = resolve("done/");
    assert!(collection.is_fallback());
    assert!(collection.filtered_ids().is_empty());
    assert!(collection.sorted_ids().is_empty());
    assert!(collection.labels().is_empty());
}

#[test]
fn test_base_ids_missing_from_universe_are_dropped() {
    let args = CollectionArgs::builder(universe())
        .set("main", ["a", "ghost", "b"])
        .build();
    let collection = Collection::new(CollectionDescription::default(), args);
    assert_eq!(collection.filtered_ids(), &["a", "b"]);
    assert_eq!(collection.pre_fallback_count(), 3);
}

// ==================== Sorting ====================

#[test]
fn test_default_sort_keeps_base_order() {
    let collection = resolve("main/");
    assert_eq!(collection.sorted_ids(), &["a", "b", "c", "d"]);
}

#[test]
fn test_sort_descending_and_stable() {
    let collection = resolve("sort/stars/");
    assert_eq!(collection.sorted_ids(), &["b", "d", "c", "a"]);
    assert!(collection.sort_is_descending());
}

#[test]
fn test_sort_reversed_reverses_whole_sequence() {
    let collection = resolve("sort/reverse/stars/");
    assert_eq!(collection.sorted_ids(), &["a", "c", "d", "b"]);
    assert!(!collection.sort_is_descending());
}

#[test]
fn test_unknown_sort_falls_back_to_default() {
    let collection = resolve("sort/no-such-sort/");
    assert_eq!(collection.description().sort_name(), "no-such-sort");
    assert_eq!(collection.sorted_ids(), &["a", "b", "c", "d"]);
}

#[test]
fn test_default_sort_on_other_set_is_noop() {
    let collection = resolve("reading-list/");
    assert_eq!(collection.sorted_ids(), &["d", "c"]);
}

#[test]
fn test_keyless_cards_stay_in_place() {
    let mut sorts = SortCatalog::new();
    sorts.insert(
        "starred-only",
        SortDefinition::new(
            "Stars, unstarred cards unkeyed",
            true,
            Arc::new(|card: &Card, _: &SortContext<'_>| {
                (card.star_count > 0)
                    .then(|| SortInfo::new(card.star_count as f64, card.star_count.to_string()))
            }),
        ),
    );
    let cards = CardUniverse::new(vec![card("a", 0), card("b", 1), card("c", 0), card("d", 5)]);
    let args = CollectionArgs::builder(cards)
        .set("main", ["a", "b", "c", "d"])
        .sorts(sorts)
        .build();

    let collection = Collection::new(
        CollectionDescription::deserialize("sort/starred-only/"),
        args,
    );
    assert_eq!(collection.sorted_ids(), &["a", "d", "c", "b"]);
    assert_eq!(collection.labels(), &["", "5", "", "1"]);
}

#[test]
fn test_sorted_cards_follow_sorted_ids() {
    let collection = resolve("sort/stars/");
    let titles: Vec<&str> = collection
        .sorted_cards()
        .iter()
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(titles, vec!["B", "D", "C", "A"]);
}

// ==================== Labeling ====================

#[test]
fn test_dedupe_consecutive_labels() {
    assert_eq!(
        labels(&["x", "x", "y", "y", "y"]),
        vec!["x", "", "y", "", ""]
    );
}

#[test]
fn test_dedupe_all_identical_labels() {
    assert_eq!(labels(&["x", "x", "x"]), vec!["", "", ""]);
}

#[test]
fn test_dedupe_non_adjacent_repeats_are_kept() {
    assert_eq!(labels(&["x", "y", "x"]), vec!["x", "y", "x"]);
}

#[test]
fn test_dedupe_empty() {
    assert!(labels(&[]).is_empty());
}

#[test]
fn test_collection_labels() {
    let collection = resolve("sort/stars/");
    assert_eq!(collection.labels(), &["3 stars", "", "2 stars", "1 stars"]);
}

#[test]
fn test_section_labels_all_same_are_blanked() {
    let mut sections = SectionMetadata::new();
    sections.insert(
        "s".to_string(),
        Section {
            id: "s".to_string(),
            title: "Section".to_string(),
            cards: vec!["a".to_string(), "b".to_string()],
        },
    );
    let cards = CardUniverse::new(["a", "b"].map(|id| {
        let mut card = Card::new(id, id);
        card.section = Some("s".to_string());
        card
    }));
    let args = CollectionArgs::builder(cards)
        .set("everything", ["a", "b"])
        .sections(sections)
        .build();

    let collection = Collection::new(CollectionDescription::deserialize("everything/"), args);
    assert_eq!(collection.labels(), &["", ""]);
}

// ==================== Start cards ====================

#[test]
fn test_start_cards_lead_final_ids() {
    let args = CollectionArgs::builder(universe())
        .set("main", ["a", "b", "c", "d"])
        .sorts(SortCatalog::standard())
        .start_cards("main/sort/stars/", ["c", "ghost"])
        .build();
    let collection = Collection::new(CollectionDescription::deserialize("sort/stars/"), args);

    assert_eq!(collection.start_card_ids(), vec!["c"]);
    assert_eq!(collection.final_ids(), vec!["c", "b", "d", "a"]);
    assert_eq!(
        collection.final_labels(),
        vec!["", "3 stars", "", "1 stars"]
    );
}

#[test]
fn test_start_card_heading_a_bucket_passes_its_label_on() {
    let args = CollectionArgs::builder(universe())
        .set("main", ["a", "b", "c", "d"])
        .sorts(SortCatalog::standard())
        .start_cards("main/sort/stars/", ["b"])
        .build();
    let collection = Collection::new(CollectionDescription::deserialize("sort/stars/"), args);

    assert_eq!(collection.labels(), &["3 stars", "", "2 stars", "1 stars"]);
    assert_eq!(collection.final_ids(), vec!["b", "d", "c", "a"]);
    assert_eq!(
        collection.final_labels(),
        vec!["", "3 stars", "2 stars", "1 stars"]
    );
}

#[test]
fn test_no_start_cards() {
    let collection = resolve("main/");
    assert!(collection.start_card_ids().is_empty());
    assert_eq!(collection.final_ids(), collection.sorted_ids());
}

// ==================== Pending edits ====================

#[test]
fn test_items_that_would_be_removed() {
    let collection = resolve("starred/");
    let pending = FilterRegistry::new()
        .with_set("starred", ["a"])
        .with_set("read", ["c"]);
    assert_eq!(collection.items_that_would_be_removed(&pending), vec!["c", "d"]);
}

#[test]
fn test_items_that_would_be_removed_uses_set_equivalent() {
    let collection = resolve("reading-list/");
    let pending = FilterRegistry::new().with_set("on-reading-list", ["c"]);
    assert_eq!(collection.items_that_would_be_removed(&pending), vec!["d"]);
}

#[test]
fn test_items_that_would_be_removed_without_filters() {
    let collection = resolve("main/");
    assert!(collection
        .items_that_would_be_removed(&FilterRegistry::new())
        .is_empty());
}
