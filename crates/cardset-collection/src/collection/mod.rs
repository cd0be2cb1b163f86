//! Resolving a description into an ordered, labeled list of cards.
//!
//! A [`Collection`] computes its results lazily in three stages, each at most
//! once per instance:
//!
//! 1. **filtering** – the base set narrowed by the description's filters, or
//!    the fallback sequence if nothing survives
//! 2. **sorting** – filtered cards in descending sort-key order, optionally
//!    reversed
//! 3. **labeling** – one label per sorted card, with repeats blanked
//!
//! Inputs never change under a collection. When they do, build a new one.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::args::CollectionArgs;
use crate::card::{Card, CardId};
use crate::description::CollectionDescription;
use crate::filter::{FilterEvaluator, FilterRegistry};
use crate::sort::{SortDefinition, SortInfo};

#[derive(Debug)]
struct Filtered {
    ids: Vec<CardId>,
    is_fallback: bool,
    pre_fallback_count: usize,
}

/// A description resolved against a [`CollectionArgs`] bundle.
///
/// # Example
///
/// ```
/// use cardset_collection_rs::card::{Card, CardUniverse};
/// use cardset_collection_rs::description::CollectionDescription;
/// use cardset_collection_rs::filter::FilterRegistry;
/// use cardset_collection_rs::{Collection, CollectionArgs};
///
/// let cards = CardUniverse::new(vec![Card::new("a", "A"), Card::new("b", "B")]);
/// let args = CollectionArgs::builder(cards)
///     .set("main", ["a", "b"])
///     .filters(FilterRegistry::new().with_set("starred", ["b"]))
///     .build();
///
/// let collection = Collection::new(CollectionDescription::deserialize("starred/"), args);
/// assert_eq!(collection.sorted_ids(), &["b"]);
/// assert!(!collection.is_fallback());
/// ```
#[derive(Debug)]
pub struct Collection {
    description: CollectionDescription,
    args: CollectionArgs,
    filtered: OnceLock<Filtered>,
    sort_info: OnceLock<HashMap<CardId, SortInfo>>,
    sorted: OnceLock<Vec<CardId>>,
    labels: OnceLock<Vec<String>>,
}

impl Collection {
    /// Creates a collection. Nothing is computed until asked for.
    pub fn new(description: CollectionDescription, args: CollectionArgs) -> Self {
        Self {
            description,
            args,
            filtered: OnceLock::new(),
            sort_info: OnceLock::new(),
            sorted: OnceLock::new(),
            labels: OnceLock::new(),
        }
    }

    pub fn description(&self) -> &CollectionDescription {
        &self.description
    }

    pub fn args(&self) -> &CollectionArgs {
        &self.args
    }

    // ==================== Filtering ====================

    /// Ids of the filtered cards, in base-set order.
    pub fn filtered_ids(&self) -> &[CardId] {
        &self.filtered().ids
    }

    /// The filtered cards, in base-set order.
    pub fn filtered_cards(&self) -> Vec<&Card> {
        self.to_cards(self.filtered_ids())
    }

    /// True if filtering matched nothing and the fallback sequence was used.
    pub fn is_fallback(&self) -> bool {
        self.filtered().is_fallback
    }

    /// How many ids the filters matched, before any fallback substitution.
    pub fn pre_fallback_count(&self) -> usize {
        self.filtered().pre_fallback_count
    }

    fn filtered(&self) -> &Filtered {
        self.filtered.get_or_init(|| {
            let base = self.args.set(self.description.set_name());
            let filters = self.description.filters();

            let matched: Vec<CardId> = if filters.is_empty() {
                base.to_vec()
            } else {
                FilterEvaluator::new(filters, &self.args.filter_context()).filter_ids(base)
            };
            let pre_fallback_count = matched.len();

            let (ids, is_fallback) = if matched.is_empty() {
                let fallback = self.args.fallback(self.description.serialize());
                tracing::debug!(
                    description = %self.description,
                    fallback = fallback.len(),
                    "no cards matched, using fallback"
                );
                (fallback.to_vec(), true)
            } else {
                (matched, false)
            };

            let cards = self.args.cards();
            Filtered {
                ids: ids.into_iter().filter(|id| cards.contains(id)).collect(),
                is_fallback,
                pre_fallback_count,
            }
        })
    }

    // ==================== Sorting ====================

    /// The sort this collection uses; unknown names resolve to the default.
    pub fn sort_definition(&self) -> &SortDefinition {
        self.args.sorts().resolve(self.description.sort_name())
    }

    /// True if the displayed order reads largest-first.
    pub fn sort_is_descending(&self) -> bool {
        self.sort_definition().descending_by_default != self.description.sort_reversed()
    }

    /// Ids of the filtered cards in sorted order.
    pub fn sorted_ids(&self) -> &[CardId] {
        self.sorted.get_or_init(|| {
            let filtered = self.filtered_ids();

            // Base-set order already is the default order of the default set.
            if self.description.is_default_set()
                && self.description.is_default_sort()
                && !self.description.sort_reversed()
            {
                return filtered.to_vec();
            }

            let mut ids = filtered.to_vec();
            sort_by_key_in_place(&mut ids, self.sort_info());
            if self.description.sort_reversed() {
                ids.reverse();
            }
            ids
        })
    }

    /// The filtered cards in sorted order.
    pub fn sorted_cards(&self) -> Vec<&Card> {
        self.to_cards(self.sorted_ids())
    }

    fn sort_info(&self) -> &HashMap<CardId, SortInfo> {
        self.sort_info.get_or_init(|| {
            let extractor = &self.sort_definition().extractor;
            let context = self.args.sort_context();
            self.filtered_cards()
                .into_iter()
                .filter_map(|card| extractor(card, &context).map(|info| (card.id.clone(), info)))
                .collect()
        })
    }

    // ==================== Labeling ====================

    /// One label per sorted card.
    ///
    /// A label equal to the one before it is blanked. If every card carries
    /// the same label, all labels are blanked.
    pub fn labels(&self) -> &[String] {
        self.labels
            .get_or_init(|| dedupe_labels(&self.raw_labels(self.sorted_ids())))
    }

    /// The sort label of each of `ids`, before deduplication.
    fn raw_labels<'s>(&'s self, ids: &[CardId]) -> Vec<&'s str> {
        let info = self.sort_info();
        ids.iter()
            .map(|id| info.get(id).map(|i| i.label.as_str()).unwrap_or_default())
            .collect()
    }

    // ==================== Start cards ====================

    /// Cards configured to lead this collection, ahead of its sorted cards.
    pub fn start_card_ids(&self) -> Vec<CardId> {
        let cards = self.args.cards();
        self.args
            .start_cards(self.description.serialize())
            .iter()
            .filter(|id| cards.contains(id))
            .cloned()
            .collect()
    }

    /// Start cards followed by the sorted cards that are not start cards.
    pub fn final_ids(&self) -> Vec<CardId> {
        let start = self.start_card_ids();
        let seen: HashSet<&CardId> = start.iter().collect();
        let rest: Vec<CardId> = self
            .sorted_ids()
            .iter()
            .filter(|id| !seen.contains(id))
            .cloned()
            .collect();
        start.into_iter().chain(rest).collect()
    }

    /// Labels aligned with [`final_ids`](Self::final_ids); start cards are
    /// unlabeled.
    ///
    /// The remaining cards are deduplicated on their own, so a bucket whose
    /// first card moved to the front keeps its label on the next one.
    pub fn final_labels(&self) -> Vec<String> {
        let start = self.start_card_ids();
        if start.is_empty() {
            return self.labels().to_vec();
        }

        let seen: HashSet<&CardId> = start.iter().collect();
        let rest: Vec<CardId> = self
            .sorted_ids()
            .iter()
            .filter(|id| !seen.contains(id))
            .cloned()
            .collect();
        std::iter::repeat(String::new())
            .take(start.len())
            .chain(dedupe_labels(&self.raw_labels(&rest)))
            .collect()
    }

    // ==================== Pending edits ====================

    /// The filtered cards that would drop out if the concrete filter sets were
    /// replaced by `pending`.
    ///
    /// The check also covers the filter equivalent to this collection's set,
    /// when one is declared, so moving a card out of the set counts as well.
    pub fn items_that_would_be_removed(&self, pending: &FilterRegistry) -> Vec<CardId> {
        let mut names = self.description.filters().to_vec();
        if let Some(equivalent) = self.args.set_filter_equivalent(self.description.set_name()) {
            names.push(equivalent.to_string());
        }
        if names.is_empty() {
            return Vec::new();
        }

        let context = self.args.filter_context().with_filters(pending);
        let evaluator = FilterEvaluator::new(&names, &context);
        self.filtered_ids()
            .iter()
            .filter(|id| !evaluator.matches(id))
            .cloned()
            .collect()
    }

    fn to_cards<'a>(&'a self, ids: &[CardId]) -> Vec<&'a Card> {
        let cards = self.args.cards();
        ids.iter().filter_map(|id| cards.get(id)).collect()
    }
}

/// Stable descending sort by key.
///
/// Cards without a key keep their exact positions; keyed cards are sorted
/// among the remaining positions.
fn sort_by_key_in_place(ids: &mut [CardId], info: &HashMap<CardId, SortInfo>) {
    let slots: Vec<usize> = (0..ids.len())
        .filter(|&i| info.contains_key(&ids[i]))
        .collect();

    let mut keyed: Vec<CardId> = slots.iter().map(|&i| ids[i].clone()).collect();
    keyed.sort_by(|a, b| {
        let (a, b) = (&info[a], &info[b]);
        b.key.total_cmp(&a.key)
    });

    for (slot, id) in slots.into_iter().zip(keyed) {
        ids[slot] = id;
    }
}

/// Blanks every label equal to its predecessor, or all of them if they are all
/// the same.
pub(crate) fn dedupe_labels(raw: &[&str]) -> Vec<String> {
    let distinct: HashSet<&str> = raw.iter().copied().collect();
    if distinct.len() <= 1 {
        return vec![String::new(); raw.len()];
    }

    let mut previous: Option<&str> = None;
    raw.iter()
        .map(|&label| {
            if previous == Some(label) {
                String::new()
            } else {
                previous = Some(label);
                label.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
