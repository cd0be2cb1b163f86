//! Sort definitions.
//!
//! A sort is an extractor producing a numeric key and a display label per
//! card. Collections order cards by descending key; the label names the bucket
//! a card falls in (a date, a count, a section title).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::card::{Card, CardUniverse, SectionMetadata};
use crate::description::DEFAULT_SORT_NAME;

pub const RECENT_SORT_NAME: &str = "recent";
pub const CREATED_SORT_NAME: &str = "created";
pub const LAST_TWEETED_SORT_NAME: &str = "last-tweeted";
pub const STARS_SORT_NAME: &str = "stars";
pub const TWEET_COUNT_SORT_NAME: &str = "tweet-count";
pub const LINK_COUNT_SORT_NAME: &str = "link-count";

const LABEL_DATE_FORMAT: &str = "%Y-%m-%d";

/// The sort key and label of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct SortInfo {
    /// Cards sort by this value, largest first.
    pub key: f64,
    /// The display label of the card's bucket.
    pub label: String,
}

impl SortInfo {
    pub fn new(key: f64, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
        }
    }
}

/// What an extractor can see besides the card itself.
#[derive(Debug, Clone, Copy)]
pub struct SortContext<'a> {
    /// Every known card.
    pub cards: &'a CardUniverse,
    /// Section titles and orders.
    pub sections: &'a SectionMetadata,
    /// The card a reference block is anchored to, if any.
    pub key_card_id: Option<&'a str>,
}

/// Produces a card's [`SortInfo`], or `None` if the card has no key.
pub type SortExtractor = Arc<dyn Fn(&Card, &SortContext<'_>) -> Option<SortInfo> + Send + Sync>;

/// A named sort.
#[derive(Clone)]
pub struct SortDefinition {
    /// Computes keys and labels.
    pub extractor: SortExtractor,
    /// One-line human description.
    pub description: String,
    /// Whether the unreversed order reads as "largest first" to a user.
    pub descending_by_default: bool,
}

impl SortDefinition {
    pub fn new(
        description: impl Into<String>,
        descending_by_default: bool,
        extractor: SortExtractor,
    ) -> Self {
        Self {
            extractor,
            description: description.into(),
            descending_by_default,
        }
    }
}

impl fmt::Debug for SortDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortDefinition")
            .field("description", &self.description)
            .field("descending_by_default", &self.descending_by_default)
            .finish_non_exhaustive()
    }
}

/// Sorts by name. Always contains the default sort.
#[derive(Debug, Clone)]
pub struct SortCatalog {
    default: SortDefinition,
    sorts: HashMap<String, SortDefinition>,
}

impl SortCatalog {
    /// A catalog holding only the default sort.
    pub fn new() -> Self {
        Self {
            default: default_sort(),
            sorts: HashMap::new(),
        }
    }

    /// The built-in sorts.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            RECENT_SORT_NAME,
            date_sort("Most recently updated first", |c| c.updated),
        );
        catalog.insert(
            CREATED_SORT_NAME,
            date_sort("Most recently created first", |c| c.created),
        );
        catalog.insert(
            LAST_TWEETED_SORT_NAME,
            date_sort("Most recently shared first", |c| c.last_tweeted),
        );
        catalog.insert(
            STARS_SORT_NAME,
            count_sort("Most starred first", "stars", |c| c.star_count as usize),
        );
        catalog.insert(
            TWEET_COUNT_SORT_NAME,
            count_sort("Most shared first", "shares", |c| c.tweet_count as usize),
        );
        catalog.insert(
            LINK_COUNT_SORT_NAME,
            count_sort("Most outbound links first", "links", |c| c.references.len()),
        );
        catalog
    }

    /// Adds or replaces a sort. Inserting under the default name replaces the
    /// default sort.
    pub fn insert(&mut self, name: impl Into<String>, sort: SortDefinition) {
        let name = name.into();
        if name == DEFAULT_SORT_NAME {
            self.default = sort;
        } else {
            self.sorts.insert(name, sort);
        }
    }

    pub fn get(&self, name: &str) -> Option<&SortDefinition> {
        if name == DEFAULT_SORT_NAME {
            return Some(&self.default);
        }
        self.sorts.get(name)
    }

    /// Looks up `name`, falling back to the default sort.
    pub fn resolve(&self, name: &str) -> &SortDefinition {
        self.sorts.get(name).unwrap_or(&self.default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sort names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sorts.keys().map(String::as_str).collect();
        names.push(DEFAULT_SORT_NAME);
        names.sort_unstable();
        names
    }
}

impl Default for SortCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Every card gets the same key, so ordering is left alone; the label is the
/// title of the card's section.
fn default_sort() -> SortDefinition {
    SortDefinition::new(
        "Canonical order",
        false,
        Arc::new(|card: &Card, context: &SortContext<'_>| {
            let label = card
                .section
                .as_deref()
                .and_then(|id| context.sections.get(id))
                .map(|section| section.title.clone())
                .unwrap_or_default();
            Some(SortInfo::new(0.0, label))
        }),
    )
}

fn date_sort(
    description: &str,
    field: fn(&Card) -> Option<DateTime<Utc>>,
) -> SortDefinition {
    SortDefinition::new(
        description,
        true,
        Arc::new(move |card: &Card, _: &SortContext<'_>| {
            field(card).map(|date| {
                SortInfo::new(
                    date.timestamp() as f64,
                    date.format(LABEL_DATE_FORMAT).to_string(),
                )
            })
        }),
    )
}

fn count_sort(description: &str, unit: &'static str, field: fn(&Card) -> usize) -> SortDefinition {
    SortDefinition::new(
        description,
        true,
        Arc::new(move |card: &Card, _: &SortContext<'_>| {
            let count = field(card);
            Some(SortInfo::new(count as f64, format!("{count} {unit}")))
        }),
    )
}
