//! The construction-arguments bundle every collection is resolved against.

use std::collections::HashMap;
use std::sync::Arc;

use crate::card::{CardId, CardUniverse, SectionMetadata};
use crate::description::EVERYTHING_SET_NAME;
use crate::filter::{
    ConfigurableFilterCache, ConfigurableFilterRegistry, FilterContext, FilterRegistry,
};
use crate::identity::Identity;
use crate::sort::{SortCatalog, SortContext};

/// Everything a [`Collection`](crate::Collection) needs from outside.
///
/// The bundle is immutable and cheap to clone. It carries an [`Identity`];
/// caches keyed on a bundle compare identities, never contents, so build a new
/// bundle whenever any input changes.
#[derive(Debug, Clone)]
pub struct CollectionArgs {
    identity: Identity,
    cards: Arc<CardUniverse>,
    sets: Arc<HashMap<String, Vec<CardId>>>,
    filters: Arc<FilterRegistry>,
    configurable: Arc<ConfigurableFilterRegistry>,
    configurable_cache: Arc<ConfigurableFilterCache>,
    sorts: Arc<SortCatalog>,
    sections: Arc<SectionMetadata>,
    fallbacks: Arc<HashMap<String, Vec<CardId>>>,
    start_cards: Arc<HashMap<String, Vec<CardId>>>,
    set_filter_equivalents: Arc<HashMap<String, String>>,
    key_card_id: Option<CardId>,
}

impl CollectionArgs {
    /// Starts building a bundle over `cards`.
    pub fn builder(cards: impl Into<Arc<CardUniverse>>) -> CollectionArgsBuilder {
        CollectionArgsBuilder::new(cards.into())
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn cards(&self) -> &CardUniverse {
        &self.cards
    }

    /// The ids of a base set, empty if the set is unknown.
    pub fn set(&self, name: &str) -> &[CardId] {
        self.sets.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Names of all base sets.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn configurable_filters(&self) -> &ConfigurableFilterRegistry {
        &self.configurable
    }

    pub fn configurable_cache(&self) -> &ConfigurableFilterCache {
        &self.configurable_cache
    }

    pub fn sorts(&self) -> &SortCatalog {
        &self.sorts
    }

    pub fn sections(&self) -> &SectionMetadata {
        &self.sections
    }

    /// The fallback sequence for a serialized description, empty if none.
    pub fn fallback(&self, serialized: &str) -> &[CardId] {
        self.fallbacks
            .get(serialized)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The start cards for a serialized description, empty if none.
    pub fn start_cards(&self, serialized: &str) -> &[CardId] {
        self.start_cards
            .get(serialized)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The filter whose membership matches the set `set_name`, if any.
    pub fn set_filter_equivalent(&self, set_name: &str) -> Option<&str> {
        self.set_filter_equivalents
            .get(set_name)
            .map(String::as_str)
    }

    /// The key card of a reference block expansion.
    pub fn key_card_id(&self) -> Option<&str> {
        self.key_card_id.as_deref()
    }

    /// Returns a copy carrying `card_id` as the key card.
    ///
    /// The copy shares all data with `self` but gets its own identity.
    pub fn with_key_card(&self, card_id: impl Into<CardId>) -> Self {
        Self {
            identity: Identity::next(),
            key_card_id: Some(card_id.into()),
            ..self.clone()
        }
    }

    /// A filter context over this bundle's data.
    pub fn filter_context(&self) -> FilterContext<'_> {
        FilterContext::new(
            &self.filters,
            &self.cards,
            &self.configurable,
            &self.configurable_cache,
        )
    }

    /// A sort context over this bundle's data.
    pub fn sort_context(&self) -> SortContext<'_> {
        SortContext {
            cards: &self.cards,
            sections: &self.sections,
            key_card_id: self.key_card_id(),
        }
    }
}

/// Builder for [`CollectionArgs`].
///
/// Unless overridden, the bundle uses the standard configurable filters and
/// sorts, a fresh configurable filter cache, and an `everything` set listing
/// every card in universe order.
#[derive(Debug)]
pub struct CollectionArgsBuilder {
    cards: Arc<CardUniverse>,
    sets: HashMap<String, Vec<CardId>>,
    filters: FilterRegistry,
    configurable: Option<ConfigurableFilterRegistry>,
    configurable_cache: Option<Arc<ConfigurableFilterCache>>,
    sorts: Option<SortCatalog>,
    sections: SectionMetadata,
    fallbacks: HashMap<String, Vec<CardId>>,
    start_cards: HashMap<String, Vec<CardId>>,
    set_filter_equivalents: HashMap<String, String>,
}

impl CollectionArgsBuilder {
    fn new(cards: Arc<CardUniverse>) -> Self {
        Self {
            cards,
            sets: HashMap::new(),
            filters: FilterRegistry::new(),
            configurable: None,
            configurable_cache: None,
            sorts: None,
            sections: SectionMetadata::new(),
            fallbacks: HashMap::new(),
            start_cards: HashMap::new(),
            set_filter_equivalents: HashMap::new(),
        }
    }

    /// Adds a base set.
    pub fn set(
        mut self,
        name: impl Into<String>,
        ids: impl IntoIterator<Item = impl Into<CardId>>,
    ) -> Self {
        self.sets
            .insert(name.into(), ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn filters(mut self, filters: FilterRegistry) -> Self {
        self.filters = filters;
        self
    }

    pub fn configurable_filters(mut self, registry: ConfigurableFilterRegistry) -> Self {
        self.configurable = Some(registry);
        self
    }

    /// Shares an existing cache, so results survive rebuilding the bundle as
    /// long as the card universe stays the same.
    pub fn configurable_cache(mut self, cache: Arc<ConfigurableFilterCache>) -> Self {
        self.configurable_cache = Some(cache);
        self
    }

    pub fn sorts(mut self, sorts: SortCatalog) -> Self {
        self.sorts = Some(sorts);
        self
    }

    pub fn sections(mut self, sections: SectionMetadata) -> Self {
        self.sections = sections;
        self
    }

    /// Adds a fallback sequence for a serialized description.
    pub fn fallback(
        mut self,
        serialized: impl Into<String>,
        ids: impl IntoIterator<Item = impl Into<CardId>>,
    ) -> Self {
        self.fallbacks
            .insert(serialized.into(), ids.into_iter().map(Into::into).collect());
        self
    }

    /// Adds start cards for a serialized description.
    pub fn start_cards(
        mut self,
        serialized: impl Into<String>,
        ids: impl IntoIterator<Item = impl Into<CardId>>,
    ) -> Self {
        self.start_cards
            .insert(serialized.into(), ids.into_iter().map(Into::into).collect());
        self
    }

    /// Declares that membership in `set_name` is mirrored by `filter_name`.
    pub fn set_filter_equivalent(
        mut self,
        set_name: impl Into<String>,
        filter_name: impl Into<String>,
    ) -> Self {
        self.set_filter_equivalents
            .insert(set_name.into(), filter_name.into());
        self
    }

    pub fn build(mut self) -> CollectionArgs {
        if !self.sets.contains_key(EVERYTHING_SET_NAME) {
            self.sets
                .insert(EVERYTHING_SET_NAME.to_string(), self.cards.ids().to_vec());
        }

        CollectionArgs {
            identity: Identity::next(),
            cards: self.cards,
            sets: Arc::new(self.sets),
            filters: Arc::new(self.filters),
            configurable: Arc::new(
                self.configurable
                    .unwrap_or_else(ConfigurableFilterRegistry::standard),
            ),
            configurable_cache: self.configurable_cache.unwrap_or_default(),
            sorts: Arc::new(self.sorts.unwrap_or_else(SortCatalog::standard)),
            sections: Arc::new(self.sections),
            fallbacks: Arc::new(self.fallbacks),
            start_cards: Arc::new(self.start_cards),
            set_filter_equivalents: Arc::new(self.set_filter_equivalents),
            key_card_id: None,
        }
    }
}
