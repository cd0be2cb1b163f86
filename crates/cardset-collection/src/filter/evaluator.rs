//! Combining a list of filter names into one membership test.
//!
//! Every name lands in one of two groups:
//!
//! - **include**: concrete filters, union filters and configurable filters.
//!   A card must be a member of every include set.
//! - **exclude**: the targets of bare inverse filters. A card must be a member
//!   of no exclude set.
//!
//! Unknown names contribute nothing. Complements are only materialized for
//! inverse names inside a union; a bare inverse goes to the exclude group.

use std::collections::HashSet;
use std::sync::Arc;

use super::configurable::{ConfigurableFilterCache, ConfigurableFilterRegistry};
use super::expr::{FilterKind, FilterRef};
use super::registry::{FilterRegistry, FilterSet};
use crate::card::{CardId, CardUniverse};

/// Data needed to evaluate filter names.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    filters: &'a FilterRegistry,
    cards: &'a CardUniverse,
    configurable: &'a ConfigurableFilterRegistry,
    cache: &'a ConfigurableFilterCache,
}

impl<'a> FilterContext<'a> {
    /// Creates a new filter context.
    ///
    /// # Arguments
    ///
    /// * `filters` - Concrete and inverse filter definitions
    /// * `cards` - The full card universe, used for complements and
    ///   configurable filters
    /// * `configurable` - Factories for configurable filters
    /// * `cache` - Memoized configurable filter results
    pub fn new(
        filters: &'a FilterRegistry,
        cards: &'a CardUniverse,
        configurable: &'a ConfigurableFilterRegistry,
        cache: &'a ConfigurableFilterCache,
    ) -> Self {
        Self {
            filters,
            cards,
            configurable,
            cache,
        }
    }

    /// Returns a context that reads concrete filters from `filters` instead.
    pub fn with_filters(self, filters: &'a FilterRegistry) -> Self {
        Self { filters, ..self }
    }

    /// Every card id that is not in `set`.
    fn complement(&self, set: &FilterSet) -> FilterSet {
        self.cards
            .ids()
            .iter()
            .filter(|id| !set.contains(*id))
            .cloned()
            .collect()
    }

    fn union(&self, members: &[FilterRef]) -> FilterSet {
        let mut result = HashSet::new();
        for member in members {
            match member {
                FilterRef::Concrete(name) => {
                    if let Some(set) = self.filters.get(name) {
                        result.extend(set.iter().cloned());
                    }
                }
                FilterRef::Inverse { target, .. } => {
                    let empty = FilterSet::new();
                    let target = self.filters.get(target).unwrap_or(&empty);
                    result.extend(self.complement(target));
                }
                FilterRef::Unknown(_) => {}
            }
        }
        result
    }
}

/// A membership set held by the evaluator.
#[derive(Debug)]
enum Membership<'a> {
    Borrowed(&'a FilterSet),
    Owned(FilterSet),
    Shared(Arc<FilterSet>),
}

impl Membership<'_> {
    fn contains(&self, id: &str) -> bool {
        match self {
            Membership::Borrowed(set) => set.contains(id),
            Membership::Owned(set) => set.contains(id),
            Membership::Shared(set) => set.contains(id),
        }
    }
}

/// Evaluates a list of filter names against card ids.
///
/// # Example
///
/// ```
/// use cardset_collection_rs::card::{Card, CardUniverse};
/// use cardset_collection_rs::filter::{
///     ConfigurableFilterCache, ConfigurableFilterRegistry, FilterContext, FilterEvaluator,
///     FilterRegistry,
/// };
///
/// let cards = CardUniverse::new(vec![Card::new("a", "A"), Card::new("b", "B")]);
/// let filters = FilterRegistry::new()
///     .with_set("starred", ["a"])
///     .with_inverse("unstarred", "starred");
/// let configurable = ConfigurableFilterRegistry::standard();
/// let cache = ConfigurableFilterCache::new();
/// let context = FilterContext::new(&filters, &cards, &configurable, &cache);
///
/// let evaluator = FilterEvaluator::new(&["unstarred".to_string()], &context);
/// assert!(!evaluator.matches("a"));
/// assert!(evaluator.matches("b"));
/// ```
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    include: Vec<Membership<'a>>,
    exclude: Vec<&'a FilterSet>,
}

impl<'a> FilterEvaluator<'a> {
    /// Classifies every name and gathers the sets it refers to.
    pub fn new(names: &[String], context: &FilterContext<'a>) -> Self {
        let mut include = Vec::new();
        let mut exclude = Vec::new();

        for name in names {
            match FilterKind::classify(name, context.filters) {
                FilterKind::Union(members) => {
                    include.push(Membership::Owned(context.union(&members)));
                }
                FilterKind::Configurable { name, .. } => {
                    let set = context
                        .cache
                        .evaluate(&name, context.cards, context.configurable);
                    include.push(Membership::Shared(set));
                }
                FilterKind::Concrete(name) => {
                    if let Some(set) = context.filters.get(&name) {
                        include.push(Membership::Borrowed(set));
                    }
                }
                FilterKind::Inverse { target, .. } => {
                    // An inverse of an unknown filter excludes nothing.
                    if let Some(set) = context.filters.get(&target) {
                        exclude.push(set);
                    }
                }
                FilterKind::Unknown(name) => {
                    tracing::trace!(filter = %name, "ignoring unknown filter");
                }
            }
        }

        Self { include, exclude }
    }

    /// Returns true if the card id passes every filter.
    pub fn matches(&self, id: &str) -> bool {
        self.include.iter().all(|set| set.contains(id))
            && !self.exclude.iter().any(|set| set.contains(id))
    }

    /// Keeps the ids that match, preserving order.
    pub fn filter_ids<'b>(&self, ids: impl IntoIterator<Item = &'b CardId>) -> Vec<CardId> {
        ids.into_iter()
            .filter(|id| self.matches(id))
            .cloned()
            .collect()
    }
}
