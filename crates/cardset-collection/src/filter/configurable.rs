//! Configurable (parameterized) filters and their memoization cache.
//!
//! A configurable filter is named `base/arg1/.../argN`. The factory registered
//! for `base` receives every segment, `base` included, and returns a predicate
//! that is then applied to the whole card universe to materialize a
//! [`FilterSet`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::ReentrantMutex;

use super::registry::FilterSet;
use crate::card::{Card, CardUniverse};
use crate::description::SEGMENT_SEPARATOR;
use crate::identity::Identity;

/// Filter on the card's last update.
pub const UPDATED_FILTER_NAME: &str = "updated";

/// Filter on when the card was last shared.
pub const LAST_TWEETED_FILTER_NAME: &str = "last-tweeted";

/// Cards that link to the argument card.
pub const REFERENCES_FILTER_NAME: &str = "references";

/// Cards the argument card links to.
pub const REFERENCED_BY_FILTER_NAME: &str = "referenced-by";

const BEFORE_KEYWORD: &str = "before";
const AFTER_KEYWORD: &str = "after";
const BETWEEN_KEYWORD: &str = "between";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A membership test produced by a factory.
pub type CardPredicate = Box<dyn Fn(&Card, &CardUniverse) -> bool + Send + Sync>;

/// Turns the segments of a configurable filter name into a predicate.
pub type FilterFactory = Arc<dyn Fn(&[&str]) -> CardPredicate + Send + Sync>;

/// Factories for configurable filters, plus the segment arities the path
/// grammar needs to reassemble their names.
#[derive(Clone, Default)]
pub struct ConfigurableFilterRegistry {
    factories: HashMap<String, FilterFactory>,
    multi_part: HashMap<String, usize>,
}

impl ConfigurableFilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in date and reference filters.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register_base(UPDATED_FILTER_NAME, 1, date_filter_factory(|c| c.updated));
        registry.register_base(
            LAST_TWEETED_FILTER_NAME,
            1,
            date_filter_factory(|c| c.last_tweeted),
        );
        registry.register_base(REFERENCES_FILTER_NAME, 1, Arc::new(references_factory));
        registry.register_base(REFERENCED_BY_FILTER_NAME, 1, Arc::new(referenced_by_factory));
        registry.register_part(BEFORE_KEYWORD, 1);
        registry.register_part(AFTER_KEYWORD, 1);
        registry.register_part(BETWEEN_KEYWORD, 2);
        registry
    }

    /// Registers a filter base requiring `arity` further path segments.
    pub fn register_base(&mut self, base: impl Into<String>, arity: usize, factory: FilterFactory) {
        let base = base.into();
        self.multi_part.insert(base.clone(), arity);
        self.factories.insert(base, factory);
    }

    /// Registers a sub-keyword (such as `between`) requiring `arity` further
    /// path segments.
    pub fn register_part(&mut self, part: impl Into<String>, arity: usize) {
        self.multi_part.insert(part.into(), arity);
    }

    /// Names that may begin a configurable filter.
    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Every multi-part segment with its arity.
    pub fn multi_part_table(&self) -> impl Iterator<Item = (&str, usize)> {
        self.multi_part
            .iter()
            .map(|(name, arity)| (name.as_str(), *arity))
    }

    /// Builds the predicate for a configurable filter name.
    ///
    /// Names whose base has no factory accept every card.
    pub fn predicate(&self, name: &str) -> CardPredicate {
        let segments: Vec<&str> = name.split(SEGMENT_SEPARATOR).collect();
        let base = segments.first().copied().unwrap_or_default();
        match self.factories.get(base) {
            Some(factory) => factory(&segments),
            None => accept_all(),
        }
    }
}

impl fmt::Debug for ConfigurableFilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bases: Vec<&str> = self.bases().collect();
        bases.sort_unstable();
        f.debug_struct("ConfigurableFilterRegistry")
            .field("bases", &bases)
            .field("multi_part", &self.multi_part)
            .finish()
    }
}

/// Memoized membership sets for configurable filters.
///
/// Holds at most one generation of entries: those computed against the most
/// recently seen card universe. Asking for any filter against a different
/// universe drops every entry before computing. Within a generation each
/// filter name is computed at most once.
///
/// # Thread Safety
///
/// A single reentrant mutex guards the cache and is held while an entry is
/// computed, so concurrent requests for the same name wait for the first
/// computation rather than repeating it. The computing thread may itself
/// consult the cache from inside `compute`.
#[derive(Debug, Default)]
pub struct ConfigurableFilterCache {
    state: ReentrantMutex<RefCell<CacheState>>,
}

#[derive(Debug, Default)]
struct CacheState {
    universe: Option<Identity>,
    entries: HashMap<String, Arc<FilterSet>>,
}

impl ConfigurableFilterCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `key` under `universe`, computing it on a miss.
    ///
    /// `compute` runs with the lock held but the state released, so it may
    /// call back into this cache on the same thread.
    pub fn get_or_compute(
        &self,
        key: &str,
        universe: Identity,
        compute: impl FnOnce() -> FilterSet,
    ) -> Arc<FilterSet> {
        let guard = self.state.lock();

        {
            let mut state = guard.borrow_mut();
            if state.universe != Some(universe) {
                if state.universe.is_some() {
                    tracing::debug!(
                        dropped = state.entries.len(),
                        "card universe changed, clearing configurable filter cache"
                    );
                }
                state.entries.clear();
                state.universe = Some(universe);
            }

            if let Some(entry) = state.entries.get(key) {
                tracing::trace!(filter = key, "configurable filter cache hit");
                return Arc::clone(entry);
            }
        }

        let entry = Arc::new(compute());
        tracing::trace!(filter = key, members = entry.len(), "computed configurable filter");

        let mut state = guard.borrow_mut();
        // a nested call may have moved the cache to another universe
        if state.universe == Some(universe) {
            state.entries.insert(key.to_string(), Arc::clone(&entry));
        }
        entry
    }

    /// Materializes the configurable filter `name` over `cards`.
    pub fn evaluate(
        &self,
        name: &str,
        cards: &CardUniverse,
        registry: &ConfigurableFilterRegistry,
    ) -> Arc<FilterSet> {
        self.get_or_compute(name, cards.identity(), || {
            let predicate = registry.predicate(name);
            cards
                .iter()
                .filter(|&card| predicate(card, cards))
                .map(|card| card.id.clone())
                .collect()
        })
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.state.lock().borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn accept_all() -> CardPredicate {
    Box::new(|_: &Card, _: &CardUniverse| true)
}

/// `base/before/DATE`, `base/after/DATE`, `base/between/DATE/DATE`.
///
/// Unparseable arguments accept every card. Cards without the date never match.
fn date_filter_factory(field: fn(&Card) -> Option<DateTime<Utc>>) -> FilterFactory {
    Arc::new(move |segments: &[&str]| -> CardPredicate {
        let Some(range) = DateRange::parse(segments.get(1..).unwrap_or_default()) else {
            return accept_all();
        };
        Box::new(move |card: &Card, _: &CardUniverse| {
            field(card).is_some_and(|date| range.contains(date.date_naive()))
        })
    })
}

fn references_factory(segments: &[&str]) -> CardPredicate {
    let Some(target) = segments.get(1).map(|s| s.to_string()) else {
        return accept_all();
    };
    Box::new(move |card: &Card, _: &CardUniverse| card.references_card(&target))
}

fn referenced_by_factory(segments: &[&str]) -> CardPredicate {
    let Some(source) = segments.get(1).map(|s| s.to_string()) else {
        return accept_all();
    };
    Box::new(move |card: &Card, cards: &CardUniverse| {
        cards
            .get(&source)
            .is_some_and(|source| source.references_card(&card.id))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateRange {
    Before(NaiveDate),
    After(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

impl DateRange {
    fn parse(args: &[&str]) -> Option<Self> {
        let date = |s: &&str| NaiveDate::parse_from_str(s, DATE_FORMAT).ok();
        match args {
            [BEFORE_KEYWORD, d] => Some(DateRange::Before(date(d)?)),
            [AFTER_KEYWORD, d] => Some(DateRange::After(date(d)?)),
            [BETWEEN_KEYWORD, a, b] => {
                let (a, b) = (date(a)?, date(b)?);
                Some(DateRange::Between(a.min(b), a.max(b)))
            }
            _ => None,
        }
    }

    fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateRange::Before(limit) => date < limit,
            DateRange::After(limit) => date > limit,
            DateRange::Between(start, end) => start <= date && date <= end,
        }
    }
}
