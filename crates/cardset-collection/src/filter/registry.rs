//! Named filter membership sets.

use std::collections::{HashMap, HashSet};

use crate::card::CardId;

/// The ids of the cards a filter accepts. Absence means "not a member".
pub type FilterSet = HashSet<CardId>;

/// Concrete filter sets plus the inverse names defined over them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRegistry {
    sets: HashMap<String, FilterSet>,
    inverses: HashMap<String, String>,
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a concrete filter.
    pub fn insert_set(&mut self, name: impl Into<String>, ids: impl IntoIterator<Item = CardId>) {
        self.sets.insert(name.into(), ids.into_iter().collect());
    }

    /// Declares `inverse` as the complement of the concrete filter `target`.
    pub fn insert_inverse(&mut self, inverse: impl Into<String>, target: impl Into<String>) {
        self.inverses.insert(inverse.into(), target.into());
    }

    /// Builder-style [`insert_set`](Self::insert_set).
    pub fn with_set(
        mut self,
        name: impl Into<String>,
        ids: impl IntoIterator<Item = impl Into<CardId>>,
    ) -> Self {
        self.insert_set(name, ids.into_iter().map(Into::into));
        self
    }

    /// Builder-style [`insert_inverse`](Self::insert_inverse).
    pub fn with_inverse(mut self, inverse: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert_inverse(inverse, target);
        self
    }

    /// The membership set of a concrete filter.
    pub fn get(&self, name: &str) -> Option<&FilterSet> {
        self.sets.get(name)
    }

    /// The concrete filter an inverse name refers to.
    pub fn inverse_target(&self, name: &str) -> Option<&str> {
        self.inverses.get(name).map(String::as_str)
    }

    /// Names of all concrete filters.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Names of all inverse filters.
    pub fn inverse_names(&self) -> impl Iterator<Item = &str> {
        self.inverses.keys().map(String::as_str)
    }
}
