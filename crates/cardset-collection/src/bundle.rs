//! A serializable snapshot of everything a collection is resolved against.
//!
//! The data layer of an application normally assembles [`CollectionArgs`]
//! directly. `Bundle` is the on-disk form of the same data, used by tools and
//! tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::args::CollectionArgs;
use crate::card::{Card, CardId, CardUniverse, EditPermissions, Section, SectionMetadata};
use crate::description::CollectionDescription;
use crate::filter::FilterRegistry;

/// Card data plus sets, filters and catalogs, as stored in a JSON file.
///
/// Every field is optional. Fallback and start-card catalogs may be keyed by
/// any path; keys are canonicalized when the bundle is turned into
/// [`CollectionArgs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bundle {
    pub cards: Vec<Card>,

    /// Base sets by name.
    pub sets: HashMap<String, Vec<CardId>>,

    /// Concrete filter membership by filter name.
    pub filters: HashMap<String, Vec<CardId>>,

    /// Inverse filter name to the concrete filter it negates.
    pub inverse_filters: HashMap<String, String>,

    pub fallbacks: HashMap<String, Vec<CardId>>,

    pub start_cards: HashMap<String, Vec<CardId>>,

    pub sections: Vec<Section>,

    /// Set name to the filter mirroring its membership.
    pub set_filter_equivalents: HashMap<String, String>,

    /// Cards the current user may edit.
    pub editable_cards: Vec<CardId>,

    /// If true, every card is editable.
    pub admin: bool,
}

impl Bundle {
    /// Looks up a card by id.
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// The edit permissions this bundle describes.
    pub fn permissions(&self) -> EditPermissions {
        if self.admin {
            EditPermissions::admin()
        } else {
            EditPermissions::for_cards(self.editable_cards.iter().cloned())
        }
    }

    /// Builds construction arguments with the standard configurable filters
    /// and sorts.
    pub fn into_args(self) -> CollectionArgs {
        let mut filters = FilterRegistry::new();
        for (name, ids) in self.filters {
            filters.insert_set(name, ids);
        }
        for (inverse, target) in self.inverse_filters {
            filters.insert_inverse(inverse, target);
        }

        let sections: SectionMetadata = self
            .sections
            .into_iter()
            .map(|section| (section.id.clone(), section))
            .collect();

        let mut builder = CollectionArgs::builder(CardUniverse::new(self.cards))
            .filters(filters)
            .sections(sections);

        for (name, ids) in self.sets {
            builder = builder.set(name, ids);
        }
        for (path, ids) in self.fallbacks {
            builder = builder.fallback(canonical(&path), ids);
        }
        for (path, ids) in self.start_cards {
            builder = builder.start_cards(canonical(&path), ids);
        }
        for (set_name, filter_name) in self.set_filter_equivalents {
            builder = builder.set_filter_equivalent(set_name, filter_name);
        }

        builder.build()
    }
}

fn canonical(path: &str) -> String {
    CollectionDescription::deserialize(path).serialize().to_string()
}
