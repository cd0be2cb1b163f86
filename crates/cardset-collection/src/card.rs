//! Cards and the card universe they live in.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Identifier of a card.
pub type CardId = String;

/// A single card.
///
/// Only the fields the built-in filters and sorts read are modelled; everything
/// else about a card is the business of the data layer that supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique card id.
    pub id: CardId,

    /// Card type (e.g. "content", "section-head").
    #[serde(default)]
    pub card_type: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Section the card belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// When the card was last shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tweeted: Option<DateTime<Utc>>,

    #[serde(default)]
    pub star_count: u32,

    #[serde(default)]
    pub tweet_count: u32,

    /// Ids of the cards this card links to.
    #[serde(default)]
    pub references: Vec<CardId>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Card {
    /// Creates a card with only an id and title set.
    pub fn new(id: impl Into<CardId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            card_type: "content".to_string(),
            title: title.into(),
            section: None,
            created: None,
            updated: None,
            last_tweeted: None,
            star_count: 0,
            tweet_count: 0,
            references: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Returns true if this card links to `id`.
    pub fn references_card(&self, id: &str) -> bool {
        self.references.iter().any(|r| r == id)
    }
}

/// A titled section cards can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Card ids in section order.
    #[serde(default)]
    pub cards: Vec<CardId>,
}

/// Sections keyed by id.
pub type SectionMetadata = HashMap<String, Section>;

/// Every known card, keyed by id, stamped with an [`Identity`].
///
/// A universe is immutable. Callers that learn about new or changed cards build
/// a new universe, which gets a new identity and thereby invalidates every
/// cache computed against the old one.
#[derive(Debug)]
pub struct CardUniverse {
    identity: Identity,
    cards: HashMap<CardId, Card>,
    order: Vec<CardId>,
}

impl CardUniverse {
    /// Builds a universe from cards, remembering their insertion order.
    ///
    /// Later duplicates of an id replace earlier ones but keep the first
    /// position.
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for card in cards {
            if !map.contains_key(&card.id) {
                order.push(card.id.clone());
            }
            map.insert(card.id.clone(), card);
        }
        Self {
            identity: Identity::next(),
            cards: map,
            order,
        }
    }

    /// The identity token of this universe.
    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card ids in insertion order.
    pub fn ids(&self) -> &[CardId] {
        &self.order
    }

    /// Cards in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }
}

/// Who may edit which cards.
///
/// Carries its own [`Identity`] so the reference block expander can tell when
/// permissions changed without comparing contents.
#[derive(Debug, Clone)]
pub struct EditPermissions {
    identity: Identity,
    all: bool,
    editable: HashSet<CardId>,
}

impl EditPermissions {
    /// Permissions that allow editing exactly the given cards.
    pub fn for_cards(editable: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            identity: Identity::next(),
            all: false,
            editable: editable.into_iter().collect(),
        }
    }

    /// Permissions that allow editing every card.
    pub fn admin() -> Self {
        Self {
            identity: Identity::next(),
            all: true,
            editable: HashSet::new(),
        }
    }

    /// Permissions that allow editing nothing.
    pub fn none() -> Self {
        Self::for_cards(Vec::new())
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Returns true if the card with `id` may be edited.
    pub fn can_edit(&self, id: &str) -> bool {
        self.all || self.editable.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_keeps_insertion_order() {
        let universe = CardUniverse::new(vec![
            Card::new("b", "B"),
            Card::new("a", "A"),
            Card::new("c", "C"),
        ]);
        assert_eq!(universe.ids(), &["b", "a", "c"]);
        let titles: Vec<_> = universe.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_universe_duplicate_ids_replace_in_place() {
        let universe = CardUniverse::new(vec![
            Card::new("a", "first"),
            Card::new("b", "B"),
            Card::new("a", "second"),
        ]);
        assert_eq!(universe.len(), 2);
        assert_eq!(universe.ids(), &["a", "b"]);
        assert_eq!(universe.get("a").unwrap().title, "second");
    }

    #[test]
    fn test_new_universe_gets_new_identity() {
        let a = CardUniverse::new(vec![Card::new("a", "A")]);
        let b = CardUniverse::new(vec![Card::new("a", "A")]);
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn test_card_deserialize_minimal() {
        let card: Card = serde_json::from_str(r#"{"id": "c1"}"#).unwrap();
        assert_eq!(card.id, "c1");
        assert!(card.references.is_empty());
        assert!(card.updated.is_none());
    }

    #[test]
    fn test_edit_permissions() {
        let perms = EditPermissions::for_cards(vec!["a".to_string()]);
        assert!(perms.can_edit("a"));
        assert!(!perms.can_edit("b"));
        assert!(EditPermissions::admin().can_edit("b"));
        assert!(!EditPermissions::none().can_edit("a"));
    }
}
