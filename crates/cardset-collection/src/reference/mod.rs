//! Reference blocks: small collections anchored to one key card.
//!
//! A [`ReferenceBlockTemplate`] holds a description containing the
//! [`KEY_CARD_ID_PLACEHOLDER`]. Expanding it for a card substitutes the card's
//! id and resolves the result into a [`Collection`].
//!
//! [`ReferenceBlockExpander`] memoizes expansions. Results are reused until
//! either the [`CollectionArgs`] or the [`EditPermissions`] passed in carry a
//! different identity, at which point every cached expansion is dropped.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::args::CollectionArgs;
use crate::card::{Card, CardId, EditPermissions};
use crate::collection::Collection;
use crate::description::{CollectionDescription, KEY_CARD_ID_PLACEHOLDER};
use crate::identity::Identity;

/// A filter the data layer supplies for cards that are not yet published.
pub const UNPUBLISHED_FILTER_NAME: &str = "unpublished";

/// Decides whether a card in an expanded block is shown in bold.
pub type BoldPredicate = Box<dyn Fn(&Card) -> bool + Send + Sync>;

/// Builds a [`BoldPredicate`] for a key card.
pub type BoldFactory = Arc<dyn Fn(&Card) -> BoldPredicate + Send + Sync>;

/// A reference block before a key card is chosen.
#[derive(Clone)]
pub struct ReferenceBlockTemplate {
    /// Block heading.
    pub title: String,
    /// One-line explanation shown under the heading.
    pub summary: String,
    /// The block's contents, with the key card as a placeholder.
    pub description: CollectionDescription,
    /// Where "see all" navigates. Defaults to `description`.
    pub navigation_description: Option<CollectionDescription>,
    /// Only shown to users who can edit the key card.
    pub only_for_editors: bool,
    pub bold: Option<BoldFactory>,
    /// Shown when the block resolves to nothing.
    pub empty_message: Option<String>,
}

impl ReferenceBlockTemplate {
    /// Creates a template from a path containing the key card placeholder.
    pub fn new(title: impl Into<String>, summary: impl Into<String>, path: &str) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            description: CollectionDescription::deserialize(path),
            navigation_description: None,
            only_for_editors: false,
            bold: None,
            empty_message: None,
        }
    }

    pub fn with_navigation(mut self, path: &str) -> Self {
        self.navigation_description = Some(CollectionDescription::deserialize(path));
        self
    }

    pub fn editors_only(mut self) -> Self {
        self.only_for_editors = true;
        self
    }

    pub fn with_bold(mut self, factory: BoldFactory) -> Self {
        self.bold = Some(factory);
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    /// The built-in blocks: outbound links, inbound links (mutual links in
    /// bold) and, for editors, unpublished outbound links.
    pub fn standard() -> Vec<Self> {
        let placeholder = KEY_CARD_ID_PLACEHOLDER;
        vec![
            Self::new(
                "References",
                "Cards this card links to",
                &format!("everything/referenced-by/{placeholder}/"),
            )
            .with_empty_message("This card doesn't link to any other cards."),
            Self::new(
                "Referenced by",
                "Cards that link to this card",
                &format!("everything/references/{placeholder}/"),
            )
            .with_navigation(&format!("everything/references/{placeholder}/sort/recent/"))
            .with_bold(Arc::new(|key: &Card| {
                let key = key.clone();
                Box::new(move |card: &Card| key.references_card(&card.id))
            })),
            Self::new(
                "Unpublished references",
                "Linked cards that are not published yet",
                &format!("everything/referenced-by/{placeholder}/{UNPUBLISHED_FILTER_NAME}/"),
            )
            .editors_only(),
        ]
    }
}

impl fmt::Debug for ReferenceBlockTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceBlockTemplate")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("navigation_description", &self.navigation_description)
            .field("only_for_editors", &self.only_for_editors)
            .field("bold", &self.bold.is_some())
            .field("empty_message", &self.empty_message)
            .finish()
    }
}

/// A template resolved for one key card.
#[derive(Debug)]
pub struct ExpandedReferenceBlock {
    pub title: String,
    pub summary: String,
    pub empty_message: Option<String>,
    pub collection: Collection,
    pub navigation_description: CollectionDescription,
    /// Filtered cards the template's bold predicate accepted.
    pub highlighted: HashSet<CardId>,
}

impl ExpandedReferenceBlock {
    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlighted.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.collection.filtered_ids().is_empty()
    }
}

/// Expands `templates` for `key_card` without caching.
///
/// Editor-only templates are skipped unless `permissions` allow editing the
/// key card.
pub fn expand_reference_blocks(
    templates: &[ReferenceBlockTemplate],
    args: &CollectionArgs,
    permissions: &EditPermissions,
    key_card: &Card,
) -> Vec<ExpandedReferenceBlock> {
    let can_edit = permissions.can_edit(&key_card.id);
    let args = args.with_key_card(key_card.id.as_str());

    templates
        .iter()
        .filter(|template| can_edit || !template.only_for_editors)
        .map(|template| {
            let description = template.description.with_key_card(&key_card.id);
            let navigation_description = template
                .navigation_description
                .as_ref()
                .map(|d| d.with_key_card(&key_card.id))
                .unwrap_or_else(|| description.clone());
            let collection = Collection::new(description, args.clone());

            let highlighted = match &template.bold {
                Some(factory) => {
                    let bold = factory(key_card);
                    collection
                        .filtered_cards()
                        .into_iter()
                        .filter(|card| bold(card))
                        .map(|card| card.id.clone())
                        .collect()
                }
                None => HashSet::new(),
            };

            ExpandedReferenceBlock {
                title: template.title.clone(),
                summary: template.summary.clone(),
                empty_message: template.empty_message.clone(),
                collection,
                navigation_description,
                highlighted,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct ExpanderState {
    epoch: Option<(Identity, Identity)>,
    /// Blocks per key card, with the card they were built from.
    blocks: HashMap<CardId, (Card, Arc<Vec<ExpandedReferenceBlock>>)>,
}

/// Memoizing reference block expansion.
///
/// # Example
///
/// ```
/// use cardset_collection_rs::card::{Card, CardUniverse, EditPermissions};
/// use cardset_collection_rs::reference::ReferenceBlockExpander;
/// use cardset_collection_rs::CollectionArgs;
///
/// let mut key = Card::new("a", "A");
/// key.references.push("b".to_string());
/// let cards = CardUniverse::new(vec![key.clone(), Card::new("b", "B")]);
/// let args = CollectionArgs::builder(cards).build();
///
/// let expander = ReferenceBlockExpander::standard();
/// let blocks = expander.expand(&args, &EditPermissions::none(), &key);
/// assert_eq!(blocks[0].title, "References");
/// assert_eq!(blocks[0].collection.sorted_ids(), &["b"]);
/// ```
#[derive(Debug)]
pub struct ReferenceBlockExpander {
    templates: Vec<ReferenceBlockTemplate>,
    state: Mutex<ExpanderState>,
}

impl ReferenceBlockExpander {
    pub fn new(templates: Vec<ReferenceBlockTemplate>) -> Self {
        Self {
            templates,
            state: Mutex::new(ExpanderState::default()),
        }
    }

    /// An expander over [`ReferenceBlockTemplate::standard`].
    pub fn standard() -> Self {
        Self::new(ReferenceBlockTemplate::standard())
    }

    pub fn templates(&self) -> &[ReferenceBlockTemplate] {
        &self.templates
    }

    /// The blocks for `key_card`, computed at most once per card for a given
    /// pair of `args` and `permissions` identities.
    ///
    /// A cached entry is reused only while `key_card` equals the card it was
    /// built from; a changed card with the same id is expanded again.
    pub fn expand(
        &self,
        args: &CollectionArgs,
        permissions: &EditPermissions,
        key_card: &Card,
    ) -> Arc<Vec<ExpandedReferenceBlock>> {
        let epoch = (args.identity(), permissions.identity());
        let mut state = self.state.lock();

        if state.epoch != Some(epoch) {
            if state.epoch.is_some() {
                tracing::debug!(
                    dropped = state.blocks.len(),
                    "inputs changed, clearing reference blocks"
                );
            }
            state.blocks.clear();
            state.epoch = Some(epoch);
        }

        if let Some((built_from, blocks)) = state.blocks.get(&key_card.id) {
            if built_from == key_card {
                tracing::trace!(card = %key_card.id, "reference block cache hit");
                return Arc::clone(blocks);
            }
            tracing::debug!(card = %key_card.id, "key card changed, expanding again");
        }

        let blocks = Arc::new(expand_reference_blocks(
            &self.templates,
            args,
            permissions,
            key_card,
        ));
        state
            .blocks
            .insert(key_card.id.clone(), (key_card.clone(), Arc::clone(&blocks)));
        blocks
    }
}

impl Default for ReferenceBlockExpander {
    fn default() -> Self {
        Self::standard()
    }
}
