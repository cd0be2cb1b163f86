//! Declarative collections over a universe of cards.
//!
//! A collection is named by a path such as `main/starred+unread/sort/recent/`:
//! a base set, a list of filters and a sort. This crate parses and
//! canonicalizes those paths ([`CollectionDescription`]), evaluates the filter
//! algebra, and resolves a description into an ordered, labeled list of cards
//! ([`Collection`]). It also expands reference blocks, small collections
//! anchored to one key card.
//!
//! Nothing here performs I/O. Callers supply card data and catalogs through
//! [`CollectionArgs`], and every cache is keyed on the [`Identity`] of its
//! inputs.
//!
//! # Quick Start
//!
//! ```
//! use cardset_collection_rs::prelude::*;
//!
//! let cards = CardUniverse::new(vec![Card::new("a", "Alpha"), Card::new("b", "Beta")]);
//! let args = CollectionArgs::builder(cards)
//!     .set("main", ["a", "b"])
//!     .filters(
//!         FilterRegistry::new()
//!             .with_set("starred", ["a"])
//!             .with_inverse("unstarred", "starred"),
//!     )
//!     .build();
//!
//! let description = CollectionDescription::deserialize("unstarred/");
//! assert_eq!(description.serialize(), "main/unstarred/");
//!
//! let collection = Collection::new(description, args);
//! assert_eq!(collection.sorted_ids(), &["b"]);
//! ```

pub mod args;
pub mod bundle;
pub mod card;
pub mod collection;
pub mod description;
pub mod filter;
pub mod identity;
pub mod prelude;
pub mod reference;
pub mod sort;

pub use args::{CollectionArgs, CollectionArgsBuilder};
pub use collection::Collection;
pub use description::CollectionDescription;
pub use identity::Identity;
