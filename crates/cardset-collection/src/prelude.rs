//! Prelude module for convenient imports.
//!
//! ```
//! use cardset_collection_rs::prelude::*;
//! ```

// Data
pub use crate::bundle::Bundle;
pub use crate::card::{Card, CardId, CardUniverse, EditPermissions, Section, SectionMetadata};
pub use crate::identity::Identity;

// Descriptions
pub use crate::description::{
    CollectionDescription, ConstructionError, ConstructionResult, DescriptionGrammar,
};

// Resolution
pub use crate::args::{CollectionArgs, CollectionArgsBuilder};
pub use crate::collection::Collection;
pub use crate::filter::{
    ConfigurableFilterCache, ConfigurableFilterRegistry, FilterEvaluator, FilterRegistry,
};
pub use crate::reference::{ExpandedReferenceBlock, ReferenceBlockExpander, ReferenceBlockTemplate};
pub use crate::sort::{SortCatalog, SortDefinition, SortInfo};
