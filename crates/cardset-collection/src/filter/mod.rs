//! The filter algebra.
//!
//! Filters are referred to by name. A name is one of:
//!
//! - a concrete filter: `starred`, backed by a membership set in a
//!   [`FilterRegistry`]
//! - an inverse filter: `unstarred`, registered as the complement of a
//!   concrete filter
//! - a union: `starred+unread`, matching anything any member matches
//! - a configurable filter: `updated/before/2020-10-02`, materialized by a
//!   factory from a [`ConfigurableFilterRegistry`] and memoized in a
//!   [`ConfigurableFilterCache`]
//!
//! A list of names combines with AND semantics via [`FilterEvaluator`].

mod configurable;
mod evaluator;
mod expr;
mod registry;

pub use configurable::{
    CardPredicate, ConfigurableFilterCache, ConfigurableFilterRegistry, FilterFactory,
    LAST_TWEETED_FILTER_NAME, REFERENCED_BY_FILTER_NAME, REFERENCES_FILTER_NAME,
    UPDATED_FILTER_NAME,
};
pub use evaluator::{FilterContext, FilterEvaluator};
pub use expr::{FilterKind, FilterRef};
pub use registry::{FilterRegistry, FilterSet};
