//! Classification of filter names.

use super::registry::FilterRegistry;
use crate::description::{SEGMENT_SEPARATOR, UNION_DELIMITER};

/// One member of a union filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRef {
    /// A filter with its own membership set.
    Concrete(String),

    /// The complement of `target`.
    Inverse {
        /// The inverse filter's own name.
        name: String,
        /// The concrete filter it inverts.
        target: String,
    },

    /// A name the registry does not know. Matches nothing.
    Unknown(String),
}

/// A filter name, classified once against a [`FilterRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// A filter with its own membership set.
    Concrete(String),

    /// The complement of `target`.
    Inverse {
        /// The inverse filter's own name.
        name: String,
        /// The concrete filter it inverts.
        target: String,
    },

    /// `a+b+c`: matches anything any member matches.
    Union(Vec<FilterRef>),

    /// `base/arg1/arg2`: evaluated by the factory registered for `base`.
    Configurable {
        /// The full filter name, used as the cache key.
        name: String,
        /// The first segment.
        base: String,
        /// The remaining segments.
        args: Vec<String>,
    },

    /// A name the registry does not know. Contributes nothing.
    Unknown(String),
}

impl FilterKind {
    /// Classifies `name`.
    ///
    /// A name containing a separator is configurable even if it also contains
    /// the union delimiter.
    pub fn classify(name: &str, registry: &FilterRegistry) -> Self {
        let is_configurable = name.contains(SEGMENT_SEPARATOR);

        if !is_configurable && name.contains(UNION_DELIMITER) {
            let members = name
                .split(UNION_DELIMITER)
                .map(|member| FilterRef::classify(member, registry))
                .collect();
            return FilterKind::Union(members);
        }

        if is_configurable {
            let mut parts = name.split(SEGMENT_SEPARATOR);
            let base = parts.next().unwrap_or_default().to_string();
            return FilterKind::Configurable {
                name: name.to_string(),
                base,
                args: parts.map(str::to_string).collect(),
            };
        }

        match FilterRef::classify(name, registry) {
            FilterRef::Concrete(name) => FilterKind::Concrete(name),
            FilterRef::Inverse { name, target } => FilterKind::Inverse { name, target },
            FilterRef::Unknown(name) => FilterKind::Unknown(name),
        }
    }
}

impl FilterRef {
    fn classify(name: &str, registry: &FilterRegistry) -> Self {
        if registry.get(name).is_some() {
            return FilterRef::Concrete(name.to_string());
        }
        match registry.inverse_target(name) {
            Some(target) => FilterRef::Inverse {
                name: name.to_string(),
                target: target.to_string(),
            },
            None => FilterRef::Unknown(name.to_string()),
        }
    }
}
