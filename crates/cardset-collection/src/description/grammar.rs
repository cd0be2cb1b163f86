//! Keyword tables the path parser consults.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::{DEFAULT_SET_NAME, EVERYTHING_SET_NAME, READING_LIST_SET_NAME};
use crate::filter::ConfigurableFilterRegistry;

/// The configuration data a path is parsed against.
///
/// - `set_names`: segments recognized as a leading set name.
/// - `multi_part`: every segment that opens a multi-part filter, with the
///   number of further segments it requires. This covers both filter bases
///   (`updated`) and their sub-keywords (`before`, `between`).
/// - `filter_bases`: the subset of `multi_part` allowed to begin an emitted
///   filter. A buffer that started with anything else is discarded.
#[derive(Debug, Clone)]
pub struct DescriptionGrammar {
    set_names: HashSet<String>,
    multi_part: HashMap<String, usize>,
    filter_bases: HashSet<String>,
}

impl DescriptionGrammar {
    /// Creates a grammar from explicit tables.
    pub fn new(
        set_names: impl IntoIterator<Item = impl Into<String>>,
        multi_part: impl IntoIterator<Item = (impl Into<String>, usize)>,
        filter_bases: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            set_names: set_names.into_iter().map(Into::into).collect(),
            multi_part: multi_part
                .into_iter()
                .map(|(name, arity)| (name.into(), arity))
                .collect(),
            filter_bases: filter_bases.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the grammar matching a configurable filter registry.
    pub fn from_registry(
        set_names: impl IntoIterator<Item = impl Into<String>>,
        registry: &ConfigurableFilterRegistry,
    ) -> Self {
        Self::new(
            set_names,
            registry
                .multi_part_table()
                .map(|(name, arity)| (name.to_string(), arity)),
            registry.bases().map(str::to_string),
        )
    }

    /// The grammar for the built-in sets and configurable filters.
    pub fn standard() -> Self {
        Self::from_registry(
            [DEFAULT_SET_NAME, EVERYTHING_SET_NAME, READING_LIST_SET_NAME],
            &ConfigurableFilterRegistry::standard(),
        )
    }

    /// Returns true if `name` is a recognized set name.
    pub fn is_set_name(&self, name: &str) -> bool {
        self.set_names.contains(name)
    }

    /// Returns the number of additional segments `segment` requires, if it
    /// opens a multi-part filter.
    pub fn multi_part_arity(&self, segment: &str) -> Option<usize> {
        self.multi_part.get(segment).copied()
    }

    /// Returns true if `segment` may begin an emitted multi-part filter.
    pub fn is_filter_base(&self, segment: &str) -> bool {
        self.filter_bases.contains(segment)
    }
}

impl Default for DescriptionGrammar {
    fn default() -> Self {
        Self::standard()
    }
}

/// The shared standard grammar.
pub(crate) fn standard_grammar() -> &'static DescriptionGrammar {
    static GRAMMAR: OnceLock<DescriptionGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(DescriptionGrammar::standard)
}
