//! Collection descriptions and the path grammar they travel in.
//!
//! A [`CollectionDescription`] names a base set, a list of filters and a sort.
//! Its canonical text form is a `/`-separated path:
//!
//! ```text
//! path    ::= [set "/"] filter* [sort] extra
//! filter  ::= name "/" | name ("+" name)+ "/" | base ("/" arg)+ "/"
//! sort    ::= "sort/" ["reverse/"] sort-name "/"
//! extra   ::= card-id | ""
//! ```
//!
//! # Example
//!
//! ```
//! use cardset_collection_rs::description::CollectionDescription;
//!
//! let description = CollectionDescription::deserialize("starred/sort/reverse/recent/");
//! assert_eq!(description.filters(), &["starred"]);
//! assert_eq!(description.sort_name(), "recent");
//! assert!(description.sort_reversed());
//! assert_eq!(description.serialize(), "main/starred/sort/reverse/recent/");
//! ```

mod error;
mod grammar;
mod lexer;
mod parser;

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub use error::{ConstructionError, ConstructionResult};
pub use grammar::DescriptionGrammar;
pub use parser::{deserialize_with_extra, extract_filter_names_and_sort, ExtractedSegments};

use grammar::standard_grammar;

/// The set used when a description names none.
pub const DEFAULT_SET_NAME: &str = "main";

/// The set containing every card.
pub const EVERYTHING_SET_NAME: &str = "everything";

/// The set of cards a reader saved for later.
pub const READING_LIST_SET_NAME: &str = "reading-list";

/// The sort used when a description names none. Its order is a no-op.
pub const DEFAULT_SORT_NAME: &str = "default";

/// Path keyword introducing the sort segment.
pub const SORT_KEYWORD: &str = "sort";

/// Path keyword marking the sort as reversed.
pub const REVERSE_KEYWORD: &str = "reverse";

/// Separates path segments.
pub const SEGMENT_SEPARATOR: &str = "/";

/// Separates the members of a union filter.
pub const UNION_DELIMITER: &str = "+";

/// Stands in for the key card's id inside reference block templates.
pub const KEY_CARD_ID_PLACEHOLDER: &str = "{KEY_CARD_ID}";

/// An immutable description of a collection.
///
/// Equality and hashing go through [`serialize`](Self::serialize): two
/// descriptions listing the same filters in a different order are equal, and
/// whether the set name was spelled out in the source path does not matter.
#[derive(Debug, Clone)]
pub struct CollectionDescription {
    set_name: String,
    filters: Vec<String>,
    sort_name: String,
    sort_reversed: bool,
    set_name_explicitly_set: bool,
    serialized: String,
}

impl CollectionDescription {
    /// Creates a description from explicit fields.
    ///
    /// An empty `set_name` or `sort_name` selects the default.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if a name could not survive a parse of
    /// the serialized path under the standard grammar: empty or malformed
    /// filter names, keywords used as names, multi-part filters that do not
    /// reassemble into themselves, set names the grammar does not recognize,
    /// or sort names containing a separator.
    pub fn new(
        set_name: &str,
        filters: impl IntoIterator<Item = impl Into<String>>,
        sort_name: &str,
        sort_reversed: bool,
    ) -> ConstructionResult<Self> {
        Self::new_with_grammar(set_name, filters, sort_name, sort_reversed, standard_grammar())
    }

    /// Like [`new`](Self::new), validating names against `grammar`.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn new_with_grammar(
        set_name: &str,
        filters: impl IntoIterator<Item = impl Into<String>>,
        sort_name: &str,
        sort_reversed: bool,
        grammar: &DescriptionGrammar,
    ) -> ConstructionResult<Self> {
        validate_set_name(set_name, grammar)?;
        validate_sort_name(sort_name)?;
        let filters: Vec<String> = filters.into_iter().map(Into::into).collect();
        for (index, name) in filters.iter().enumerate() {
            validate_filter_name(index, name, grammar)?;
        }
        Ok(Self::from_parts(
            set_name,
            filters,
            sort_name,
            sort_reversed,
            !set_name.is_empty(),
        ))
    }

    /// Creates a description over the default set with the given filters.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_filters(
        filters: impl IntoIterator<Item = impl Into<String>>,
    ) -> ConstructionResult<Self> {
        Self::new("", filters, "", false)
    }

    /// Creates a description from a JSON object with the optional keys `set`,
    /// `filters`, `sort` and `reversed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::WrongKind`] when a key holds the wrong kind
    /// of value, plus everything [`new`](Self::new) can return.
    pub fn from_json(value: &Value) -> ConstructionResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ConstructionError::wrong_kind("description", "an object"))?;

        let set_name = match object.get("set") {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(_) => return Err(ConstructionError::wrong_kind("set", "a string")),
        };

        let filters = match object.get("filters") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        ConstructionError::wrong_kind("filters", "an array of strings")
                    })
                })
                .collect::<ConstructionResult<Vec<_>>>()?,
            Some(_) => {
                return Err(ConstructionError::wrong_kind(
                    "filters",
                    "an array of strings",
                ))
            }
        };

        let sort_name = match object.get("sort") {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(_) => return Err(ConstructionError::wrong_kind("sort", "a string")),
        };

        let sort_reversed = match object.get("reversed") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => return Err(ConstructionError::wrong_kind("reversed", "a boolean")),
        };

        Self::new(set_name, filters, sort_name, sort_reversed)
    }

    /// Builds a description without validation. Used by the parser, which
    /// accepts anything.
    pub(crate) fn from_parts(
        set_name: &str,
        filters: Vec<String>,
        sort_name: &str,
        sort_reversed: bool,
        set_name_explicitly_set: bool,
    ) -> Self {
        let set_name = if set_name.is_empty() {
            DEFAULT_SET_NAME
        } else {
            set_name
        };
        let sort_name = if sort_name.is_empty() {
            DEFAULT_SORT_NAME
        } else {
            sort_name
        };
        let serialized = serialize_fields(set_name, &filters, sort_name, sort_reversed);
        Self {
            set_name: set_name.to_string(),
            filters,
            sort_name: sort_name.to_string(),
            sort_reversed,
            set_name_explicitly_set,
            serialized,
        }
    }

    // ==================== Parsing ====================

    /// Parses a path with the standard grammar, discarding the extra segment.
    pub fn deserialize(input: &str) -> Self {
        Self::deserialize_with_extra(input).0
    }

    /// Parses a path with the standard grammar, returning the trailing extra
    /// segment alongside the description.
    pub fn deserialize_with_extra(input: &str) -> (Self, String) {
        deserialize_with_extra(input, standard_grammar())
    }

    /// Parses a path with a caller-supplied grammar.
    pub fn deserialize_with_grammar(input: &str, grammar: &DescriptionGrammar) -> Self {
        deserialize_with_extra(input, grammar).0
    }

    // ==================== Accessors ====================

    /// The canonical path form: set, sorted filters, non-default sort, and a
    /// trailing separator.
    pub fn serialize(&self) -> &str {
        &self.serialized
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn sort_name(&self) -> &str {
        &self.sort_name
    }

    pub fn sort_reversed(&self) -> bool {
        self.sort_reversed
    }

    /// True if the source path began with a set name.
    pub fn set_name_explicitly_set(&self) -> bool {
        self.set_name_explicitly_set
    }

    pub fn is_default_set(&self) -> bool {
        self.set_name == DEFAULT_SET_NAME
    }

    pub fn is_default_sort(&self) -> bool {
        self.sort_name == DEFAULT_SORT_NAME
    }

    // ==================== Modified copies ====================

    /// Returns a copy using a different set.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidSetName`] for names the standard
    /// grammar does not recognize as a set.
    pub fn with_set_name(&self, set_name: &str) -> ConstructionResult<Self> {
        validate_set_name(set_name, standard_grammar())?;
        Ok(Self::from_parts(
            set_name,
            self.filters.clone(),
            &self.sort_name,
            self.sort_reversed,
            true,
        ))
    }

    /// Returns a copy using a different sort.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidSortName`] for names that cannot
    /// appear in a path.
    pub fn with_sort_name(&self, sort_name: &str) -> ConstructionResult<Self> {
        validate_sort_name(sort_name)?;
        Ok(self.rebuilt(self.filters.clone(), sort_name, self.sort_reversed))
    }

    /// Returns a copy with the sort direction set.
    pub fn with_sort_reversed(&self, sort_reversed: bool) -> Self {
        self.rebuilt(self.filters.clone(), &self.sort_name, sort_reversed)
    }

    /// Returns a copy with `name` appended to the filters.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_filter_added(&self, name: &str) -> ConstructionResult<Self> {
        validate_filter_name(self.filters.len(), name, standard_grammar())?;
        let mut filters = self.filters.clone();
        filters.push(name.to_string());
        Ok(self.rebuilt(filters, &self.sort_name, self.sort_reversed))
    }

    /// Returns a copy without the filter at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::FilterIndexOutOfRange`] if there is no such
    /// filter.
    pub fn with_filter_removed(&self, index: usize) -> ConstructionResult<Self> {
        self.check_index(index)?;
        let mut filters = self.filters.clone();
        filters.remove(index);
        Ok(self.rebuilt(filters, &self.sort_name, self.sort_reversed))
    }

    /// Returns a copy with the filter at `index` replaced by `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::FilterIndexOutOfRange`] if there is no such
    /// filter, or a name error for `name`.
    pub fn with_filter_replaced(&self, index: usize, name: &str) -> ConstructionResult<Self> {
        self.check_index(index)?;
        validate_filter_name(index, name, standard_grammar())?;
        let mut filters = self.filters.clone();
        filters[index] = name.to_string();
        Ok(self.rebuilt(filters, &self.sort_name, self.sort_reversed))
    }

    /// Returns a copy with every occurrence of the key card placeholder
    /// replaced by `card_id`.
    pub fn with_key_card(&self, card_id: &str) -> Self {
        let substitute = |s: &str| s.replace(KEY_CARD_ID_PLACEHOLDER, card_id);
        Self::from_parts(
            &substitute(&self.set_name),
            self.filters.iter().map(|f| substitute(f)).collect(),
            &substitute(&self.sort_name),
            self.sort_reversed,
            self.set_name_explicitly_set,
        )
    }

    fn rebuilt(&self, filters: Vec<String>, sort_name: &str, sort_reversed: bool) -> Self {
        Self::from_parts(
            &self.set_name,
            filters,
            sort_name,
            sort_reversed,
            self.set_name_explicitly_set,
        )
    }

    fn check_index(&self, index: usize) -> ConstructionResult<()> {
        if index >= self.filters.len() {
            return Err(ConstructionError::FilterIndexOutOfRange {
                index,
                len: self.filters.len(),
            });
        }
        Ok(())
    }
}

impl Default for CollectionDescription {
    fn default() -> Self {
        Self::from_parts(DEFAULT_SET_NAME, Vec::new(), DEFAULT_SORT_NAME, false, false)
    }
}

impl PartialEq for CollectionDescription {
    fn eq(&self, other: &Self) -> bool {
        self.serialized == other.serialized
    }
}

impl Eq for CollectionDescription {}

impl Hash for CollectionDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialized.hash(state);
    }
}

impl fmt::Display for CollectionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl FromStr for CollectionDescription {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::deserialize(s))
    }
}

impl Serialize for CollectionDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.serialized)
    }
}

impl<'de> Deserialize<'de> for CollectionDescription {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(deserialize_with_extra(&text, standard_grammar()).0)
    }
}

fn serialize_fields(
    set_name: &str,
    filters: &[String],
    sort_name: &str,
    sort_reversed: bool,
) -> String {
    let mut sorted_filters: Vec<&str> = filters.iter().map(String::as_str).collect();
    sorted_filters.sort_unstable();

    let mut parts = vec![set_name];
    parts.extend(sorted_filters);
    if sort_name != DEFAULT_SORT_NAME || sort_reversed {
        parts.push(SORT_KEYWORD);
        if sort_reversed {
            parts.push(REVERSE_KEYWORD);
        }
        parts.push(sort_name);
    }
    parts.push("");
    parts.join(SEGMENT_SEPARATOR)
}

fn is_keyword(name: &str) -> bool {
    name == SORT_KEYWORD || name == REVERSE_KEYWORD
}

fn validate_set_name(name: &str, grammar: &DescriptionGrammar) -> ConstructionResult<()> {
    if name.is_empty() {
        return Ok(());
    }
    if name.contains(SEGMENT_SEPARATOR) || is_keyword(name) || !grammar.is_set_name(name) {
        return Err(ConstructionError::InvalidSetName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn validate_sort_name(name: &str) -> ConstructionResult<()> {
    if name.contains(SEGMENT_SEPARATOR) || is_keyword(name) {
        return Err(ConstructionError::InvalidSortName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn validate_filter_name(
    index: usize,
    name: &str,
    grammar: &DescriptionGrammar,
) -> ConstructionResult<()> {
    if name.is_empty() {
        return Err(ConstructionError::EmptyFilterName { index });
    }
    if is_keyword(name) {
        return Err(ConstructionError::ReservedFilterName {
            name: name.to_string(),
        });
    }
    let empty_segment = name.split(SEGMENT_SEPARATOR).any(str::is_empty);
    let empty_member = !name.contains(SEGMENT_SEPARATOR)
        && name.contains(UNION_DELIMITER)
        && name.split(UNION_DELIMITER).any(str::is_empty);
    if empty_segment || empty_member {
        return Err(ConstructionError::malformed_filter(name));
    }

    // The name must come back out of the parser as exactly itself.
    let segments: Vec<&str> = name.split(SEGMENT_SEPARATOR).collect();
    let extracted = extract_filter_names_and_sort(&segments, grammar);
    if extracted.filters != [name] || !extracted.sort_name.is_empty() {
        return Err(ConstructionError::malformed_filter(name));
    }
    Ok(())
}
