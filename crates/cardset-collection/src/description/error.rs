//! Error types for building collection descriptions from explicit fields.

use thiserror::Error;

/// A specialized Result type for description construction.
pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// Errors that can occur when a description is built from explicit fields.
///
/// Parsing a description from text never produces these; they only signal a
/// caller handing over values no path could ever have produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstructionError {
    /// A filter name is the empty string.
    #[error("filter name at index {index} is empty")]
    EmptyFilterName {
        /// Position of the offending filter.
        index: usize,
    },

    /// A filter name collides with a path keyword.
    #[error("filter name '{name}' is a reserved keyword")]
    ReservedFilterName {
        /// The reserved name.
        name: String,
    },

    /// A filter name has empty segments or empty union members, or would not
    /// parse back as a single filter.
    #[error("malformed filter name: '{name}'")]
    MalformedFilterName {
        /// The malformed name.
        name: String,
    },

    /// A set name the grammar does not recognize.
    #[error("invalid set name: '{name}'")]
    InvalidSetName {
        /// The invalid name.
        name: String,
    },

    /// A sort name contains a separator or is a keyword.
    #[error("invalid sort name: '{name}'")]
    InvalidSortName {
        /// The invalid name.
        name: String,
    },

    /// A filter index is past the end of the filter list.
    #[error("filter index {index} out of range (have {len} filters)")]
    FilterIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of filters in the description.
        len: usize,
    },

    /// A field has the wrong kind of value.
    #[error("field '{field}' must be {expected}")]
    WrongKind {
        /// The field name.
        field: &'static str,
        /// Human-readable description of the expected kind.
        expected: &'static str,
    },
}

impl ConstructionError {
    /// Creates a malformed filter name error.
    pub fn malformed_filter(name: impl Into<String>) -> Self {
        ConstructionError::MalformedFilterName { name: name.into() }
    }

    /// Creates a wrong kind error.
    pub fn wrong_kind(field: &'static str, expected: &'static str) -> Self {
        ConstructionError::WrongKind { field, expected }
    }
}
