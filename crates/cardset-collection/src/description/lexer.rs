//! Lexer (tokenizer) for description paths.
//!
//! A path is split on `/` and every segment is classified on its own. The
//! classification is context free; whether a token acts as a keyword, a
//! filter or a sort name is decided by the parser.

use super::grammar::DescriptionGrammar;
use super::{REVERSE_KEYWORD, SORT_KEYWORD};

/// A classified path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// An empty segment (leading, trailing or doubled `/`).
    Empty,

    /// The sort keyword.
    Sort,

    /// The reverse keyword.
    Reverse,

    /// A segment that starts (or continues) a multi-part filter and requires
    /// `arity` further segments.
    MultiPartStart { text: &'a str, arity: usize },

    /// Anything else.
    Word(&'a str),
}

impl<'a> Segment<'a> {
    /// The original text of the segment.
    pub(crate) fn text(&self) -> &'a str {
        match self {
            Segment::Empty => "",
            Segment::Sort => SORT_KEYWORD,
            Segment::Reverse => REVERSE_KEYWORD,
            Segment::MultiPartStart { text, .. } => text,
            Segment::Word(text) => text,
        }
    }
}

/// Classifies each segment against the grammar's keyword tables.
pub(crate) fn tokenize<'a>(segments: &[&'a str], grammar: &DescriptionGrammar) -> Vec<Segment<'a>> {
    segments
        .iter()
        .map(|&segment| classify(segment, grammar))
        .collect()
}

fn classify<'a>(segment: &'a str, grammar: &DescriptionGrammar) -> Segment<'a> {
    if segment.is_empty() {
        return Segment::Empty;
    }
    if segment == SORT_KEYWORD {
        return Segment::Sort;
    }
    if segment == REVERSE_KEYWORD {
        return Segment::Reverse;
    }
    match grammar.multi_part_arity(segment) {
        Some(arity) => Segment::MultiPartStart {
            text: segment,
            arity,
        },
        None => Segment::Word(segment),
    }
}
