//! Parser turning path segments into description fields.

use super::grammar::DescriptionGrammar;
use super::lexer::{tokenize, Segment};
use super::{CollectionDescription, DEFAULT_SET_NAME, SEGMENT_SEPARATOR};

/// Filter names and sort settings pulled out of the middle of a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSegments {
    /// Filter names in the order they appeared.
    pub filters: Vec<String>,
    /// The sort name, empty if no sort segment was present.
    pub sort_name: String,
    /// Whether the reverse keyword preceded the sort name.
    pub sort_reversed: bool,
}

/// Scans segments left to right, collecting filters and the sort.
///
/// The scan never fails. Unknown names pass through untouched, a multi-part
/// filter left incomplete at the end is dropped, and a multi-part run that did
/// not begin with a filter base is dropped once it completes.
///
/// When a multi-part segment arrives while another run is still open, it takes
/// the place of one of the open run's missing segments before adding its own
/// requirement. An unfinished run is absorbed this way rather than reported.
pub fn extract_filter_names_and_sort(
    segments: &[&str],
    grammar: &DescriptionGrammar,
) -> ExtractedSegments {
    let mut extracted = ExtractedSegments::default();
    let mut next_part_is_sort = false;
    let mut multi_part_filter: Vec<&str> = Vec::new();
    let mut expected_remaining_parts = 0usize;

    for token in tokenize(segments, grammar) {
        match token {
            Segment::Empty => continue,
            Segment::Sort => {
                next_part_is_sort = true;
                extracted.sort_reversed = false;
                continue;
            }
            _ => {}
        }

        if next_part_is_sort {
            if token == Segment::Reverse {
                extracted.sort_reversed = true;
                continue;
            }
            extracted.sort_name = token.text().to_string();
            next_part_is_sort = false;
            continue;
        }

        if let Segment::MultiPartStart { text, arity } = token {
            multi_part_filter.push(text);
            expected_remaining_parts = expected_remaining_parts.saturating_sub(1) + arity;
            continue;
        }

        if expected_remaining_parts > 0 {
            multi_part_filter.push(token.text());
            expected_remaining_parts -= 1;
            if expected_remaining_parts == 0 {
                if multi_part_filter
                    .first()
                    .is_some_and(|first| grammar.is_filter_base(first))
                {
                    extracted
                        .filters
                        .push(multi_part_filter.join(SEGMENT_SEPARATOR));
                }
                multi_part_filter.clear();
            }
            continue;
        }

        extracted.filters.push(token.text().to_string());
    }

    extracted
}

/// Parses a path, returning the description and the trailing extra segment.
///
/// A trailing `/` yields an empty extra, meaning no specific card.
pub fn deserialize_with_extra(
    input: &str,
    grammar: &DescriptionGrammar,
) -> (CollectionDescription, String) {
    let mut parts: Vec<&str> = input.split(SEGMENT_SEPARATOR).collect();

    let mut set_name = DEFAULT_SET_NAME;
    let mut set_name_explicitly_set = false;
    if parts.first().is_some_and(|first| grammar.is_set_name(first)) {
        set_name = parts.remove(0);
        set_name_explicitly_set = true;
    }

    let extra = parts.pop().unwrap_or_default().to_string();
    let extracted = extract_filter_names_and_sort(&parts, grammar);

    let description = CollectionDescription::from_parts(
        set_name,
        extracted.filters,
        &extracted.sort_name,
        extracted.sort_reversed,
        set_name_explicitly_set,
    );
    (description, extra)
}
