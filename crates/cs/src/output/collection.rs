//! Resolved collection output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::resolve::ResolveResult;

use super::helpers::{card_table_header, format_card_row, push_header, push_title};

/// JSON output structure for the resolve command.
#[derive(Serialize)]
pub struct CollectionOutput<'a> {
    pub path: &'a str,
    pub sort_descending: bool,
    pub fallback: bool,
    pub pre_fallback_count: usize,
    pub total: usize,
    pub cards: Vec<CardRowOutput>,
    #[serde(skip_serializing_if = "no_warnings")]
    pub warnings: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub would_be_removed: Option<&'a [String]>,
}

fn no_warnings(warnings: &&[String]) -> bool {
    warnings.is_empty()
}

/// JSON output structure for one card of a collection.
#[derive(Serialize)]
pub struct CardRowOutput {
    pub id: String,
    pub title: String,
    pub label: String,
}

/// Final card rows of `result`, after the limit.
fn card_rows(result: &ResolveResult) -> Vec<CardRowOutput> {
    let collection = &result.collection;
    let cards = collection.args().cards();
    let limit = result.limit.unwrap_or(usize::MAX);

    collection
        .final_ids()
        .into_iter()
        .zip(collection.final_labels())
        .take(limit)
        .map(|(id, label)| CardRowOutput {
            title: cards.get(&id).map(|c| c.title.clone()).unwrap_or_default(),
            id,
            label,
        })
        .collect()
}

/// Formats a resolved collection as JSON.
pub fn format_collection_json(result: &ResolveResult) -> Result<String, serde_json::Error> {
    let collection = &result.collection;
    let output = CollectionOutput {
        path: collection.description().serialize(),
        sort_descending: collection.sort_is_descending(),
        fallback: collection.is_fallback(),
        pre_fallback_count: collection.pre_fallback_count(),
        total: collection.final_ids().len(),
        cards: card_rows(result),
        warnings: &result.warnings,
        would_be_removed: result.would_be_removed.as_deref(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a resolved collection as a table.
pub fn format_collection_table(result: &ResolveResult, use_colors: bool) -> String {
    let collection = &result.collection;
    let mut output = String::new();

    push_title(&mut output, collection.description().serialize(), use_colors);
    output.push_str(&format!("{}\n", collection.sort_definition().description));
    if collection.is_fallback() {
        let note = "No cards matched; showing fallback cards.";
        if use_colors {
            output.push_str(&format!("{}\n", note.yellow()));
        } else {
            output.push_str(note);
            output.push('\n');
        }
    }
    output.push('\n');

    let rows = card_rows(result);
    if rows.is_empty() {
        output.push_str("No cards found.\n");
    } else {
        push_header(&mut output, &card_table_header(), use_colors);
        for row in &rows {
            output.push_str(&format_card_row(&row.label, &row.id, &row.title, use_colors));
            output.push('\n');
        }

        let total = collection.final_ids().len();
        if rows.len() < total {
            output.push_str(&format!("... {} more\n", total - rows.len()));
        }
    }

    if let Some(removed) = &result.would_be_removed {
        output.push('\n');
        if removed.is_empty() {
            output.push_str("Pending edits remove no cards.\n");
        } else {
            output.push_str(&format!("Pending edits would remove {}:\n", removed.len()));
            for id in removed {
                let line = format!("  - {id}");
                if use_colors {
                    output.push_str(&format!("{}\n", line.red()));
                } else {
                    output.push_str(&line);
                    output.push('\n');
                }
            }
        }
    }

    output
}
