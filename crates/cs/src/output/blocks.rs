//! Reference block output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use cardset_collection_rs::reference::ExpandedReferenceBlock;

use crate::commands::blocks::BlocksResult;

use super::helpers::{card_table_header, format_card_row, push_header, push_title};

/// JSON output structure for the blocks command.
#[derive(Serialize)]
pub struct BlocksOutput<'a> {
    pub card: &'a str,
    pub title: &'a str,
    pub blocks: Vec<BlockOutput<'a>>,
}

/// JSON output structure for one reference block.
#[derive(Serialize)]
pub struct BlockOutput<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub path: &'a str,
    pub navigation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'a str>,
    pub cards: Vec<BlockCardOutput<'a>>,
}

/// JSON output structure for one card of a block.
#[derive(Serialize)]
pub struct BlockCardOutput<'a> {
    pub id: String,
    pub title: &'a str,
    pub label: String,
    pub highlighted: bool,
}

fn block_output(block: &ExpandedReferenceBlock) -> BlockOutput<'_> {
    let collection = &block.collection;
    let cards = collection.args().cards();
    let rows = collection
        .final_ids()
        .into_iter()
        .zip(collection.final_labels())
        .map(|(id, label)| BlockCardOutput {
            title: cards.get(&id).map(|c| c.title.as_str()).unwrap_or_default(),
            highlighted: block.is_highlighted(&id),
            id,
            label,
        })
        .collect();

    BlockOutput {
        title: &block.title,
        summary: &block.summary,
        path: collection.description().serialize(),
        navigation: block.navigation_description.serialize(),
        empty_message: block.empty_message.as_deref(),
        cards: rows,
    }
}

fn blocks_output(result: &BlocksResult) -> BlocksOutput<'_> {
    BlocksOutput {
        card: &result.key_card.id,
        title: &result.key_card.title,
        blocks: result.blocks.iter().map(block_output).collect(),
    }
}

/// Formats reference blocks as JSON.
pub fn format_blocks_json(result: &BlocksResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&blocks_output(result))
}

/// Formats reference blocks as one table per block.
pub fn format_blocks_table(result: &BlocksResult, use_colors: bool) -> String {
    let output = blocks_output(result);
    let mut text = String::new();

    if output.blocks.is_empty() {
        return format!("No reference blocks for '{}'.\n", output.card);
    }

    for (index, block) in output.blocks.iter().enumerate() {
        if index > 0 {
            text.push('\n');
        }
        push_title(&mut text, block.title, use_colors);
        if use_colors {
            text.push_str(&format!("{}\n", block.summary.dimmed()));
        } else {
            text.push_str(block.summary);
            text.push('\n');
        }

        if block.cards.is_empty() {
            let message = block.empty_message.unwrap_or("No cards.");
            text.push_str(&format!("  {message}\n"));
            continue;
        }

        push_header(&mut text, &card_table_header(), use_colors);
        for card in &block.cards {
            let row = format_card_row(&card.label, &card.id, card.title, use_colors);
            if card.highlighted && use_colors {
                text.push_str(&format!("{}\n", row.bold()));
            } else if card.highlighted {
                text.push_str(&format!("{row} *\n"));
            } else {
                text.push_str(&row);
                text.push('\n');
            }
        }
        text.push_str(&format!("  more: {}\n", block.navigation));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardset_collection_rs::bundle::Bundle;
    use cardset_collection_rs::reference::ReferenceBlockExpander;

    const BUNDLE_JSON: &str = r#"{
        "cards": [
            {"id": "a", "title": "Alpha", "references": ["b"]},
            {"id": "b", "title": "Beta", "references": ["a"]},
            {"id": "c", "title": "Gamma", "references": ["a"]},
            {"id": "d", "title": "Delta"}
        ],
        "sets": {"main": ["a", "b", "c"]}
    }"#;

    fn result(card_id: &str) -> BlocksResult {
        let bundle: Bundle = serde_json::from_str(BUNDLE_JSON).unwrap();
        let permissions = bundle.permissions();
        let key_card = bundle.card(card_id).cloned().unwrap();
        let args = bundle.into_args();
        let blocks = ReferenceBlockExpander::standard().expand(&args, &permissions, &key_card);
        BlocksResult { key_card, blocks }
    }

    #[test]
    fn test_blocks_json() {
        let json = format_blocks_json(&result("a")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["card"], "a");
        assert_eq!(value["title"], "Alpha");

        let blocks = value["blocks"].as_array().unwrap();
        // the unpublished block needs edit rights
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["title"], "References");
        assert_eq!(blocks[0]["cards"][0]["id"], "b");
        assert_eq!(blocks[1]["title"], "Referenced by");
        assert_eq!(blocks[1]["cards"].as_array().unwrap().len(), 2);
        assert_eq!(blocks[1]["cards"][0]["highlighted"], true);
        assert_eq!(blocks[1]["cards"][1]["highlighted"], false);
    }

    #[test]
    fn test_blocks_table() {
        let table = format_blocks_table(&result("a"), false);
        assert!(table.starts_with("References\n"));
        assert!(table.contains("Referenced by\n"));
        assert!(table.contains("Beta *\n"));
        assert!(table.contains("more: "));
    }

    #[test]
    fn test_blocks_table_empty_message() {
        let table = format_blocks_table(&result("d"), false);
        assert!(table.contains("  This card doesn't link to any other cards.\n"));
        assert!(table.contains("  No cards.\n"));
        assert!(!table.contains("Label"));
    }
}
