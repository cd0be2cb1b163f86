//! Blocks command implementation.
//!
//! Expands the standard reference blocks for a key card.

use std::sync::Arc;

use cardset_collection_rs::card::Card;
use cardset_collection_rs::reference::{ExpandedReferenceBlock, ReferenceBlockExpander};

use super::lookups::{find_similar_name, format_not_found};
use super::{CommandContext, CommandError, Result};
use crate::bundle_store::BundleStore;
use crate::output::{format_blocks_json, format_blocks_table};

/// Options for the blocks command.
#[derive(Debug)]
pub struct BlocksOptions {
    /// Key card id.
    pub card_id: String,
}

/// Result of expanding the blocks of one card.
#[derive(Debug)]
pub struct BlocksResult {
    pub key_card: Card,
    pub blocks: Arc<Vec<ExpandedReferenceBlock>>,
}

/// Executes the blocks command.
///
/// # Errors
///
/// Returns an error if the bundle cannot be read or has no card with the
/// given id.
pub fn execute(ctx: &CommandContext, opts: &BlocksOptions, store: &BundleStore) -> Result<()> {
    let bundle = store.load()?;
    let permissions = bundle.permissions();

    let key_card = match bundle.card(&opts.card_id) {
        Some(card) => card.clone(),
        None => {
            let suggestion = find_similar_name(
                &opts.card_id,
                bundle.cards.iter().map(|c| c.id.as_str()),
            );
            return Err(CommandError::CardNotFound(format_not_found(
                "Card",
                &opts.card_id,
                suggestion.as_deref(),
            )));
        }
    };

    let args = bundle.into_args();
    let expander = ReferenceBlockExpander::standard();
    let blocks = expander.expand(&args, &permissions, &key_card);
    let result = BlocksResult { key_card, blocks };

    if ctx.json_output {
        let output = format_blocks_json(&result)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_blocks_table(&result, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
