//! Parse command implementation.
//!
//! Shows how a path is read: its set, filters and sort, plus the canonical
//! path the description serializes to. Needs no bundle.

use cardset_collection_rs::CollectionDescription;
use serde_json::Value;

use super::{CommandContext, Result};
use crate::output::{format_description_json, format_description_table};

/// Options for the parse command.
#[derive(Debug)]
pub struct ParseOptions {
    /// A collection path, or a JSON object when `fields` is set.
    pub path: String,
    /// Treat `path` as a JSON object of explicit fields.
    pub fields: bool,
}

/// Result of parsing a path.
#[derive(Debug)]
pub struct ParseResult {
    pub description: CollectionDescription,
    /// Unconsumed trailing segment of the path.
    pub extra: String,
}

/// Executes the parse command.
///
/// # Errors
///
/// With `fields`, returns an error if the input is not JSON or names a field
/// no path could express. Plain paths always parse.
pub fn execute(ctx: &CommandContext, opts: &ParseOptions) -> Result<()> {
    let result = parse(opts)?;

    if ctx.json_output {
        let output = format_description_json(&result)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_description_table(&result, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Builds the description for `opts` without printing anything.
pub fn parse(opts: &ParseOptions) -> Result<ParseResult> {
    if opts.fields {
        let value: Value = serde_json::from_str(&opts.path)?;
        let description = CollectionDescription::from_json(&value)?;
        return Ok(ParseResult {
            description,
            extra: String::new(),
        });
    }

    let (description, extra) = CollectionDescription::deserialize_with_extra(&opts.path);
    tracing::debug!(path = %opts.path, canonical = %description, "parsed path");
    Ok(ParseResult { description, extra })
}
