//! Resolve command implementation.
//!
//! Resolves a path against the bundle and lists the resulting cards with
//! their labels. With `--pending`, also lists the cards a pending filter edit
//! would drop from the collection.

use std::collections::HashMap;
use std::path::PathBuf;

use cardset_collection_rs::card::CardId;
use cardset_collection_rs::filter::{FilterKind, FilterRef, FilterRegistry};
use cardset_collection_rs::{Collection, CollectionArgs, CollectionDescription};

use super::lookups::{find_similar_name, format_not_found};
use super::{CommandContext, Result};
use crate::bundle_store::{read_json, BundleStore};
use crate::output::{format_collection_json, format_collection_table};

/// Options for the resolve command.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Collection path.
    pub path: String,
    /// JSON file mapping filter names to their pending membership.
    pub pending: Option<PathBuf>,
    /// Limit results.
    pub limit: Option<usize>,
}

/// Result of resolving a path.
#[derive(Debug)]
pub struct ResolveResult {
    pub collection: Collection,
    /// Names in the path the bundle does not know about.
    pub warnings: Vec<String>,
    /// Present only when a pending snapshot was given.
    pub would_be_removed: Option<Vec<CardId>>,
    pub limit: Option<usize>,
}

/// Executes the resolve command.
///
/// # Errors
///
/// Returns an error if the bundle or the pending snapshot cannot be read.
pub fn execute(ctx: &CommandContext, opts: &ResolveOptions, store: &BundleStore) -> Result<()> {
    let args = store.load()?.into_args();
    let pending = match &opts.pending {
        Some(path) => Some(read_json::<HashMap<String, Vec<CardId>>>(path)?),
        None => None,
    };

    let result = resolve(args, opts, pending);

    if ctx.json_output {
        let output = format_collection_json(&result)?;
        println!("{output}");
    } else if !ctx.quiet {
        for warning in &result.warnings {
            eprintln!("Warning: {warning}");
        }
        let output = format_collection_table(&result, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Resolves `opts.path` against `args`.
///
/// `pending` overlays the bundle's concrete filters: named filters take the
/// given membership, the rest keep theirs.
pub fn resolve(
    args: CollectionArgs,
    opts: &ResolveOptions,
    pending: Option<HashMap<String, Vec<CardId>>>,
) -> ResolveResult {
    let description = CollectionDescription::deserialize(&opts.path);
    let warnings = unknown_names(&description, &args);

    let collection = Collection::new(description, args);

    let would_be_removed = pending.map(|pending| {
        let snapshot = overlay(collection.args().filters(), pending);
        collection.items_that_would_be_removed(&snapshot)
    });

    ResolveResult {
        collection,
        warnings,
        would_be_removed,
        limit: opts.limit,
    }
}

/// Copies `base` and replaces the membership of every filter in `pending`.
fn overlay(base: &FilterRegistry, pending: HashMap<String, Vec<CardId>>) -> FilterRegistry {
    let mut snapshot = base.clone();
    for (name, ids) in pending {
        snapshot.insert_set(name, ids);
    }
    snapshot
}

/// Lists the set, sort and filter names in `description` that `args` cannot
/// resolve. Unknown names are legal; they just match nothing.
fn unknown_names(description: &CollectionDescription, args: &CollectionArgs) -> Vec<String> {
    let mut warnings = Vec::new();

    let set_name = description.set_name();
    if !args.set_names().any(|name| name == set_name) {
        let suggestion = find_similar_name(set_name, args.set_names());
        warnings.push(format_not_found("Set", set_name, suggestion.as_deref()));
    }

    let sort_name = description.sort_name();
    if !args.sorts().contains(sort_name) {
        let suggestion = find_similar_name(sort_name, args.sorts().names().into_iter());
        warnings.push(format_not_found("Sort", sort_name, suggestion.as_deref()));
    }

    let registry = args.filters();
    let filter_names = || registry.names().chain(registry.inverse_names());
    let mut unknown_filter = |name: &str| {
        let suggestion = find_similar_name(name, filter_names());
        warnings.push(format_not_found("Filter", name, suggestion.as_deref()));
    };

    for name in description.filters() {
        match FilterKind::classify(name, registry) {
            FilterKind::Unknown(name) => unknown_filter(&name),
            FilterKind::Union(members) => {
                for member in members {
                    if let FilterRef::Unknown(name) = member {
                        unknown_filter(&name);
                    }
                }
            }
            FilterKind::Concrete(_)
            | FilterKind::Inverse { .. }
            | FilterKind::Configurable { .. } => {}
        }
    }

    warnings
}
