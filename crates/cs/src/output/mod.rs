//! Output formatting utilities for the cs CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by command:
//!
//! - [`description`] - Parsed path output (parse)
//! - [`collection`] - Resolved collection output (resolve)
//! - [`blocks`] - Reference block output (blocks)
//! - [`helpers`] - Common formatting utilities (truncation, headers, labels)

mod blocks;
mod collection;
mod description;
pub mod helpers;

pub use blocks::{format_blocks_json, format_blocks_table};
pub use collection::{format_collection_json, format_collection_table};
pub use description::{format_description_json, format_description_table};
