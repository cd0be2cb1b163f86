//! Command implementations for the cs CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod blocks;
pub mod completions;
pub mod config;
pub mod lookups;
pub mod parse;
pub mod resolve;

use cardset_collection_rs::description::ConstructionError;

use crate::bundle_store::BundleStoreError;
use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Bundle could not be located or loaded.
    #[error("bundle error: {0}")]
    BundleStore(#[from] BundleStoreError),

    /// A description could not be built from explicit fields.
    #[error("invalid description: {0}")]
    Description(#[from] ConstructionError),

    /// The requested card is not in the bundle.
    #[error("card not found: {0}")]
    CardNotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// `--no-color` wins; otherwise `output.color` from the config applies,
    /// defaulting to colors on.
    pub fn from_cli(cli: &Cli, config: &config::Config) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_context_respects_no_color_flag() {
        let cli = Cli::parse_from(["cs", "--no-color", "parse", "main/"]);
        let ctx = CommandContext::from_cli(&cli, &config::Config::default());
        assert!(!ctx.use_colors);
    }

    #[test]
    fn test_context_respects_config_color() {
        let cli = Cli::parse_from(["cs", "parse", "main/"]);
        let mut config = config::Config::default();
        assert!(CommandContext::from_cli(&cli, &config).use_colors);

        config.output.color = Some(false);
        assert!(!CommandContext::from_cli(&cli, &config).use_colors);
    }

    #[test]
    fn test_error_messages() {
        let err = CommandError::CardNotFound("intro. Did you mean 'intro2'?".to_string());
        assert_eq!(err.to_string(), "card not found: intro. Did you mean 'intro2'?");

        let err: CommandError = BundleStoreError::NoBundle.into();
        assert!(err.to_string().starts_with("bundle error: no bundle given"));
    }
}
