//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split by whether they read a bundle. Parsing paths, config and
//! completions work without one.

use crate::bundle_store::BundleStore;
use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without a bundle.
pub trait NoBundleCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read a bundle.
pub trait BundleCommand {
    /// Execute the command against the bundle in `store`.
    fn execute(&self, ctx: &CommandContext, store: &BundleStore) -> Result<()>;
}

/// Commands that don't need a bundle.
pub enum NoBundleDispatch<'a> {
    Parse { path: &'a str, fields: bool },
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> NoBundleDispatch<'a> {
    /// Try to create a no-bundle dispatch from the CLI command.
    /// Returns None if the command needs a bundle.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Parse { path, fields }) => Some(Self::Parse {
                path,
                fields: *fields,
            }),
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl NoBundleCommand for NoBundleDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Parse { path, fields } => {
                let opts = commands::parse::ParseOptions {
                    path: path.to_string(),
                    fields: *fields,
                };
                commands::parse::execute(ctx, &opts)
            }
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("cs - Resolve card collections from path descriptions");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that need a bundle.
pub enum BundleDispatch<'a> {
    Resolve {
        path: &'a str,
        pending: &'a Option<std::path::PathBuf>,
        limit: Option<usize>,
    },
    Blocks {
        card_id: &'a str,
    },
}

impl<'a> BundleDispatch<'a> {
    /// Create a bundle dispatch from the CLI command.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Resolve {
                path,
                pending,
                limit,
            }) => Some(Self::Resolve {
                path,
                pending,
                limit: *limit,
            }),
            Some(Commands::Blocks { card_id }) => Some(Self::Blocks { card_id }),
            _ => None,
        }
    }
}

impl BundleCommand for BundleDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, store: &BundleStore) -> Result<()> {
        match self {
            Self::Resolve {
                path,
                pending,
                limit,
            } => {
                let opts = commands::resolve::ResolveOptions {
                    path: path.to_string(),
                    pending: (*pending).clone(),
                    limit: *limit,
                };
                commands::resolve::execute(ctx, &opts, store)
            }
            Self::Blocks { card_id } => {
                let opts = commands::blocks::BlocksOptions {
                    card_id: card_id.to_string(),
                };
                commands::blocks::execute(ctx, &opts, store)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_no_bundle_commands() {
        for args in [
            vec!["cs", "parse", "main/"],
            vec!["cs", "config", "path"],
            vec!["cs", "completions", "bash"],
            vec!["cs"],
        ] {
            let cli = Cli::parse_from(&args);
            assert!(NoBundleDispatch::try_from_cli(&cli).is_some(), "{args:?}");
            assert!(BundleDispatch::from_cli(&cli).is_none(), "{args:?}");
        }
    }

    #[test]
    fn test_bundle_commands() {
        for args in [vec!["cs", "resolve", "main/"], vec!["cs", "blocks", "a"]] {
            let cli = Cli::parse_from(&args);
            assert!(NoBundleDispatch::try_from_cli(&cli).is_none(), "{args:?}");
            assert!(BundleDispatch::from_cli(&cli).is_some(), "{args:?}");
        }
    }

    #[test]
    fn test_resolve_dispatch_carries_options() {
        let cli = Cli::parse_from(["cs", "resolve", "starred/", "--limit", "3"]);
        match BundleDispatch::from_cli(&cli) {
            Some(BundleDispatch::Resolve { path, limit, .. }) => {
                assert_eq!(path, "starred/");
                assert_eq!(limit, Some(3));
            }
            _ => panic!("Expected Resolve dispatch"),
        }
    }
}
