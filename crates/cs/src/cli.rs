//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the cs CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// cs - Resolve card collections from path descriptions
#[derive(Parser, Debug)]
#[command(name = "cs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Card bundle to read (default: from config)
    #[arg(long, global = true, env = "CS_BUNDLE")]
    pub bundle: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a path and show its canonical form
    #[command(alias = "p")]
    Parse {
        /// Collection path (e.g. "main/starred/sort/recent/")
        path: String,

        /// Read PATH as a JSON object with "set", "filters", "sort" and "reversed" keys
        #[arg(long)]
        fields: bool,
    },

    /// Resolve a path against the bundle and list its cards
    #[command(alias = "r")]
    Resolve {
        /// Collection path (e.g. "main/starred/sort/recent/")
        path: String,

        /// JSON file of pending filter memberships; lists the cards they would remove
        #[arg(long)]
        pending: Option<PathBuf>,

        /// Limit results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the reference blocks of a card
    #[command(alias = "b")]
    Blocks {
        /// Key card ID
        card_id: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Show config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["cs", "--verbose", "--json", "parse", "main/"]);
        assert!(cli.verbose);
        assert!(cli.json);
        assert!(!cli.quiet);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["cs", "-q", "-v", "parse", "main/"]).is_err());
    }

    #[test]
    fn test_bundle_flag_after_subcommand() {
        let cli = Cli::parse_from(["cs", "resolve", "starred/", "--bundle", "cards.json"]);
        assert_eq!(cli.bundle, Some(PathBuf::from("cards.json")));
    }

    #[test]
    fn test_parse() {
        let cli = Cli::parse_from(["cs", "parse", "starred/sort/recent/"]);
        if let Some(Commands::Parse { path, fields }) = cli.command {
            assert_eq!(path, "starred/sort/recent/");
            assert!(!fields);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_resolve_with_options() {
        let cli = Cli::parse_from([
            "cs",
            "r",
            "starred/",
            "--pending",
            "pending.json",
            "--limit",
            "5",
        ]);
        if let Some(Commands::Resolve {
            path,
            pending,
            limit,
        }) = cli.command
        {
            assert_eq!(path, "starred/");
            assert_eq!(pending, Some(PathBuf::from("pending.json")));
            assert_eq!(limit, Some(5));
        } else {
            panic!("Expected Resolve command");
        }
    }

    #[test]
    fn test_blocks() {
        let cli = Cli::parse_from(["cs", "blocks", "card-1"]);
        if let Some(Commands::Blocks { card_id }) = cli.command {
            assert_eq!(card_id, "card-1");
        } else {
            panic!("Expected Blocks command");
        }
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from(["cs", "config", "set", "output.color", "false"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "output.color");
            assert_eq!(value, "false");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["cs", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
