use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod bundle_store;
mod cli;
mod commands;
mod dispatch;
mod output;

use bundle_store::{BundleStore, BundleStoreError};
use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{BundleCommand, BundleDispatch, NoBundleCommand, NoBundleDispatch};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "CS_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs a stderr subscriber.
///
/// `CS_LOG` (or `RUST_LOG`) wins when set; otherwise `-v` selects debug and
/// `-q` errors only.
fn setup_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, &config);

    if let Some(dispatch) = NoBundleDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    let store = BundleStore::resolve(cli.bundle.as_deref(), config.bundle.as_deref())?;
    tracing::debug!(bundle = %store.path().display(), "using bundle");

    match BundleDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &store),
        None => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::BundleStore(BundleStoreError::NoBundle) => "NO_BUNDLE",
        CommandError::BundleStore(_) => "BUNDLE_ERROR",
        CommandError::Description(_) => "DESCRIPTION_ERROR",
        CommandError::CardNotFound(_) => "NOT_FOUND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::BundleStore(_) => ExitCode::from(5),
        CommandError::CardNotFound(_) => ExitCode::from(5),
        CommandError::Description(_) => ExitCode::from(1),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardset_collection_rs::description::ConstructionError;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            error_code(&CommandError::BundleStore(BundleStoreError::NoBundle)),
            "NO_BUNDLE"
        );
        assert_eq!(
            error_code(&CommandError::CardNotFound("x".to_string())),
            "NOT_FOUND"
        );
        assert_eq!(
            error_code(&CommandError::Description(ConstructionError::EmptyFilterName {
                index: 0
            })),
            "DESCRIPTION_ERROR"
        );
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(
            error_exit_code(&CommandError::Config("bad".to_string())),
            ExitCode::from(5)
        );
        assert_eq!(
            error_exit_code(&CommandError::Io(std::io::Error::other("boom"))),
            ExitCode::from(3)
        );
        assert_eq!(
            error_exit_code(&CommandError::CardNotFound("x".to_string())),
            ExitCode::from(5)
        );
    }
}
