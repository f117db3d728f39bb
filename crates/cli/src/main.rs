//! screenset CLI: the main entry point.
//!
//! Commands:
//! - `assemble`: Build the markup for a local asset or hosted screen-set
//! - `theme`   : Fetch the style library of a hosted screen-set
//! - `config`  : Show, locate, validate or initialize configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "screenset",
    about = "screenset: renderer-ready screen-set markup",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble markup and print it as JSON
    Assemble {
        /// Local asset path (e.g. `nss/login`), relative to the asset root
        #[arg(long, conflicts_with = "screen_set", required_unless_present = "screen_set")]
        asset: Option<String>,

        /// Hosted screen-set id
        #[arg(long)]
        screen_set: Option<String>,

        /// Language code (defaults to `default_language` from config)
        #[arg(short, long)]
        lang: Option<String>,

        /// Override the markup's initial route
        #[arg(long)]
        initial_route: Option<String>,

        /// Read local assets from this directory instead of `asset_root`
        #[arg(long, env = "SCREENSET_ASSET_ROOT")]
        asset_root: Option<PathBuf>,

        /// Write the document to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch a hosted screen-set's style library
    Theme {
        /// Hosted screen-set id
        #[arg(long)]
        screen_set: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (default)
    Show,
    /// Print the config file path
    Path,
    /// Validate the configuration file
    Validate,
    /// Print a default config file
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing (stderr, so stdout stays pure JSON)
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Assemble {
            asset,
            screen_set,
            lang,
            initial_route,
            asset_root,
            output,
        } => {
            let args = commands::assemble::AssembleArgs {
                asset,
                screen_set,
                lang,
                initial_route,
                asset_root,
                output,
            };
            commands::assemble::run(args).await?
        }
        Commands::Theme { screen_set } => commands::theme::run(screen_set).await?,
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Init => commands::config_cmd::init().await?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assemble_requires_a_source() {
        assert!(Cli::try_parse_from(["screenset", "assemble"]).is_err());
        assert!(
            Cli::try_parse_from(["screenset", "assemble", "--asset", "a", "--screen-set", "b"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["screenset", "assemble", "--screen-set", "b"]).is_ok());
    }
}
