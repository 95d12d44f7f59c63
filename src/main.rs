//! # AllSmart Chat
//!
//! Terminal client for the AllSmart assistant: sends messages to the
//! assistant's workflow webhook and renders the replies, product catalogs
//! included.
//!
//! ## Modes
//! - Interactive terminal UI (default)
//! - Single message with `-p`
//! - Configuration, connection test and payload inspection subcommands

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands, ConfigSubcommand, Toggle};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    // Commands that do not need a resolved configuration.
    match &args.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Normalize { input }) => {
            core::cli::run_normalize(input.as_deref());
            return Ok(());
        }
        Some(Commands::Config {
            subcommand: Some(sub),
        }) => {
            match sub {
                ConfigSubcommand::SetWebhook { url } => core::cli::run_config_set_webhook(url),
                ConfigSubcommand::Proxy { state } => {
                    core::cli::run_config_proxy(matches!(state, Toggle::On))
                }
                ConfigSubcommand::Reset => core::cli::run_config_reset(),
            }
            return Ok(());
        }
        _ => {}
    }

    let config = core::config::load(&args.overrides()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match &args.command {
        Some(Commands::Config { .. }) => core::cli::run_config(&config),
        Some(Commands::Test) => core::cli::run_test(&config).await,
        _ if args.prompt.is_some() => run::run_single_prompt(&args, &config).await?,
        _ => run::launch_tui(config).await?,
    }
    Ok(())
}
