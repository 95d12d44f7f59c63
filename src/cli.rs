//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

pub use clap_complete::generate;

use crate::core::config::Overrides;

const AFTER_HELP: &str = "\
EXAMPLES:
  allsmart-chat                                  Launch interactive TUI
  allsmart-chat -p \"καρέκλες γραφείου\"           Single message, print the reply
  allsmart-chat -p - --json < question.txt       Read message from stdin, print JSON
  allsmart-chat config set-webhook <url>         Store the webhook URL
  allsmart-chat config proxy on                  Route requests through CORS relays
  allsmart-chat test                             Test the webhook connection
  allsmart-chat normalize payload.json           Show how a payload is normalized
  allsmart-chat completions bash                 Generate bash completions

ENVIRONMENT:
  ALLSMART_WEBHOOK_URL, ALLSMART_USE_CORS_PROXY, ALLSMART_USER_ID
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Terminal chat client for the AllSmart assistant webhook",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Send a single message then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Send one message and print the reply (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Print the reply of single message mode as JSON
    #[arg(long, requires = "prompt")]
    pub json: bool,

    /// Webhook URL for this run (overrides settings and environment)
    #[arg(long, value_name = "URL", global = true)]
    pub webhook: Option<String>,

    /// Route requests through the CORS relays for this run
    #[arg(long, global = true, conflicts_with = "no_proxy")]
    pub proxy: bool,

    /// Send requests directly for this run
    #[arg(long, global = true)]
    pub no_proxy: bool,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Send a test message to the webhook
    Test,
    /// Print the normalized form of a webhook payload (file, or '-' for stdin)
    Normalize {
        /// Payload file; reads stdin when omitted or '-'
        input: Option<String>,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Store the webhook URL
    SetWebhook {
        /// Absolute http(s) URL of the workflow webhook
        url: String,
    },
    /// Turn the CORS relay on or off
    Proxy {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Remove the stored settings
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when the run opens the TUI (no subcommand, no prompt).
    pub fn is_tui(&self) -> bool {
        self.command.is_none() && self.prompt.is_none()
    }

    /// Configuration overrides from the command line.
    pub fn overrides(&self) -> Overrides {
        let use_cors_proxy = if self.proxy {
            Some(true)
        } else if self.no_proxy {
            Some(false)
        } else {
            None
        };
        Overrides {
            webhook_url: self.webhook.clone(),
            use_cors_proxy,
        }
    }
}
