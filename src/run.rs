//! Application run modes: logger init, single message, TUI launch.

use std::io;
use std::sync::Arc;

use serde::Serialize;

use crate::cli::Args;
use crate::core;
use crate::core::chat::MessageBody;
use crate::core::config::Config;
use crate::core::response::NormalizedResponse;
use crate::core::transport::{self, ReplySource};

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_tui() {
        if let Some(dir) = core::paths::cache_dir() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Some(path) = core::paths::log_file()
            && let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

/// JSON printed by `-p --json`.
#[derive(Serialize)]
struct PromptOutput<'a> {
    source: String,
    response: &'a NormalizedResponse,
    message: &'a MessageBody,
}

/// Run single message mode: send to the webhook, print the reply to stdout.
pub async fn run_single_prompt(args: &Args, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let Some(prompt_arg) = args.prompt.as_deref() else {
        return Ok(());
    };
    let prompt = if prompt_arg == "-" {
        io::read_to_string(io::stdin())?
    } else {
        prompt_arg.to_string()
    };
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Error: empty message");
        std::process::exit(1);
    }

    let session_id = uuid::Uuid::new_v4().to_string();
    let exchange = transport::send_message(config, prompt, Some(&session_id)).await;
    let body = MessageBody::from_response(exchange.response.clone());

    if args.json {
        let output = PromptOutput {
            source: source_label(&exchange.source),
            response: &exchange.response,
            message: &body,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", body.to_plain_text());
    }
    Ok(())
}

fn source_label(source: &ReplySource) -> String {
    match source {
        ReplySource::Webhook(route) => route.clone(),
        ReplySource::Offline => "offline".to_string(),
    }
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
