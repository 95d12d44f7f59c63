//! CLI-only commands: config display and edits, connection test, normalize.
//!
//! These run without opening the TUI and produce plain text output.

use std::fs;
use std::io;

use crate::core::config::{self, Config};
use crate::core::paths;
use crate::core::response::normalize;
use crate::core::settings;
use crate::core::transport::{self, relays};

/// Run the `config` command: display paths, webhook, and relay status.
pub fn run_config(config: &Config) {
    let config_dir = paths::config_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let log_file = paths::log_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    println!("Config:       {}", config_dir);
    println!("Log file:     {}", log_file);
    println!(
        "Webhook:      {}",
        config.webhook_url.as_deref().unwrap_or("not set (offline replies)")
    );
    println!(
        "CORS relay:   {}",
        if config.use_cors_proxy { "on" } else { "off" }
    );
    if config.use_cors_proxy {
        let names: Vec<&str> = relays().iter().map(|r| r.name.as_str()).collect();
        println!("Relays:       {}", names.join(", "));
    }
    println!(
        "User ID:      {}",
        config.user_id.as_deref().unwrap_or("-")
    );
}

/// Run `config set-webhook`: validate and persist the webhook URL.
pub fn run_config_set_webhook(url: &str) {
    let url = match config::validate_webhook_url(url) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    update_settings(|s| s.webhook_url = Some(url.clone()));
    println!("Webhook URL set to {}", url);
}

/// Run `config proxy on|off`: persist the relay toggle.
pub fn run_config_proxy(on: bool) {
    update_settings(|s| s.use_cors_proxy = on);
    println!("CORS relay {}", if on { "enabled" } else { "disabled" });
}

/// Run `config reset`: remove the settings file.
pub fn run_config_reset() {
    match settings::reset() {
        Ok(true) => println!("Settings reset"),
        Ok(false) => println!("No settings to reset"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn update_settings(apply: impl FnOnce(&mut settings::Settings)) {
    let mut current = settings::load().unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable settings: {}", e);
        settings::Settings::default()
    });
    apply(&mut current);
    match settings::save(&current) {
        Ok(path) => log::info!("Settings saved to {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run the `test` command: POST a probe message. Exits 1 on failure.
pub async fn run_test(config: &Config) {
    if config.webhook_url.is_none() {
        eprintln!("Error: no webhook URL configured (use `config set-webhook <url>`)");
        std::process::exit(1);
    }
    if transport::test_connection(config).await {
        println!("Connection successful!");
    } else {
        eprintln!(
            "Connection failed. Make sure the workflow is active, or try the CORS relay (`config proxy on`)."
        );
        std::process::exit(1);
    }
}

/// Run the `normalize` command: read a payload from a file or stdin and print
/// the normalized JSON.
pub fn run_normalize(input: Option<&str>) {
    let raw = match input {
        None | Some("-") => io::read_to_string(io::stdin()),
        Some(path) => fs::read_to_string(path),
    };
    let raw = match raw {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let payload = serde_json::from_str(&raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.clone()));
    match serde_json::to_string_pretty(&normalize(&payload)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
