//! Runtime configuration: defaults, settings file, environment, CLI flags.

use std::env;

use crate::core::settings::{self, Settings, SettingsError};

pub const WEBHOOK_URL_VAR: &str = "ALLSMART_WEBHOOK_URL";
pub const USE_CORS_PROXY_VAR: &str = "ALLSMART_USE_CORS_PROXY";
pub const USER_ID_VAR: &str = "ALLSMART_USER_ID";

/// Everything the transport needs to reach the webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `None` means every message is answered offline.
    pub webhook_url: Option<String>,
    pub use_cors_proxy: bool,
    pub user_id: Option<String>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub webhook_url: Option<String>,
    pub use_cors_proxy: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid webhook URL '{url}': {reason}")]
    InvalidWebhookUrl { url: String, reason: String },
    #[error("{var} must be a boolean (true/false), got '{value}'")]
    InvalidBool { var: &'static str, value: String },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Load configuration: settings file, then environment, then `overrides`.
pub fn load(overrides: &Overrides) -> Result<Config, ConfigError> {
    let settings = settings::load()?;
    resolve(settings, |var| env::var(var).ok(), overrides)
}

/// Merge the layers. `env` looks up a variable; blank values count as unset.
pub fn resolve<F>(settings: Settings, env: F, overrides: &Overrides) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |var: &str| env(var).filter(|v| !v.trim().is_empty());

    let mut config = Config {
        webhook_url: settings.webhook_url.filter(|u| !u.trim().is_empty()),
        use_cors_proxy: settings.use_cors_proxy,
        user_id: settings.user_id.filter(|u| !u.trim().is_empty()),
    };

    if let Some(url) = lookup(WEBHOOK_URL_VAR) {
        config.webhook_url = Some(url);
    }
    if let Some(value) = lookup(USE_CORS_PROXY_VAR) {
        config.use_cors_proxy = parse_bool(USE_CORS_PROXY_VAR, &value)?;
    }
    if let Some(user) = lookup(USER_ID_VAR) {
        config.user_id = Some(user.trim().to_string());
    }

    if let Some(url) = &overrides.webhook_url {
        config.webhook_url = Some(url.clone());
    }
    if let Some(on) = overrides.use_cors_proxy {
        config.use_cors_proxy = on;
    }

    config.webhook_url = config
        .webhook_url
        .as_deref()
        .map(validate_webhook_url)
        .transpose()?;
    Ok(config)
}

/// Check that `raw` is an absolute http(s) URL. Returns it trimmed.
pub fn validate_webhook_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidWebhookUrl {
        url: trimmed.to_string(),
        reason,
    };
    let parsed = url::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Accepts true/false, 1/0, yes/no, on/off (case-insensitive).
pub fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
