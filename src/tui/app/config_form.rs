//! State of the configuration dialog (F2).

use crate::core::config::{self, Config};

/// Focusable elements of the dialog, in Tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigField {
    WebhookUrl,
    CorsProxy,
    Test,
    Save,
    Cancel,
}

const FIELD_ORDER: &[ConfigField] = &[
    ConfigField::WebhookUrl,
    ConfigField::CorsProxy,
    ConfigField::Test,
    ConfigField::Save,
    ConfigField::Cancel,
];

pub struct ConfigForm {
    pub webhook_url: String,
    pub use_cors_proxy: bool,
    pub focus: ConfigField,
    /// Validation message shown under the URL field.
    pub error: Option<String>,
    /// True while a connection test is running.
    pub testing: bool,
}

impl ConfigForm {
    pub fn from_config(config: &Config) -> Self {
        Self {
            webhook_url: config.webhook_url.clone().unwrap_or_default(),
            use_cors_proxy: config.use_cors_proxy,
            focus: ConfigField::WebhookUrl,
            error: None,
            testing: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = step(self.focus, 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step(self.focus, FIELD_ORDER.len() - 1);
    }

    /// Configuration the form describes, keeping the user id of `base`.
    /// Sets `error` and returns `None` when the URL is missing or invalid.
    pub fn to_config(&mut self, base: &Config) -> Option<Config> {
        let url = self.webhook_url.trim();
        if url.is_empty() {
            self.error = Some("Please enter a webhook URL".to_string());
            return None;
        }
        match config::validate_webhook_url(url) {
            Ok(url) => {
                self.error = None;
                Some(Config {
                    webhook_url: Some(url),
                    use_cors_proxy: self.use_cors_proxy,
                    user_id: base.user_id.clone(),
                })
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

fn step(field: ConfigField, by: usize) -> ConfigField {
    let idx = FIELD_ORDER.iter().position(|f| *f == field).unwrap_or(0);
    FIELD_ORDER[(idx + by) % FIELD_ORDER.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = ConfigForm::from_config(&Config::default());
        form.focus_prev();
        assert_eq!(form.focus, ConfigField::Cancel);
        form.focus_next();
        assert_eq!(form.focus, ConfigField::WebhookUrl);
        form.focus_next();
        assert_eq!(form.focus, ConfigField::CorsProxy);
    }

    #[test]
    fn empty_url_is_rejected() {
        let mut form = ConfigForm::from_config(&Config::default());
        assert!(form.to_config(&Config::default()).is_none());
        assert_eq!(form.error.as_deref(), Some("Please enter a webhook URL"));
    }

    #[test]
    fn valid_url_builds_config() {
        let base = Config {
            user_id: Some("u1".to_string()),
            ..Config::default()
        };
        let mut form = ConfigForm::from_config(&base);
        form.webhook_url = " https://flow.example.com/webhook/chat ".to_string();
        form.use_cors_proxy = true;
        let config = form.to_config(&base).unwrap();
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://flow.example.com/webhook/chat")
        );
        assert!(config.use_cors_proxy);
        assert_eq!(config.user_id.as_deref(), Some("u1"));
        assert!(form.error.is_none());
    }

    #[test]
    fn invalid_url_sets_error() {
        let mut form = ConfigForm::from_config(&Config::default());
        form.webhook_url = "webhook".to_string();
        assert!(form.to_config(&Config::default()).is_none());
        assert!(form.error.unwrap().starts_with("Invalid webhook URL"));
    }
}
