//! Handler for the configuration dialog.

use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::core::chat::CONFIGURED_MESSAGE;
use crate::core::settings;

use super::super::app::{App, ConfigField, ScrollPosition, ToastKind};
use super::HandleResult;
use super::chat_spawn::{self, PendingTest};

pub(crate) fn handle_config_form(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    app: &mut App,
    pending_test: &mut Option<PendingTest>,
    rt: &Arc<Runtime>,
) -> HandleResult {
    let Some(form) = app.config_form.as_mut() else {
        return HandleResult::Continue;
    };

    match key_code {
        KeyCode::Esc => app.config_form = None,
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Char(' ') if form.focus == ConfigField::CorsProxy => {
            form.use_cors_proxy = !form.use_cors_proxy;
        }
        KeyCode::Backspace if form.focus == ConfigField::WebhookUrl => {
            form.webhook_url.pop();
            form.error = None;
        }
        KeyCode::Char(c)
            if form.focus == ConfigField::WebhookUrl
                && !key_modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) =>
        {
            form.webhook_url.push(c);
            form.error = None;
        }
        KeyCode::Enter => match form.focus {
            ConfigField::CorsProxy => form.use_cors_proxy = !form.use_cors_proxy,
            ConfigField::Test => start_test(app, pending_test, rt),
            ConfigField::Cancel => app.config_form = None,
            ConfigField::WebhookUrl | ConfigField::Save => save(app),
        },
        _ => {}
    }
    HandleResult::Continue
}

fn start_test(app: &mut App, pending_test: &mut Option<PendingTest>, rt: &Arc<Runtime>) {
    if pending_test.is_some() {
        return;
    }
    let base = app.config.clone();
    let Some(form) = app.config_form.as_mut() else {
        return;
    };
    let Some(candidate) = form.to_config(&base) else {
        app.show_toast(ToastKind::Warning, "Please enter a valid webhook URL first");
        return;
    };
    form.testing = true;
    *pending_test = Some(chat_spawn::spawn_connection_test(rt, candidate));
}

/// Apply the dialog values, persist them, and close the dialog.
fn save(app: &mut App) {
    let base = app.config.clone();
    let Some(form) = app.config_form.as_mut() else {
        return;
    };
    let Some(config) = form.to_config(&base) else {
        return;
    };

    let mut stored = settings::load().unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable settings: {}", e);
        settings::Settings::default()
    });
    stored.webhook_url = config.webhook_url.clone();
    stored.use_cors_proxy = config.use_cors_proxy;
    match settings::save(&stored) {
        Ok(path) => {
            log::info!("Settings saved to {}", path.display());
            app.show_toast(ToastKind::Success, "Webhook configured successfully");
        }
        Err(e) => {
            log::error!("Failed to save settings: {}", e);
            app.show_toast(ToastKind::Error, "Saved for this session only");
        }
    }

    app.config = config;
    app.last_source = None;
    app.config_form = None;
    app.conversation.push_assistant_text(CONFIGURED_MESSAGE);
    app.scroll = ScrollPosition::Bottom;
}
