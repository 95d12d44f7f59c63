//! Handling of completed webhook exchanges and connection tests.

use crate::core::transport::{Exchange, ReplySource};

use super::app::{App, ScrollPosition, ToastKind};

/// Append the reply of a finished exchange and leave the typing state.
pub(super) fn handle_exchange(app: &mut App, exchange: Exchange) {
    let Exchange { response, source } = exchange;
    app.typing_since = None;
    app.conversation.push_reply(response);
    app.scroll = ScrollPosition::Bottom;
    if source == ReplySource::Offline && app.is_connected() {
        app.show_toast(ToastKind::Warning, "Webhook unreachable, showing an offline reply");
    }
    app.last_source = Some(source);
}

/// Report the outcome of a connection test started from the config dialog.
pub(super) fn handle_connection_test(app: &mut App, ok: bool) {
    if let Some(form) = app.config_form.as_mut() {
        form.testing = false;
    }
    if ok {
        app.show_toast(ToastKind::Success, "Connection successful");
    } else {
        app.show_toast(ToastKind::Error, "Connection failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::response::NormalizedResponse;

    fn connected_app() -> App {
        App::new(Config {
            webhook_url: Some("https://hooks.example.com/chat".to_string()),
            ..Config::default()
        })
    }

    #[test]
    fn reply_ends_typing_and_records_source() {
        let mut app = connected_app();
        app.typing_since = Some(std::time::Instant::now());
        handle_exchange(
            &mut app,
            Exchange {
                response: NormalizedResponse::plain("Γεια!"),
                source: ReplySource::Webhook("direct".to_string()),
            },
        );
        assert!(!app.is_typing());
        assert_eq!(app.last_source, Some(ReplySource::Webhook("direct".to_string())));
        assert!(app.toast.is_none());
        assert_eq!(app.conversation.len(), 2);
    }

    #[test]
    fn offline_reply_while_connected_warns() {
        let mut app = connected_app();
        handle_exchange(
            &mut app,
            Exchange {
                response: NormalizedResponse::plain("offline"),
                source: ReplySource::Offline,
            },
        );
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Warning));
    }

    #[test]
    fn connection_test_clears_testing_flag() {
        let mut app = connected_app();
        app.open_config_form();
        if let Some(form) = app.config_form.as_mut() {
            form.testing = true;
        }
        handle_connection_test(&mut app, false);
        assert_eq!(app.config_form.as_ref().map(|f| f.testing), Some(false));
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Error));
    }
}
