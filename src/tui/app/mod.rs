//! TUI application state: conversation, input, scroll, config dialog, toasts.

mod config_form;

pub use config_form::{ConfigField, ConfigForm};

use std::time::Instant;

use crate::core::chat::{Conversation, RELAY_NOTICE, SETUP_HINT};
use crate::core::config::Config;
use crate::core::transport::ReplySource;

use super::constants::TOAST_DURATION;

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPosition {
    Line(usize),
    Bottom,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::Bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

/// Short notification shown top right until `until`.
#[derive(Clone, Debug)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub until: Instant,
}

pub struct App {
    pub(crate) conversation: Conversation,
    /// Configuration used for the next request; edited by the config dialog.
    pub(crate) config: Config,
    /// Sent as `sessionId`; renewed when the chat is cleared.
    pub(crate) session_id: String,
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
    /// Set while a message is in flight; sending is disabled until the reply arrives.
    pub(crate) typing_since: Option<Instant>,
    /// Origin of the last reply, shown in the header.
    pub(crate) last_source: Option<ReplySource>,
    pub(crate) config_form: Option<ConfigForm>,
    pub(crate) toast: Option<Toast>,
}

fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut conversation = Conversation::new();
        if config.webhook_url.is_none() {
            conversation.push_assistant_text(SETUP_HINT);
        }
        if config.use_cors_proxy {
            conversation.push_assistant_text(RELAY_NOTICE);
        }
        Self {
            conversation,
            config,
            session_id: new_session_id(),
            input: String::new(),
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
            typing_since: None,
            last_source: None,
            config_form: None,
            toast: None,
        }
    }

    pub(crate) fn is_typing(&self) -> bool {
        self.typing_since.is_some()
    }

    /// True when a webhook URL is configured.
    pub(crate) fn is_connected(&self) -> bool {
        self.config.webhook_url.is_some()
    }

    pub(crate) fn show_toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            kind,
            until: Instant::now() + TOAST_DURATION,
        });
    }

    /// Visible toast, dropping it once expired.
    pub(crate) fn active_toast(&mut self) -> Option<&Toast> {
        if self.toast.as_ref().is_some_and(|t| t.until <= Instant::now()) {
            self.toast = None;
        }
        self.toast.as_ref()
    }

    /// Clear the conversation and start a new session.
    pub(crate) fn clear_chat(&mut self) {
        self.conversation.clear();
        self.session_id = new_session_id();
        self.scroll = ScrollPosition::Bottom;
        self.last_max_scroll = 0;
    }

    pub(crate) fn open_config_form(&mut self) {
        if self.config_form.is_none() {
            self.config_form = Some(ConfigForm::from_config(&self.config));
        }
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            let next = (pos + n).min(self.last_max_scroll);
            self.scroll = if next == self.last_max_scroll {
                ScrollPosition::Bottom
            } else {
                ScrollPosition::Line(next)
            };
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}
