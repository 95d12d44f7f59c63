//! Event handlers for the TUI: keyboard and mouse.

mod chat_spawn;
mod config_form;
mod input;

pub use chat_spawn::{PendingChat, PendingTest};

use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::sync::Arc;

use tokio::runtime::Runtime;

use super::app::{App, ToastKind};
use super::constants;
use super::shortcuts::Shortcut;

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Handle a mouse event. Only wheel scrolling of the history is supported.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) -> HandleResult {
    if app.config_form.is_some() {
        return HandleResult::Continue;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
        MouseEventKind::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
        _ => {}
    }
    HandleResult::Continue
}

/// Context for key event handling. Bundles mutable state to reduce parameter count.
pub struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub pending_chat: &'a mut Option<PendingChat>,
    pub pending_test: &'a mut Option<PendingTest>,
    pub rt: &'a Arc<Runtime>,
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext {
        app,
        pending_chat,
        pending_test,
        rt,
    } = ctx;

    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    if let Some(shortcut) = Shortcut::match_key(&key) {
        return handle_shortcut(shortcut, app);
    }

    // Config dialog captures everything else, including Esc
    if app.config_form.is_some() {
        return config_form::handle_config_form(key.code, key.modifiers, app, pending_test, rt);
    }

    if Shortcut::is_escape(&key) {
        return HandleResult::Break;
    }

    input::handle_main_input(key.code, key.modifiers, app, pending_chat, rt)
}

fn handle_shortcut(shortcut: Shortcut, app: &mut App) -> HandleResult {
    match shortcut {
        Shortcut::Quit => return HandleResult::Break,
        Shortcut::Config => app.open_config_form(),
        Shortcut::ClearChat => {
            app.clear_chat();
            app.show_toast(ToastKind::Success, "Chat cleared");
        }
        Shortcut::OpenProduct => match app.conversation.latest_product_link().map(str::to_owned) {
            Some(link) => {
                if let Err(e) = opener::open(&link) {
                    log::warn!("Failed to open {}: {}", link, e);
                    app.show_toast(ToastKind::Error, "Could not open the product link");
                }
            }
            None => app.show_toast(ToastKind::Warning, "No product link to open"),
        },
    }
    HandleResult::Continue
}
