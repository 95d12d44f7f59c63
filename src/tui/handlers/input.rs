//! Handler for main input (chat input, scroll).

use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Runtime;

use super::super::app::{App, ScrollPosition};
use super::super::constants;
use super::chat_spawn::{self, PendingChat};
use super::HandleResult;

/// Handle main input keys (when no popup is open).
pub(crate) fn handle_main_input(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    app: &mut App,
    pending_chat: &mut Option<PendingChat>,
    rt: &Arc<Runtime>,
) -> HandleResult {
    match key_code {
        KeyCode::Enter => {
            let input = app.input.trim().to_string();
            if !input.is_empty() && pending_chat.is_none() {
                app.input.clear();
                app.conversation.push_user(&input);
                app.scroll = ScrollPosition::Bottom;
                app.typing_since = Some(Instant::now());
                *pending_chat = Some(chat_spawn::spawn_chat(
                    rt,
                    app.config.clone(),
                    input,
                    app.session_id.clone(),
                ));
            }
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Up => app.scroll_up(constants::SCROLL_LINES_SMALL),
        KeyCode::Down => app.scroll_down(constants::SCROLL_LINES_SMALL),
        KeyCode::PageUp => app.scroll_up(constants::SCROLL_LINES_PAGE),
        KeyCode::PageDown => app.scroll_down(constants::SCROLL_LINES_PAGE),
        KeyCode::End => app.scroll = ScrollPosition::Bottom,
        KeyCode::Char('u') if key_modifiers.contains(KeyModifiers::CONTROL) => app.input.clear(),
        KeyCode::Char(c) => {
            // Ignore Alt/Ctrl+key: not text input
            if !key_modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
                app.input.push(c);
            }
        }
        _ => {}
    }
    HandleResult::Continue
}
