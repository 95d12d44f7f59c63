//! Centralized keyboard shortcuts.
//!
//! | Action          | Keys                 |
//! |-----------------|----------------------|
//! | Send            | Enter                |
//! | Scroll          | ↑ ↓ PageUp PageDown  |
//! | Configuration   | F2                   |
//! | Clear chat      | Ctrl+L               |
//! | Open product    | Ctrl+O               |
//! | Quit            | Esc, Ctrl+C          |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Open the configuration dialog (F2)
    Config,
    /// Clear the conversation (Ctrl+L)
    ClearChat,
    /// Open the first product link of the latest catalog (Ctrl+O)
    OpenProduct,
    /// Quit (Ctrl+C)
    Quit,
}

impl Shortcut {
    /// Returns the shortcut if the key matches.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::F(2) => Some(Shortcut::Config),
            KeyCode::Char('c') if ctrl => Some(Shortcut::Quit),
            KeyCode::Char('l') if ctrl => Some(Shortcut::ClearChat),
            KeyCode::Char('o') if ctrl => Some(Shortcut::OpenProduct),
            _ => None,
        }
    }

    pub fn is_escape(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press && key.code == KeyCode::Esc
    }
}


/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::Color;
    use ratatui::text::{Line, Span};

    const DIM: Color = Color::DarkGray;

    pub fn bottom_bar(is_typing: bool, has_product_link: bool) -> Line<'static> {
        let mut spans = if is_typing {
            vec![Span::styled("waiting for reply", Color::Yellow)]
        } else {
            vec![Span::styled("Enter ", DIM), Span::raw("send")]
        };
        spans.extend([
            Span::styled("  ↑↓ ", DIM),
            Span::raw("scroll"),
            Span::styled("  F2 ", DIM),
            Span::raw("config"),
            Span::styled("  Ctrl+L ", DIM),
            Span::raw("clear"),
        ]);
        if has_product_link {
            spans.extend([Span::styled("  Ctrl+O ", DIM), Span::raw("open product")]);
        }
        spans.extend([Span::styled("  Esc ", DIM), Span::raw("quit")]);
        Line::from(spans)
    }
}
