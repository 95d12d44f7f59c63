//! Chat history: message blocks, product catalogs, typing indicator, scrollbar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::chat::{ChatMessage, MessageBody};

use super::super::app::App;
use super::super::constants::{ACCENT_SECONDARY, LOGO_THINKING, SPINNER_FRAME_MS};
use super::super::text::{parse_markdown_inline, wrap_message};
use super::products::product_card_lines;

/// Repeat a character to fill width (approximate; chars may have different display widths).
pub(super) fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

/// Width of the `│ ` gutter plus padding inside a message block.
const GUTTER: usize = 5;

/// Lines of a text paragraph inside a message block.
fn push_text(lines: &mut Vec<Line<'static>>, text: &str, content_width: usize, border: Style) {
    for chunk in wrap_message(text.trim(), content_width) {
        let mut spans = vec![Span::styled("│ ", border), Span::raw("  ")];
        spans.extend(parse_markdown_inline(&chunk));
        lines.push(Line::from(spans));
    }
}

fn push_blank(lines: &mut Vec<Line<'static>>, border: Style) {
    lines.push(Line::from(Span::styled("│ ", border)));
}

/// Add a message block with borders and a separator.
fn add_message_block(
    lines: &mut Vec<Line<'static>>,
    message: &ChatMessage,
    wrap_width: usize,
    content_width: usize,
) {
    let (label, border_color) = if message.is_user() {
        ("You", Color::DarkGray)
    } else {
        ("Assistant", ACCENT_SECONDARY)
    };
    let border = Style::default().fg(border_color);

    // "┌─ Label 14:32 ───...──┐"
    let top_label = format!("┌─ {} {} ", label, message.timestamp.format("%H:%M"));
    let top_trail_len = wrap_width.saturating_sub(top_label.chars().count() + 1);
    lines.push(Line::from(Span::styled(
        format!("{}{}┐", top_label, repeat_char('─', top_trail_len)),
        border,
    )));

    match &message.body {
        MessageBody::Text { text } => push_text(lines, text, content_width, border),
        MessageBody::Products(reply) => {
            if let Some(intro) = &reply.intro_text {
                push_text(lines, intro, content_width, border);
                push_blank(lines, border);
            }
            for (i, product) in reply.products.iter().enumerate() {
                if i > 0 {
                    push_blank(lines, border);
                }
                for card_line in product_card_lines(i + 1, product, content_width) {
                    let mut spans = vec![Span::styled("│ ", border), Span::raw("  ")];
                    spans.extend(card_line.spans);
                    lines.push(Line::from(spans));
                }
            }
            if let Some(outro) = &reply.outro_text {
                push_blank(lines, border);
                push_text(lines, outro, content_width, border);
            }
        }
    }

    lines.push(Line::from(Span::styled(
        format!("└{}┘", repeat_char('─', wrap_width.saturating_sub(2))),
        border,
    )));
    lines.push(Line::from(""));
}

fn typing_line(app: &App) -> Option<Line<'static>> {
    let start = app.typing_since?;
    let frame = (start.elapsed().as_millis() / SPINNER_FRAME_MS) as usize;
    Some(Line::from(vec![
        Span::styled(
            format!("  {} ", LOGO_THINKING[frame % LOGO_THINKING.len()]),
            Style::default().fg(ACCENT_SECONDARY),
        ),
        Span::styled(
            "Assistant is typing...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    ]))
}

pub(crate) fn draw_history(f: &mut Frame, app: &mut App, history_area: Rect) {
    let history_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(history_area);
    let text_area = history_chunks[0];
    let scrollbar_area = history_chunks[1];
    let wrap_width = text_area.width as usize;
    let content_width = wrap_width.saturating_sub(GUTTER).max(1);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in app.conversation.messages() {
        add_message_block(&mut lines, message, wrap_width, content_width);
    }
    if let Some(line) = typing_line(app) {
        lines.push(line);
    }

    let total_lines = lines.len();
    let visible = text_area.height as usize;
    let max_scroll = total_lines.saturating_sub(visible.max(1));
    app.last_max_scroll = max_scroll;
    let scroll_pos = app.scroll_line().min(max_scroll);
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();

    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(total_lines);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(ACCENT_SECONDARY))
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}
