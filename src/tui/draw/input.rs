//! Input field and bottom bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::App;
use super::super::constants::ACCENT;
use super::super::shortcuts::labels;

/// Draw the input block and set cursor position.
pub(crate) fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let typing = app.is_typing();
    let content = if app.input.is_empty() {
        let placeholder = if typing {
            "Waiting for the assistant... "
        } else {
            "Type your message... "
        };
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.input.as_str())
    };
    let border = if typing || app.config_form.is_some() {
        Color::DarkGray
    } else {
        ACCENT
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    // Keep the end of long input visible.
    let input_width = app.input.chars().count();
    let skip = input_width.saturating_sub(inner.width.saturating_sub(1) as usize);
    let content = if skip > 0 {
        Span::raw(app.input.chars().skip(skip).collect::<String>())
    } else {
        content
    };

    f.render_widget(
        Paragraph::new(Line::from(content))
            .block(block)
            .style(Style::default().fg(Color::White)),
        area,
    );
    if app.config_form.is_none() {
        let cx = inner.x + (input_width - skip).min(inner.width as usize) as u16;
        f.set_cursor_position(Position::new(cx, inner.y));
    }
}

/// Bottom bar: shortcuts on the right.
pub(crate) fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let has_link = app.conversation.latest_product_link().is_some();
    f.render_widget(
        Paragraph::new(labels::bottom_bar(app.is_typing(), has_link)).alignment(Alignment::Right),
        area,
    );
}
