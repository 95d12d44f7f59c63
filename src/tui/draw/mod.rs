//! TUI rendering: layout and widgets for the chat interface.

mod config_popup;
mod header;
mod history;
mod input;
mod products;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::app::{App, ToastKind};
use super::constants::ACCENT;

const HEADER_HEIGHT: u16 = 2;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);
    header::draw_header(f, app, chunks[0]);
    history::draw_history(f, app, chunks[1]);
    input::draw_input(f, app, chunks[2]);
    input::draw_bottom_bar(f, app, chunks[3]);

    if let Some(form) = &app.config_form {
        config_popup::draw_config_popup(f, area, form);
    }

    draw_toast(f, app, area);
}

/// Toast: top right, below header. Opaque background so it's visible over history.
fn draw_toast(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(toast) = app.active_toast() else {
        return;
    };
    let color = match toast.kind {
        ToastKind::Success => ACCENT,
        ToastKind::Warning => Color::Yellow,
        ToastKind::Error => Color::Red,
    };
    let text = format!(" {} ", toast.text);
    let toast_width = (text.chars().count() as u16 + 2).min(area.width);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(toast_width).saturating_sub(1),
        y: area.y + HEADER_HEIGHT,
        width: toast_width,
        height: 3u16.min(area.height.saturating_sub(HEADER_HEIGHT)),
    };
    f.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black));
    let para = Paragraph::new(Line::from(text))
        .block(block)
        .style(Style::default().fg(color).bg(Color::Black));
    f.render_widget(para, toast_area);
}
