//! Header: spinner logo, assistant name, connection status.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::app::ASSISTANT_NAME;
use crate::core::transport::ReplySource;

use super::super::app::App;
use super::super::constants::{ACCENT, LOGO_IDLE, LOGO_THINKING, SPINNER_FRAME_MS};

/// Width reserved for the connection status on the right.
const STATUS_WIDTH: u16 = 30;

/// Spinner frame while a reply is pending, idle logo otherwise.
pub(crate) fn logo_symbol(app: &App) -> &'static str {
    match app.typing_since {
        Some(start) => {
            let frame = (start.elapsed().as_millis() / SPINNER_FRAME_MS) as usize;
            LOGO_THINKING[frame % LOGO_THINKING.len()]
        }
        None => LOGO_IDLE,
    }
}

/// "● Connected · <route>" or "○ Offline mode".
fn status_line(app: &App) -> Line<'static> {
    if !app.is_connected() {
        return Line::from(vec![
            Span::styled("○ ", Style::default().fg(Color::Yellow)),
            Span::styled("Offline mode", Style::default().fg(Color::DarkGray)),
        ]);
    }
    let route = match &app.last_source {
        Some(ReplySource::Webhook(label)) => label.clone(),
        Some(ReplySource::Offline) => "unreachable".to_string(),
        None if app.config.use_cors_proxy => "relay".to_string(),
        None => "direct".to_string(),
    };
    let dot = if matches!(app.last_source, Some(ReplySource::Offline)) {
        Color::Red
    } else {
        Color::Green
    };
    Line::from(vec![
        Span::styled("● ", Style::default().fg(dot)),
        Span::styled(
            format!("Connected · {}", route),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

pub(crate) fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(STATUS_WIDTH),
        ])
        .split(area);

    let logo = Line::from(Span::styled(
        format!("{} ", logo_symbol(app)),
        Style::default().fg(ACCENT),
    ));
    f.render_widget(Paragraph::new(logo), chunks[0]);

    let title = Line::from(Span::styled(
        ASSISTANT_NAME,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[1]);

    f.render_widget(
        Paragraph::new(status_line(app)).alignment(Alignment::Right),
        chunks[2],
    );
}
