//! Configuration dialog: webhook URL, relay toggle, test/save/cancel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::core::transport::relays;

use super::super::app::{ConfigField, ConfigForm};
use super::super::constants::ACCENT;

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);
    let [row] = vertical.areas(area);
    let [popup] = horizontal.areas(row);
    popup
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub(crate) fn draw_config_popup(f: &mut Frame, area: Rect, form: &ConfigForm) {
    let popup_rect = popup_area(area, 72.min(area.width), 16.min(area.height));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Webhook configuration (F2) ");
    let inner = block.inner(popup_rect);
    f.render_widget(Clear, popup_rect);
    f.render_widget(block, popup_rect);

    let [label_area, url_area, error_area, proxy_area, relays_area, _, buttons_area, hint_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

    f.render_widget(Paragraph::new("Webhook URL"), label_area);

    let url_focused = form.focus == ConfigField::WebhookUrl;
    let url_block = Block::default().borders(Borders::ALL).border_style(if url_focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    });
    let url_inner = url_block.inner(url_area);
    let url_text = if form.webhook_url.is_empty() {
        Span::styled(
            "https://your-workflow.example.com/webhook/...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(form.webhook_url.as_str())
    };
    f.render_widget(Paragraph::new(Line::from(url_text)).block(url_block), url_area);
    if url_focused {
        let cx = url_inner.x
            + (form.webhook_url.chars().count() as u16).min(url_inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(cx, url_inner.y));
    }

    if let Some(err) = &form.error {
        f.render_widget(
            Paragraph::new(Span::styled(err.as_str(), Style::default().fg(Color::Red))),
            error_area,
        );
    }

    let checkbox = if form.use_cors_proxy { "[x]" } else { "[ ]" };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", checkbox),
                focus_style(form.focus == ConfigField::CorsProxy),
            ),
            Span::raw(" Use CORS relay"),
        ])),
        proxy_area,
    );
    let relay_names: Vec<&str> = relays().iter().map(|r| r.name.as_str()).collect();
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(
                "Only needed when the webhook is not reachable directly. Tries: {}",
                relay_names.join(", ")
            ),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .wrap(Wrap { trim: true }),
        relays_area,
    );

    let test_label = if form.testing { " Testing... " } else { " Test " };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(test_label, focus_style(form.focus == ConfigField::Test)),
            Span::raw("  "),
            Span::styled(" Save ", focus_style(form.focus == ConfigField::Save)),
            Span::raw("  "),
            Span::styled(" Cancel ", focus_style(form.focus == ConfigField::Cancel)),
        ]))
        .alignment(ratatui::layout::Alignment::Right),
        buttons_area,
    );

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Tab ", Style::default().fg(Color::DarkGray)),
            Span::raw("next  "),
            Span::styled("Space ", Style::default().fg(Color::DarkGray)),
            Span::raw("toggle  "),
            Span::styled("Enter ", Style::default().fg(Color::DarkGray)),
            Span::raw("activate  "),
            Span::styled("Esc ", Style::default().fg(Color::DarkGray)),
            Span::raw("cancel"),
        ])),
        hint_area,
    );
}
