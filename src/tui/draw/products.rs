//! Product cards inside an assistant message.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::repair::VIEW_MORE_LABEL;
use crate::core::response::ProductRecord;
use crate::core::text::{DEFAULT_TRAIL, DEFAULT_WORD_LIMIT, truncate_words};

use super::super::constants::{ACCENT, ACCENT_SECONDARY, PRICE};
use super::super::text::wrap_indented;

/// Indent of the detail lines under the card title.
const INDENT: usize = 3;

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Wrapped lines for one field, each starting with the card indent.
fn field_lines(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    let padded = format!("{}{}", " ".repeat(INDENT), text);
    wrap_indented(&padded, width, INDENT)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect()
}

/// Display lines of one product card: title, price, availability, description, image, link.
pub(crate) fn product_card_lines(
    position: usize,
    product: &ProductRecord,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let title = product.title.as_deref().unwrap_or("Product");
    lines.extend(
        wrap_indented(&format!("{}. {}", position, title), width, INDENT)
            .into_iter()
            .map(|l| {
                Line::from(Span::styled(
                    l,
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ))
            }),
    );

    if product.price.is_some() || product.old_price.is_some() {
        let mut spans = vec![Span::raw(" ".repeat(INDENT)), Span::raw("💰 ")];
        if let Some(price) = &product.price {
            spans.push(Span::styled(
                price.clone(),
                Style::default().fg(PRICE).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(old) = &product.old_price {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                old.clone(),
                dim().add_modifier(Modifier::CROSSED_OUT),
            ));
        }
        lines.push(Line::from(spans));
    }

    if let Some(availability) = &product.availability {
        lines.extend(field_lines(&format!("📦 {}", availability), width, Style::default()));
    }
    if let Some(description) = &product.description {
        let short = truncate_words(description, DEFAULT_WORD_LIMIT, DEFAULT_TRAIL);
        lines.extend(field_lines(&short, width, dim()));
    }
    if let Some(image) = &product.image_url {
        lines.extend(field_lines(&format!("🖼 {}", image), width, dim()));
    }
    if let Some(link) = &product.link {
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(INDENT)),
            Span::raw(format!("{} ", VIEW_MORE_LABEL)),
            Span::styled(
                link.clone(),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines
}
