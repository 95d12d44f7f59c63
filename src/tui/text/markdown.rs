//! Inline Markdown styling: **bold**, `code`, headings, lists, links and bare URLs.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::constants::{ACCENT, ACCENT_SECONDARY};

fn link_style() -> Style {
    Style::default()
        .fg(ACCENT_SECONDARY)
        .add_modifier(Modifier::UNDERLINED)
}

/// Style one display line of an assistant reply.
pub(crate) fn parse_markdown_inline(s: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let trimmed = s.trim_start();
    if trimmed.starts_with('#') {
        let content = trimmed.trim_start_matches('#').trim_start();
        if !content.is_empty() {
            spans.push(Span::styled(
                content.to_string(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ));
        }
        return spans;
    }
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix("• "))
    {
        spans.push(Span::styled("• ", Style::default().fg(ACCENT)));
        spans.extend(parse_inline(rest));
        return spans;
    }
    if let Some((num, rest)) = parse_numbered_list_prefix(trimmed) {
        spans.push(Span::styled(format!("{}. ", num), Style::default().fg(ACCENT)));
        spans.extend(parse_inline(rest));
        return spans;
    }
    spans.extend(parse_inline(s));
    spans
}

/// Parse "N. " or "N) " at start. Returns (number, rest) or None.
fn parse_numbered_list_prefix(s: &str) -> Option<(&str, &str)> {
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let (num, rest) = s.split_at(digits);
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(|rest| (num, rest))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bold,
    Code,
    Link,
    Url,
}

/// Earliest inline marker in `s`.
fn next_marker(s: &str) -> Option<(usize, Marker)> {
    [
        s.find("**").map(|p| (p, Marker::Bold)),
        s.find('`').map(|p| (p, Marker::Code)),
        s.find('[').map(|p| (p, Marker::Link)),
        s.find("https://")
            .into_iter()
            .chain(s.find("http://"))
            .min()
            .map(|p| (p, Marker::Url)),
    ]
    .into_iter()
    .flatten()
    .min_by_key(|(p, _)| *p)
}

/// End of a bare URL starting at the beginning of `s`.
fn url_end(s: &str) -> usize {
    let end = s
        .find(|c: char| c.is_whitespace() || matches!(c, '<' | '>' | '"'))
        .unwrap_or(s.len());
    // Trailing punctuation belongs to the sentence.
    s[..end].trim_end_matches(['.', ',', ';', ':', '!', '?', ')']).len()
}

/// Parse **bold**, `code`, [text](url) and bare URLs in the rest of a line.
fn parse_inline(s: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = s;
    while let Some((pos, marker)) = next_marker(rest) {
        if pos > 0 {
            spans.push(Span::raw(rest[..pos].to_string()));
        }
        rest = &rest[pos..];
        match marker {
            Marker::Bold => {
                let body = &rest[2..];
                match body.find("**") {
                    Some(end) => {
                        spans.push(Span::styled(
                            body[..end].to_string(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ));
                        rest = &body[end + 2..];
                    }
                    None => {
                        spans.push(Span::raw("**"));
                        rest = body;
                    }
                }
            }
            Marker::Code => {
                let body = &rest[1..];
                match body.find('`') {
                    Some(end) => {
                        spans.push(Span::styled(
                            body[..end].to_string(),
                            Style::default().fg(ACCENT),
                        ));
                        rest = &body[end + 1..];
                    }
                    None => {
                        spans.push(Span::raw("`"));
                        rest = body;
                    }
                }
            }
            Marker::Link => match parse_link(rest) {
                Some((text, url, consumed)) => {
                    spans.push(Span::styled(text.to_string(), link_style()));
                    spans.push(Span::styled(
                        format!(" ({})", url),
                        Style::default().fg(ratatui::style::Color::DarkGray),
                    ));
                    rest = &rest[consumed..];
                }
                None => {
                    spans.push(Span::raw("["));
                    rest = &rest[1..];
                }
            },
            Marker::Url => {
                let end = url_end(rest).max(1);
                spans.push(Span::styled(rest[..end].to_string(), link_style()));
                rest = &rest[end..];
            }
        }
    }
    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }
    spans
}

/// `[text](url)` at the start of `s`: (text, url, bytes consumed).
fn parse_link(s: &str) -> Option<(&str, &str, usize)> {
    let close = s.find(']')?;
    let text = &s[1..close];
    let after = s[close + 1..].strip_prefix('(')?;
    let end = after.find(')')?;
    let url = &after[..end];
    Some((text, url, close + 2 + end + 1))
}
