//! Text wrapping for display.

/// Split text into lines of max width (columns). Uses textwrap for correct UTF-8 handling.
fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    textwrap::wrap(s, width)
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect()
}

/// Split a message into display lines respecting message newlines, then wrap to `width`.
pub(crate) fn wrap_message(msg: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in msg.split('\n') {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            out.extend(wrap_text(line, width));
        }
    }
    out
}

/// Wrap `text` to `width`, prefixing every line after the first with `indent`
/// spaces (hanging indent for product card fields).
pub(crate) fn wrap_indented(text: &str, width: usize, indent: usize) -> Vec<String> {
    if width <= indent {
        return wrap_message(text, width);
    }
    let pad = " ".repeat(indent);
    let options = textwrap::Options::new(width).subsequent_indent(&pad);
    text.split('\n')
        .flat_map(|line| {
            textwrap::wrap(line, &options)
                .into_iter()
                .map(|cow| cow.into_owned())
                .collect::<Vec<_>>()
        })
        .collect()
}
