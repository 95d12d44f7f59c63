//! Small text helpers shared by the TUI and the single-prompt output.

/// Default word limit for product descriptions.
pub const DEFAULT_WORD_LIMIT: usize = 20;

/// Default suffix appended to truncated text.
pub const DEFAULT_TRAIL: &str = "...";

/// Keep the first `limit` space-separated words, appending `trail` when
/// anything was cut. Words are split on single spaces, so runs of spaces
/// count as empty words.
pub fn truncate_words(text: &str, limit: usize, trail: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() > limit {
        format!("{}{}", words[..limit].join(" "), trail)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(truncate_words("ένα δύο τρία", 3, "..."), "ένα δύο τρία");
        assert_eq!(truncate_words("", 3, "..."), "");
    }

    #[test]
    fn long_text_cut_with_trail() {
        assert_eq!(truncate_words("a b c d e", 3, "..."), "a b c...");
        assert_eq!(truncate_words("a b c d e", 2, " [more]"), "a b [more]");
    }

    #[test]
    fn default_limit() {
        let text = (1..=25).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let out = truncate_words(&text, DEFAULT_WORD_LIMIT, DEFAULT_TRAIL);
        assert!(out.starts_with("1 2 3"));
        assert!(out.ends_with("19 20..."), "{}", out);
    }

    #[test]
    fn newlines_do_not_split_words() {
        assert_eq!(truncate_words("a\nb c", 2, "..."), "a\nb c");
    }
}
