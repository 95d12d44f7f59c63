//! Text repair for free-form assistant replies.
//!
//! The workflow's language model does not reliably emit well-formed markdown:
//! URLs get wrapped across lines, link syntax picks up stray characters, and
//! spacing around prices and emoji goes missing. [`repair`] applies a fixed,
//! ordered set of rewrites for those observed corruptions. It is deterministic
//! and idempotent: `repair(&repair(s)) == repair(s)`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Characters allowed in a URL continuation (ASCII only, no brackets).
macro_rules! url_chars {
    () => {
        r"[A-Za-z0-9\-._~:/?#@!$&'*+,;=%]"
    };
}

/// Image link on a line marked with 🖼, wrapped before the file name.
static IMAGE_LINK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(🖼\x{FE0F}?[^\n]*?https?://",
        url_chars!(),
        r"+)[ \t]*\r?\n[ \t]*(",
        url_chars!(),
        r"*\.(?i:jpe?g|png|webp|gif))"
    ))
    .expect("valid regex")
});

/// URL ending in a character that cannot end a link, continued on the next line.
/// Group 1 catches a `🔗 Δείτε περισσότερα:` annotation, whose URL is complete.
static LINK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(🔗[ \t]*Δείτε\s+περισσότερα:\s*)?(https?://",
        url_chars!(),
        r"*[/\-_=&%#])[ \t]*\r?\n[ \t]*([A-Za-z0-9]",
        url_chars!(),
        r"*)"
    ))
    .expect("valid regex")
});

/// `(url)` followed by non-word garbage and another `)`.
static LINK_TRAILING_GARBAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((https?://[^\s()]+)\)[^\p{L}\p{N}()]*\)").expect("valid regex")
});

static VIEW_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*\[Προβολή\]\((https?://[^\s)]+)\)").expect("valid regex")
});

static SPLIT_VIEW_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"🔗[ \t]*Δείτε\s+περισσότερα:\s*(https?://)").expect("valid regex")
});

/// Greek-format price (`12,50€`, `1.234,50 €`) glued to the previous character.
static GLUED_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^\s\d.,])(\d{1,3}(?:\.\d{3})+,\d+ ?€|\d+,\d+ ?€)").expect("valid regex")
});

static GLUED_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\x{1F300}-\x{1FAFF}]\x{FE0F}?)([A-Za-z[\p{Greek}&&\p{L}]])")
        .expect("valid regex")
});

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").expect("valid regex"));

/// Upper bound for fixpoint rules; real replies settle in one or two passes.
const MAX_PASSES: usize = 16;

/// Annotation that replaces `[Προβολή](url)` links.
pub const VIEW_MORE_LABEL: &str = "🔗 Δείτε περισσότερα:";

/// Repair a raw assistant reply. Total: empty input gives an empty string.
pub fn repair(text: &str) -> String {
    let mut out = text.trim().to_string();
    if out.is_empty() {
        return out;
    }

    out = until_stable(out, |s| IMAGE_LINK_BREAK.replace_all(s, "${1}${2}"));
    out = until_stable(out, |s| {
        LINK_BREAK.replace_all(s, |caps: &Captures| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                format!("{}{}", &caps[2], &caps[3])
            }
        })
    });
    out = until_stable(out, |s| LINK_TRAILING_GARBAGE.replace_all(s, "(${1})"));

    out = VIEW_LINK
        .replace_all(&out, format!("\n{} ${{1}}", VIEW_MORE_LABEL))
        .into_owned();
    out = SPLIT_VIEW_ANNOTATION
        .replace_all(&out, format!("{} ${{1}}", VIEW_MORE_LABEL))
        .into_owned();

    // Back-to-back prices share their anchor, so one pass is not enough.
    out = until_stable(out, |s| GLUED_PRICE.replace_all(s, "${1} ${2}"));
    out = GLUED_EMOJI.replace_all(&out, "${1} ${2}").into_owned();
    out = EXCESS_BLANK_LINES.replace_all(&out, "\n\n").into_owned();

    out.trim().to_string()
}

/// Apply `rule` until the text stops changing (bounded by [`MAX_PASSES`]).
fn until_stable<F>(mut text: String, rule: F) -> String
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    for _ in 0..MAX_PASSES {
        let next = match rule(&text) {
            Cow::Borrowed(_) => None,
            Cow::Owned(next) => Some(next),
        };
        match next {
            Some(next) if next != text => text = next,
            _ => break,
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_idempotent(input: &str) {
        let once = repair(input);
        assert_eq!(repair(&once), once, "not idempotent for {:?}", input);
    }

    #[test]
    fn empty_and_whitespace() {
        assert_eq!(repair(""), "");
        assert_eq!(repair("  \n\t "), "");
    }

    #[test]
    fn trims() {
        assert_eq!(repair("  hello  "), "hello");
    }

    #[test]
    fn view_link_with_trailing_garbage() {
        let out = repair("Δες [Προβολή](https://x.gr/a))\n\n🟢\n)");
        assert!(out.contains("🔗 Δείτε περισσότερα: https://x.gr/a"), "{:?}", out);
        assert!(out.ends_with("https://x.gr/a"), "{:?}", out);
        assert!(!out.contains('🟢'));
        assert!(!out.contains(')'));
        assert_eq!(out, "Δες\n🔗 Δείτε περισσότερα: https://x.gr/a");
    }

    #[test]
    fn multi_layer_garbage_collapses() {
        let out = repair("(https://x.gr/a) ) - )\n)");
        assert_eq!(out, "(https://x.gr/a)");
    }

    #[test]
    fn text_after_link_is_kept() {
        let out = repair("(https://x.gr/a) και άλλα (δείτε εδώ)");
        assert_eq!(out, "(https://x.gr/a) και άλλα (δείτε εδώ)");
    }

    #[test]
    fn rejoins_wrapped_url() {
        let out = repair("Δείτε: https://shop.example.gr/products/\nchair-42 τώρα");
        assert_eq!(out, "Δείτε: https://shop.example.gr/products/chair-42 τώρα");
    }

    #[test]
    fn rejoins_url_wrapped_several_times() {
        let out = repair("https://shop.example.gr/\nproducts/\nchair-42");
        assert_eq!(out, "https://shop.example.gr/products/chair-42");
    }

    #[test]
    fn complete_url_is_not_glued_to_next_line() {
        let out = repair("https://shop.example.gr/chair\nNext line");
        assert_eq!(out, "https://shop.example.gr/chair\nNext line");
        let out = repair("https://shop.example.gr/\n\nNext paragraph");
        assert_eq!(out, "https://shop.example.gr/\n\nNext paragraph");
    }

    #[test]
    fn rejoins_wrapped_image_url() {
        let out = repair("🖼️ Εικόνα: https://cdn.example.gr/img/chair\n42.jpg");
        assert_eq!(out, "🖼️ Εικόνα: https://cdn.example.gr/img/chair42.jpg");
    }

    #[test]
    fn rejoins_split_annotation() {
        let out = repair("🔗 Δείτε\nπερισσότερα:\n https://x.gr/a");
        assert_eq!(out, "🔗 Δείτε περισσότερα: https://x.gr/a");
    }

    #[test]
    fn price_gets_leading_space() {
        assert_eq!(repair("Τιμή:12,50€"), "Τιμή: 12,50€");
        assert_eq!(repair("μόνο1.234,50 €"), "μόνο 1.234,50 €");
        assert_eq!(repair("Τιμή 12,50€"), "Τιμή 12,50€");
        assert_eq!(repair("112,50€"), "112,50€");
    }

    #[test]
    fn back_to_back_prices_are_split() {
        assert_eq!(repair("Τιμή:12,50€15,00€"), "Τιμή: 12,50€ 15,00€");
        assert_eq!(repair("από1.234,50€999,00€"), "από 1.234,50€ 999,00€");
    }

    #[test]
    fn annotation_url_is_not_glued_to_next_line() {
        let out = repair("Δες [Προβολή](https://allsmart.gr/p/chair/)\n2. Γραφείο");
        assert_eq!(
            out,
            "Δες\n🔗 Δείτε περισσότερα: https://allsmart.gr/p/chair/\n2. Γραφείο"
        );
        let out = repair("🔗 Δείτε περισσότερα: https://x.gr/a/\nabc");
        assert_eq!(out, "🔗 Δείτε περισσότερα: https://x.gr/a/\nabc");
    }

    #[test]
    fn emoji_gets_space_before_letter() {
        assert_eq!(repair("💰Τιμή"), "💰 Τιμή");
        assert_eq!(repair("📦Available"), "📦 Available");
        assert_eq!(repair("🟢 Ok"), "🟢 Ok");
        assert_eq!(repair("🖼️Εικόνα"), "🖼️ Εικόνα");
    }

    #[test]
    fn collapses_blank_lines() {
        assert_eq!(repair("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(repair("a\n  \n \n\nb"), "a\n\nb");
        assert_eq!(repair("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn idempotent_on_corrupted_samples() {
        for sample in [
            "Δες [Προβολή](https://x.gr/a))\n\n🟢\n)",
            "  💰Τιμή:12,50€\n\n\n\n📦Διαθέσιμο ",
            "https://shop.example.gr/\nproducts/ [Προβολή](https://x.gr/b)",
            "🖼 https://cdn.example.gr/a/\nb.png and (https://x.gr/c) ) )",
            "1.234,50€ x9,99€ 🔗Δείτε\nπερισσότερα: https://x.gr",
            "[Προβολή](https://x.gr/a)",
            "Τιμή:12,50€15,00€",
            "Δες [Προβολή](https://allsmart.gr/p/chair/)\n2. Γραφείο",
            "[Προβολή](https://x.gr/a/)\nabc42",
            "Καρέκλα [Προβολή](https://x.gr/p/)\n\n💰Τιμή:89,90€119,00€\n\n\n📦Διαθέσιμο",
            "https://shop.example.gr/\nproducts/ 🔗Δείτε\nπερισσότερα: https://x.gr/b/\nnext",
            "plain text",
            "",
        ] {
            assert_idempotent(sample);
        }
    }
}
