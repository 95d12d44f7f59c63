//! Product listings written as free text.
//!
//! Older workflow versions answer with markdown instead of a JSON catalog:
//! an intro paragraph, then one `* 🟢 Title [image-url]` bullet per product
//! with 💰 price, 📦 availability and a `🔗 Δείτε περισσότερα:` link, then an
//! optional closing paragraph. [`parse_catalog`] lifts such a reply into the
//! same [`ProductReply`] the JSON catalog produces.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::response::{ProductRecord, ProductReply, strip_description_label};

static PRODUCT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\*\s*🟢\s*").expect("valid regex"));

static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\*\s*\*(.*?)\*").expect("valid regex"));

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(https?://[^\]]+\.(?:jpg|jpeg|png|webp|gif))\]").expect("valid regex")
});

static PRICE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"💰\s*([^–\n]+)").expect("valid regex"));

static AVAILABILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"📦\s*([^–\n]+)").expect("valid regex"));

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"🔗\s*Δείτε περισσότερα:\s*(https?://[^\s<]+)").expect("valid regex")
});

/// Parse a free-text product listing. Returns `None` when the text has no product bullets.
pub fn parse_catalog(text: &str) -> Option<ProductReply> {
    if !PRODUCT_SEPARATOR.is_match(text) {
        return None;
    }
    let mut blocks: Vec<&str> = PRODUCT_SEPARATOR.split(text).collect();
    let intro = blocks.remove(0).trim();
    let last = blocks.pop()?;

    let mut products: Vec<ProductRecord> = blocks.iter().map(|b| parse_block(b).0).collect();
    let (last_product, remaining) = parse_block(last);
    products.push(last_product);

    Some(ProductReply {
        intro_text: (!intro.is_empty()).then(|| intro.to_string()),
        products,
        outro_text: closing_text(&remaining),
    })
}

/// Extract one product; also returns whatever text was not consumed.
fn parse_block(block: &str) -> (ProductRecord, String) {
    // Leading newline so a description on the first line is still found.
    let mut rest = format!("\n{}", block);
    let mut product = ProductRecord::default();

    if let Some(caps) = DESCRIPTION.captures(&rest) {
        let description = strip_description_label(caps[1].trim());
        if !description.is_empty() {
            product.description = Some(description);
        }
        let matched = caps[0].to_string();
        rest = rest.replacen(&matched, "", 1);
    }

    if let Some(caps) = IMAGE.captures(&rest) {
        let whole = caps.get(0).map(|m| (m.start(), m.end()));
        product.image_url = Some(caps[1].to_string());
        if let Some((start, end)) = whole {
            product.title = non_empty(rest[..start].trim());
            rest = rest[end..].to_string();
        }
    } else {
        let trimmed = rest.trim_start();
        let first_line = trimmed.lines().next().unwrap_or("");
        product.title = non_empty(first_line.trim());
        rest = trimmed[first_line.len()..].to_string();
    }

    if let Some(caps) = PRICE.captures(&rest) {
        product.price = non_empty(caps[1].trim());
        let matched = caps[0].to_string();
        rest = rest.replacen(&matched, "", 1);
    }
    if let Some(caps) = AVAILABILITY.captures(&rest) {
        product.availability = non_empty(caps[1].trim());
        let matched = caps[0].to_string();
        rest = rest.replacen(&matched, "", 1);
    }
    if let Some(caps) = LINK.captures(&rest) {
        product.link = Some(caps[1].to_string());
        let matched = caps[0].to_string();
        rest = rest.replacen(&matched, "", 1);
    }

    (product, rest)
}

/// Leftover text of the last block, without lines that only held separators.
fn closing_text(remaining: &str) -> Option<String> {
    let kept: Vec<&str> = remaining
        .lines()
        .filter(|line| {
            line.chars()
                .any(|c| !c.is_whitespace() && !matches!(c, '–' | '-' | '*' | '|'))
        })
        .map(str::trim)
        .collect();
    non_empty(kept.join("\n").trim())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Βρήκα τα παρακάτω προϊόντα:\n\
        * 🟢 Καρέκλα Γραφείου [https://cdn.example.gr/chair.jpg]\n\
        * *Πληροφορίες Εργονομική καρέκλα με μπράτσα*\n\
        💰 89,90€ – 📦 Άμεσα διαθέσιμο\n\
        🔗 Δείτε περισσότερα: https://example.gr/chair\n\
        * 🟢 Γραφείο [https://cdn.example.gr/desk.PNG]\n\
        💰 149,00€\n\
        🔗 Δείτε περισσότερα: https://example.gr/desk\n\
        \n\
        Θέλετε να δείτε και άλλα;";

    #[test]
    fn plain_text_is_not_a_catalog() {
        assert!(parse_catalog("Γεια σας! Πώς μπορώ να βοηθήσω;").is_none());
        assert!(parse_catalog("").is_none());
    }

    #[test]
    fn parses_intro_products_and_closing() {
        let reply = parse_catalog(SAMPLE).unwrap();
        assert_eq!(reply.intro_text.as_deref(), Some("Βρήκα τα παρακάτω προϊόντα:"));
        assert_eq!(reply.products.len(), 2);
        assert_eq!(reply.outro_text.as_deref(), Some("Θέλετε να δείτε και άλλα;"));

        let chair = &reply.products[0];
        assert_eq!(chair.title.as_deref(), Some("Καρέκλα Γραφείου"));
        assert_eq!(chair.image_url.as_deref(), Some("https://cdn.example.gr/chair.jpg"));
        assert_eq!(chair.description.as_deref(), Some("Εργονομική καρέκλα με μπράτσα"));
        assert_eq!(chair.price.as_deref(), Some("89,90€"));
        assert_eq!(chair.availability.as_deref(), Some("Άμεσα διαθέσιμο"));
        assert_eq!(chair.link.as_deref(), Some("https://example.gr/chair"));

        let desk = &reply.products[1];
        assert_eq!(desk.title.as_deref(), Some("Γραφείο"));
        assert_eq!(desk.image_url.as_deref(), Some("https://cdn.example.gr/desk.PNG"));
        assert_eq!(desk.price.as_deref(), Some("149,00€"));
        assert_eq!(desk.availability, None);
        assert_eq!(desk.link.as_deref(), Some("https://example.gr/desk"));
    }

    #[test]
    fn title_falls_back_to_first_line_without_image() {
        let reply = parse_catalog("Intro\n* 🟢 Λάμπα LED\n💰 9,90€").unwrap();
        assert_eq!(reply.products[0].title.as_deref(), Some("Λάμπα LED"));
        assert_eq!(reply.products[0].price.as_deref(), Some("9,90€"));
        assert_eq!(reply.outro_text, None);
    }

    #[test]
    fn empty_intro_is_none() {
        let reply = parse_catalog("\n* 🟢 Λάμπα").unwrap();
        assert_eq!(reply.intro_text, None);
        assert_eq!(reply.products.len(), 1);
    }
}
