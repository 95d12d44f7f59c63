//! Product records and the tolerant conversion from untyped JSON objects.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

/// Leading label the assistant puts in front of product descriptions.
static DESCRIPTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Πληροφορίες\s*").expect("valid regex"));

/// One product of a catalog reply. Every field is optional because the upstream
/// workflow does not guarantee any of them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Keys we do not model, passed through untouched.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// Source keys for each modelled field, first match wins.
const TITLE_KEYS: &[&str] = &["title", "name"];
const IMAGE_KEYS: &[&str] = &["imageUrl", "image_url", "image"];
const DESCRIPTION_KEYS: &[&str] = &["description"];
const PRICE_KEYS: &[&str] = &["price"];
const OLD_PRICE_KEYS: &[&str] = &["oldPrice", "old_price"];
const AVAILABILITY_KEYS: &[&str] = &["availability"];
const LINK_KEYS: &[&str] = &["link", "url"];
const SKU_KEYS: &[&str] = &["sku"];
const CATEGORY_KEYS: &[&str] = &["category"];

const ALL_KEYS: &[&[&str]] = &[
    TITLE_KEYS,
    IMAGE_KEYS,
    DESCRIPTION_KEYS,
    PRICE_KEYS,
    OLD_PRICE_KEYS,
    AVAILABILITY_KEYS,
    LINK_KEYS,
    SKU_KEYS,
    CATEGORY_KEYS,
];

impl ProductRecord {
    /// Build a record from one element of a `products` array.
    /// Non-object elements become a record titled with their text (if any).
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::String(s) if !s.trim().is_empty() => ProductRecord {
                title: Some(s.trim().to_string()),
                ..Default::default()
            },
            _ => ProductRecord::default(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let extra = map
            .iter()
            .filter(|(k, _)| !ALL_KEYS.iter().any(|keys| keys.contains(&k.as_str())))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        ProductRecord {
            title: field(map, TITLE_KEYS),
            image_url: field(map, IMAGE_KEYS),
            description: field(map, DESCRIPTION_KEYS)
                .map(|d| strip_description_label(&d))
                .filter(|d| !d.is_empty()),
            price: field(map, PRICE_KEYS),
            old_price: field(map, OLD_PRICE_KEYS),
            availability: field(map, AVAILABILITY_KEYS),
            link: field(map, LINK_KEYS),
            sku: field(map, SKU_KEYS),
            category: field(map, CATEGORY_KEYS),
            extra,
        }
    }
}

/// Remove the leading `Πληροφορίες` label and the whitespace after it.
pub fn strip_description_label(description: &str) -> String {
    DESCRIPTION_LABEL.replace(description, "").trim_end().to_string()
}

fn field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find_map(scalar_text)
}

/// Text form of a scalar: strings as-is (blank dropped), numbers and booleans printed.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_label_and_following_whitespace() {
        assert_eq!(strip_description_label("Πληροφορίες   Great item"), "Great item");
        assert_eq!(strip_description_label("Πληροφορίες\nGreat item"), "Great item");
    }

    #[test]
    fn leaves_other_descriptions_alone() {
        assert_eq!(strip_description_label("Great item"), "Great item");
        assert_eq!(
            strip_description_label("Great item. Πληροφορίες inside"),
            "Great item. Πληροφορίες inside"
        );
    }

    #[test]
    fn from_value_reads_aliases_and_numbers() {
        let p = ProductRecord::from_value(&json!({
            "name": "Lamp",
            "image": "https://cdn.example.gr/lamp.jpg",
            "price": 12.5,
            "oldPrice": "15,00€",
            "url": "https://example.gr/lamp",
            "sku": 1001,
        }));
        assert_eq!(p.title.as_deref(), Some("Lamp"));
        assert_eq!(p.image_url.as_deref(), Some("https://cdn.example.gr/lamp.jpg"));
        assert_eq!(p.price.as_deref(), Some("12.5"));
        assert_eq!(p.old_price.as_deref(), Some("15,00€"));
        assert_eq!(p.link.as_deref(), Some("https://example.gr/lamp"));
        assert_eq!(p.sku.as_deref(), Some("1001"));
        assert!(p.extra.is_empty());
    }

    #[test]
    fn from_value_keeps_unknown_keys() {
        let p = ProductRecord::from_value(&json!({"title": "X", "brand": "Acme", "stock": 3}));
        assert_eq!(p.extra.get("brand"), Some(&json!("Acme")));
        assert_eq!(p.extra.get("stock"), Some(&json!(3)));
    }

    #[test]
    fn label_only_description_is_dropped() {
        let p = ProductRecord::from_value(&json!({"description": "Πληροφορίες  "}));
        assert_eq!(p.description, None);
    }

    #[test]
    fn non_object_elements() {
        assert_eq!(
            ProductRecord::from_value(&json!("Desk")).title.as_deref(),
            Some("Desk")
        );
        assert_eq!(ProductRecord::from_value(&json!(null)), ProductRecord::default());
    }
}
