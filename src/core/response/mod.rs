//! Response normalization: turn whatever the webhook returned into a product
//! catalog or a cleaned plain-text reply.
//!
//! The upstream workflow has no fixed schema. Replies arrive as JSON objects,
//! arrays wrapping objects, stringified JSON (sometimes inside a markdown code
//! fence) or plain text. [`normalize`] never fails: anything it cannot classify
//! becomes a [`PlainReply`] with a best-effort string form.

mod discover;
mod product;

pub use product::{ProductRecord, strip_description_label};

use serde::Serialize;
use serde_json::Value;

use crate::core::repair::repair;

use discover::{MAX_DEPTH, find_core_data, has_products, is_truthy, parse_embedded_json};

/// Reply text used when the payload has no usable content at all.
pub const UNPARSABLE_REPLY: &str =
    "Received a response from the assistant but could not parse it.";

/// Normalized output handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedResponse {
    Products(ProductReply),
    Plain(PlainReply),
}

/// Catalog reply: optional framing text around an ordered product list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<String>,
    pub products: Vec<ProductRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outro_text: Option<String>,
}

/// Single text block, plus whatever extra fields a legacy reply carried.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlainReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl PlainReply {
    pub fn new(text: impl Into<String>) -> Self {
        PlainReply {
            text: text.into(),
            ..Default::default()
        }
    }
}

impl NormalizedResponse {
    /// Plain reply with the given text, no extra fields.
    pub fn plain(text: impl Into<String>) -> Self {
        NormalizedResponse::Plain(PlainReply::new(text))
    }
}

/// Classify a raw webhook payload.
pub fn normalize(raw: &Value) -> NormalizedResponse {
    normalize_at(raw, 0)
}

fn normalize_at(raw: &Value, depth: usize) -> NormalizedResponse {
    if let Some(core) = find_core_data(raw) {
        if has_products(&core) {
            log::debug!("normalize: product reply");
            return NormalizedResponse::Products(product_reply(&core));
        }
        log::debug!("normalize: intro/outro without products");
        return NormalizedResponse::plain(join_intro_outro(&core));
    }
    legacy_reply(raw, depth)
}

fn product_reply(core: &Value) -> ProductReply {
    let products = core
        .get("products")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(ProductRecord::from_value).collect())
        .unwrap_or_default();
    ProductReply {
        intro_text: truthy_text(core.get("intro")),
        products,
        outro_text: truthy_text(core.get("outro")),
    }
}

fn join_intro_outro(core: &Value) -> String {
    [truthy_text(core.get("intro")), truthy_text(core.get("outro"))]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Shapes the webhook produced before it learned to emit catalog objects.
fn legacy_reply(raw: &Value, depth: usize) -> NormalizedResponse {
    // (a) [{ "output": ... }]
    if let Some(output) = raw
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("output"))
        .filter(|o| is_truthy(o))
    {
        log::debug!("normalize: array with output field");
        let nested = match output {
            Value::String(s) => parse_embedded_json(s).filter(|v| v.is_object() || v.is_array()),
            Value::Object(_) | Value::Array(_) => Some(output.clone()),
            _ => None,
        };
        return match nested {
            Some(inner) if depth < MAX_DEPTH => normalize_at(&inner, depth + 1),
            _ => NormalizedResponse::plain(repair(&text_of(output))),
        };
    }

    match raw {
        // (b) plain text
        Value::String(s) if !s.trim().is_empty() => {
            log::debug!("normalize: plain string");
            NormalizedResponse::plain(repair(s))
        }
        Value::Object(map) => {
            // (c) and (d) carry optional timestamp/confidence/metadata.
            for key in ["reply", "message"] {
                if let Some(text) = map.get(key).filter(|v| is_truthy(v)) {
                    log::debug!("normalize: object with {} field", key);
                    return NormalizedResponse::Plain(PlainReply {
                        text: repair(&text_of(text)),
                        timestamp: map
                            .get("timestamp")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        confidence: map.get("confidence").and_then(Value::as_f64),
                        metadata: map.get("metadata").filter(|m| !m.is_null()).cloned(),
                    });
                }
            }
            // (e)
            if let Some(output) = map.get("output").filter(|v| is_truthy(v)) {
                log::debug!("normalize: object with output field");
                return NormalizedResponse::plain(repair(&text_of(output)));
            }
            // (f)
            log::debug!("normalize: unrecognized object, serializing");
            NormalizedResponse::plain(raw.to_string())
        }
        Value::Array(items) if !items.is_empty() => {
            log::debug!("normalize: unrecognized array, serializing");
            NormalizedResponse::plain(raw.to_string())
        }
        // (g)
        _ => {
            log::debug!("normalize: nothing usable in payload");
            NormalizedResponse::plain(UNPARSABLE_REPLY)
        }
    }
}

/// Strings as-is; other values in their JSON form.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truthy_text(value: Option<&Value>) -> Option<String> {
    value.filter(|v| is_truthy(v)).map(text_of)
}

#[cfg(test)]
mod tests;
