use serde_json::json;

use super::{NormalizedResponse, PlainReply, ProductReply, UNPARSABLE_REPLY, normalize};

fn expect_products(response: NormalizedResponse) -> ProductReply {
    match response {
        NormalizedResponse::Products(p) => p,
        other => panic!("expected product reply, got {:?}", other),
    }
}

fn expect_plain(response: NormalizedResponse) -> PlainReply {
    match response {
        NormalizedResponse::Plain(p) => p,
        other => panic!("expected plain reply, got {:?}", other),
    }
}

#[test]
fn products_with_intro_and_outro() {
    let reply = expect_products(normalize(&json!({
        "products": [{"title": "p1"}, {"title": "p2"}],
        "intro": "A",
        "outro": "B",
    })));
    assert_eq!(reply.intro_text.as_deref(), Some("A"));
    assert_eq!(reply.outro_text.as_deref(), Some("B"));
    let titles: Vec<_> = reply
        .products
        .iter()
        .map(|p| p.title.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(titles, vec!["p1", "p2"]);
}

#[test]
fn empty_products_fall_back_to_intro_text() {
    let reply = expect_plain(normalize(&json!({"products": [], "intro": "A"})));
    assert_eq!(reply.text, "A");
}

#[test]
fn intro_and_outro_are_joined_with_blank_line() {
    let reply = expect_plain(normalize(&json!({"intro": "Hello", "outro": "Bye"})));
    assert_eq!(reply.text, "Hello\n\nBye");
    let reply = expect_plain(normalize(&json!({"intro": "", "outro": "Bye"})));
    assert_eq!(reply.text, "Bye");
}

#[test]
fn fenced_json_string_payload() {
    let raw = json!("```json\n{\"intro\":\"Hi\",\"products\":[{\"title\":\"X\"}]}\n```");
    let reply = expect_products(normalize(&raw));
    assert_eq!(reply.intro_text.as_deref(), Some("Hi"));
    assert_eq!(reply.products.len(), 1);
    assert_eq!(reply.products[0].title.as_deref(), Some("X"));
    assert_eq!(reply.outro_text, None);
}

#[test]
fn products_nested_in_array_output_string() {
    let inner = json!({"intro": "Βρήκα", "products": [{"title": "Καρέκλα", "price": "49,90€"}]});
    let raw = json!([{"output": inner.to_string()}]);
    let reply = expect_products(normalize(&raw));
    assert_eq!(reply.intro_text.as_deref(), Some("Βρήκα"));
    assert_eq!(reply.products[0].price.as_deref(), Some("49,90€"));
}

#[test]
fn description_label_is_stripped() {
    let reply = expect_products(normalize(&json!({
        "products": [{"title": "X", "description": "Πληροφορίες   Great item"}]
    })));
    assert_eq!(reply.products[0].description.as_deref(), Some("Great item"));
}

#[test]
fn legacy_array_output_plain_text() {
    let reply = expect_plain(normalize(&json!([{"output": "plain text"}])));
    assert_eq!(reply.text, "plain text");
}

#[test]
fn legacy_array_output_is_repaired() {
    let reply = expect_plain(normalize(&json!([{"output": "  Hello\n\n\n\nworld  "}])));
    assert_eq!(reply.text, "Hello\n\nworld");
}

#[test]
fn legacy_array_output_with_nested_reply_object() {
    let reply = expect_plain(normalize(&json!([{"output": "{\"reply\": \"nested\"}"}])));
    assert_eq!(reply.text, "nested");
}

#[test]
fn legacy_array_output_numeric_string_is_literal() {
    let reply = expect_plain(normalize(&json!([{"output": "42"}])));
    assert_eq!(reply.text, "42");
}

#[test]
fn plain_string_payload() {
    let reply = expect_plain(normalize(&json!("Γεια σας!")));
    assert_eq!(reply.text, "Γεια σας!");
}

#[test]
fn reply_field_passes_extra_fields_through() {
    let reply = expect_plain(normalize(&json!({
        "reply": "ok",
        "confidence": 0.9,
        "timestamp": "2024-01-01T00:00:00Z",
    })));
    assert_eq!(reply.text, "ok");
    assert_eq!(reply.confidence, Some(0.9));
    assert_eq!(reply.timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));
}

#[test]
fn message_field_preserves_metadata() {
    let reply = expect_plain(normalize(&json!({
        "message": "hi",
        "metadata": {"source": "n8n"},
    })));
    assert_eq!(reply.text, "hi");
    assert_eq!(reply.metadata, Some(json!({"source": "n8n"})));
    assert_eq!(reply.confidence, None);
}

#[test]
fn reply_takes_precedence_over_message() {
    let reply = expect_plain(normalize(&json!({"reply": "r", "message": "m"})));
    assert_eq!(reply.text, "r");
}

#[test]
fn output_field_on_object() {
    let reply = expect_plain(normalize(&json!({"output": "from output"})));
    assert_eq!(reply.text, "from output");
}

#[test]
fn unknown_object_is_serialized() {
    let reply = expect_plain(normalize(&json!({"foo": 1})));
    assert_eq!(reply.text, r#"{"foo":1}"#);
    let reply = expect_plain(normalize(&json!({})));
    assert_eq!(reply.text, "{}");
}

#[test]
fn unusable_payloads_get_fallback_sentence() {
    for raw in [json!(null), json!(""), json!("   "), json!([]), json!(false), json!(3)] {
        let reply = expect_plain(normalize(&raw));
        assert_eq!(reply.text, UNPARSABLE_REPLY, "payload {:?}", raw);
    }
}

#[test]
fn deeply_nested_payload_does_not_panic() {
    let mut raw = json!({"intro": "deep"});
    for _ in 0..500 {
        raw = json!([raw]);
    }
    let reply = expect_plain(normalize(&raw));
    assert!(!reply.text.is_empty());
}

#[test]
fn emoji_only_payload_is_total() {
    let reply = expect_plain(normalize(&json!("🟢🔗💰📦\u{FE0F}")));
    assert!(reply.text.starts_with("🟢"));
}

#[test]
fn serializes_with_kind_tag() {
    let value = serde_json::to_value(normalize(&json!({"products": [{"title": "X"}]}))).unwrap();
    assert_eq!(value["kind"], "products");
    assert_eq!(value["products"][0]["title"], "X");
    let value = serde_json::to_value(normalize(&json!("hi"))).unwrap();
    assert_eq!(value["kind"], "plain");
    assert_eq!(value["text"], "hi");
}
