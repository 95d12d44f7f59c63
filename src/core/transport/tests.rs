use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;

use serde_json::json;

use super::*;

/// Serve exactly one HTTP request with the given status line and body.
/// Returns the base URL and a handle yielding the raw request body.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            let lower = line.to_ascii_lowercase();
            if let Some(v) = lower.strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap();
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = reader.into_inner();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8(request_body).unwrap()
    });
    (format!("http://{}/webhook/chat", addr), handle)
}

fn config_for(webhook_url: Option<&str>) -> Config {
    Config {
        webhook_url: webhook_url.map(str::to_string),
        use_cors_proxy: false,
        user_id: Some("user-7".to_string()),
    }
}

#[test]
fn request_body_uses_camel_case_and_skips_missing_ids() {
    let request = WebhookRequest::new("  hello  ", Some("u1"), None);
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["message"], "hello");
    assert_eq!(value["userId"], "u1");
    assert!(value.get("sessionId").is_none());
    let ts = value["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "{}", ts);
}

#[test]
fn body_parsing_keeps_non_json_as_string() {
    assert_eq!(parse_body(r#"{"a":1}"#), json!({"a": 1}));
    assert_eq!(parse_body("plain words"), json!("plain words"));
    assert_eq!(parse_body(""), json!(""));
}

#[tokio::test]
async fn missing_webhook_answers_offline() {
    let exchange = send_message(&config_for(None), "hello", None).await;
    assert_eq!(exchange.source, ReplySource::Offline);
    match exchange.response {
        NormalizedResponse::Plain(reply) => assert!(!reply.text.is_empty()),
        other => panic!("expected plain reply, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_webhook_answers_offline() {
    let config = config_for(Some("http://127.0.0.1:1/webhook"));
    let exchange = send_message(&config, "help", Some("s1")).await;
    assert_eq!(exchange.source, ReplySource::Offline);
    assert!(!test_connection(&config).await);
}

#[tokio::test]
async fn direct_route_normalizes_reply() {
    let (url, server) = serve_once("200 OK", r#"[{"output":"Γεια σας!"}]"#);
    let config = config_for(Some(&url));
    let exchange = send_message(&config, "hi", Some("session-1")).await;

    assert_eq!(exchange.source, ReplySource::Webhook("direct".to_string()));
    match exchange.response {
        NormalizedResponse::Plain(reply) => assert_eq!(reply.text, "Γεια σας!"),
        other => panic!("expected plain reply, got {:?}", other),
    }

    let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(sent["message"], "hi");
    assert_eq!(sent["userId"], "user-7");
    assert_eq!(sent["sessionId"], "session-1");
}

#[tokio::test]
async fn error_status_falls_back_offline() {
    let (url, server) = serve_once("404 Not Found", r#"{"message":"not registered"}"#);
    let exchange = send_message(&config_for(Some(&url)), "thanks", None).await;
    assert_eq!(exchange.source, ReplySource::Offline);
    server.join().unwrap();
}

#[tokio::test]
async fn connection_test_posts_probe_message() {
    let (url, server) = serve_once("200 OK", r#"{"ok":true}"#);
    assert!(test_connection(&config_for(Some(&url))).await);
    let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(sent["message"], "connection_test");
    assert!(sent.get("userId").is_none());
}
