//! Webhook transport: request body, sequential route fallback, offline reply.
//!
//! Routes are tried strictly in order and the first successful answer wins.
//! Every failure is logged and swallowed; when no route answers (or no webhook
//! is configured) the caller gets the offline reply instead, so a chat message
//! is always produced.

mod error;
mod relay;

pub use error::TransportError;
pub use relay::{Route, relays, routes};

use serde::Serialize;
use serde_json::Value;

use crate::core::app;
use crate::core::config::Config;
use crate::core::fallback;
use crate::core::response::{NormalizedResponse, normalize};

/// Message sent by the connection test.
const CONNECTION_TEST_MESSAGE: &str = "connection_test";

/// JSON body POSTed to the webhook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest<'a> {
    pub message: &'a str,
    /// RFC 3339 / ISO-8601, UTC.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

impl<'a> WebhookRequest<'a> {
    pub fn new(message: &'a str, user_id: Option<&'a str>, session_id: Option<&'a str>) -> Self {
        WebhookRequest {
            message: message.trim(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            user_id,
            session_id,
        }
    }
}

/// Where a reply came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplySource {
    /// Answered by the webhook through the named route.
    Webhook(String),
    /// Produced locally by the offline replies.
    Offline,
}

/// Result of one user message: the normalized reply and its origin.
#[derive(Clone, Debug)]
pub struct Exchange {
    pub response: NormalizedResponse,
    pub source: ReplySource,
}

impl Exchange {
    fn offline(message: &str) -> Self {
        Exchange {
            response: fallback::offline_reply(message),
            source: ReplySource::Offline,
        }
    }
}

/// Send a user message and normalize the reply. Never fails.
pub async fn send_message(config: &Config, message: &str, session_id: Option<&str>) -> Exchange {
    let message = message.trim();
    let Some(webhook_url) = config.webhook_url.as_deref() else {
        log::warn!("No webhook URL configured, answering offline");
        return Exchange::offline(message);
    };

    let request = WebhookRequest::new(message, config.user_id.as_deref(), session_id);
    log::debug!(
        "Payload: {}",
        serde_json::to_string(&request).unwrap_or_default()
    );
    match deliver(webhook_url, config.use_cors_proxy, &request).await {
        Some((route, payload)) => {
            log::debug!("Response structure: {}", payload);
            Exchange {
                response: normalize(&payload),
                source: ReplySource::Webhook(route.label().to_string()),
            }
        }
        None => {
            log::warn!("All routes failed, answering offline");
            Exchange::offline(message)
        }
    }
}

/// POST a test message along the configured routes. True on the first success.
pub async fn test_connection(config: &Config) -> bool {
    let Some(webhook_url) = config.webhook_url.as_deref() else {
        log::warn!("No webhook URL configured");
        return false;
    };
    log::info!("Testing connection to webhook: {}", webhook_url);
    let request = WebhookRequest::new(CONNECTION_TEST_MESSAGE, None, None);
    deliver(webhook_url, config.use_cors_proxy, &request)
        .await
        .is_some()
}

/// Try each route in order; the first successful payload wins.
async fn deliver(
    webhook_url: &str,
    use_cors_proxy: bool,
    request: &WebhookRequest<'_>,
) -> Option<(Route, Value)> {
    let client = match build_client() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            return None;
        }
    };

    for route in routes(use_cors_proxy) {
        match post(&client, route, webhook_url, request).await {
            Ok(payload) => {
                log::info!("Received response from webhook via {}", route.label());
                return Some((route, payload));
            }
            Err(e) => {
                log::warn!("{}", e);
                if let Some(hint) = e.hint() {
                    log::warn!("{}", hint);
                }
            }
        }
    }
    None
}

fn build_client() -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .user_agent(format!("{}/{}", app::NAME, app::VERSION))
        .build()
        .map_err(TransportError::Client)
}

async fn post(
    client: &reqwest::Client,
    route: Route,
    webhook_url: &str,
    request: &WebhookRequest<'_>,
) -> Result<Value, TransportError> {
    let url = route.url_for(webhook_url);
    log::info!("Sending message via {}: {}", route.label(), url);
    let response = client
        .post(&url)
        .json(request)
        .send()
        .await
        .map_err(|source| TransportError::Request {
            route: route.label().to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            route: route.label().to_string(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| TransportError::Body {
            route: route.label().to_string(),
            source,
        })?;
    Ok(parse_body(&body))
}

/// JSON bodies are parsed; anything else is kept as a JSON string.
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests;
