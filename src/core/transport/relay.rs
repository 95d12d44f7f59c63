//! Delivery routes: direct, or through one of the fixed CORS relays.
//!
//! Relays are loaded from `config/relays.json` (embedded at compile time,
//! validated by `build.rs`).

use std::sync::OnceLock;

use serde::Deserialize;

/// A third-party relay that forwards requests to the webhook.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Relay {
    pub name: String,
    pub prefix: String,
    /// Whether the webhook URL must be percent-encoded when appended to the prefix.
    pub encode: bool,
}

impl Relay {
    /// Full URL to POST to for the given webhook.
    pub fn url_for(&self, webhook_url: &str) -> String {
        if self.encode {
            let encoded: String = url::form_urlencoded::byte_serialize(webhook_url.as_bytes()).collect();
            format!("{}{}", self.prefix, encoded)
        } else {
            format!("{}{}", self.prefix, webhook_url)
        }
    }
}

fn load_relays() -> Vec<Relay> {
    let json = include_str!("../../../config/relays.json");
    serde_json::from_str(json).expect("relays.json must be valid")
}

static RELAYS: OnceLock<Vec<Relay>> = OnceLock::new();

/// The fixed relay list, in the order they are tried.
pub fn relays() -> &'static [Relay] {
    RELAYS.get_or_init(load_relays)
}

/// One way of reaching the webhook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Direct,
    Relay(&'static Relay),
}

impl Route {
    pub fn url_for(&self, webhook_url: &str) -> String {
        match self {
            Route::Direct => webhook_url.to_string(),
            Route::Relay(relay) => relay.url_for(webhook_url),
        }
    }

    /// Short label for logs and the UI.
    pub fn label(&self) -> &str {
        match self {
            Route::Direct => "direct",
            Route::Relay(relay) => &relay.name,
        }
    }
}

/// Ordered routes for the relay toggle: the relays in order when on, direct otherwise.
pub fn routes(use_cors_proxy: bool) -> Vec<Route> {
    if use_cors_proxy {
        relays().iter().map(Route::Relay).collect()
    } else {
        vec![Route::Direct]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEBHOOK: &str = "https://flow.example.com/webhook/abc-123?x=1";

    #[test]
    fn three_relays_in_file_order() {
        let names: Vec<_> = relays().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["corsproxy.io", "allorigins", "thingproxy"]);
    }

    #[test]
    fn direct_only_when_toggle_off() {
        assert_eq!(routes(false), vec![Route::Direct]);
        assert_eq!(Route::Direct.url_for(WEBHOOK), WEBHOOK);
        assert_eq!(Route::Direct.label(), "direct");
    }

    #[test]
    fn relays_only_when_toggle_on() {
        let r = routes(true);
        assert_eq!(r.len(), 3);
        assert!(r.iter().all(|route| matches!(route, Route::Relay(_))));
    }

    #[test]
    fn encoded_relay_url() {
        let relay = &relays()[0];
        assert_eq!(
            relay.url_for(WEBHOOK),
            "https://corsproxy.io/?https%3A%2F%2Fflow.example.com%2Fwebhook%2Fabc-123%3Fx%3D1"
        );
    }

    #[test]
    fn raw_relay_url() {
        let relay = &relays()[2];
        assert_eq!(
            relay.url_for(WEBHOOK),
            "https://thingproxy.freeboard.io/fetch/https://flow.example.com/webhook/abc-123?x=1"
        );
    }
}
