//! Transport error types.

/// Why a single delivery attempt failed. Never shown to the user: each failure
/// moves on to the next route, and the last one ends in the offline reply.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {route} failed: {source}")]
    Request {
        route: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{route} answered with HTTP {status}")]
    Status {
        route: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to read response body from {route}: {source}")]
    Body {
        route: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Hint logged next to a failed status, matching the usual workflow mistakes.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TransportError::Status { status, .. } if status.as_u16() == 404 => Some(
                "Webhook not found. Check the webhook URL and make sure the workflow is active.",
            ),
            TransportError::Status { status, .. } if status.is_server_error() => {
                Some("Server error in the workflow. Check its execution logs.")
            }
            _ => None,
        }
    }
}
