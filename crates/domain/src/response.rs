//! The normalized response
//!
//! Every settled request collapses into exactly one of these, whether
//! the transport succeeded, the server answered 4xx/5xx, the network
//! failed, the timer fired, or the user hit cancel. Callers only ever
//! check the discriminant; nothing in the pipeline throws past it.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self.0 {
            100 => "Continue",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// The ways a request can settle without a readable HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transport-layer failure with no response (DNS, connect, ...)
    Network,
    /// The timeout timer fired before the transport settled
    Timeout,
    /// The user cancelled while the request was in flight
    Canceled,
    /// An OPTIONS response the client was not allowed to read
    CorsBlocked,
}

impl FailureKind {
    /// The status text shown in place of an HTTP reason phrase.
    #[must_use]
    pub const fn status_text(self) -> &'static str {
        match self {
            Self::Network => "",
            Self::Timeout => "Timeout",
            Self::Canceled => "Canceled",
            Self::CorsBlocked => "Blocked by browser",
        }
    }

    /// The default user-visible message for this failure.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Network => "Server error",
            Self::Timeout => "Request timed out",
            Self::Canceled => "Request canceled by user",
            Self::CorsBlocked => {
                "OPTIONS request sent. Browser blocked reading response due to CORS."
            }
        }
    }
}

/// The single response shape every settled request produces.
///
/// A 4xx/5xx answer is a `Success`: the HTTP exchange itself completed.
/// Only settlements without a readable exchange become `Failure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedResponse {
    /// An HTTP exchange completed and the response was read.
    Success {
        /// The HTTP status, any value included
        status: u16,
        /// Reason phrase for the status
        status_text: String,
        /// Response headers
        headers: HashMap<String, String>,
        /// Response body as text
        body: String,
        /// Wall-clock time from send to settle, in milliseconds
        elapsed_ms: u64,
        /// Response body size in bytes
        size: usize,
    },
    /// The request settled without a readable exchange.
    Failure {
        /// Which failure path settled the request
        failure: FailureKind,
        /// Status text standing in for a reason phrase
        status_text: String,
        /// User-visible message
        message: String,
    },
}

impl NormalizedResponse {
    /// Builds a success from raw exchange data.
    #[must_use]
    pub fn success(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        elapsed: Duration,
    ) -> Self {
        let status = status.into();
        let size = body.len();
        let text = String::from_utf8(body.clone())
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());

        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = elapsed.as_millis() as u64;

        Self::Success {
            status: status.as_u16(),
            status_text: status.reason_phrase().to_string(),
            headers,
            body: text,
            elapsed_ms,
            size,
        }
    }

    /// Builds a failure of the given kind with its default message.
    #[must_use]
    pub fn failure(kind: FailureKind) -> Self {
        Self::Failure {
            failure: kind,
            status_text: kind.status_text().to_string(),
            message: kind.default_message().to_string(),
        }
    }

    /// Builds a network failure; an empty message falls back to the
    /// generic "Server error".
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            FailureKind::Network.default_message().to_string()
        } else {
            message
        };
        Self::Failure {
            failure: FailureKind::Network,
            status_text: FailureKind::Network.status_text().to_string(),
            message,
        }
    }

    /// Returns true for settlements with a real HTTP exchange.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the HTTP status for successes.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status, .. } => Some(*status),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the status text, whichever arm holds it.
    #[must_use]
    pub fn status_text(&self) -> &str {
        match self {
            Self::Success { status_text, .. } | Self::Failure { status_text, .. } => status_text,
        }
    }

    /// Returns the elapsed time for successes; failures carry none.
    #[must_use]
    pub const fn elapsed_ms(&self) -> Option<u64> {
        match self {
            Self::Success { elapsed_ms, .. } => Some(*elapsed_ms),
            Self::Failure { .. } => None,
        }
    }

    /// Attempts to parse the success body as JSON.
    #[must_use]
    pub fn body_as_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Success { body, .. } => serde_json::from_str(body).ok(),
            Self::Failure { .. } => None,
        }
    }

    /// Returns a human-readable size string for display.
    #[must_use]
    pub fn size_display(&self) -> String {
        match self {
            Self::Success { size, .. } => format_bytes(*size),
            Self::Failure { .. } => String::new(),
        }
    }
}

/// Formats bytes into a human-readable string.
fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    #[allow(clippy::cast_precision_loss)]
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_code_categories() {
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(404).is_client_error());
        assert!(StatusCode::new(500).is_server_error());
        assert!(!StatusCode::new(301).is_success());
    }

    #[test]
    fn status_code_display() {
        assert_eq!(StatusCode::new(200).to_string(), "200 OK");
        assert_eq!(StatusCode::new(404).to_string(), "404 Not Found");
    }

    #[test]
    fn non_2xx_settles_as_success() {
        let response = NormalizedResponse::success(
            404,
            HashMap::new(),
            br#"{"error":"missing"}"#.to_vec(),
            Duration::from_millis(42),
        );
        assert!(response.is_success());
        assert_eq!(response.status(), Some(404));
        assert_eq!(response.status_text(), "Not Found");
        assert_eq!(response.elapsed_ms(), Some(42));
        assert!(response.body_as_json().is_some());
    }

    #[test]
    fn timeout_and_cancel_are_distinct() {
        let timeout = NormalizedResponse::failure(FailureKind::Timeout);
        assert_eq!(timeout.status_text(), "Timeout");
        assert_eq!(timeout.status(), None);
        assert_eq!(timeout.elapsed_ms(), None);

        let canceled = NormalizedResponse::failure(FailureKind::Canceled);
        assert_eq!(canceled.status_text(), "Canceled");
        if let NormalizedResponse::Failure { message, .. } = canceled {
            assert_eq!(message, "Request canceled by user");
        }
    }

    #[test]
    fn empty_network_message_falls_back() {
        let response = NormalizedResponse::network("");
        if let NormalizedResponse::Failure { message, .. } = response {
            assert_eq!(message, "Server error");
        }
    }

    #[test]
    fn format_bytes_display() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
    }
}
