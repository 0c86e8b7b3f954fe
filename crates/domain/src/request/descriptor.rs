//! The editable request descriptor
//!
//! One descriptor exists per tab. Every UI edit mutates it; composition
//! turns it (plus the active environment) into an outgoing request.

use serde::{Deserialize, Serialize};

use super::body::RequestBody;
use super::header::{HeaderRow, Headers};
use super::method::HttpMethod;
use super::query::QueryParam;

/// Authentication configured on the request itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthKind {
    /// No request-level auth
    #[default]
    None,
    /// Bearer token attached as an `Authorization` header
    Bearer {
        /// The token, without the `Bearer ` prefix
        token: String,
    },
}

/// The in-progress, editable representation of a not-yet-sent request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// The HTTP method; unset until the user picks one
    #[serde(default)]
    pub method: Option<HttpMethod>,
    /// The raw URL, possibly containing `{{var}}` placeholders
    #[serde(default)]
    pub url: String,
    /// Query parameters merged into the URL at compose time
    #[serde(default)]
    pub query_params: Vec<QueryParam>,
    /// Base headers carried by the descriptor (lowest merge precedence)
    #[serde(default)]
    pub headers: Headers,
    /// Rows of the header table UI component (override base headers)
    #[serde(default)]
    pub header_rows: Vec<HeaderRow>,
    /// The request body
    #[serde(default)]
    pub body: RequestBody,
    /// Request-level authentication
    #[serde(default)]
    pub auth: AuthKind,
}

impl RequestDescriptor {
    /// Creates a blank descriptor, as a freshly opened tab holds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the method, defaulting to GET when unset.
    #[must_use]
    pub fn method_or_default(&self) -> HttpMethod {
        self.method.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_descriptor() {
        let descriptor = RequestDescriptor::new();
        assert_eq!(descriptor.method, None);
        assert_eq!(descriptor.method_or_default(), HttpMethod::Get);
        assert!(descriptor.body.is_none());
        assert!(descriptor.headers.is_empty());
    }

    #[test]
    fn descriptor_round_trips_through_json() {
        let descriptor = RequestDescriptor {
            method: Some(HttpMethod::Post),
            url: "https://{{host}}/echo".to_string(),
            query_params: vec![QueryParam::new("page", "1")],
            auth: AuthKind::Bearer {
                token: "tok".to_string(),
            },
            body: RequestBody::json(r#"{"x":1}"#),
            ..RequestDescriptor::default()
        };

        let json = serde_json::to_string(&descriptor).unwrap_or_default();
        let back: RequestDescriptor = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back, descriptor);
    }
}
