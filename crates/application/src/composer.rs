//! Request composition
//!
//! Pure assembly of a descriptor plus the active environment into one
//! outgoing request: URL resolution, query merge, header merge with
//! fixed precedence, body encoding, and GET body suppression.
//! Composition never fails; a URL the parser rejects is used verbatim.

use quiver_domain::{AuthKind, Environment, Headers, HttpMethod, QueryParam, RequestDescriptor};
use url::Url;

use crate::encoder::{EncodedBody, encode_body};
use crate::resolver::resolve_variables;

/// A ready-to-send request, owned by a single executor invocation.
///
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// The HTTP method
    pub method: HttpMethod,
    /// The fully resolved URL with query parameters merged in
    pub url: String,
    /// The merged headers
    pub headers: Headers,
    /// The encoded payload
    pub body: EncodedBody,
}

/// Composes an outgoing request from a descriptor.
///
/// Header precedence, lowest to highest: descriptor base headers,
/// the descriptor's own auth header, the header table rows, and
/// finally an injected `Authorization: Bearer <session_token>` when no
/// Authorization header is present. An explicit `Content-Type` always
/// overrides the encoder's default.
#[must_use]
pub fn compose(
    descriptor: &RequestDescriptor,
    environment: Option<&Environment>,
    session_token: Option<&str>,
) -> OutgoingRequest {
    let variables = environment.map_or(&[][..], |env| env.variables.as_slice());

    let resolved_url = resolve_variables(&descriptor.url, variables);
    let url = merge_query(&resolved_url, &descriptor.query_params);

    let method = descriptor.method_or_default();

    let mut body = encode_body(&descriptor.body, variables);
    if !method.allows_body() {
        body = EncodedBody::None;
    }

    let mut headers = descriptor.headers.clone();

    if let AuthKind::Bearer { token } = &descriptor.auth {
        if !token.is_empty() {
            headers.set("Authorization", format!("Bearer {token}"));
        }
    }

    for row in &descriptor.header_rows {
        if !row.key.is_empty() {
            headers.set(row.key.clone(), row.value.clone());
        }
    }

    if let Some(content_type) = body.content_type() {
        if !headers.contains("Content-Type") {
            let content_type = content_type.to_string();
            headers.set("Content-Type", content_type);
        }
    }

    if let Some(token) = session_token {
        if !token.is_empty() && !headers.contains("Authorization") {
            headers.set("Authorization", format!("Bearer {token}"));
        }
    }

    OutgoingRequest {
        method,
        url,
        headers,
        body,
    }
}

/// Replaces the URL's query string with the selected parameters.
///
/// With no parameter rows at all the URL passes through untouched,
/// keeping any query string the user typed by hand. A URL the parser
/// rejects is returned as-is.
fn merge_query(url: &str, params: &[QueryParam]) -> String {
    if params.is_empty() {
        return url.to_string();
    }

    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    parsed.set_query(None);
    {
        let mut pairs = parsed.query_pairs_mut();
        for param in params.iter().filter(|p| p.is_active()) {
            pairs.append_pair(&param.key, &param.value);
        }
    }
    // No active rows leaves a dangling '?'.
    if parsed.query() == Some("") {
        parsed.set_query(None);
    }

    parsed.to_string()
}
