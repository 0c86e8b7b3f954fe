//! Body encoding
//!
//! Turns the editable body union into a wire-ready payload with a
//! default content type. Encoding never fails: invalid JSON degrades
//! to plain text, and rows without a key are skipped.

use quiver_domain::{BodyRowKind, EnvironmentVariable, RawKind, RequestBody};

use crate::resolver::resolve_variables;

/// One field of a multipart form, resolved from the editor rows.
///
/// File contents are read by the transport adapter; this layer only
/// carries the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartField {
    /// A plain text field.
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// A file field with the path to upload.
    File {
        /// Field name
        name: String,
        /// Path of the file to attach
        path: String,
    },
}

/// A wire-ready request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedBody {
    /// No body is sent.
    None,
    /// A textual payload with its default content type.
    Text {
        /// The payload
        content: String,
        /// Default content type; an explicit header overrides it
        content_type: String,
    },
    /// A parsed JSON payload, serialized compactly at send time.
    Json {
        /// The parsed structure
        value: serde_json::Value,
    },
    /// Multipart form fields; the transport builds the form so the
    /// boundary parameter ends up correct.
    Multipart {
        /// The fields in editor order
        fields: Vec<MultipartField>,
    },
}

impl EncodedBody {
    /// The default Content-Type for this payload, when one applies.
    ///
    /// Multipart deliberately returns `None`: the transport sets the
    /// header itself so the boundary matches.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None | Self::Multipart { .. } => None,
            Self::Text { content_type, .. } => Some(content_type),
            Self::Json { .. } => Some("application/json"),
        }
    }

    /// Returns true if no body will be sent.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The payload as text, for history recording.
    #[must_use]
    pub fn display_content(&self) -> Option<String> {
        match self {
            Self::None | Self::Multipart { .. } => None,
            Self::Text { content, .. } => Some(content.clone()),
            Self::Json { value } => Some(value.to_string()),
        }
    }
}

/// Encodes the editable body into a wire-ready payload.
#[must_use]
pub fn encode_body(body: &RequestBody, variables: &[EnvironmentVariable]) -> EncodedBody {
    match body {
        RequestBody::None => EncodedBody::None,
        RequestBody::UrlEncoded { rows } => encode_url_form(rows),
        RequestBody::FormData { rows } => encode_multipart(rows),
        RequestBody::Raw { content, kind } => {
            let resolved = resolve_variables(content, variables);
            encode_raw(resolved, *kind)
        }
    }
}

fn encode_url_form(rows: &[quiver_domain::BodyRow]) -> EncodedBody {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for row in rows {
        if row.key.is_empty() {
            continue;
        }
        // Later duplicates overwrite earlier ones, keeping the first
        // occurrence's position.
        if let Some(existing) = pairs.iter_mut().find(|(key, _)| *key == row.key) {
            existing.1.clone_from(&row.value);
        } else {
            pairs.push((row.key.clone(), row.value.clone()));
        }
    }

    // Serializing string pairs cannot fail.
    let content = serde_urlencoded::to_string(&pairs).unwrap_or_default();

    EncodedBody::Text {
        content,
        content_type: "application/x-www-form-urlencoded".to_string(),
    }
}

fn encode_multipart(rows: &[quiver_domain::BodyRow]) -> EncodedBody {
    let fields = rows
        .iter()
        .filter(|row| !row.key.is_empty())
        .map(|row| match row.kind {
            BodyRowKind::File if !row.value.is_empty() => MultipartField::File {
                name: row.key.clone(),
                path: row.value.clone(),
            },
            // A file row with no selected file contributes an empty value.
            BodyRowKind::File => MultipartField::Text {
                name: row.key.clone(),
                value: String::new(),
            },
            BodyRowKind::Text => MultipartField::Text {
                name: row.key.clone(),
                value: row.value.clone(),
            },
        })
        .collect();

    EncodedBody::Multipart { fields }
}

fn encode_raw(resolved: String, kind: RawKind) -> EncodedBody {
    match kind {
        RawKind::Json => {
            let trimmed = resolved.trim();
            // Only text starting like a JSON container is parsed at all;
            // anything else goes out as plain text.
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                if let Ok(value) = serde_json::from_str(trimmed) {
                    return EncodedBody::Json { value };
                }
            }
            EncodedBody::Text {
                content: resolved,
                content_type: "text/plain".to_string(),
            }
        }
        RawKind::Text => EncodedBody::Text {
            content: resolved,
            content_type: "text/plain".to_string(),
        },
        RawKind::Xml => EncodedBody::Text {
            content: resolved,
            content_type: "application/xml".to_string(),
        },
    }
}
