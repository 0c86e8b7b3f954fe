//! Request body types
//!
//! The body is an explicit tagged union decided once by the editor,
//! so the encoder and transport dispatch on the variant instead of
//! inspecting payloads at runtime.

use serde::{Deserialize, Serialize};

/// The sub-kind of a raw body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawKind {
    /// JSON text; parsed when syntactically plausible, sent as plain
    /// text otherwise.
    #[default]
    Json,
    /// Plain text
    Text,
    /// XML text
    Xml,
}

/// The kind of one form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyRowKind {
    /// A plain text field
    #[default]
    Text,
    /// A file field; the row value holds the file path
    File,
}

/// One row of a url-encoded or multipart form body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRow {
    /// The field name
    pub key: String,
    /// The field value, or the file path for file rows
    pub value: String,
    /// Whether this row is a text field or a file field
    #[serde(default)]
    pub kind: BodyRowKind,
}

impl BodyRow {
    /// Creates a text row.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: BodyRowKind::Text,
        }
    }

    /// Creates a file row pointing at a path.
    #[must_use]
    pub fn file(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: path.into(),
            kind: BodyRowKind::File,
        }
    }
}

/// The request body as edited in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// URL-encoded form rows
    UrlEncoded {
        /// The form rows, in editor order
        rows: Vec<BodyRow>,
    },
    /// Multipart form rows
    FormData {
        /// The form rows, in editor order
        rows: Vec<BodyRow>,
    },
    /// A raw text blob with a sub-kind
    Raw {
        /// The blob as typed, possibly containing `{{var}}` placeholders
        content: String,
        /// How the blob should be interpreted
        #[serde(default)]
        kind: RawKind,
    },
}

impl RequestBody {
    /// Creates a raw JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            kind: RawKind::Json,
        }
    }

    /// Creates a raw plain-text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            kind: RawKind::Text,
        }
    }

    /// Returns true if no body is configured.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
