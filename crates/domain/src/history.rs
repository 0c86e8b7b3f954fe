//! History entry types
//!
//! An entry is appended after every settlement that carried a real HTTP
//! exchange. The field names match the wire shape the persistence
//! collaborator accepts; the collaborator assigns the row id and caps
//! retention on its side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded request, scoped to a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The HTTP method, as sent
    pub method: String,
    /// The fully resolved URL, as sent
    pub url: String,
    /// The merged request headers, serialized as a JSON string
    #[serde(default)]
    pub headers: Option<String>,
    /// The body as transmitted, when it had a textual form
    #[serde(default)]
    pub body: Option<String>,
    /// The HTTP status of the response
    #[serde(default)]
    pub response_status: Option<u16>,
    /// Elapsed time in milliseconds
    #[serde(rename = "response_time", default)]
    pub response_time_ms: Option<u64>,
    /// The owning workspace
    pub workspace_id: String,
    /// When the entry was created, locally
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        workspace_id: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: None,
            body: None,
            response_status: None,
            response_time_ms: None,
            workspace_id: workspace_id.into(),
            created_at: Utc::now(),
        }
    }
}
