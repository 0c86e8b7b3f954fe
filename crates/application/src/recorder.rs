//! Response recording
//!
//! Fire-and-forget history appends after settlement. Only settlements
//! that carried a real HTTP exchange are recorded; a failed append is
//! logged and swallowed so the displayed response is never affected.

use quiver_domain::{HistoryEntry, NormalizedResponse};

use crate::composer::OutgoingRequest;
use crate::ports::HistoryStore;

/// Appends settled requests to workspace-scoped history.
pub struct ResponseRecorder<S> {
    store: S,
}

impl<S: HistoryStore> ResponseRecorder<S> {
    /// Creates a recorder over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Records one settlement; never fails and never blocks the result.
    pub async fn record(
        &self,
        workspace_id: &str,
        request: &OutgoingRequest,
        response: &NormalizedResponse,
    ) {
        let Some(entry) = build_entry(workspace_id, request, response) else {
            return;
        };

        match self.store.append(&entry).await {
            Ok(history_id) => {
                tracing::debug!(history_id, "history entry appended");
            }
            Err(error) => {
                tracing::warn!(%error, "failed to append history entry");
            }
        }
    }
}

/// Builds the entry for a settlement, or `None` when nothing crossed
/// the wire (timeouts, cancels, network failures).
fn build_entry(
    workspace_id: &str,
    request: &OutgoingRequest,
    response: &NormalizedResponse,
) -> Option<HistoryEntry> {
    let NormalizedResponse::Success {
        status, elapsed_ms, ..
    } = response
    else {
        return None;
    };

    let mut entry = HistoryEntry::new(request.method.as_str(), request.url.as_str(), workspace_id);
    entry.headers = serialize_headers(request);
    entry.body = request.body.display_content();
    entry.response_status = Some(*status);
    entry.response_time_ms = Some(*elapsed_ms);
    Some(entry)
}

fn serialize_headers(request: &OutgoingRequest) -> Option<String> {
    if request.headers.is_empty() {
        return None;
    }
    let map: serde_json::Map<String, serde_json::Value> = request
        .headers
        .iter()
        .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
        .collect();
    serde_json::to_string(&map).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use quiver_domain::{FailureKind, Headers, HttpMethod};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::encoder::EncodedBody;
    use crate::ports::HistoryStoreError;

    #[derive(Default, Clone)]
    struct InMemoryStore {
        entries: Arc<Mutex<Vec<HistoryEntry>>>,
    }

    #[async_trait]
    impl HistoryStore for InMemoryStore {
        async fn append(&self, entry: &HistoryEntry) -> Result<u64, HistoryStoreError> {
            let mut entries = self
                .entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            entries.push(entry.clone());
            Ok(entries.len() as u64)
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl HistoryStore for BrokenStore {
        async fn append(&self, _entry: &HistoryEntry) -> Result<u64, HistoryStoreError> {
            Err(HistoryStoreError::Http("connection refused".to_string()))
        }
    }

    fn sent_request() -> OutgoingRequest {
        let mut headers = Headers::new();
        headers.set("Content-Type", "application/json");
        OutgoingRequest {
            method: HttpMethod::Post,
            url: "https://api.test/echo".to_string(),
            headers,
            body: EncodedBody::Json {
                value: serde_json::json!({"a": 1}),
            },
        }
    }

    fn success() -> NormalizedResponse {
        NormalizedResponse::success(201, HashMap::new(), Vec::new(), Duration::from_millis(80))
    }

    #[tokio::test]
    async fn success_settlement_is_recorded() {
        let store = InMemoryStore::default();
        let recorder = ResponseRecorder::new(store.clone());

        recorder.record("ws-1", &sent_request(), &success()).await;

        let entries = store
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.method, "POST");
        assert_eq!(entry.url, "https://api.test/echo");
        assert_eq!(entry.workspace_id, "ws-1");
        assert_eq!(entry.response_status, Some(201));
        assert_eq!(entry.response_time_ms, Some(80));
        assert_eq!(entry.body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(
            entry.headers.as_deref(),
            Some(r#"{"Content-Type":"application/json"}"#)
        );
    }

    #[tokio::test]
    async fn failures_are_not_recorded() {
        let store = InMemoryStore::default();
        let recorder = ResponseRecorder::new(store.clone());

        for kind in [
            FailureKind::Network,
            FailureKind::Timeout,
            FailureKind::Canceled,
            FailureKind::CorsBlocked,
        ] {
            recorder
                .record("ws-1", &sent_request(), &NormalizedResponse::failure(kind))
                .await;
        }

        let entries = store
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() {
        let recorder = ResponseRecorder::new(BrokenStore);
        // Must not panic or propagate.
        recorder.record("ws-1", &sent_request(), &success()).await;
    }
}
