//! HTTP-backed history store.
//!
//! Appends entries by POSTing them to the workspace backend, which
//! assigns the row id and caps retention per workspace on its side.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use quiver_application::ports::{HistoryStore, HistoryStoreError};
use quiver_domain::HistoryEntry;

/// The backend's answer to a successful append.
#[derive(Debug, Deserialize)]
struct AppendReceipt {
    history_id: u64,
}

/// Workspace history stored behind the backend's `/history` endpoint.
pub struct HttpHistoryStore {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl HttpHistoryStore {
    /// Creates a store for the given backend base URL.
    ///
    /// A trailing slash on the base URL is tolerated.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>, session_token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            base_url,
            session_token,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/history", self.base_url)
    }
}

#[async_trait]
impl HistoryStore for HttpHistoryStore {
    async fn append(&self, entry: &HistoryEntry) -> Result<u64, HistoryStoreError> {
        let mut builder = self.client.post(self.endpoint()).json(entry);
        if let Some(token) = &self.session_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HistoryStoreError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HistoryStoreError::Rejected {
                status: status.as_u16(),
            });
        }

        let receipt: AppendReceipt = response
            .json()
            .await
            .map_err(|e| HistoryStoreError::InvalidResponse(e.to_string()))?;

        tracing::debug!(history_id = receipt.history_id, "history entry stored");
        Ok(receipt.history_id)
    }
}
