//! Transport execution
//!
//! Runs one composed request against the transport, racing it with a
//! one-shot timeout timer and the cancellation token, and folds every
//! outcome into a `NormalizedResponse`. `execute` always settles and
//! never returns an error to the caller.

use std::time::{Duration, Instant};

use quiver_domain::{FailureKind, HttpMethod, NormalizedResponse};
use serde::{Deserialize, Serialize};

use crate::cancel::{CancelReason, CancelToken};
use crate::composer::OutgoingRequest;
use crate::ports::{Transport, TransportError};

/// Tunables for request execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Per-request timeout window, in milliseconds.
    pub timeout_ms: u64,
    /// How many redirects the transport may follow.
    pub max_redirects: usize,
    /// The User-Agent header the transport identifies as.
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_redirects: 5,
            user_agent: format!("Quiver/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ExecutorConfig {
    /// The timeout window as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Executes composed requests against a transport.
pub struct RequestExecutor<T> {
    transport: T,
    timeout: Duration,
}

impl<T: Transport> RequestExecutor<T> {
    /// Creates an executor over the given transport.
    pub fn new(transport: T, config: &ExecutorConfig) -> Self {
        Self {
            transport,
            timeout: config.timeout(),
        }
    }

    /// Sends the request and settles it, whatever happens.
    ///
    /// The token is checked first on every poll, so a cancellation that
    /// has already been triggered wins over a transport completion or a
    /// timer that became ready in the same tick. The timer path
    /// triggers the token itself; the reason recorded at trigger time
    /// decides whether the settlement reads as timeout or user cancel.
    pub async fn execute(
        &self,
        request: &OutgoingRequest,
        token: &CancelToken,
    ) -> NormalizedResponse {
        let start = Instant::now();
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        tokio::select! {
            biased;

            () = token.cancelled() => Self::settle_cancelled(token.reason()),

            result = self.transport.send(request) => match result {
                Ok(exchange) => {
                    let response = NormalizedResponse::success(
                        exchange.status,
                        exchange.headers,
                        exchange.body,
                        start.elapsed(),
                    );
                    tracing::debug!(status = exchange.status, "request settled");
                    response
                }
                Err(error) => Self::settle_failed(request.method, &error),
            },

            () = tokio::time::sleep(self.timeout) => {
                token.cancel(CancelReason::Timeout);
                Self::settle_cancelled(token.reason())
            }
        }
    }

    fn settle_cancelled(reason: Option<CancelReason>) -> NormalizedResponse {
        match reason {
            Some(CancelReason::Timeout) => NormalizedResponse::failure(FailureKind::Timeout),
            // Reason is always recorded before waiters wake; treat a
            // missing one as a user cancel.
            Some(CancelReason::User) | None => {
                NormalizedResponse::failure(FailureKind::Canceled)
            }
        }
    }

    fn settle_failed(method: HttpMethod, error: &TransportError) -> NormalizedResponse {
        tracing::debug!(%error, "transport failure");
        if method == HttpMethod::Options {
            // The exchange may have happened; the client just was not
            // allowed to read it.
            return NormalizedResponse::failure(FailureKind::CorsBlocked);
        }
        NormalizedResponse::network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use quiver_domain::Headers;
    use std::collections::HashMap;

    use crate::encoder::EncodedBody;
    use crate::ports::Exchange;

    struct StaticTransport {
        status: u16,
        body: Vec<u8>,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn send(&self, _request: &OutgoingRequest) -> Result<Exchange, TransportError> {
            Ok(Exchange {
                status: self.status,
                headers: HashMap::new(),
                body: self.body.clone(),
            })
        }
    }

    struct NeverSettles;

    #[async_trait]
    impl Transport for NeverSettles {
        async fn send(&self, _request: &OutgoingRequest) -> Result<Exchange, TransportError> {
            std::future::pending().await
        }
    }

    struct ConnectFails;

    #[async_trait]
    impl Transport for ConnectFails {
        async fn send(&self, _request: &OutgoingRequest) -> Result<Exchange, TransportError> {
            Err(TransportError::Connect("dns failure".to_string()))
        }
    }

    fn request(method: HttpMethod) -> OutgoingRequest {
        OutgoingRequest {
            method,
            url: "https://api.test/echo".to_string(),
            headers: Headers::new(),
            body: EncodedBody::None,
        }
    }

    fn executor<T: Transport>(transport: T) -> RequestExecutor<T> {
        RequestExecutor::new(transport, &ExecutorConfig::default())
    }

    #[tokio::test]
    async fn genuine_settlement_is_success() {
        let exec = executor(StaticTransport {
            status: 200,
            body: b"ok".to_vec(),
        });
        let response = exec
            .execute(&request(HttpMethod::Get), &CancelToken::new())
            .await;

        assert!(response.is_success());
        assert_eq!(response.status(), Some(200));
        assert!(response.elapsed_ms().is_some());
    }

    #[tokio::test]
    async fn non_2xx_is_not_a_transport_error() {
        let exec = executor(StaticTransport {
            status: 404,
            body: br#"{"error":"missing"}"#.to_vec(),
        });
        let response = exec
            .execute(&request(HttpMethod::Get), &CancelToken::new())
            .await;

        assert!(response.is_success());
        assert_eq!(response.status(), Some(404));
        assert_eq!(response.status_text(), "Not Found");
    }

    #[tokio::test]
    async fn network_error_settles_as_failure() {
        let exec = executor(ConnectFails);
        let response = exec
            .execute(&request(HttpMethod::Get), &CancelToken::new())
            .await;

        match response {
            NormalizedResponse::Failure {
                failure, message, ..
            } => {
                assert_eq!(failure, FailureKind::Network);
                assert!(message.contains("dns failure"));
            }
            NormalizedResponse::Success { .. } => unreachable!("expected failure"),
        }
    }

    #[tokio::test]
    async fn options_failure_maps_to_blocked() {
        let exec = executor(ConnectFails);
        let response = exec
            .execute(&request(HttpMethod::Options), &CancelToken::new())
            .await;

        assert_eq!(response.status_text(), "Blocked by browser");
        match response {
            NormalizedResponse::Failure { message, .. } => {
                assert_eq!(
                    message,
                    "OPTIONS request sent. Browser blocked reading response due to CORS."
                );
            }
            NormalizedResponse::Success { .. } => unreachable!("expected failure"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fires_when_transport_hangs() {
        let exec = executor(NeverSettles);
        let token = CancelToken::new();
        let response = exec.execute(&request(HttpMethod::Get), &token).await;

        assert_eq!(response.status_text(), "Timeout");
        assert_eq!(token.reason(), Some(CancelReason::Timeout));
        match response {
            NormalizedResponse::Failure { message, .. } => {
                assert_eq!(message, "Request timed out");
            }
            NormalizedResponse::Success { .. } => unreachable!("expected failure"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn user_cancel_while_in_flight() {
        let exec = std::sync::Arc::new(executor(NeverSettles));
        let token = CancelToken::new();

        let task_token = token.clone();
        let task_exec = std::sync::Arc::clone(&exec);
        let handle = tokio::spawn(async move {
            task_exec
                .execute(&request(HttpMethod::Get), &task_token)
                .await
        });

        // Let the executor register its select arms before cancelling.
        tokio::task::yield_now().await;
        token.cancel(CancelReason::User);

        let response = handle.await.unwrap_or_else(|_| NormalizedResponse::network(""));
        assert_eq!(response.status_text(), "Canceled");
    }

    #[tokio::test(start_paused = true)]
    async fn reason_recorded_at_trigger_time_wins_at_the_boundary() {
        // The timer fired first and recorded Timeout; a user cancel
        // arriving in the same instant must not flip the label.
        let token = CancelToken::new();
        token.cancel(CancelReason::Timeout);
        token.cancel(CancelReason::User);

        let exec = executor(NeverSettles);
        let response = exec.execute(&request(HttpMethod::Get), &token).await;
        assert_eq!(response.status_text(), "Timeout");
    }

    #[tokio::test]
    async fn pre_cancelled_token_settles_without_sending() {
        let exec = executor(StaticTransport {
            status: 200,
            body: Vec::new(),
        });
        let token = CancelToken::new();
        token.cancel(CancelReason::User);

        let response = exec.execute(&request(HttpMethod::Get), &token).await;
        assert_eq!(response.status_text(), "Canceled");
    }
}
