//! Transport port
//!
//! One `send` is one network attempt. The adapter reports either a
//! completed HTTP exchange, status included whatever it is, or a
//! transport-level error; the executor folds both into the normalized
//! response, so nothing above this trait handles exceptions.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::composer::OutgoingRequest;

/// A completed HTTP exchange as read off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exchange {
    /// The HTTP status code, 4xx/5xx included
    pub status: u16,
    /// The response headers
    pub headers: HashMap<String, String>,
    /// The raw response body
    pub body: Vec<u8>,
}

/// Errors a transport adapter can report.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The URL could not be parsed at send time.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// A request body file could not be read or attached.
    #[error("could not attach request body: {0}")]
    Body(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects")]
    TooManyRedirects,

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// The network boundary of the pipeline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues the request once; no retries at this layer.
    async fn send(&self, request: &OutgoingRequest) -> Result<Exchange, TransportError>;
}
