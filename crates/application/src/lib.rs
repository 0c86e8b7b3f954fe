//! Quiver Application - The request pipeline
//!
//! This crate orchestrates the path from an edited request descriptor
//! to a normalized response: variable resolution, body encoding,
//! request composition, transport execution with timeout and
//! cancellation, history recording, and per-tab result isolation.
//! Network and persistence adapters live behind the ports defined here.

pub mod cancel;
pub mod composer;
pub mod encoder;
pub mod executor;
pub mod ports;
pub mod recorder;
pub mod resolver;
pub mod tabs;

pub use cancel::{CancelReason, CancelToken};
pub use composer::{OutgoingRequest, compose};
pub use encoder::{EncodedBody, MultipartField, encode_body};
pub use executor::{ExecutorConfig, RequestExecutor};
pub use ports::{Exchange, HistoryStore, HistoryStoreError, Transport, TransportError};
pub use recorder::ResponseRecorder;
pub use resolver::resolve_variables;
pub use tabs::{ExecutionTicket, TabContext};
