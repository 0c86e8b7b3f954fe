//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the pipeline and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer.

mod history_store;
mod transport;

pub use history_store::{HistoryStore, HistoryStoreError};
pub use transport::{Exchange, Transport, TransportError};
