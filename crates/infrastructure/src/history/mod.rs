//! History persistence adapters.

mod http_store;

pub use http_store::HttpHistoryStore;
