//! Quiver Infrastructure - Adapters and implementations
//!
//! Concrete implementations of the ports defined in the application
//! layer: the reqwest-backed transport and the HTTP history store.

pub mod history;
pub mod transport;

pub use history::HttpHistoryStore;
pub use transport::ReqwestTransport;
