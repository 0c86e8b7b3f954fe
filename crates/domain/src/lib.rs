//! Quiver Domain - Core business types
//!
//! This crate defines the domain model for the Quiver API client:
//! the editable request descriptor, environments and their variables,
//! the normalized response every settled request collapses into, and
//! the history entry recorded after a real HTTP exchange.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod history;
pub mod request;
pub mod response;

pub use environment::{Environment, EnvironmentVariable};
pub use error::{DomainError, DomainResult};
pub use history::HistoryEntry;
pub use request::{
    AuthKind, BodyRow, BodyRowKind, HeaderRow, Headers, HttpMethod, QueryParam, RawKind,
    RequestBody, RequestDescriptor,
};
pub use response::{FailureKind, NormalizedResponse, StatusCode};
