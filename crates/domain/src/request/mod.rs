//! Request domain types
//!
//! The editable representation of a not-yet-sent request: method, URL,
//! query parameters, headers, body rows, and auth settings.

mod body;
mod descriptor;
mod header;
mod method;
mod query;

pub use body::{BodyRow, BodyRowKind, RawKind, RequestBody};
pub use descriptor::{AuthKind, RequestDescriptor};
pub use header::{HeaderRow, Headers};
pub use method::HttpMethod;
pub use query::QueryParam;
