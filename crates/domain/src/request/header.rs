//! Header types
//!
//! `Headers` is an insertion-ordered map with case-insensitive keys and
//! last-write-wins semantics, which is what the header merge precedence
//! in the composer relies on. `HeaderRow` is one row of the editable
//! header table.

use serde::{Deserialize, Serialize};

/// One row of the header table UI component.
///
/// Rows with an empty key are ignored at compose time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRow {
    /// The header name
    pub key: String,
    /// The header value
    pub value: String,
}

impl HeaderRow {
    /// Creates a new header row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An insertion-ordered header map.
///
/// Header names compare case-insensitively; setting a name that is
/// already present replaces the value in place, preserving position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<HeaderRow>,
}

impl Headers {
    /// Creates an empty header map.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Sets a header, replacing any existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|h| h.key.eq_ignore_ascii_case(&name))
        {
            existing.value = value;
        } else {
            self.items.push(HeaderRow::new(name, value));
        }
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns true if a header with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|h| (h.key.as_str(), h.value.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
