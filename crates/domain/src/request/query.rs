//! Query parameter types

use serde::{Deserialize, Serialize};

/// A query parameter key-value pair.
///
/// Parameters can be deselected without deletion so the UI row survives.
/// Only selected parameters with a non-empty key reach the composed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
    /// Whether this parameter participates in the composed URL
    #[serde(default = "default_selected")]
    pub selected: bool,
}

const fn default_selected() -> bool {
    true
}

impl QueryParam {
    /// Creates a new selected query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            selected: true,
        }
    }

    /// Creates a deselected query parameter.
    #[must_use]
    pub fn deselected(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            selected: false,
            ..Self::new(key, value)
        }
    }

    /// Returns true if this parameter should be appended to the URL.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.selected && !self.key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_by_default() {
        let param = QueryParam::new("page", "1");
        assert!(param.is_active());
    }

    #[test]
    fn deselected_or_empty_key_is_inactive() {
        assert!(!QueryParam::deselected("debug", "true").is_active());
        assert!(!QueryParam::new("", "orphan").is_active());
    }
}
