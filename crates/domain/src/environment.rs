//! Environment and variable domain types
//!
//! An environment is a named, workspace-scoped list of key/value
//! variables. The list is ordered: when two variables share a key the
//! first one wins during resolution, since it already replaces every
//! occurrence. Lookup is by exact trimmed key, case-sensitive.

use serde::{Deserialize, Serialize};

/// One variable of an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    /// The variable name; compared trimmed and case-sensitively
    pub key: String,
    /// The variable value; substituted trimmed
    #[serde(default)]
    pub value: String,
}

impl EnvironmentVariable {
    /// Creates a new variable.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A named set of variables, selectable as the active environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// The environment name, e.g. "development"
    pub name: String,
    /// The ordered variable list
    #[serde(default)]
    pub variables: Vec<EnvironmentVariable>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Appends a variable to the list.
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.push(EnvironmentVariable::new(key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn variables_keep_insertion_order() {
        let mut env = Environment::new("development");
        env.set_variable("host", "localhost");
        env.set_variable("host", "api.test");

        let keys: Vec<_> = env.variables.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["host", "host"]);
    }
}
