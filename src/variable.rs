//! Key/value pair stored in the variable table

use std::fmt;

/// A single `key`/`value` pair read from a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:?}", self.key, self.value)
    }
}

/// Returns the value of the first variable named `key`
pub fn find<'a>(variables: &'a [Variable], key: &str) -> Option<&'a str> {
    variables
        .iter()
        .find(|variable| variable.key == key)
        .map(|variable| variable.value.as_str())
}
