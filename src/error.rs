//! Error types for configuration loading and lookup
//!
//! Every failure the reader can observe is a [`ConfigError`] variant carrying
//! the context needed to render it: the file path, the offending line number
//! or the key that was requested.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors produced while loading a configuration file or reading from it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration file does not exist
    #[error("file '{}' doesn't exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The configuration file exists but could not be read
    #[error("user has no access to file '{}'", path.display())]
    AccessDenied { path: PathBuf },

    /// Separator and escape character were configured to the same value
    #[error("escape char and separating char can't hold the same value '{character}'")]
    ConflictingSeparatorEscape { character: char },

    /// A data line has nothing before its separator
    #[error("config line number {line} is missing a variable's key name")]
    EmptyKey { line: usize },

    /// A data line has no separator at all
    #[error("config line number {line} is missing a separating character")]
    MissingSeparator { line: usize },

    /// Key is neither in the file nor in the default table
    #[error("variable '{key}' not found")]
    VariableNotFound { key: String },

    /// Key has no registered default
    #[error("default variable '{key}' not found")]
    DefaultNotFound { key: String },

    /// Value could not be coerced into the requested type
    #[error("key '{key}' is not of {expected} type")]
    WrongType { key: String, expected: &'static str },

    /// A required key is neither in the file nor in the default table
    #[error("required variable '{key}' not found")]
    RequiredVariableNotFound { key: String },

    /// A required key could not be coerced into the requested type
    #[error("required key '{key}' is not of {expected} type")]
    RequiredWrongType { key: String, expected: &'static str },

    /// Typed extraction of the whole table failed
    #[error("deserialization failed: {message}")]
    Deserialize { message: String },
}

impl ConfigError {
    /// Returns true for errors that disable further reads until a successful reload
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConfigError::FileNotFound { .. }
                | ConfigError::AccessDenied { .. }
                | ConfigError::ConflictingSeparatorEscape { .. }
                | ConfigError::RequiredVariableNotFound { .. }
                | ConfigError::RequiredWrongType { .. }
        )
    }

    /// Returns true for errors that stop a load before any line is read
    pub fn is_load_fatal(&self) -> bool {
        matches!(
            self,
            ConfigError::FileNotFound { .. }
                | ConfigError::AccessDenied { .. }
                | ConfigError::ConflictingSeparatorEscape { .. }
        )
    }

    /// Line number for per-line parse errors
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfigError::EmptyKey { line } | ConfigError::MissingSeparator { line } => Some(*line),
            _ => None,
        }
    }

    /// Key name for lookup errors
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::VariableNotFound { key }
            | ConfigError::DefaultNotFound { key }
            | ConfigError::WrongType { key, .. }
            | ConfigError::RequiredVariableNotFound { key }
            | ConfigError::RequiredWrongType { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Builds the not-found error matching the requirement of the lookup
    pub(crate) fn not_found(key: &str, required: bool) -> Self {
        let key = key.to_string();
        if required {
            ConfigError::RequiredVariableNotFound { key }
        } else {
            ConfigError::VariableNotFound { key }
        }
    }

    /// Builds the wrong-type error matching the requirement of the lookup
    pub(crate) fn wrong_type(key: &str, expected: &'static str, required: bool) -> Self {
        let key = key.to_string();
        if required {
            ConfigError::RequiredWrongType { key, expected }
        } else {
            ConfigError::WrongType { key, expected }
        }
    }
}

impl serde::de::Error for ConfigError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ConfigError::Deserialize {
            message: msg.to_string(),
        }
    }
}
