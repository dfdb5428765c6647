//! # SnapConfig
//!
//! A small reader for line-oriented `key: value` configuration files with
//! typed accessors, fallback defaults, multi-line values and escape sequences.
//!
//! ## File Format
//!
//! ```text
//! # Comment lines start with '#'
//! language: English
//! time_to_sleep: 2
//! average_computation_time: 0.35
//!
//! # A separator right after the separator (or at the end of the line)
//! # keeps the value unstripped
//! not_stripped:: This string isn't stripped
//!
//! # A trailing '\' continues the value on the next line
//! multiline: This variable is multiline \
//!            and each line is stripped.
//!
//! escaped: Tabs\tand newlines\nare decoded, \\ is a backslash
//! ```
//!
//! The separator (`:`), escape (`\`) and comment (`#`) characters can all be
//! changed through [`ConfigOptions`].
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use snapconfig::Config;
//!
//! let mut config = Config::open("config.txt");
//! config.set_default("time_to_sleep", 1);
//!
//! let language = config.get("language");
//! let sleep_seconds = config.get_int("time_to_sleep");
//!
//! if let Some(error) = config.last_error() {
//!     eprintln!("config: {}", error);
//! }
//! ```
//!
//! ## Error Handling
//!
//! Accessors return an empty string or zero on failure and record a
//! [`ConfigError`] in the instance's error slot. Fatal errors (a missing or
//! unreadable file, conflicting separator and escape characters, or a failed
//! `require*` lookup) block every later read until [`Config::reload`]
//! succeeds:
//!
//! ```rust
//! use snapconfig::{Config, ConfigError, ConfigOptions};
//!
//! let options = ConfigOptions::default().with_separator('\\');
//! let mut config = Config::with_options("config.txt", options);
//!
//! assert_eq!(config.get("language"), "");
//! assert!(matches!(
//!     config.last_error(),
//!     Some(ConfigError::ConflictingSeparatorEscape { .. })
//! ));
//! assert!(!config.is_loaded());
//! ```
//!
//! ## Typed Extraction
//!
//! The whole table can be deserialized into a struct with
//! [`Config::extract`], see the [`deserializer`] module.

pub mod assembler;
pub mod config;
pub mod deserializer;
pub mod error;
pub mod escape;
pub mod line;
pub mod text;
pub mod variable;


pub use assembler::{Assembler, Assembly, AssemblyState, assemble};
pub use config::{Config, ConfigOptions, DefaultValue};
pub use deserializer::ConfigDeserializer;
pub use error::{ConfigError, Result};
pub use escape::{Escapable, EscapeTable};
pub use line::{LineParser, ParsedLine};
pub use variable::Variable;
