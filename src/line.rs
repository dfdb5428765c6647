//! Splitting of a single data line into key and raw value

use crate::config::ConfigOptions;
use crate::error::{ConfigError, Result};
use crate::text::{is_line_continuation, strip};
use crate::variable::Variable;

/// Outcome of parsing one data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Stripped key and the (possibly partial) value
    pub variable: Variable,
    /// The value continues on the next physical line
    pub continues: bool,
    /// Whether the value was stripped; continuation lines follow the same policy
    pub strip: bool,
}

/// Splits data lines around a configured separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParser {
    separator: char,
    escape: char,
}

impl LineParser {
    pub fn new(separator: char, escape: char) -> Self {
        Self { separator, escape }
    }

    pub fn from_options(options: &ConfigOptions) -> Self {
        Self::new(options.separator, options.escape)
    }

    /// Parses `line`, reporting failures against the 1-based `line_number`.
    ///
    /// The key is everything before the first separator, stripped. The value
    /// is stripped unless the separator is the last character of the line or
    /// is immediately followed by a second separator, which is consumed.
    pub fn parse(&self, line: &str, line_number: usize) -> Result<ParsedLine> {
        let Some((raw_key, rest)) = line.split_once(self.separator) else {
            return Err(if strip(line).is_empty() {
                ConfigError::EmptyKey { line: line_number }
            } else {
                ConfigError::MissingSeparator { line: line_number }
            });
        };

        let key = strip(raw_key);
        if key.is_empty() {
            return Err(ConfigError::EmptyKey { line: line_number });
        }

        let (mut value, strip_value) = if rest.is_empty() {
            (rest, false)
        } else if let Some(unstripped) = rest.strip_prefix(self.separator) {
            (unstripped, false)
        } else {
            (rest, true)
        };

        let continues = is_line_continuation(value, self.escape);
        if continues {
            value = &value[..value.len() - self.escape.len_utf8()];
        }
        if strip_value {
            value = strip(value);
        }

        Ok(ParsedLine {
            variable: Variable::new(key, value),
            continues,
            strip: strip_value,
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::from_options(&ConfigOptions::default())
    }
}
