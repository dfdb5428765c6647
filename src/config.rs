//! The [`Config`] object: loading, lookup, defaults and typed access
//!
//! Accessors never return `Result`. Failures are stored in a single error
//! slot, readable through [`Config::last_error`], and the accessor returns an
//! empty string or zero. Fatal errors stay in the slot and short-circuit
//! every later read until a load succeeds.

use crate::assembler::assemble;
use crate::error::{ConfigError, Result};
use crate::escape::EscapeTable;
use crate::text::{looks_like_float, looks_like_integer, strip};
use crate::variable::{self, Variable};
use indexmap::IndexMap;
use log::{debug, error};
use std::path::{Path, PathBuf};

/// Characters that drive the file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Delimiter between key and value
    pub separator: char,
    /// Escape character, also the line continuation marker
    pub escape: char,
    /// Marks a whole line as a comment
    pub comment: char,
}

impl ConfigOptions {
    pub const DEFAULT_SEPARATOR: char = ':';
    pub const DEFAULT_ESCAPE: char = '\\';
    pub const DEFAULT_COMMENT: char = '#';

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = comment;
        self
    }

    /// Rejects option sets that make lines ambiguous
    pub fn validate(&self) -> Result<()> {
        if self.separator == self.escape {
            return Err(ConfigError::ConflictingSeparatorEscape {
                character: self.separator,
            });
        }
        Ok(())
    }
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            separator: Self::DEFAULT_SEPARATOR,
            escape: Self::DEFAULT_ESCAPE,
            comment: Self::DEFAULT_COMMENT,
        }
    }
}

/// Conversion of a default into the text form stored in the default table.
///
/// The text must read back through the matching accessor, so finite floats
/// always keep a fractional part (`2.0`, never `2`).
pub trait DefaultValue {
    fn to_default_value(&self) -> String;
}

impl DefaultValue for str {
    fn to_default_value(&self) -> String {
        self.to_string()
    }
}

impl DefaultValue for String {
    fn to_default_value(&self) -> String {
        self.clone()
    }
}

impl<T: DefaultValue + ?Sized> DefaultValue for &T {
    fn to_default_value(&self) -> String {
        (**self).to_default_value()
    }
}

macro_rules! display_default_value {
    ($($ty:ty),*) => {
        $(
            impl DefaultValue for $ty {
                fn to_default_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_default_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char);

macro_rules! float_default_value {
    ($($ty:ty),*) => {
        $(
            impl DefaultValue for $ty {
                fn to_default_value(&self) -> String {
                    // Display never uses exponents, so only the '.' can be missing
                    let mut text = self.to_string();
                    if self.is_finite() && !text.contains('.') {
                        text.push_str(".0");
                    }
                    text
                }
            }
        )*
    };
}

float_default_value!(f32, f64);

const INTEGER: &str = "integer";
const FLOAT: &str = "floating";

/// A loaded key/value configuration file
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    options: ConfigOptions,
    escapes: EscapeTable,
    variables: Vec<Variable>,
    defaults: IndexMap<String, String>,
    line_errors: Vec<ConfigError>,
    error: Option<ConfigError>,
}

impl Config {
    /// Loads `path` with the default `:` separator and `\` escape character
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::with_options(path, ConfigOptions::default())
    }

    /// Loads `path` with explicit options
    pub fn with_options(path: impl AsRef<Path>, options: ConfigOptions) -> Self {
        let mut config = Self {
            path: path.as_ref().to_path_buf(),
            options,
            escapes: EscapeTable::new(options.escape),
            variables: Vec::new(),
            defaults: IndexMap::new(),
            line_errors: Vec::new(),
            error: None,
        };
        config.reload();
        config
    }

    /// Switches to `path` and loads it. Returns true when the load succeeded.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        self.path = path.as_ref().to_path_buf();
        self.reload()
    }

    /// Re-reads the current file, rebuilding the variable table.
    ///
    /// Defaults are kept. Returns true when the load succeeded; per-line
    /// errors do not make a load fail.
    pub fn reload(&mut self) -> bool {
        self.variables.clear();
        self.line_errors.clear();

        match self.read_variables() {
            Ok(()) => {
                self.error = self.line_errors.last().cloned();
                true
            }
            Err(err) => {
                error!("{}", err);
                self.error = Some(err);
                false
            }
        }
    }

    fn read_variables(&mut self) -> Result<()> {
        self.options.validate()?;
        let source = read_source(&self.path)?;

        let assembly = assemble(source.lines(), &self.options, &self.escapes);
        debug!(
            "loaded {} variables from '{}' ({} malformed lines)",
            assembly.variables.len(),
            self.path.display(),
            assembly.errors.len()
        );

        self.variables = assembly.variables;
        self.line_errors = assembly.errors;
        Ok(())
    }

    /// Value of `key`, falling back to its default.
    ///
    /// Returns an empty string and sets [`ConfigError::VariableNotFound`]
    /// when neither exists.
    pub fn get(&mut self, key: &str) -> String {
        let result = self.lookup(key, false);
        self.record(result)
    }

    /// Like [`get`](Self::get), but a miss is fatal
    pub fn require(&mut self, key: &str) -> String {
        let result = self.lookup(key, true);
        self.record(result)
    }

    /// Value of `key` as an integer, `0` on failure
    pub fn get_int(&mut self, key: &str) -> i64 {
        let result = self.lookup_int(key, false);
        self.record(result)
    }

    /// Like [`get_int`](Self::get_int), but a miss or a non-integer value is fatal
    pub fn require_int(&mut self, key: &str) -> i64 {
        let result = self.lookup_int(key, true);
        self.record(result)
    }

    /// Value of `key` as a float, `0.0` on failure
    pub fn get_float(&mut self, key: &str) -> f64 {
        let result = self.lookup_float(key, false);
        self.record(result)
    }

    /// Like [`get_float`](Self::get_float), but a miss or a non-float value is fatal
    pub fn require_float(&mut self, key: &str) -> f64 {
        let result = self.lookup_float(key, true);
        self.record(result)
    }

    /// Registered default for `key`, ignoring the file
    pub fn get_default(&mut self, key: &str) -> String {
        let result = self.begin_access().and_then(|()| {
            self.defaults
                .get(key)
                .cloned()
                .ok_or_else(|| ConfigError::DefaultNotFound {
                    key: key.to_string(),
                })
        });
        self.record(result)
    }

    /// Sets the default for `key`. Returns true if a default already existed.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl DefaultValue) -> bool {
        self.defaults
            .insert(key.into(), value.to_default_value())
            .is_some()
    }

    /// The outstanding error, if any
    pub fn last_error(&self) -> Option<&ConfigError> {
        self.error.as_ref()
    }

    /// Clears a non-fatal error. Returns true if the slot is now empty.
    pub fn clear_error(&mut self) -> bool {
        if self.error.as_ref().is_some_and(ConfigError::is_fatal) {
            return false;
        }
        self.error = None;
        true
    }

    /// True when no fatal error is outstanding
    pub fn is_loaded(&self) -> bool {
        !self.error.as_ref().is_some_and(ConfigError::is_fatal)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Variables of the last load in file order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn defaults(&self) -> &IndexMap<String, String> {
        &self.defaults
    }

    /// Every per-line error of the last load in file order
    pub fn line_errors(&self) -> &[ConfigError] {
        &self.line_errors
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Fails with the outstanding fatal error, otherwise clears the slot
    fn begin_access(&mut self) -> Result<()> {
        match &self.error {
            Some(err) if err.is_fatal() => Err(err.clone()),
            _ => {
                self.error = None;
                Ok(())
            }
        }
    }

    fn record<T: Default>(&mut self, result: Result<T>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                debug!("{}", err);
                self.error = Some(err);
                T::default()
            }
        }
    }

    fn lookup(&mut self, key: &str, required: bool) -> Result<String> {
        self.begin_access()?;

        if let Some(value) = variable::find(&self.variables, key) {
            return Ok(value.to_string());
        }
        if let Some(value) = self.defaults.get(key) {
            debug!("variable '{}' not in file, using its default", key);
            return Ok(value.clone());
        }
        Err(ConfigError::not_found(key, required))
    }

    fn lookup_int(&mut self, key: &str, required: bool) -> Result<i64> {
        let value = self.lookup(key, required)?;
        if !looks_like_integer(&value) {
            return Err(ConfigError::wrong_type(key, INTEGER, required));
        }
        // Shape is already checked, so only overflow can fail here
        strip(&value)
            .parse()
            .map_err(|_| ConfigError::wrong_type(key, INTEGER, required))
    }

    fn lookup_float(&mut self, key: &str, required: bool) -> Result<f64> {
        let value = self.lookup(key, required)?;
        if !looks_like_float(&value) {
            return Err(ConfigError::wrong_type(key, FLOAT, required));
        }
        match strip(&value).parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(ConfigError::wrong_type(key, FLOAT, required)),
        }
    }

    /// The outstanding fatal error, if any
    pub(crate) fn fatal_error(&self) -> Option<&ConfigError> {
        self.error.as_ref().filter(|err| err.is_fatal())
    }

    /// File variables (first match per key) followed by defaults for absent keys
    pub(crate) fn effective_variables(&self) -> IndexMap<&str, &str> {
        let mut merged = IndexMap::with_capacity(self.variables.len() + self.defaults.len());
        for variable in &self.variables {
            merged
                .entry(variable.key.as_str())
                .or_insert(variable.value.as_str());
        }
        for (key, value) in &self.defaults {
            merged.entry(key.as_str()).or_insert(value.as_str());
        }
        merged
    }
}

/// Reads the whole file, classifying failures as missing or unreadable
fn read_source(path: &Path) -> Result<String> {
    let absolute = || std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    if !path.exists() {
        return Err(ConfigError::FileNotFound { path: absolute() });
    }

    let bytes = std::fs::read(path).map_err(|_| ConfigError::AccessDenied { path: absolute() })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
