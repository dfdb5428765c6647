//! Assembly of a physical line stream into the variable table
//!
//! The assembler is a two-state machine. In [`AssemblyState::Idle`] every
//! non-blank, non-comment line goes through the [`LineParser`]; a value
//! ending in an unescaped escape character moves it to
//! [`AssemblyState::Continuing`], where raw lines are appended to the
//! in-progress value until one no longer ends in the escape character.
//! Escape sequences are decoded once, after the whole stream is consumed.

use crate::config::ConfigOptions;
use crate::error::ConfigError;
use crate::escape::EscapeTable;
use crate::line::LineParser;
use crate::text::{is_line_continuation, lstrip, strip};
use crate::variable::Variable;
use log::warn;

/// State of the assembler between two physical lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyState {
    /// Expecting a new key/value line
    Idle,
    /// Appending lines to an in-progress value
    Continuing {
        variable: Variable,
        strip: bool,
        /// Line the variable started on
        line: usize,
    },
}

/// Result of assembling a line stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Variables in file order, escape sequences already decoded
    pub variables: Vec<Variable>,
    /// Per-line errors in file order
    pub errors: Vec<ConfigError>,
}

impl Assembly {
    /// The most recent per-line error, if any
    pub fn last_error(&self) -> Option<&ConfigError> {
        self.errors.last()
    }
}

/// Line-by-line driver that builds an [`Assembly`]
#[derive(Debug)]
pub struct Assembler<'a> {
    parser: LineParser,
    comment: char,
    escape: char,
    escapes: &'a EscapeTable,
    state: AssemblyState,
    line_number: usize,
    assembly: Assembly,
}

impl<'a> Assembler<'a> {
    pub fn new(options: &ConfigOptions, escapes: &'a EscapeTable) -> Self {
        Self {
            parser: LineParser::from_options(options),
            comment: options.comment,
            escape: options.escape,
            escapes,
            state: AssemblyState::Idle,
            line_number: 0,
            assembly: Assembly::default(),
        }
    }

    pub fn state(&self) -> &AssemblyState {
        &self.state
    }

    /// Feeds the next physical line, without its line terminator
    pub fn push_line(&mut self, line: &str) {
        self.line_number += 1;

        match std::mem::replace(&mut self.state, AssemblyState::Idle) {
            AssemblyState::Idle => self.start_variable(line),
            AssemblyState::Continuing {
                mut variable,
                strip: strip_value,
                line: start,
            } => {
                // Continuation lines are stripped before the marker is dropped,
                // so whitespace ahead of a trailing marker survives
                let continues = is_line_continuation(line, self.escape);
                let mut segment = if strip_value { strip(line) } else { line };
                if continues {
                    segment = segment.strip_suffix(self.escape).unwrap_or(segment);
                }

                variable.value.push('\n');
                variable.value.push_str(segment);

                if continues {
                    self.state = AssemblyState::Continuing {
                        variable,
                        strip: strip_value,
                        line: start,
                    };
                } else {
                    self.assembly.variables.push(variable);
                }
            }
        }
    }

    fn start_variable(&mut self, line: &str) {
        if strip(line).is_empty() || lstrip(line).starts_with(self.comment) {
            return;
        }

        match self.parser.parse(line, self.line_number) {
            Ok(parsed) if parsed.continues => {
                self.state = AssemblyState::Continuing {
                    variable: parsed.variable,
                    strip: parsed.strip,
                    line: self.line_number,
                };
            }
            Ok(parsed) => self.assembly.variables.push(parsed.variable),
            Err(error) => {
                warn!("{}", error);
                self.assembly.errors.push(error);
            }
        }
    }

    /// Ends the stream and decodes escape sequences in every stored value
    pub fn finish(mut self) -> Assembly {
        if let AssemblyState::Continuing { variable, line, .. } = &self.state {
            warn!(
                "variable '{}' starting on config line number {} is continued past the end of the file and was dropped",
                variable.key, line
            );
        }

        for variable in &mut self.assembly.variables {
            variable.value = self.escapes.resolve(&variable.value);
        }

        self.assembly
    }
}

/// Assembles a whole line stream
pub fn assemble<'l, I>(lines: I, options: &ConfigOptions, escapes: &EscapeTable) -> Assembly
where
    I: IntoIterator<Item = &'l str>,
{
    let mut assembler = Assembler::new(options, escapes);
    for line in lines {
        assembler.push_line(line);
    }
    assembler.finish()
}
