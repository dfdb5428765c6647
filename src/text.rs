//! Whitespace stripping and character classification
//!
//! These helpers are shared by the line parser, the assembler and the typed
//! accessors. They operate on `&str` and never allocate.

/// Characters removed by [`strip`], [`lstrip`] and [`rstrip`]
pub const STRIP_CHARS: [char; 5] = [' ', '\t', '\r', '\n', '\u{0B}'];

#[inline]
fn is_strip_char(c: char) -> bool {
    STRIP_CHARS.contains(&c)
}

/// Removes strip characters from the start of `s`
pub fn lstrip(s: &str) -> &str {
    s.trim_start_matches(is_strip_char)
}

/// Removes strip characters from the end of `s`
pub fn rstrip(s: &str) -> &str {
    s.trim_end_matches(is_strip_char)
}

/// Removes strip characters from both ends of `s`
pub fn strip(s: &str) -> &str {
    lstrip(rstrip(s))
}

/// Checks whether `s` is shaped like an integer literal.
///
/// Surrounding whitespace is ignored. Only ASCII digits are allowed, with at
/// most one sign (`+` or `-`) and only as the first character.
pub fn looks_like_integer(s: &str) -> bool {
    let s = strip(s);
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Checks whether `s` is shaped like a floating point literal.
///
/// Surrounding whitespace is ignored. There must be exactly one `.` with at
/// least one digit on each side. Signs are not accepted.
pub fn looks_like_float(s: &str) -> bool {
    let s = strip(s);
    match s.split_once('.') {
        Some((whole, fraction)) => {
            !whole.is_empty()
                && !fraction.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Checks whether the character at byte `index` of `line` is escaped.
///
/// A character is escaped when it is preceded by an odd run of `escape`
/// characters. An index past the end or inside a multi-byte character is
/// never escaped.
pub fn is_char_escaped(line: &str, index: usize, escape: char) -> bool {
    match line.get(..index) {
        Some(before) => before.chars().rev().take_while(|&c| c == escape).count() % 2 == 1,
        None => false,
    }
}

/// Checks whether `line` ends with an escape character that is not itself escaped
pub fn is_line_continuation(line: &str, escape: char) -> bool {
    line.ends_with(escape) && !is_char_escaped(line, line.len() - escape.len_utf8(), escape)
}
