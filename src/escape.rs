//! Escape sequence decoding for finalized values

use smallvec::{SmallVec, smallvec};

/// One trigger character and the character it decodes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escapable {
    /// Character following the escape character
    pub character: char,
    /// Character the two-character sequence is replaced with
    pub replacement: char,
}

impl Escapable {
    pub const fn new(character: char, replacement: char) -> Self {
        Self {
            character,
            replacement,
        }
    }
}

/// Fixed table of escape sequences bound to one escape character.
///
/// Built once per [`Config`](crate::Config) and never mutated. Lookup is by
/// table order, so the escape character mapping to itself always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeTable {
    escape: char,
    entries: SmallVec<[Escapable; 4]>,
}

impl EscapeTable {
    /// Creates the standard table for `escape`: the escape character itself,
    /// then `n`, `r` and `t`
    pub fn new(escape: char) -> Self {
        Self {
            escape,
            entries: smallvec![
                Escapable::new(escape, escape),
                Escapable::new('n', '\n'),
                Escapable::new('r', '\r'),
                Escapable::new('t', '\t'),
            ],
        }
    }

    /// The escape character this table is bound to
    pub fn escape_char(&self) -> char {
        self.escape
    }

    /// Entries in lookup order
    pub fn entries(&self) -> &[Escapable] {
        &self.entries
    }

    /// Replacement for the sequence `escape` + `character`, if any
    pub fn replacement(&self, character: char) -> Option<char> {
        self.entries
            .iter()
            .find(|entry| entry.character == character)
            .map(|entry| entry.replacement)
    }

    /// Decodes every escape sequence in `value`.
    ///
    /// A known sequence becomes its replacement, an unknown one loses the
    /// escape character, and a dangling escape at the end is dropped. Output
    /// is never rescanned.
    pub fn resolve(&self, value: &str) -> String {
        if !value.contains(self.escape) {
            return value.to_string();
        }

        let mut output = String::with_capacity(value.len());
        let mut chars = value.chars();

        while let Some(c) = chars.next() {
            if c != self.escape {
                output.push(c);
                continue;
            }

            if let Some(next) = chars.next() {
                output.push(self.replacement(next).unwrap_or(next));
            }
        }

        output
    }
}

impl Default for EscapeTable {
    fn default() -> Self {
        Self::new('\\')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sequences() {
        let table = EscapeTable::default();
        assert_eq!(
            table.resolve("You can escape some chars: \\n,\\t,\\r"),
            "You can escape some chars: \n,\t,\r"
        );
    }

    #[test]
    fn test_escaped_escape_is_not_rescanned() {
        let table = EscapeTable::default();
        assert_eq!(
            table.resolve("And you can escape escape char: \\\\n"),
            "And you can escape escape char: \\n"
        );
        assert_eq!(table.resolve("\\\\\\\\"), "\\\\");
    }

    #[test]
    fn test_unknown_sequence_drops_escape() {
        let table = EscapeTable::default();
        assert_eq!(table.resolve("a\\qb"), "aqb");
        assert_eq!(table.resolve("\\#not a comment"), "#not a comment");
    }

    #[test]
    fn test_dangling_escape_is_dropped() {
        let table = EscapeTable::default();
        assert_eq!(table.resolve("trailing\\"), "trailing");
        assert_eq!(table.resolve("\\"), "");
    }

    #[test]
    fn test_no_escape_is_identity() {
        let table = EscapeTable::default();
        assert_eq!(table.resolve("plain value"), "plain value");
        assert_eq!(table.resolve(""), "");
    }

    #[test]
    fn test_custom_escape_character() {
        let table = EscapeTable::new('%');
        assert_eq!(table.escape_char(), '%');
        assert_eq!(table.resolve("100%% sure%n"), "100% sure\n");
        assert_eq!(table.resolve("back\\slash"), "back\\slash");
    }

    #[test]
    fn test_escape_char_shadowing_trigger() {
        // The self-mapping entry comes first, so 'n' as escape char maps "nn" to 'n'
        let table = EscapeTable::new('n');
        assert_eq!(table.replacement('n'), Some('n'));
        assert_eq!(table.resolve("anntb"), "antb");
        assert_eq!(table.resolve("ant"), "a\t");
    }

    #[test]
    fn test_table_order() {
        let table = EscapeTable::default();
        let triggers: Vec<char> = table.entries().iter().map(|e| e.character).collect();
        assert_eq!(triggers, vec!['\\', 'n', 'r', 't']);
    }
}
