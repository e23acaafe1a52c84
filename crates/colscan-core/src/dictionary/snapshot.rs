//! Immutable view of an encoded column.

use super::key_table::KeyTable;
use super::types::Code;

/// Dictionary keys (in code order) and the encoded column at one instant.
///
/// Because the snapshot owns its data, scanning it can never observe a
/// half-finished `encode`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSnapshot {
    keys: Vec<String>,
    encoded: Vec<Code>,
}

impl ColumnSnapshot {
    pub(crate) fn new(keys: Vec<String>, encoded: Vec<Code>) -> Self {
        Self { keys, encoded }
    }

    pub(crate) fn from_parts(table: KeyTable, encoded: Vec<Code>) -> Self {
        Self {
            keys: table.into_keys(),
            encoded,
        }
    }

    /// Dictionary keys; `keys()[code]` is the key for `code`.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Encoded column, one code per encoded row.
    #[must_use]
    pub fn encoded(&self) -> &[Code] {
        &self.encoded
    }

    /// Returns the key for a code.
    #[must_use]
    pub fn decode(&self, code: Code) -> Option<&str> {
        self.keys.get(code as usize).map(String::as_str)
    }

    /// Iterates the decoded column, row by row.
    pub fn rows(&self) -> impl Iterator<Item = &str> + '_ {
        self.encoded
            .iter()
            .map(move |&code| self.keys[code as usize].as_str())
    }

    /// Number of encoded rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    /// Returns true if the snapshot has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        self.keys.len()
    }
}
