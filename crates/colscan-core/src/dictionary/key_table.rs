//! Append-only key table backing the dictionary.
//!
//! Codes are dense: the n-th distinct key ever interned receives code `n`.
//! Nothing is ever removed or renumbered.

use rustc_hash::FxHashMap;

use super::types::{Code, MAX_DISTINCT_KEYS};

/// Bidirectional key ↔ code table.
#[derive(Debug, Default, Clone)]
pub struct KeyTable {
    /// Key to code mapping
    key_to_code: FxHashMap<String, Code>,
    /// Code to key mapping, indexed by code
    code_to_key: Vec<String>,
}

impl KeyTable {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a key, returning its code.
    ///
    /// If the key already exists, returns the existing code; otherwise the
    /// key receives the current table size as its code.
    ///
    /// # Panics
    ///
    /// Panics if the table already holds [`MAX_DISTINCT_KEYS`] keys. Callers
    /// reserve capacity with [`KeyTable::new_keys_fit`] first.
    pub fn intern(&mut self, key: &str) -> Code {
        if let Some(&code) = self.key_to_code.get(key) {
            return code;
        }

        let len = self.code_to_key.len();
        assert!(
            len < MAX_DISTINCT_KEYS,
            "KeyTable overflow: cannot intern more than {MAX_DISTINCT_KEYS} keys"
        );
        #[allow(clippy::cast_possible_truncation)] // Bounds checked above
        let code = len as Code;
        self.code_to_key.push(key.to_string());
        self.key_to_code.insert(key.to_string(), code);
        code
    }

    /// Checks that interning every key in `keys` stays within the code space.
    ///
    /// Only counts distinct unseen keys when the batch could possibly overflow,
    /// so the common case is a single comparison. On failure returns the
    /// number of distinct unseen keys in the batch.
    pub fn new_keys_fit<S: AsRef<str>>(&self, keys: &[S]) -> Result<(), usize> {
        let remaining = MAX_DISTINCT_KEYS - self.code_to_key.len();
        if keys.len() <= remaining {
            return Ok(());
        }

        let mut unseen = rustc_hash::FxHashSet::default();
        for key in keys {
            let key = key.as_ref();
            if !self.key_to_code.contains_key(key) {
                unseen.insert(key);
            }
        }
        if unseen.len() <= remaining {
            Ok(())
        } else {
            Err(unseen.len())
        }
    }

    /// Gets the key for a code.
    #[must_use]
    pub fn get(&self, code: Code) -> Option<&str> {
        self.code_to_key.get(code as usize).map(String::as_str)
    }

    /// Gets the code for a key without interning.
    #[must_use]
    pub fn get_code(&self, key: &str) -> Option<Code> {
        self.key_to_code.get(key).copied()
    }

    /// Returns the codes of every key starting with `prefix`.
    ///
    /// Iterates the hash map, so the order of the result is unspecified.
    #[must_use]
    pub fn prefix_codes(&self, prefix: &str) -> Vec<Code> {
        self.key_to_code
            .iter()
            .filter(|(key, _)| key.as_bytes().starts_with(prefix.as_bytes()))
            .map(|(_, &code)| code)
            .collect()
    }

    /// Keys in code order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.code_to_key
    }

    /// Consumes the table, returning the keys in code order.
    #[must_use]
    pub fn into_keys(self) -> Vec<String> {
        self.code_to_key
    }

    /// Returns the number of interned keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.code_to_key.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code_to_key.is_empty()
    }
}
