//! Scalar (baseline) scans.
//!
//! These are the correctness references every vector backend is checked
//! against, and the fallback for tails the vector kernels do not cover.

use crate::dictionary::{Code, DictionaryEncoder};

use super::prefix::PreparedPrefix;

/// Baseline queries answered straight from the dictionary.
#[derive(Debug, Clone, Copy)]
pub struct ScalarScanner<'a> {
    encoder: &'a DictionaryEncoder,
}

impl<'a> ScalarScanner<'a> {
    /// Creates a scanner over an encoder.
    #[must_use]
    pub fn new(encoder: &'a DictionaryEncoder) -> Self {
        Self { encoder }
    }

    /// Exact match: the code of `item`, if it was ever encoded.
    #[must_use]
    pub fn equality(&self, item: &str) -> Option<Code> {
        self.encoder.query(item)
    }

    /// Codes of every key starting with `prefix`, in unspecified order.
    #[must_use]
    pub fn prefix(&self, prefix: &str) -> Vec<Code> {
        self.encoder.prefix_scan(prefix)
    }

    /// Row indices of an encoded column holding the code of `item`.
    ///
    /// Empty when `item` is not in the dictionary.
    #[must_use]
    pub fn equality_rows(&self, encoded: &[Code], item: &str) -> Vec<usize> {
        self.equality(item)
            .map(|code| equality_indices(encoded, code))
            .unwrap_or_default()
    }
}

/// Indices `i` with `data[i] == target`, ascending.
#[must_use]
pub fn equality_indices(data: &[Code], target: Code) -> Vec<usize> {
    data.iter()
        .enumerate()
        .filter_map(|(idx, &code)| (code == target).then_some(idx))
        .collect()
}

/// Indices `i` with `keys[i]` starting with `prefix`, ascending.
#[must_use]
pub fn prefix_indices<S: AsRef<str>>(keys: &[S], prefix: &str) -> Vec<usize> {
    keys.iter()
        .enumerate()
        .filter_map(|(idx, key)| key.as_ref().starts_with(prefix).then_some(idx))
        .collect()
}

/// Scalar block kernel, same contract as the vector ones.
pub(crate) fn equality_blocks(data: &[Code], target: Code, out: &mut Vec<usize>) {
    out.extend(
        data.iter()
            .enumerate()
            .filter_map(|(idx, &code)| (code == target).then_some(idx)),
    );
}

/// Scalar prefix kernel, same contract as the vector ones.
pub(crate) fn prefix_matches(prefix: &PreparedPrefix, key: &[u8]) -> bool {
    key.starts_with(prefix.as_bytes())
}
