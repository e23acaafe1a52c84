//! Dictionary encoding for a single string column.
//!
//! # Architecture
//!
//! ```text
//! DictionaryEncoder
//! └── state: Mutex<EncoderState>
//!     ├── table:   KeyTable   ("test" -> 0, "test1" -> 1)
//!     └── encoded: Vec<Code>  [0, 0, ..., 0, 1]
//! ```
//!
//! The key table and the encoded column sit behind one lock so that a code
//! is never visible without its append, and vice versa. Each `encode` call
//! holds the lock for its whole batch: codes from one call are assigned and
//! appended in input order, and batches from concurrent calls never
//! interleave.
//!
//! Scans run against a [`ColumnSnapshot`], an immutable copy taken once
//! encoding has finished, and never touch the lock.

mod fanout;
mod key_table;
mod snapshot;
mod types;

pub use fanout::{EncodeTask, FanOut};
pub use key_table::KeyTable;
pub use snapshot::ColumnSnapshot;
pub use types::{Code, MAX_DISTINCT_KEYS};

use crate::error::{Error, Result};
use crate::sync::{self, Mutex};

#[derive(Debug, Default)]
struct EncoderState {
    table: KeyTable,
    encoded: Vec<Code>,
}

/// Shared dictionary plus the encoded column it produced.
///
/// `DictionaryEncoder` is `Sync`: wrap it in an `Arc` (or borrow it from a
/// scope) to encode disjoint chunks of one column from several workers
/// into a single consistent code space.
#[derive(Debug)]
pub struct DictionaryEncoder {
    state: Mutex<EncoderState>,
}

impl Default for DictionaryEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryEncoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EncoderState::default()),
        }
    }

    /// Encodes a batch of strings.
    ///
    /// Every item not yet in the dictionary receives the next dense code;
    /// then its code is appended to the encoded column. The batch is atomic
    /// with respect to other `encode` calls.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CodeSpaceExhausted`] when the batch would push the
    /// dictionary past [`MAX_DISTINCT_KEYS`]. Nothing is inserted or
    /// appended in that case.
    pub fn encode<S: AsRef<str>>(&self, items: &[S]) -> Result<()> {
        let mut state = sync::lock(&self.state);
        let EncoderState { table, encoded } = &mut *state;

        table
            .new_keys_fit(items)
            .map_err(|requested| Error::CodeSpaceExhausted {
                distinct: table.len(),
                requested,
            })?;

        let distinct_before = table.len();
        encoded.reserve(items.len());
        for item in items {
            encoded.push(table.intern(item.as_ref()));
        }

        tracing::debug!(
            items = items.len(),
            new_keys = table.len() - distinct_before,
            distinct = table.len(),
            rows = encoded.len(),
            "encoded batch"
        );
        Ok(())
    }

    /// Looks up the code of `item`.
    ///
    /// Returns `None` when the item has never been encoded.
    #[must_use]
    pub fn query(&self, item: &str) -> Option<Code> {
        sync::lock(&self.state).table.get_code(item)
    }

    /// Returns the codes of every dictionary key starting with `prefix`.
    ///
    /// Matching is a case-sensitive byte prefix; the empty prefix matches
    /// every key. Order of the result is unspecified.
    #[must_use]
    pub fn prefix_scan(&self, prefix: &str) -> Vec<Code> {
        sync::lock(&self.state).table.prefix_codes(prefix)
    }

    /// Returns the key a code was assigned to.
    #[must_use]
    pub fn decode(&self, code: Code) -> Option<String> {
        sync::lock(&self.state).table.get(code).map(str::to_owned)
    }

    /// Dictionary keys in code order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        sync::lock(&self.state).table.keys().to_vec()
    }

    /// Number of distinct keys in the dictionary.
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        sync::lock(&self.state).table.len()
    }

    /// Number of rows in the encoded column.
    #[must_use]
    pub fn len(&self) -> usize {
        sync::lock(&self.state).encoded.len()
    }

    /// Returns true if nothing has been encoded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        sync::lock(&self.state).encoded.is_empty()
    }

    /// Copies the dictionary keys and encoded column under the lock.
    ///
    /// Later `encode` calls do not affect the returned snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ColumnSnapshot {
        let state = sync::lock(&self.state);
        ColumnSnapshot::new(state.table.keys().to_vec(), state.encoded.clone())
    }

    /// Consumes the encoder, moving its state into a snapshot without copying.
    #[must_use]
    pub fn into_snapshot(self) -> ColumnSnapshot {
        let EncoderState { table, encoded } = sync::into_inner(self.state);
        ColumnSnapshot::from_parts(table, encoded)
    }
}
