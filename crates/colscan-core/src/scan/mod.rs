//! Scalar and vector scans over a dictionary-encoded column.
//!
//! Two query kinds, two implementations each:
//!
//! | Query    | Scalar                          | Vector                         |
//! |----------|---------------------------------|--------------------------------|
//! | equality | [`ScalarScanner::equality`]     | [`VectorScanner::equality`]    |
//! | prefix   | [`ScalarScanner::prefix`]       | [`VectorScanner::prefix`]      |
//!
//! Vector equality compares [`LANES`] codes per step and reports the exact
//! lanes that matched. Vector prefix compares [`REGISTER_BYTES`] key bytes
//! per step; longer prefixes are split into register-width blocks whose
//! results are AND-reduced. Both return indices in ascending order and must
//! agree with the scalar path as sets.
//!
//! Scans are pure functions over a slice. Taking that slice from a
//! [`ColumnSnapshot`](crate::ColumnSnapshot) after encoding finished is the
//! caller's job.

mod dispatch;
#[cfg(target_arch = "aarch64")]
mod neon;
mod portable;
mod prefix;
mod scalar;
#[cfg(target_arch = "x86_64")]
mod sse2;
mod types;

pub use dispatch::{scan_features_info, ScanBackend, ScanFeatures};
pub use prefix::{PrefixBlock, PreparedPrefix};
pub use scalar::{equality_indices, prefix_indices, ScalarScanner};
pub use types::{
    BackendPreference, PrefixPolicy, ScanOptions, TailPolicy, LANES, REGISTER_BYTES,
};

use crate::dictionary::Code;
use crate::error::{Error, Result};

/// Appends `base + lane` for every set bit of `mask`, lowest lane first.
#[inline]
pub(crate) fn push_lane_matches(mut mask: u32, base: usize, out: &mut Vec<usize>) {
    while mask != 0 {
        out.push(base + mask.trailing_zeros() as usize);
        mask &= mask - 1;
    }
}

/// Vector scans with configured tail and prefix handling.
///
/// # Example
///
/// ```
/// use colscan_core::{ScanOptions, VectorScanner};
///
/// let scanner = VectorScanner::new(ScanOptions::default());
/// let hits = scanner.equality(&[0, 1, 0, 1, 1], 1).unwrap();
/// assert_eq!(hits, vec![1, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VectorScanner {
    options: ScanOptions,
    backend: ScanBackend,
}

impl Default for VectorScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl VectorScanner {
    /// Creates a scanner, resolving the backend preference.
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            backend: ScanBackend::resolve(options.backend),
        }
    }

    /// Creates a scanner pinned to a specific backend.
    #[must_use]
    pub fn with_backend(options: ScanOptions, backend: ScanBackend) -> Self {
        Self { options, backend }
    }

    /// Backend this scanner runs.
    #[must_use]
    pub fn backend(&self) -> ScanBackend {
        self.backend
    }

    /// Options this scanner was built with.
    #[must_use]
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Indices `i` with `data[i] == target`, ascending.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedShape`] when `data.len()` is not a multiple of
    /// [`LANES`] and the tail policy is [`TailPolicy::Reject`].
    pub fn equality(&self, data: &[Code], target: Code) -> Result<Vec<usize>> {
        let tail = data.len() % LANES;
        if tail != 0 && self.options.tail_policy == TailPolicy::Reject {
            return Err(Error::UnsupportedShape {
                operation: "equality",
                reason: format!(
                    "column length {} is not a multiple of {LANES} lanes",
                    data.len()
                ),
            });
        }
        Ok(self.equality_with_fallback(data, target))
    }

    fn equality_with_fallback(&self, data: &[Code], target: Code) -> Vec<usize> {
        let full = data.len() - data.len() % LANES;
        let (blocks, tail) = data.split_at(full);

        let mut out = Vec::new();
        (self.backend.equality_kernel())(blocks, target, &mut out);

        if !tail.is_empty() {
            tracing::debug!(
                backend = self.backend.name(),
                tail = tail.len(),
                "Finishing partial block with scalar compare"
            );
            out.extend(
                tail.iter()
                    .enumerate()
                    .filter_map(|(i, &code)| (code == target).then_some(full + i)),
            );
        }
        out
    }

    /// Indices `i` with `keys[i]` starting with `prefix`, ascending.
    ///
    /// Keys shorter than the prefix are skipped before any vector compare.
    /// The empty prefix matches every key.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedShape`] when the prefix is longer than
    /// [`REGISTER_BYTES`] and the prefix policy is
    /// [`PrefixPolicy::SingleRegister`].
    pub fn prefix<S: AsRef<str>>(&self, keys: &[S], prefix: &str) -> Result<Vec<usize>> {
        if prefix.len() > REGISTER_BYTES && self.options.prefix_policy == PrefixPolicy::SingleRegister
        {
            tracing::warn!(
                prefix_len = prefix.len(),
                register = REGISTER_BYTES,
                "Rejecting prefix wider than one register"
            );
            return Err(Error::UnsupportedShape {
                operation: "prefix",
                reason: format!(
                    "prefix of {} bytes exceeds the {REGISTER_BYTES}-byte register",
                    prefix.len()
                ),
            });
        }
        Ok(self.prefix_chunked(keys, &PreparedPrefix::new(prefix)))
    }

    fn prefix_chunked<S: AsRef<str>>(&self, keys: &[S], prefix: &PreparedPrefix) -> Vec<usize> {
        let matches = self.backend.prefix_kernel();
        keys.iter()
            .enumerate()
            .filter_map(|(i, key)| {
                let bytes = key.as_ref().as_bytes();
                (bytes.len() >= prefix.len() && matches(prefix, bytes)).then_some(i)
            })
            .collect()
    }
}

/// Vector equality with default options (detected backend, scalar tail).
#[must_use]
pub fn simd_equality(data: &[Code], target: Code) -> Vec<usize> {
    VectorScanner::default().equality_with_fallback(data, target)
}

/// Vector prefix scan with default options (detected backend, chunked).
#[must_use]
pub fn simd_prefix_scan<S: AsRef<str>>(keys: &[S], prefix: &str) -> Vec<usize> {
    VectorScanner::default().prefix_chunked(keys, &PreparedPrefix::new(prefix))
}
