//! # colscan core
//!
//! In-memory dictionary encoding and scans for a single string column.
//!
//! A column of repeated strings is encoded into dense `u32` codes through a
//! shared, thread-safe dictionary. Two query kinds are answered both by a
//! scalar baseline and by vector kernels so the two can be compared:
//!
//! - **Equality**: rows whose code equals a target, 4 lanes per step.
//! - **Prefix**: keys starting with a prefix, 16 bytes per step.
//!
//! ## Quick Start
//!
//! ```rust
//! use colscan_core::{DictionaryEncoder, VectorScanner, ScanOptions};
//!
//! let encoder = DictionaryEncoder::new();
//! encoder.encode(&["test", "test", "test1"])?;
//!
//! assert_eq!(encoder.query("test1"), Some(1));
//!
//! let snapshot = encoder.snapshot();
//! let scanner = VectorScanner::new(ScanOptions::default());
//! assert_eq!(scanner.equality(snapshot.encoded(), 1)?, vec![2]);
//! assert_eq!(scanner.prefix(snapshot.keys(), "test")?, vec![0, 1]);
//! # Ok::<(), colscan_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Lane arithmetic moves between usize, u32 and i32 bit patterns.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::ptr_as_ptr)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod compare;
pub mod config;
pub mod dictionary;
pub mod error;
#[cfg(test)]
mod error_tests;
pub mod kv;
pub mod scan;
pub mod sync;

pub use compare::{compare_equality, compare_prefix, compare_prefix_rows, Comparison};
pub use config::{ColscanConfig, ConfigError, EncodeConfig, LoggingConfig, ScanConfig};
pub use dictionary::{
    Code, ColumnSnapshot, DictionaryEncoder, EncodeTask, FanOut, KeyTable, MAX_DISTINCT_KEYS,
};
pub use error::{Error, Result};
pub use kv::KeyValueStore;
pub use scan::{
    equality_indices, prefix_indices, scan_features_info, simd_equality, simd_prefix_scan,
    BackendPreference, PrefixPolicy, PreparedPrefix, ScalarScanner, ScanBackend, ScanFeatures,
    ScanOptions, TailPolicy, VectorScanner, LANES, REGISTER_BYTES,
};
