//! Scan options and policies.

use serde::{Deserialize, Serialize};

/// Number of 32-bit codes compared per vector step.
pub const LANES: usize = 4;

/// Width in bytes of one prefix compare register.
pub const REGISTER_BYTES: usize = 16;

/// Which implementation a [`VectorScanner`](super::VectorScanner) runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// Best native backend for this CPU, portable SIMD otherwise.
    #[default]
    Auto,
    /// Scalar loops behind the vector API (useful as a control).
    Scalar,
    /// Portable SIMD through the `wide` crate.
    Portable,
    /// Native intrinsics (SSE2 on x86_64, NEON on aarch64).
    Native,
}

/// Handling of a trailing partial block of codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailPolicy {
    /// Compare the last `len % LANES` codes with a scalar loop.
    #[default]
    ScalarFallback,
    /// Refuse inputs whose length is not a multiple of [`LANES`].
    Reject,
}

/// Handling of prefixes wider than one compare register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixPolicy {
    /// Compare the prefix register by register and AND the results.
    #[default]
    Chunked,
    /// Refuse prefixes longer than [`REGISTER_BYTES`].
    SingleRegister,
}

/// Options for a [`VectorScanner`](super::VectorScanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Backend preference.
    pub backend: BackendPreference,
    /// Partial block handling.
    pub tail_policy: TailPolicy,
    /// Wide prefix handling.
    pub prefix_policy: PrefixPolicy,
}

impl ScanOptions {
    /// Builder: backend preference.
    #[must_use]
    pub fn with_backend(mut self, backend: BackendPreference) -> Self {
        self.backend = backend;
        self
    }

    /// Builder: partial block handling.
    #[must_use]
    pub fn with_tail_policy(mut self, tail_policy: TailPolicy) -> Self {
        self.tail_policy = tail_policy;
        self
    }

    /// Builder: wide prefix handling.
    #[must_use]
    pub fn with_prefix_policy(mut self, prefix_policy: PrefixPolicy) -> Self {
        self.prefix_policy = prefix_policy;
        self
    }
}
