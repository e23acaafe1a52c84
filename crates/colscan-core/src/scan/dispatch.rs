//! Backend selection for vector scans.
//!
//! The best backend for the running CPU is detected once and cached in a
//! `OnceLock`; kernels are plain function pointers resolved from the
//! backend, so the hot loops carry no per-call feature checks.

use std::sync::OnceLock;

use crate::dictionary::Code;

use super::prefix::PreparedPrefix;
use super::types::BackendPreference;
use super::{portable, scalar};

/// Equality kernel over full blocks; appends matching indices.
pub(crate) type EqualityKernel = fn(&[Code], Code, &mut Vec<usize>);

/// Prefix kernel for one key at least as long as the prefix.
pub(crate) type PrefixKernel = fn(&PreparedPrefix, &[u8]) -> bool;

/// Detected backend, initialized on first use.
static DETECTED_BACKEND: OnceLock<ScanBackend> = OnceLock::new();

/// A concrete scan implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanBackend {
    /// Scalar loops.
    Scalar,
    /// Portable SIMD (`wide`).
    Portable,
    /// SSE2 intrinsics (x86_64).
    Sse2,
    /// NEON intrinsics (aarch64).
    Neon,
}

impl ScanBackend {
    /// The native backend for this target, if there is one.
    #[must_use]
    pub const fn native() -> Option<Self> {
        #[cfg(target_arch = "x86_64")]
        {
            Some(Self::Sse2)
        }
        #[cfg(target_arch = "aarch64")]
        {
            Some(Self::Neon)
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            None
        }
    }

    /// Best backend for the current CPU, detected once and cached.
    pub fn detected() -> Self {
        *DETECTED_BACKEND.get_or_init(|| {
            let backend = Self::native().unwrap_or(Self::Portable);
            tracing::info!(
                backend = backend.name(),
                features = scan_features_info().summary(),
                "Selected vector scan backend"
            );
            backend
        })
    }

    /// Maps a configured preference to a backend usable on this target.
    ///
    /// `Native` degrades to `Portable` (with a warning) where no native
    /// kernels exist.
    pub fn resolve(preference: BackendPreference) -> Self {
        match preference {
            BackendPreference::Auto => Self::detected(),
            BackendPreference::Scalar => Self::Scalar,
            BackendPreference::Portable => Self::Portable,
            BackendPreference::Native => Self::native().unwrap_or_else(|| {
                tracing::warn!(
                    arch = std::env::consts::ARCH,
                    "No native vector backend for this target, using portable SIMD"
                );
                Self::Portable
            }),
        }
    }

    /// Every backend that runs natively on this target.
    #[must_use]
    pub fn available() -> Vec<Self> {
        let mut backends = vec![Self::Scalar, Self::Portable];
        backends.extend(Self::native());
        backends
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Portable => "portable",
            Self::Sse2 => "sse2",
            Self::Neon => "neon",
        }
    }

    /// Returns true if this backend runs vector instructions.
    #[must_use]
    pub const fn is_vectorized(self) -> bool {
        !matches!(self, Self::Scalar)
    }

    pub(crate) fn equality_kernel(self) -> EqualityKernel {
        match self {
            Self::Scalar => scalar::equality_blocks,
            #[cfg(target_arch = "x86_64")]
            Self::Sse2 => super::sse2::equality_blocks_sse2_safe,
            #[cfg(target_arch = "aarch64")]
            Self::Neon => super::neon::equality_blocks_neon_safe,
            // Foreign native backends run the portable kernels
            _ => portable::equality_blocks_portable,
        }
    }

    pub(crate) fn prefix_kernel(self) -> PrefixKernel {
        match self {
            Self::Scalar => scalar::prefix_matches,
            #[cfg(target_arch = "x86_64")]
            Self::Sse2 => super::sse2::prefix_matches_sse2_safe,
            #[cfg(target_arch = "aarch64")]
            Self::Neon => super::neon::prefix_matches_neon_safe,
            _ => portable::prefix_matches_portable,
        }
    }
}

impl std::fmt::Display for ScanBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns information about the vector features of this CPU.
#[must_use]
pub fn scan_features_info() -> ScanFeatures {
    ScanFeatures::detect()
}

/// Vector instruction sets relevant to scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScanFeatures {
    /// SSE2 available (always on x86_64).
    pub sse2: bool,
    /// SSE4.1 available. Reported only; the kernels need SSE2.
    pub sse41: bool,
    /// AVX2 available. Reported only.
    pub avx2: bool,
    /// NEON available (always on aarch64).
    pub neon: bool,
}

impl ScanFeatures {
    /// Detects available features on the current CPU.
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self {
                sse2: is_x86_feature_detected!("sse2"),
                sse41: is_x86_feature_detected!("sse4.1"),
                avx2: is_x86_feature_detected!("avx2"),
                neon: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                sse2: false,
                sse41: false,
                avx2: false,
                neon: true,
            }
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self {
                sse2: false,
                sse41: false,
                avx2: false,
                neon: false,
            }
        }
    }

    /// Comma-separated list of detected features, or `"none"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let names: Vec<&str> = [
            (self.sse2, "sse2"),
            (self.sse41, "sse4.1"),
            (self.avx2, "avx2"),
            (self.neon, "neon"),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect();

        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(",")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detected_is_cached() {
        assert_eq!(ScanBackend::detected(), ScanBackend::detected());
    }

    #[test]
    fn test_detected_prefers_native() {
        let expected = ScanBackend::native().unwrap_or(ScanBackend::Portable);
        assert_eq!(ScanBackend::detected(), expected);
    }

    #[test]
    fn test_resolve_explicit_preferences() {
        assert_eq!(
            ScanBackend::resolve(BackendPreference::Scalar),
            ScanBackend::Scalar
        );
        assert_eq!(
            ScanBackend::resolve(BackendPreference::Portable),
            ScanBackend::Portable
        );
        assert_eq!(
            ScanBackend::resolve(BackendPreference::Native),
            ScanBackend::native().unwrap_or(ScanBackend::Portable)
        );
    }

    #[test]
    fn test_available_contains_baselines() {
        let available = ScanBackend::available();
        assert!(available.contains(&ScanBackend::Scalar));
        assert!(available.contains(&ScanBackend::Portable));
        assert!(available.contains(&ScanBackend::detected()));
    }

    #[test]
    fn test_names() {
        assert_eq!(ScanBackend::Sse2.to_string(), "sse2");
        assert_eq!(ScanBackend::Neon.name(), "neon");
        assert!(!ScanBackend::Scalar.is_vectorized());
        assert!(ScanBackend::Portable.is_vectorized());
    }

    #[test]
    fn test_features_match_target() {
        let features = scan_features_info();
        #[cfg(target_arch = "x86_64")]
        assert!(features.sse2);
        #[cfg(target_arch = "aarch64")]
        assert!(features.neon);
        assert!(!features.summary().is_empty());
    }
}
