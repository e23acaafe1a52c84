//! NEON kernels for aarch64.
//!
//! NEON is guaranteed on every aarch64 target.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::prefix::{key_window, PreparedPrefix};
use super::push_lane_matches;
use super::types::{LANES, REGISTER_BYTES};
use crate::dictionary::Code;

/// NEON equality over full 4-lane blocks.
///
/// A block with no equal lane is rejected with one horizontal max; only
/// blocks that hit are stored back to resolve the exact lanes.
///
/// # Safety
/// Requires aarch64 target with NEON support.
#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn equality_blocks_neon(data: &[Code], target: Code, out: &mut Vec<usize>) {
    let blocks = data.len() / LANES;
    let needle = vdupq_n_u32(target);

    for block in 0..blocks {
        let offset = block * LANES;
        // SAFETY: offset + LANES <= blocks * LANES <= data.len()
        let chunk = vld1q_u32(data.as_ptr().add(offset));
        let cmp = vceqq_u32(chunk, needle);
        if vmaxvq_u32(cmp) == 0 {
            continue;
        }

        let mut lanes = [0u32; LANES];
        vst1q_u32(lanes.as_mut_ptr(), cmp);
        let mask = lanes
            .iter()
            .enumerate()
            .fold(0u32, |mask, (lane, &bits)| mask | ((bits & 1) << lane));
        push_lane_matches(mask, offset, out);
    }
}

/// NEON prefix test: 16 bytes per compare, blocks AND-reduced.
///
/// The byte-equality vector is narrowed to a 64-bit mask holding four bits
/// per lane, then checked against the significant lanes of each block.
///
/// # Safety
/// Requires aarch64 target with NEON support. `key.len() >= prefix.len()`.
#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn prefix_matches_neon(prefix: &PreparedPrefix, key: &[u8]) -> bool {
    debug_assert!(key.len() >= prefix.len());
    let mut scratch = [0u8; REGISTER_BYTES];

    for (i, block) in prefix.blocks().iter().enumerate() {
        let window = key_window(key, i * REGISTER_BYTES, &mut scratch);
        // SAFETY: both arrays are REGISTER_BYTES long
        let kv = vld1q_u8(window.as_ptr());
        let pv = vld1q_u8(block.bytes.as_ptr());
        let eq = vceqq_u8(kv, pv);
        let nibbles = vget_lane_u64::<0>(vreinterpret_u64_u8(vshrn_n_u16::<4>(
            vreinterpretq_u16_u8(eq),
        )));
        let want = block.nibble_mask();
        if nibbles & want != want {
            return false;
        }
    }
    true
}

/// Safe wrapper for NEON equality.
#[inline]
pub fn equality_blocks_neon_safe(data: &[Code], target: Code, out: &mut Vec<usize>) {
    // SAFETY: NEON is guaranteed on all aarch64 targets we support
    unsafe { equality_blocks_neon(data, target, out) }
}

/// Safe wrapper for NEON prefix test.
#[inline]
pub fn prefix_matches_neon_safe(prefix: &PreparedPrefix, key: &[u8]) -> bool {
    // SAFETY: NEON is guaranteed on all aarch64 targets we support
    unsafe { prefix_matches_neon(prefix, key) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_neon_reports_exact_lanes() {
        let data = [7, 1, 7, 7, 2, 2, 2, 7];
        let mut out = Vec::new();
        equality_blocks_neon_safe(&data, 7, &mut out);
        assert_eq!(out, vec![0, 2, 3, 7]);
    }

    #[test]
    fn test_equality_neon_ignores_tail() {
        let data = [0, 0, 0, 0, 9];
        let mut out = Vec::new();
        equality_blocks_neon_safe(&data, 9, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_prefix_neon_short_and_long() {
        let short = PreparedPrefix::new("test");
        assert!(prefix_matches_neon_safe(&short, b"test1"));
        assert!(prefix_matches_neon_safe(&short, b"test"));
        assert!(!prefix_matches_neon_safe(&short, b"tesT"));

        let long = PreparedPrefix::new("a_very_long_prefix_over_16");
        assert!(prefix_matches_neon_safe(&long, b"a_very_long_prefix_over_16_bytes"));
        assert!(!prefix_matches_neon_safe(&long, b"a_very_long_prefix_over_17_bytes"));
    }
}
