//! SSE2 kernels for x86_64.
//!
//! SSE2 is part of the x86_64 baseline, so no runtime detection is needed.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::prefix::{key_window, PreparedPrefix};
use super::push_lane_matches;
use super::types::{LANES, REGISTER_BYTES};
use crate::dictionary::Code;

/// SSE2 equality over full 4-lane blocks.
///
/// Only `data[..data.len() / LANES * LANES]` is examined; the caller owns
/// the tail.
///
/// # Safety
/// Requires SSE2.
#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn equality_blocks_sse2(data: &[Code], target: Code, out: &mut Vec<usize>) {
    let blocks = data.len() / LANES;
    #[allow(clippy::cast_possible_wrap)] // Bit pattern broadcast, compared lane for lane
    let needle = _mm_set1_epi32(target as i32);

    for block in 0..blocks {
        let offset = block * LANES;
        // SAFETY: offset + LANES <= blocks * LANES <= data.len()
        let chunk = _mm_loadu_si128(data.as_ptr().add(offset).cast::<__m128i>());
        let cmp = _mm_cmpeq_epi32(chunk, needle);
        #[allow(clippy::cast_sign_loss)]
        let mask = _mm_movemask_ps(_mm_castsi128_ps(cmp)) as u32;
        if mask != 0 {
            push_lane_matches(mask, offset, out);
        }
    }
}

/// SSE2 prefix test: 16 bytes per compare, blocks AND-reduced.
///
/// # Safety
/// Requires SSE2. `key.len() >= prefix.len()`.
#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn prefix_matches_sse2(prefix: &PreparedPrefix, key: &[u8]) -> bool {
    debug_assert!(key.len() >= prefix.len());
    let mut scratch = [0u8; REGISTER_BYTES];

    for (i, block) in prefix.blocks().iter().enumerate() {
        let window = key_window(key, i * REGISTER_BYTES, &mut scratch);
        // SAFETY: both arrays are REGISTER_BYTES long
        let kv = _mm_loadu_si128(window.as_ptr().cast::<__m128i>());
        let pv = _mm_loadu_si128(block.bytes.as_ptr().cast::<__m128i>());
        #[allow(clippy::cast_sign_loss)]
        let eq = _mm_movemask_epi8(_mm_cmpeq_epi8(kv, pv)) as u32;
        let want = block.lane_mask();
        if eq & want != want {
            return false;
        }
    }
    true
}

/// Safe wrapper for SSE2 equality.
#[inline]
pub fn equality_blocks_sse2_safe(data: &[Code], target: Code, out: &mut Vec<usize>) {
    // SAFETY: SSE2 is guaranteed on all x86_64 targets
    unsafe { equality_blocks_sse2(data, target, out) }
}

/// Safe wrapper for SSE2 prefix test.
#[inline]
pub fn prefix_matches_sse2_safe(prefix: &PreparedPrefix, key: &[u8]) -> bool {
    // SAFETY: SSE2 is guaranteed on all x86_64 targets
    unsafe { prefix_matches_sse2(prefix, key) }
}
