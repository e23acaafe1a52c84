//! Portable SIMD kernels built on `wide`.
//!
//! `wide` lowers to SSE2/NEON/SIMD128 where available and to scalar code
//! elsewhere, so these kernels serve targets without a native backend.

use wide::{i32x4, u8x16, CmpEq};

use super::prefix::{key_window, PreparedPrefix};
use super::push_lane_matches;
use super::types::{LANES, REGISTER_BYTES};
use crate::dictionary::Code;

/// Portable equality over full 4-lane blocks.
#[inline]
pub fn equality_blocks_portable(data: &[Code], target: Code, out: &mut Vec<usize>) {
    #[allow(clippy::cast_possible_wrap)] // Bit pattern broadcast, compared lane for lane
    let needle = i32x4::splat(target as i32);

    for (block, chunk) in data.chunks_exact(LANES).enumerate() {
        #[allow(clippy::cast_possible_wrap)]
        let lanes = i32x4::new([
            chunk[0] as i32,
            chunk[1] as i32,
            chunk[2] as i32,
            chunk[3] as i32,
        ]);
        let eq: [i32; LANES] = lanes.cmp_eq(needle).into();
        let mask = eq
            .iter()
            .enumerate()
            .fold(0u32, |mask, (lane, &bits)| mask | (u32::from(bits != 0) << lane));
        if mask != 0 {
            push_lane_matches(mask, block * LANES, out);
        }
    }
}

/// Portable prefix test: 16 bytes per compare, blocks AND-reduced.
#[inline]
pub fn prefix_matches_portable(prefix: &PreparedPrefix, key: &[u8]) -> bool {
    debug_assert!(key.len() >= prefix.len());
    let mut scratch = [0u8; REGISTER_BYTES];

    prefix.blocks().iter().enumerate().all(|(i, block)| {
        let window = key_window(key, i * REGISTER_BYTES, &mut scratch);
        let eq = u8x16::new(*window).cmp_eq(u8x16::new(block.bytes)).to_array();
        eq[..block.len].iter().all(|&lane| lane == u8::MAX)
    })
}
