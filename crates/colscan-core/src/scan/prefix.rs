//! Prefix prepared for register-sized compares.

use super::types::REGISTER_BYTES;

/// One register's worth of prefix bytes, zero padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixBlock {
    /// Prefix bytes; lanes at and after `len` are zero.
    pub bytes: [u8; REGISTER_BYTES],
    /// Number of significant lanes, `1..=REGISTER_BYTES`.
    pub len: usize,
}

impl PrefixBlock {
    /// One bit per significant lane, lane 0 in bit 0.
    ///
    /// `len` never exceeds the register width, so the shift is in range.
    #[inline]
    #[must_use]
    pub fn lane_mask(&self) -> u32 {
        debug_assert!(self.len <= REGISTER_BYTES);
        (1u32 << self.len) - 1
    }

    /// Four bits per significant lane, as produced by a NEON narrowing shift.
    #[inline]
    #[must_use]
    pub fn nibble_mask(&self) -> u64 {
        if self.len == REGISTER_BYTES {
            u64::MAX
        } else {
            (1u64 << (4 * self.len)) - 1
        }
    }
}

/// A prefix split into register-width blocks once, before a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPrefix {
    raw: Vec<u8>,
    blocks: Vec<PrefixBlock>,
}

impl PreparedPrefix {
    /// Splits `prefix` into blocks of at most [`REGISTER_BYTES`] bytes.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let raw = prefix.as_bytes().to_vec();
        let blocks = raw
            .chunks(REGISTER_BYTES)
            .map(|chunk| {
                let mut bytes = [0u8; REGISTER_BYTES];
                bytes[..chunk.len()].copy_from_slice(chunk);
                PrefixBlock {
                    bytes,
                    len: chunk.len(),
                }
            })
            .collect();
        Self { raw, blocks }
    }

    /// The prefix bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Register-width blocks, in order.
    #[must_use]
    pub fn blocks(&self) -> &[PrefixBlock] {
        &self.blocks
    }

    /// Prefix length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true for the empty prefix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Returns a register-width window of `key` starting at `offset`.
///
/// Borrows the key directly when a full register is available; otherwise
/// copies the remaining bytes into `scratch` and zero pads, so a load never
/// reads past the end of the key.
#[inline]
pub(crate) fn key_window<'a>(
    key: &'a [u8],
    offset: usize,
    scratch: &'a mut [u8; REGISTER_BYTES],
) -> &'a [u8; REGISTER_BYTES] {
    let rest = key.get(offset..).unwrap_or_default();
    if let Some(window) = rest.first_chunk::<REGISTER_BYTES>() {
        return window;
    }
    *scratch = [0u8; REGISTER_BYTES];
    scratch[..rest.len()].copy_from_slice(rest);
    scratch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prefix_has_no_blocks() {
        let prefix = PreparedPrefix::new("");
        assert!(prefix.is_empty());
        assert!(prefix.blocks().is_empty());
    }

    #[test]
    fn test_long_prefix_splits_into_blocks() {
        let prefix = PreparedPrefix::new("abcdefghijklmnopqrstu");
        assert_eq!(prefix.len(), 21);
        let lens: Vec<usize> = prefix.blocks().iter().map(|b| b.len).collect();
        assert_eq!(lens, vec![16, 5]);
        assert_eq!(&prefix.blocks()[1].bytes[..6], b"qrstu\0");
    }

    #[test]
    fn test_masks_are_bounded_by_register_width() {
        let full = PreparedPrefix::new("0123456789abcdef");
        assert_eq!(full.blocks()[0].lane_mask(), 0xFFFF);
        assert_eq!(full.blocks()[0].nibble_mask(), u64::MAX);

        let short = PreparedPrefix::new("abc");
        assert_eq!(short.blocks()[0].lane_mask(), 0b111);
        assert_eq!(short.blocks()[0].nibble_mask(), 0xFFF);
    }

    #[test]
    fn test_key_window_pads_short_tail() {
        let mut scratch = [0xAAu8; REGISTER_BYTES];
        let window = key_window(b"hello", 0, &mut scratch);
        assert_eq!(&window[..5], b"hello");
        assert!(window[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_key_window_borrows_full_register() {
        let key = b"0123456789abcdefXYZ";
        let mut scratch = [0u8; REGISTER_BYTES];
        let window = key_window(key, 3, &mut scratch);
        assert_eq!(window, b"3456789abcdefXYZ");
    }

    #[test]
    fn test_key_window_past_end_is_zero() {
        let mut scratch = [1u8; REGISTER_BYTES];
        let window = key_window(b"ab", 5, &mut scratch);
        assert_eq!(window, &[0u8; REGISTER_BYTES]);
    }
}
