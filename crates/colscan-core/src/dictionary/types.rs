//! Types shared by the dictionary and the scanners.

/// Dictionary code assigned to a distinct key.
pub type Code = u32;

/// Largest number of distinct keys one dictionary can hold.
///
/// Codes run from `0` to `MAX_DISTINCT_KEYS - 1`, so every code fits a `u32` lane.
pub const MAX_DISTINCT_KEYS: usize = u32::MAX as usize;
