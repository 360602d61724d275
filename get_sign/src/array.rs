//! Second exercise: summing a prefix of a buffer whose contents and length
//! of the prefix are both inputs.
//!
//! The prefix is taken through an iterator, so no index can leave the array
//! and no bounds-check panic is reachable for any input. The sum is widened
//! to `u16` since eight bytes of 255 already exceed `u8`.

/// Sums the first `index` elements of `arr`, or all of them when `index` is
/// past the end.
pub fn sum_first_elements(arr: &[u8], index: usize) -> u16 {
    arr.iter().take(index).map(|&element| element as u16).sum()
}
