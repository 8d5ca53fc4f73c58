//! Rope utilities and extensions.

use ropey::RopeSlice;

use crate::range::CharIdx;

/// Returns the maximum valid cursor position, which is always the character count.
///
/// This allows the cursor to sit at the end of the final line, even if it is empty.
#[inline]
pub fn max_cursor_pos(text: RopeSlice) -> CharIdx {
	text.len_chars()
}

/// Clamps a char index into `0..=len_chars`.
#[inline]
pub fn clamp_char(text: RopeSlice, idx: CharIdx) -> CharIdx {
	idx.min(max_cursor_pos(text))
}

/// Returns the 0-indexed line containing `idx`, clamping out-of-range indices.
#[inline]
pub fn line_of(text: RopeSlice, idx: CharIdx) -> usize {
	text.char_to_line(clamp_char(text, idx))
}
