use ropey::RopeSlice;

use crate::rope::clamp_char;

/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for markers.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A 0-indexed line and column pair, with the column counted in chars.
///
/// Line/column is a presentation of a [`CharIdx`] against a specific rope
/// revision. It goes stale after edits; store char indices instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LineCol {
	/// 0-indexed line.
	pub line: usize,
	/// 0-indexed char column within the line.
	pub col: usize,
}

impl LineCol {
	/// Creates a new line/column pair.
	pub const fn new(line: usize, col: usize) -> Self {
		Self { line, col }
	}

	/// Resolves a char index to its line and column.
	///
	/// Indices past the end of the text resolve to the end of the last line.
	pub fn from_char(text: RopeSlice, idx: CharIdx) -> Self {
		let idx = clamp_char(text, idx);
		let line = text.char_to_line(idx);
		Self {
			line,
			col: idx - text.line_to_char(line),
		}
	}

	/// Resolves this line and column to a char index.
	///
	/// Lines past the end clamp to the end of the text, and columns past the
	/// end of a line clamp to the line's last char before its line break.
	pub fn to_char(self, text: RopeSlice) -> CharIdx {
		if self.line >= text.len_lines() {
			return text.len_chars();
		}

		let start = text.line_to_char(self.line);
		let line = text.line(self.line);
		let mut len = line.len_chars();
		while len > 0 && matches!(line.char(len - 1), '\n' | '\r') {
			len -= 1;
		}
		start + self.col.min(len)
	}
}

impl std::fmt::Display for LineCol {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line + 1, self.col + 1)
	}
}
