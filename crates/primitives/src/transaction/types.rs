use crate::range::{CharIdx, CharLen};

/// Represents a single text change operation.
///
/// A change describes replacing the text range `[start, end)` with the optional
/// `replacement` text. If `replacement` is [`None`], this represents a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	/// The starting character index of the change.
	pub start: CharIdx,
	/// The ending character index of the change (exclusive).
	pub end: CharIdx,
	/// The replacement text, or [`None`] for deletion.
	pub replacement: Option<String>,
}

impl Change {
	/// An insertion of `text` at `at`.
	pub fn insert(at: CharIdx, text: impl Into<String>) -> Self {
		Self {
			start: at,
			end: at,
			replacement: Some(text.into()),
		}
	}

	/// A deletion of `[start, end)`.
	pub fn delete(start: CharIdx, end: CharIdx) -> Self {
		Self {
			start,
			end,
			replacement: None,
		}
	}
}

/// Bias determines how positions at change boundaries are mapped.
///
/// When mapping a position through a change, bias determines whether the position
/// moves with insertions or stays before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}

/// A single operation in a changeset.
///
/// Deletions are always emitted before an insertion at the same source
/// position, so a replaced span reads as `Delete(n), Insert(text)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Retain the next N characters from the source document.
	Retain(CharLen),
	/// Delete the next N characters from the source document.
	Delete(CharLen),
	/// Insert new text at the current position.
	Insert {
		/// Inserted text.
		text: String,
		/// Cached `text.chars().count()`.
		char_len: CharLen,
	},
}
