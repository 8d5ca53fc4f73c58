use ropey::RopeSlice;

use super::types::{Bias, Change, Operation};
use crate::range::{CharIdx, CharLen};
use crate::Rope;

/// A sequence of operations representing one set of changes to a document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
	ops: Vec<Operation>,
	/// Length of the source document before changes.
	len: CharLen,
	/// Length of the document after applying changes.
	len_after: CharLen,
}

impl ChangeSet {
	/// Builds a changeset from a list of changes against `doc`.
	///
	/// Changes are sorted by start. Ranges are clamped to the document, and a
	/// change overlapping an earlier one is trimmed to begin where the earlier
	/// one ended.
	pub fn from_changes(doc: RopeSlice, changes: impl IntoIterator<Item = Change>) -> Self {
		let doc_len = doc.len_chars();
		let mut changes: Vec<Change> = changes.into_iter().collect();
		changes.sort_by_key(|c| c.start);

		let mut cs = Self::default();
		let mut cursor = 0;
		for change in changes {
			let start = change.start.clamp(cursor, doc_len);
			let end = change.end.clamp(start, doc_len);

			cs.retain(start - cursor);
			cs.delete(end - start);
			if let Some(text) = change.replacement {
				cs.insert(text);
			}
			cursor = end;
		}
		cs.retain(doc_len - cursor);
		cs
	}

	/// Changeset inserting `text` at `at`.
	pub fn insert_at(doc: RopeSlice, at: CharIdx, text: impl Into<String>) -> Self {
		Self::from_changes(doc, [Change::insert(at, text)])
	}

	/// Changeset deleting `[start, end)`.
	pub fn delete_range(doc: RopeSlice, start: CharIdx, end: CharIdx) -> Self {
		Self::from_changes(doc, [Change::delete(start, end)])
	}

	/// Returns the length of the source document (before changes).
	pub fn len(&self) -> CharLen {
		self.len
	}

	/// Returns the length of the document after applying changes.
	pub fn len_after(&self) -> CharLen {
		self.len_after
	}

	/// Returns true if this changeset contains no operations.
	pub fn is_empty(&self) -> bool {
		self.ops.is_empty()
	}

	/// Returns true if applying this changeset leaves the text unchanged.
	pub fn is_identity(&self) -> bool {
		self.ops.iter().all(|op| matches!(op, Operation::Retain(_)))
	}

	/// Returns a slice of all operations in this changeset.
	pub fn operations(&self) -> &[Operation] {
		&self.ops
	}

	fn retain(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}
		self.len += n;
		self.len_after += n;
		match self.ops.last_mut() {
			Some(Operation::Retain(count)) => *count += n,
			_ => self.ops.push(Operation::Retain(n)),
		}
	}

	fn delete(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}
		self.len += n;
		match self.ops.last_mut() {
			Some(Operation::Delete(count)) => *count += n,
			_ => self.ops.push(Operation::Delete(n)),
		}
	}

	fn insert(&mut self, text: String) {
		let n = text.chars().count();
		if n == 0 {
			return;
		}
		self.len_after += n;
		match self.ops.last_mut() {
			Some(Operation::Insert { text: prev, char_len }) => {
				prev.push_str(&text);
				*char_len += n;
			}
			_ => self.ops.push(Operation::Insert { text, char_len: n }),
		}
	}

	/// Applies this changeset to a document, modifying it in place.
	///
	/// The document must be the one this changeset was built against.
	pub fn apply(&self, doc: &mut Rope) {
		debug_assert_eq!(doc.len_chars(), self.len);

		let mut pos = 0;
		for op in &self.ops {
			match op {
				Operation::Retain(n) => pos += n,
				Operation::Delete(n) => doc.remove(pos..pos + n),
				Operation::Insert { text, char_len } => {
					doc.insert(pos, text);
					pos += char_len;
				}
			}
		}
	}

	/// Maps a position in the source document to the edited document.
	///
	/// Positions inside a deleted span collapse to the start of that span. An
	/// insertion exactly at `pos` moves it forward under [`Bias::Right`] and
	/// leaves it in place under [`Bias::Left`].
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;

		for op in &self.ops {
			if old_pos > pos {
				break;
			}
			match op {
				Operation::Retain(n) => {
					if old_pos + n > pos {
						return new_pos + (pos - old_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Delete(n) => {
					if old_pos + n > pos {
						return new_pos;
					}
					old_pos += n;
				}
				Operation::Insert { char_len, .. } => {
					if old_pos < pos || bias == Bias::Right {
						new_pos += char_len;
					}
				}
			}
		}

		(new_pos + pos.saturating_sub(old_pos)).min(self.len_after)
	}
}
