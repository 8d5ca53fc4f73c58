//! Saved caret locations that follow the text they point at.

use markstack_primitives::{Bias, ChangeSet, CharIdx, LineCol, RopeSlice, clamp_char, line_of};

use crate::gutter::gutter_key;
use crate::viewport::ViewportState;

/// A saved cursor location plus the viewport it was saved with.
///
/// This is the plain value pushed onto and popped off a stack, and the unit
/// of persistence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
	/// Caret position as a char index.
	pub position: CharIdx,
	/// Viewport at the time the marker was pushed.
	pub viewport: ViewportState,
}

impl Marker {
	pub fn new(position: CharIdx, viewport: ViewportState) -> Self {
		Self { position, viewport }
	}
}

/// A zero-width position kept valid across edits.
///
/// The anchor's `slot` is its index on the owning stack and names its gutter
/// glyph. Slots are stable for as long as the anchor is on the stack, since
/// only the top entry is ever removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionAnchor {
	slot: usize,
	pos: CharIdx,
}

impl PositionAnchor {
	pub fn new(slot: usize, pos: CharIdx) -> Self {
		Self { slot, pos }
	}

	pub fn slot(&self) -> usize {
		self.slot
	}

	/// Current char position.
	pub fn position(&self) -> CharIdx {
		self.pos
	}

	/// Gutter key of the glyph rendered for this anchor.
	pub fn gutter_key(&self) -> String {
		gutter_key(self.slot)
	}

	/// Line the anchor currently sits on.
	pub fn line(&self, text: RopeSlice) -> usize {
		line_of(text, self.pos)
	}

	pub fn line_col(&self, text: RopeSlice) -> LineCol {
		LineCol::from_char(text, self.pos)
	}

	/// Maps the anchor through one edit. Returns whether it moved.
	///
	/// An insertion exactly at the anchor pushes it forward, and a deletion
	/// spanning it collapses it to the start of the deleted text.
	pub fn map_through(&mut self, changes: &ChangeSet) -> bool {
		let mapped = changes.map_pos(self.pos, Bias::Right);
		let moved = mapped != self.pos;
		self.pos = mapped;
		moved
	}

	/// Pulls the anchor back inside `text` if it points past the end.
	pub fn clamp_to(&mut self, text: RopeSlice) {
		self.pos = clamp_char(text, self.pos);
	}
}
