//! The per-document marker stack.
//!
//! A [`MarkerStack`] is a LIFO of saved caret positions and viewports for a
//! single document. Each entry owns a [`PositionAnchor`] that is mapped
//! through every edit, and one gutter glyph keyed by the entry's slot.
//!
//! # Invariants
//!
//! * The number of glyphs the stack has registered equals its length.
//! * Entries are never reordered or merged, even when positions coincide.

use markstack_primitives::{ChangeSet, CharIdx, RopeSlice};

use crate::anchor::{Marker, PositionAnchor};
use crate::gutter::{Gutter, GutterIcon};
use crate::viewport::ViewportState;

#[cfg(test)]
mod tests;

/// Everything a stack needs to draw its glyphs: the current text (to turn
/// char positions into lines), the host gutter, and the icon to draw.
pub struct MarkerCanvas<'a> {
	pub text: RopeSlice<'a>,
	pub gutter: &'a mut dyn Gutter,
	pub icon: &'a GutterIcon,
}

impl<'a> MarkerCanvas<'a> {
	pub fn new(text: RopeSlice<'a>, gutter: &'a mut dyn Gutter, icon: &'a GutterIcon) -> Self {
		Self { text, gutter, icon }
	}

	fn paint(&mut self, anchor: &PositionAnchor) {
		let line = anchor.line(self.text);
		self.gutter.add_marker(&anchor.gutter_key(), line, self.icon);
	}
}

#[derive(Debug, Clone, PartialEq)]
struct StackEntry {
	anchor: PositionAnchor,
	viewport: ViewportState,
}

impl StackEntry {
	fn marker(&self) -> Marker {
		Marker::new(self.anchor.position(), self.viewport)
	}
}

/// LIFO of saved positions for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerStack {
	entries: Vec<StackEntry>,
}

impl MarkerStack {
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuilds a stack from saved markers, bottom first.
	///
	/// Positions past the end of `text` are clamped. Glyphs are not drawn;
	/// call [`render`](Self::render) once the stack is in place.
	pub fn from_markers(markers: impl IntoIterator<Item = Marker>, text: RopeSlice) -> Self {
		let entries = markers
			.into_iter()
			.enumerate()
			.map(|(slot, marker)| {
				let mut anchor = PositionAnchor::new(slot, marker.position);
				anchor.clamp_to(text);
				StackEntry {
					anchor,
					viewport: marker.viewport,
				}
			})
			.collect();
		Self { entries }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The entry the next pop would return.
	pub fn top(&self) -> Option<Marker> {
		self.entries.last().map(StackEntry::marker)
	}

	/// Current markers, bottom first.
	pub fn markers(&self) -> impl ExactSizeIterator<Item = Marker> + '_ {
		self.entries.iter().map(StackEntry::marker)
	}

	/// Pushes a new marker and draws its glyph.
	///
	/// Non-finite viewport offsets are stored as zero.
	pub fn push(&mut self, position: CharIdx, viewport: ViewportState, canvas: &mut MarkerCanvas<'_>) {
		let mut anchor = PositionAnchor::new(self.entries.len(), position);
		anchor.clamp_to(canvas.text);
		canvas.paint(&anchor);
		self.entries.push(StackEntry {
			anchor,
			viewport: viewport.finite_or_zero(),
		});
	}

	/// Pops the top marker and erases its glyph.
	///
	/// Popping an empty stack returns `None` and touches nothing.
	pub fn pop(&mut self, canvas: &mut MarkerCanvas<'_>) -> Option<Marker> {
		let entry = self.entries.pop()?;
		canvas.gutter.erase_marker(&entry.anchor.gutter_key());
		Some(entry.marker())
	}

	/// Draws one glyph per entry at the entry's current line.
	///
	/// Glyph keys are stable, so re-rendering replaces glyphs in place.
	pub fn render(&self, canvas: &mut MarkerCanvas<'_>) {
		for entry in &self.entries {
			canvas.paint(&entry.anchor);
		}
	}

	/// Erases every glyph this stack drew, leaving its entries intact.
	pub fn erase_glyphs(&self, gutter: &mut dyn Gutter) {
		for entry in &self.entries {
			gutter.erase_marker(&entry.anchor.gutter_key());
		}
	}

	/// Maps all anchors through one edit. Returns whether any anchor moved.
	pub fn apply_changes(&mut self, changes: &ChangeSet) -> bool {
		let mut moved = false;
		for entry in &mut self.entries {
			moved |= entry.anchor.map_through(changes);
		}
		moved
	}
}
