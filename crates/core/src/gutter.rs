//! Gutter glyphs for stacked markers.
//!
//! The core never computes pixel coordinates. It tells the host which line a
//! glyph belongs on and names each glyph with a key derived from the marker's
//! stack slot. Every marker gets its own key, so two markers on the same line
//! are two glyphs rather than one merged glyph.

use std::collections::BTreeMap;

/// Prefix of every gutter key owned by the marker stack.
pub const GUTTER_KEY_PREFIX: &str = "_marker_stack_icon_";

/// Gutter key for the marker in stack slot `slot`.
pub fn gutter_key(slot: usize) -> String {
	format!("{GUTTER_KEY_PREFIX}{slot}")
}

/// How marker glyphs are drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterIcon {
	/// Icon resource path, resolved by the host.
	pub path: String,
	/// Theme scope used to color the icon.
	pub color: String,
}

/// Host gutter rendering surface.
///
/// `add_marker` replaces any glyph already registered under `key`.
pub trait Gutter {
	fn add_marker(&mut self, key: &str, line: usize, icon: &GutterIcon);
	fn erase_marker(&mut self, key: &str);
}

/// A gutter that records glyphs in memory.
///
/// Used by headless hosts and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryGutter {
	glyphs: BTreeMap<String, usize>,
}

impl MemoryGutter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of glyphs currently shown.
	pub fn len(&self) -> usize {
		self.glyphs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.glyphs.is_empty()
	}

	/// Line of the glyph registered under `key`.
	pub fn line(&self, key: &str) -> Option<usize> {
		self.glyphs.get(key).copied()
	}

	/// Lines carrying a glyph, in ascending order, one entry per glyph.
	pub fn lines(&self) -> Vec<usize> {
		let mut lines: Vec<usize> = self.glyphs.values().copied().collect();
		lines.sort_unstable();
		lines
	}
}

impl Gutter for MemoryGutter {
	fn add_marker(&mut self, key: &str, line: usize, _icon: &GutterIcon) {
		self.glyphs.insert(key.to_owned(), line);
	}

	fn erase_marker(&mut self, key: &str) {
		self.glyphs.remove(key);
	}
}
