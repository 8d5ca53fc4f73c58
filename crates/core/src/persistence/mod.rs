//! Marker stack persistence.
//!
//! A document's stack is stored in its persisted settings under
//! [`STACK_KEY`] as an ordered list of records, bottom of the stack first:
//!
//! ```json
//! [{ "pt": 120, "vp": [0.0, 100.0] }, { "pt": 554, "vp": [0.0, 400.0] }]
//! ```
//!
//! `pt` is the caret's char index and `vp` the viewport offset. The key is
//! absent whenever the stack is empty. A value that is not a list loads as an
//! empty stack; inside a list, records that do not match the schema are
//! skipped.

mod error;
mod file;
mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::StoreError;
pub use file::{FileSettingsStore, SETTINGS_FILE_NAME};
pub use store::{MemorySettingsStore, SettingsStore};

use crate::anchor::Marker;
use crate::document::DocumentKey;
use crate::stack::MarkerStack;
use crate::viewport::ViewportState;


/// Settings key holding a document's serialized stack.
pub const STACK_KEY: &str = "_marker_stack";

#[derive(Debug, Serialize, Deserialize)]
struct PersistedMarker {
	pt: usize,
	vp: (f64, f64),
}

impl From<Marker> for PersistedMarker {
	fn from(marker: Marker) -> Self {
		Self {
			pt: marker.position,
			vp: marker.viewport.into(),
		}
	}
}

impl From<PersistedMarker> for Marker {
	fn from(record: PersistedMarker) -> Self {
		Marker::new(record.pt, ViewportState::from(record.vp))
	}
}

/// Encodes markers, bottom first, in the persisted schema.
pub fn encode_markers(markers: impl IntoIterator<Item = Marker>) -> Result<Value, serde_json::Error> {
	let records: Vec<PersistedMarker> = markers.into_iter().map(PersistedMarker::from).collect();
	serde_json::to_value(records)
}

/// Decodes a persisted stack.
///
/// The value must be a list. Records that do not match the schema, or whose
/// viewport is not finite, are dropped and the rest are kept in order.
pub fn decode_markers(value: Value) -> Result<Vec<Marker>, serde_json::Error> {
	let records: Vec<Value> = serde_json::from_value(value)?;
	let mut markers = Vec::with_capacity(records.len());
	for (idx, record) in records.into_iter().enumerate() {
		match serde_json::from_value::<PersistedMarker>(record).map(Marker::from) {
			Ok(marker) if marker.viewport.is_finite() => markers.push(marker),
			Ok(marker) => tracing::warn!(idx, viewport = ?marker.viewport, "dropping marker with non-finite viewport"),
			Err(e) => tracing::warn!(idx, error = %e, "dropping malformed marker record"),
		}
	}
	Ok(markers)
}

/// Reads and writes stacks through a [`SettingsStore`].
///
/// Untitled documents are never written: saves and clears for them are no-ops
/// and loads return nothing.
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
	store: S,
}

impl<S: SettingsStore> PersistenceAdapter<S> {
	pub fn new(store: S) -> Self {
		Self { store }
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn into_store(self) -> S {
		self.store
	}

	/// Writes the stack's current markers. An empty stack clears instead.
	pub fn save(&mut self, doc: &DocumentKey, stack: &MarkerStack) {
		if stack.is_empty() {
			self.clear(doc);
			return;
		}
		let Some(path) = doc.path() else {
			return;
		};
		let written = encode_markers(stack.markers())
			.map_err(StoreError::from)
			.and_then(|value| self.store.set(path, STACK_KEY, value));
		if let Err(e) = written {
			tracing::warn!(doc = %path.display(), error = %e, "failed to save marker stack");
		}
	}

	/// Whether anything is stored under the document's stack key, decodable
	/// or not.
	pub fn is_stored(&self, doc: &DocumentKey) -> bool {
		doc.path().is_some_and(|path| self.store.get(path, STACK_KEY).is_some())
	}

	/// Removes the document's persisted stack.
	pub fn clear(&mut self, doc: &DocumentKey) {
		let Some(path) = doc.path() else {
			return;
		};
		if let Err(e) = self.store.erase(path, STACK_KEY) {
			tracing::warn!(doc = %path.display(), error = %e, "failed to clear marker stack");
		}
	}

	/// Reads the document's persisted markers, bottom first.
	///
	/// Missing or malformed state yields an empty list.
	pub fn load(&self, doc: &DocumentKey) -> Vec<Marker> {
		let Some(path) = doc.path() else {
			return Vec::new();
		};
		let Some(value) = self.store.get(path, STACK_KEY) else {
			return Vec::new();
		};
		match decode_markers(value) {
			Ok(markers) => markers,
			Err(e) => {
				tracing::warn!(doc = %path.display(), error = %e, "ignoring malformed marker stack");
				Vec::new()
			}
		}
	}
}
