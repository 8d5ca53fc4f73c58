//! Settings persisted to a single JSON file.
//!
//! The file maps document paths to their settings objects:
//!
//! ```json
//! {
//!   "/home/me/notes.txt": {
//!     "_marker_stack": [{ "pt": 120, "vp": [0.0, 100.0] }]
//!   }
//! }
//! ```
//!
//! Every mutation rewrites the file through a temporary file in the same
//! directory, so a failed write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;

use super::error::StoreError;
use super::store::SettingsStore;

/// File name used inside a state directory.
pub const SETTINGS_FILE_NAME: &str = "view-settings.json";

type Documents = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Debug)]
pub struct FileSettingsStore {
	path: PathBuf,
	documents: Documents,
}

impl FileSettingsStore {
	/// Opens the store at `path`.
	///
	/// A missing file is an empty store. An unreadable or corrupt file is also
	/// treated as empty and is replaced on the next write.
	pub fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let documents = match std::fs::read(&path) {
			Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
				tracing::warn!(path = %path.display(), error = %e, "discarding corrupt settings file");
				Documents::new()
			}),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Documents::new(),
			Err(e) => {
				tracing::warn!(path = %path.display(), error = %e, "failed to read settings file");
				Documents::new()
			}
		};
		Self { path, documents }
	}

	/// Opens `view-settings.json` inside `dir`.
	pub fn in_dir(dir: &Path) -> Self {
		Self::open(dir.join(SETTINGS_FILE_NAME))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn doc_key(doc: &Path) -> String {
		doc.to_string_lossy().into_owned()
	}

	fn flush(&self) -> Result<(), StoreError> {
		let io_err = |source: std::io::Error| StoreError::Io {
			path: self.path.clone(),
			source,
		};

		let dir = match self.path.parent() {
			Some(dir) if !dir.as_os_str().is_empty() => dir,
			_ => Path::new("."),
		};
		std::fs::create_dir_all(dir).map_err(io_err)?;

		let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
		serde_json::to_writer_pretty(&mut tmp, &self.documents)?;
		tmp.write_all(b"\n").map_err(io_err)?;
		tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
		Ok(())
	}
}

impl SettingsStore for FileSettingsStore {
	fn get(&self, doc: &Path, key: &str) -> Option<Value> {
		self.documents.get(&Self::doc_key(doc))?.get(key).cloned()
	}

	fn set(&mut self, doc: &Path, key: &str, value: Value) -> Result<(), StoreError> {
		self.documents
			.entry(Self::doc_key(doc))
			.or_default()
			.insert(key.to_owned(), value);
		self.flush()
	}

	fn erase(&mut self, doc: &Path, key: &str) -> Result<(), StoreError> {
		let doc_key = Self::doc_key(doc);
		let Some(settings) = self.documents.get_mut(&doc_key) else {
			return Ok(());
		};
		if settings.remove(key).is_none() {
			return Ok(());
		}
		if settings.is_empty() {
			self.documents.remove(&doc_key);
		}
		self.flush()
	}
}
