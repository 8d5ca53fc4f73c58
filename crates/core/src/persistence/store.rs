use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::error::StoreError;

/// Per-document key/value settings that survive the document being closed.
pub trait SettingsStore {
	/// Reads `key` from the document's settings.
	fn get(&self, doc: &Path, key: &str) -> Option<Value>;
	/// Writes `key` into the document's settings.
	fn set(&mut self, doc: &Path, key: &str, value: Value) -> Result<(), StoreError>;
	/// Removes `key` from the document's settings. Missing keys are not an error.
	fn erase(&mut self, doc: &Path, key: &str) -> Result<(), StoreError>;
}

/// Settings kept in memory for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
	documents: HashMap<PathBuf, HashMap<String, Value>>,
}

impl MemorySettingsStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether any document holds `key`.
	pub fn contains(&self, doc: &Path, key: &str) -> bool {
		self.documents.get(doc).is_some_and(|settings| settings.contains_key(key))
	}

	/// Number of documents with at least one setting.
	pub fn document_count(&self) -> usize {
		self.documents.len()
	}
}

impl SettingsStore for MemorySettingsStore {
	fn get(&self, doc: &Path, key: &str) -> Option<Value> {
		self.documents.get(doc)?.get(key).cloned()
	}

	fn set(&mut self, doc: &Path, key: &str, value: Value) -> Result<(), StoreError> {
		self.documents
			.entry(doc.to_path_buf())
			.or_default()
			.insert(key.to_owned(), value);
		Ok(())
	}

	fn erase(&mut self, doc: &Path, key: &str) -> Result<(), StoreError> {
		if let Some(settings) = self.documents.get_mut(doc) {
			settings.remove(key);
			if settings.is_empty() {
				self.documents.remove(doc);
			}
		}
		Ok(())
	}
}
