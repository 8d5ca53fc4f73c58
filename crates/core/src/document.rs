//! Document identity.
//!
//! A [`DocumentId`] names an open document for the lifetime of the session and
//! keys the in-memory stack registry. A [`DocumentKey`] names it across
//! sessions and keys the persisted settings. Only file-backed documents have a
//! stable key; untitled documents fall back to their session id and are never
//! persisted.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Session-scoped document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl DocumentId {
	/// Generates a new unique document ID.
	pub fn next() -> Self {
		Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl std::fmt::Display for DocumentId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "doc#{}", self.0)
	}
}

/// Cross-session identity of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKey {
	/// A document backed by a file on disk.
	Path(PathBuf),
	/// An unsaved document, identified only within this session.
	Untitled(DocumentId),
}

impl DocumentKey {
	/// Returns the backing path, if any.
	pub fn path(&self) -> Option<&Path> {
		match self {
			Self::Path(path) => Some(path),
			Self::Untitled(_) => None,
		}
	}
}

/// An open document as seen by the marker stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
	id: DocumentId,
	path: Option<PathBuf>,
}

impl DocumentHandle {
	/// Handle for a freshly opened file-backed document.
	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			id: DocumentId::next(),
			path: Some(path.into()),
		}
	}

	/// Handle for a freshly created untitled document.
	pub fn untitled() -> Self {
		Self {
			id: DocumentId::next(),
			path: None,
		}
	}

	/// Handle for a document whose session id the host already assigned.
	pub fn with_id(id: DocumentId, path: Option<PathBuf>) -> Self {
		Self { id, path }
	}

	pub fn id(&self) -> DocumentId {
		self.id
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Returns the persistence key for this document.
	pub fn key(&self) -> DocumentKey {
		match &self.path {
			Some(path) => DocumentKey::Path(path.clone()),
			None => DocumentKey::Untitled(self.id),
		}
	}
}
