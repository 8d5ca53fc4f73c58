//! Per-document marker stacks.
//!
//! Push the caret and viewport of the active document, keep editing, and pop
//! to return to the saved spot. Each stacked marker shows a gutter glyph that
//! follows the text as it is edited, and stacks persist in the document's
//! settings until they are emptied.
//!
//! Hosts drive everything through [`MarkerStackService`].

pub mod anchor;
pub mod config;
pub mod document;
pub mod gutter;
pub mod persistence;
pub mod registry;
pub mod service;
pub mod stack;
pub mod viewport;

pub use anchor::{Marker, PositionAnchor};
pub use config::{ConfigError, MarkerStackConfig};
pub use document::{DocumentHandle, DocumentId, DocumentKey};
pub use gutter::{GUTTER_KEY_PREFIX, Gutter, GutterIcon, MemoryGutter, gutter_key};
pub use persistence::{
	FileSettingsStore, MemorySettingsStore, PersistenceAdapter, STACK_KEY, SettingsStore, StoreError,
};
pub use registry::StackRegistry;
pub use service::{ActiveView, CommandOutcome, MarkerCommand, MarkerStackService, Restore};
pub use stack::{MarkerCanvas, MarkerStack};
pub use viewport::ViewportState;
