//! Command surface for hosts.
//!
//! [`MarkerStackService`] owns the stack registry and the persistence adapter.
//! The host constructs one per process and calls into it from its event loop:
//!
//! * [`activate`](MarkerStackService::activate) when a document is opened or
//!   first focused, to rebuild its persisted stack and glyphs.
//! * [`apply_edit`](MarkerStackService::apply_edit) after every edit, before
//!   handling the next command for that document.
//! * [`push`](MarkerStackService::push) and [`pop`](MarkerStackService::pop)
//!   for the two user commands.
//! * [`close`](MarkerStackService::close) when a document is closed.
//!
//! Nothing here reports errors to the user. A command without an active
//! document does nothing, popping an empty stack does nothing, and storage
//! failures are logged.

use std::str::FromStr;

use markstack_primitives::{ChangeSet, CharIdx, RopeSlice, clamp_char};
use rustc_hash::FxHashMap;

use crate::config::MarkerStackConfig;
use crate::document::{DocumentHandle, DocumentId, DocumentKey};
use crate::gutter::{Gutter, GutterIcon};
use crate::persistence::{PersistenceAdapter, SettingsStore};
use crate::registry::StackRegistry;
use crate::stack::{MarkerCanvas, MarkerStack};
use crate::viewport::ViewportState;


/// The user-facing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerCommand {
	Push,
	Pop,
}

impl MarkerCommand {
	pub const ALL: [MarkerCommand; 2] = [MarkerCommand::Push, MarkerCommand::Pop];

	/// Name the host binds keys to.
	pub fn name(self) -> &'static str {
		match self {
			Self::Push => "marker_stack_push",
			Self::Pop => "marker_stack_pop",
		}
	}
}

impl FromStr for MarkerCommand {
	type Err = UnknownCommand;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|cmd| cmd.name() == s)
			.ok_or_else(|| UnknownCommand(s.to_owned()))
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown marker stack command: {0}")]
pub struct UnknownCommand(pub String);

/// Snapshot of the focused view, taken by the host when a command fires.
#[derive(Debug, Clone, Copy)]
pub struct ActiveView<'a> {
	pub document: &'a DocumentHandle,
	pub text: RopeSlice<'a>,
	/// Caret position (the head of the primary selection).
	pub cursor: CharIdx,
	pub viewport: ViewportState,
}

/// Where the host should put the view after a pop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restore {
	/// New caret, as a single zero-width selection.
	pub cursor: CharIdx,
	pub viewport: ViewportState,
	/// Whether to animate the scroll.
	pub animate: bool,
}

/// Result of [`MarkerStackService::execute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
	/// A marker was pushed; the stack now has `depth` entries.
	Pushed { depth: usize },
	/// A marker was popped; the host should apply the restore.
	Popped(Restore),
	/// Nothing happened.
	Ignored,
}

pub struct MarkerStackService<S> {
	registry: StackRegistry,
	persistence: PersistenceAdapter<S>,
	config: MarkerStackConfig,
	icon: GutterIcon,
	/// Documents whose persisted stack has been loaded this session.
	activated: FxHashMap<DocumentId, DocumentKey>,
}

impl<S: SettingsStore> MarkerStackService<S> {
	pub fn new(store: S, config: MarkerStackConfig) -> Self {
		let icon = config.icon();
		Self {
			registry: StackRegistry::new(),
			persistence: PersistenceAdapter::new(store),
			config,
			icon,
			activated: FxHashMap::default(),
		}
	}

	pub fn registry(&self) -> &StackRegistry {
		&self.registry
	}

	pub fn persistence(&self) -> &PersistenceAdapter<S> {
		&self.persistence
	}

	pub fn config(&self) -> &MarkerStackConfig {
		&self.config
	}

	/// The document's stack, if it has one.
	pub fn stack(&self, doc: DocumentId) -> Option<&MarkerStack> {
		self.registry.get_if_exists(doc)
	}

	/// Depth of the document's stack.
	pub fn depth(&self, doc: DocumentId) -> usize {
		self.stack(doc).map_or(0, MarkerStack::len)
	}

	/// Loads the document's persisted stack the first time it is seen this
	/// session and draws its glyphs. Later calls do nothing.
	pub fn activate(&mut self, document: &DocumentHandle, text: RopeSlice<'_>, gutter: &mut dyn Gutter) {
		let id = document.id();
		if self.activated.contains_key(&id) {
			return;
		}
		let key = document.key();
		let markers = self.persistence.load(&key);
		if markers.is_empty() {
			// A stored value that yields no markers is stale.
			if self.persistence.is_stored(&key) {
				self.persistence.clear(&key);
			}
			self.activated.insert(id, key);
			return;
		}
		self.activated.insert(id, key);

		let stack = MarkerStack::from_markers(markers, text);
		stack.render(&mut MarkerCanvas::new(text, gutter, &self.icon));
		tracing::debug!(doc = %id, depth = stack.len(), "restored marker stack");
		self.registry.restore(id, stack);
	}

	/// Runs a named command against the active view.
	pub fn execute(
		&mut self,
		command: MarkerCommand,
		view: Option<ActiveView<'_>>,
		gutter: &mut dyn Gutter,
	) -> CommandOutcome {
		match command {
			MarkerCommand::Push => self
				.push(view, gutter)
				.map_or(CommandOutcome::Ignored, |depth| CommandOutcome::Pushed { depth }),
			MarkerCommand::Pop => self
				.pop(view, gutter)
				.map_or(CommandOutcome::Ignored, CommandOutcome::Popped),
		}
	}

	/// Pushes the view's caret and viewport. Returns the new depth, or `None`
	/// when there is no active document.
	pub fn push(&mut self, view: Option<ActiveView<'_>>, gutter: &mut dyn Gutter) -> Option<usize> {
		let Some(view) = view else {
			tracing::trace!("push ignored: no active document");
			return None;
		};
		self.activate(view.document, view.text, gutter);

		let id = view.document.id();
		let stack = self.registry.get_or_create(id);
		stack.push(
			view.cursor,
			view.viewport,
			&mut MarkerCanvas::new(view.text, gutter, &self.icon),
		);
		let depth = stack.len();
		self.persistence.save(&view.document.key(), stack);

		tracing::debug!(doc = %id, depth, cursor = view.cursor, "pushed marker");
		Some(depth)
	}

	/// Pops the top marker of the view's document.
	///
	/// Returns where to move the caret and viewport, or `None` when there is no
	/// active document or its stack is empty.
	pub fn pop(&mut self, view: Option<ActiveView<'_>>, gutter: &mut dyn Gutter) -> Option<Restore> {
		let Some(view) = view else {
			tracing::trace!("pop ignored: no active document");
			return None;
		};
		self.activate(view.document, view.text, gutter);

		let id = view.document.id();
		let key = view.document.key();
		let stack = self.registry.get_mut_if_exists(id)?;
		let popped = stack.pop(&mut MarkerCanvas::new(view.text, gutter, &self.icon));

		if self.registry.remove_if_empty(id) {
			self.persistence.clear(&key);
		} else if let Some(stack) = self.registry.get_if_exists(id) {
			self.persistence.save(&key, stack);
		}

		let marker = popped?;
		tracing::debug!(doc = %id, depth = self.depth(id), cursor = marker.position, "popped marker");
		Some(Restore {
			cursor: clamp_char(view.text, marker.position),
			viewport: marker.viewport,
			animate: self.config.animate_scrolling,
		})
	}

	/// Maps the document's anchors through an applied edit and redraws glyphs.
	///
	/// `text` is the document after the edit.
	pub fn apply_edit(
		&mut self,
		doc: DocumentId,
		changes: &ChangeSet,
		text: RopeSlice<'_>,
		gutter: &mut dyn Gutter,
	) {
		let Some(stack) = self.registry.get_mut_if_exists(doc) else {
			return;
		};
		if changes.is_identity() {
			return;
		}
		let moved = stack.apply_changes(changes);
		stack.render(&mut MarkerCanvas::new(text, gutter, &self.icon));
		tracing::trace!(doc = %doc, moved, "remapped markers");
	}

	/// Hands the document's stack to persistence and forgets it.
	///
	/// The stack is saved with its current, edit-adjusted positions so that
	/// reopening the document restores it.
	pub fn close(&mut self, document: &DocumentHandle, gutter: &mut dyn Gutter) {
		let id = document.id();
		self.activated.remove(&id);
		let Some(stack) = self.registry.remove(id) else {
			return;
		};
		self.persistence.save(&document.key(), &stack);
		stack.erase_glyphs(gutter);
		tracing::debug!(doc = %id, depth = stack.len(), "closed document with markers");
	}

	/// Saves every open stack. Hosts call this before exiting without
	/// closing their documents.
	pub fn persist_all(&mut self) {
		for (id, key) in &self.activated {
			if let Some(stack) = self.registry.get_if_exists(*id) {
				self.persistence.save(key, stack);
			}
		}
	}

	pub fn into_store(self) -> S {
		self.persistence.into_store()
	}
}

impl<S: SettingsStore> std::fmt::Debug for MarkerStackService<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MarkerStackService")
			.field("registry", &self.registry)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
