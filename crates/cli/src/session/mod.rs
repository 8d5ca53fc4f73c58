//! Headless editor session.
//!
//! Holds the open documents with their text, caret, viewport and gutter, and
//! feeds focus, edit and close events into a [`MarkerStackService`] the way a
//! real editor frontend would.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use markstack_core::{
	ActiveView, CommandOutcome, DocumentHandle, MarkerCommand, MarkerStackService, MemoryGutter, SettingsStore,
	ViewportState,
};
use markstack_primitives::{ChangeSet, CharIdx, LineCol, Rope, clamp_char};

use crate::cli::FileLocation;
use crate::script::{DocumentTarget, ScriptCommand};


/// One open buffer.
#[derive(Debug)]
struct OpenDocument {
	handle: DocumentHandle,
	text: Rope,
	cursor: CharIdx,
	viewport: ViewportState,
	gutter: MemoryGutter,
	modified: bool,
}

impl OpenDocument {
	fn new(handle: DocumentHandle, text: Rope) -> Self {
		Self {
			handle,
			text,
			cursor: 0,
			viewport: ViewportState::default(),
			gutter: MemoryGutter::new(),
			modified: false,
		}
	}

	fn name(&self) -> String {
		match self.handle.path() {
			Some(path) => path.display().to_string(),
			None => format!("[untitled {}]", self.handle.id()),
		}
	}
}

pub struct Session<S> {
	service: MarkerStackService<S>,
	documents: Vec<OpenDocument>,
	active: Option<usize>,
}

impl<S: SettingsStore> Session<S> {
	pub fn new(service: MarkerStackService<S>) -> Self {
		Self {
			service,
			documents: Vec::new(),
			active: None,
		}
	}

	/// Runs every command of a script, stopping at the first failing line.
	pub fn run_script(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
		for (n, line) in input.lines().enumerate() {
			let line = line.context("failed to read script")?;
			let Some(command) = ScriptCommand::parse(&line).with_context(|| format!("script line {}", n + 1))?
			else {
				continue;
			};
			self.run(command, &mut *out)
				.with_context(|| format!("script line {}: {}", n + 1, line.trim()))?;
		}
		Ok(())
	}

	pub fn run(&mut self, command: ScriptCommand, out: &mut impl Write) -> anyhow::Result<()> {
		match command {
			ScriptCommand::Open(path) => {
				let idx = self.open(&path)?;
				let doc = &self.documents[idx];
				writeln!(out, "opened {} depth={}", doc.name(), self.service.depth(doc.handle.id()))?;
			}
			ScriptCommand::New => {
				self.open_document(DocumentHandle::untitled(), Rope::new());
			}
			ScriptCommand::Focus(target) => self.focus(&target)?,
			ScriptCommand::Goto(pos) => {
				let doc = self.active_mut()?;
				doc.cursor = pos.to_char(doc.text.slice(..));
			}
			ScriptCommand::Scroll(viewport) => self.active_mut()?.viewport = viewport,
			ScriptCommand::Insert(text) => {
				let doc = self.active_mut()?;
				let cursor = doc.cursor;
				let inserted = text.chars().count();
				let changes = ChangeSet::insert_at(doc.text.slice(..), cursor, text);
				self.edit(&changes)?;
				self.active_mut()?.cursor = cursor + inserted;
			}
			ScriptCommand::Delete(count) => {
				let doc = self.active_mut()?;
				let end = clamp_char(doc.text.slice(..), doc.cursor.saturating_add(count));
				let changes = ChangeSet::delete_range(doc.text.slice(..), doc.cursor, end);
				self.edit(&changes)?;
			}
			ScriptCommand::Marker(command) => self.marker(command, out)?,
			ScriptCommand::Close => self.close_active()?,
			ScriptCommand::Write => self.write_active()?,
			ScriptCommand::Status => self.status(out)?,
		}
		Ok(())
	}

	/// Opens `location` and places the caret at its line and column.
	pub fn open_at(&mut self, location: &FileLocation) -> anyhow::Result<()> {
		let idx = self.open(&location.path)?;
		let doc = &mut self.documents[idx];
		if let Some(line) = location.line {
			let pos = LineCol::new(line, location.column.unwrap_or(0));
			doc.cursor = pos.to_char(doc.text.slice(..));
		}
		Ok(())
	}

	/// Closes every document, saving their stacks, and hands back the store.
	pub fn shutdown(mut self) -> S {
		while !self.documents.is_empty() {
			self.active = Some(self.documents.len() - 1);
			if let Err(e) = self.close_active() {
				tracing::warn!(error = %e, "failed to close document");
				break;
			}
		}
		self.service.persist_all();
		self.service.into_store()
	}

	fn open(&mut self, path: &Path) -> anyhow::Result<usize> {
		let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
		if let Some(idx) = self.position_of(&path) {
			self.active = Some(idx);
			return Ok(idx);
		}

		let text = match std::fs::read_to_string(&path) {
			Ok(text) => Rope::from(text),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Rope::new(),
			Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
		};
		Ok(self.open_document(DocumentHandle::file(path), text))
	}

	fn open_document(&mut self, handle: DocumentHandle, text: Rope) -> usize {
		let mut doc = OpenDocument::new(handle, text);
		self.service
			.activate(&doc.handle, doc.text.slice(..), &mut doc.gutter);
		tracing::info!(doc = %doc.handle.id(), name = %doc.name(), "opened document");

		self.documents.push(doc);
		let idx = self.documents.len() - 1;
		self.active = Some(idx);
		idx
	}

	fn position_of(&self, path: &Path) -> Option<usize> {
		self.documents
			.iter()
			.position(|doc| doc.handle.path() == Some(path))
	}

	fn focus(&mut self, target: &DocumentTarget) -> anyhow::Result<()> {
		let idx = match target {
			DocumentTarget::Index(n) => n
				.checked_sub(1)
				.filter(|&idx| idx < self.documents.len()),
			DocumentTarget::Path(path) => {
				let path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
				self.position_of(&path)
			}
		};
		let Some(idx) = idx else {
			bail!("no open document matches {target:?}");
		};
		self.active = Some(idx);
		Ok(())
	}

	fn active_mut(&mut self) -> anyhow::Result<&mut OpenDocument> {
		self.active
			.and_then(|idx| self.documents.get_mut(idx))
			.context("no active document")
	}

	fn edit(&mut self, changes: &ChangeSet) -> anyhow::Result<()> {
		let Some(doc) = self.active.and_then(|idx| self.documents.get_mut(idx)) else {
			bail!("no active document");
		};
		if changes.is_identity() {
			return Ok(());
		}
		changes.apply(&mut doc.text);
		doc.cursor = clamp_char(doc.text.slice(..), doc.cursor);
		doc.modified = true;
		self.service
			.apply_edit(doc.handle.id(), changes, doc.text.slice(..), &mut doc.gutter);
		Ok(())
	}

	fn marker(&mut self, command: MarkerCommand, out: &mut impl Write) -> anyhow::Result<()> {
		let outcome = match self.active.and_then(|idx| self.documents.get_mut(idx)) {
			Some(doc) => {
				let view = ActiveView {
					document: &doc.handle,
					text: doc.text.slice(..),
					cursor: doc.cursor,
					viewport: doc.viewport,
				};
				self.service.execute(command, Some(view), &mut doc.gutter)
			}
			None => self.service.execute(command, None, &mut MemoryGutter::new()),
		};

		match outcome {
			CommandOutcome::Pushed { depth } => writeln!(out, "pushed depth={depth}")?,
			CommandOutcome::Popped(restore) => {
				let doc = self.active_mut()?;
				doc.cursor = restore.cursor;
				doc.viewport = restore.viewport;
				let pos = LineCol::from_char(doc.text.slice(..), doc.cursor);
				let id = doc.handle.id();
				write!(
					out,
					"popped to {pos} scroll=({}, {}) depth={}",
					restore.viewport.x,
					restore.viewport.y,
					self.service.depth(id)
				)?;
				if restore.animate {
					write!(out, " animated")?;
				}
				writeln!(out)?;
			}
			CommandOutcome::Ignored => {}
		}
		Ok(())
	}

	fn close_active(&mut self) -> anyhow::Result<()> {
		let Some(idx) = self.active.filter(|&idx| idx < self.documents.len()) else {
			bail!("no active document");
		};
		let mut doc = self.documents.remove(idx);
		if doc.modified {
			tracing::warn!(name = %doc.name(), "closing document with unwritten changes");
		}
		self.service.close(&doc.handle, &mut doc.gutter);
		self.active = self.documents.len().checked_sub(1);
		Ok(())
	}

	fn write_active(&mut self) -> anyhow::Result<()> {
		let doc = self.active_mut()?;
		let Some(path) = doc.handle.path() else {
			bail!("{} has no file to write to", doc.name());
		};
		std::fs::write(path, doc.text.to_string()).with_context(|| format!("failed to write {}", path.display()))?;
		doc.modified = false;
		Ok(())
	}

	fn status(&self, out: &mut impl Write) -> anyhow::Result<()> {
		let Some(doc) = self.active.and_then(|idx| self.documents.get(idx)) else {
			writeln!(out, "no document")?;
			return Ok(());
		};
		let pos = LineCol::from_char(doc.text.slice(..), doc.cursor);
		let markers = doc
			.gutter
			.lines()
			.iter()
			.map(|line| (line + 1).to_string())
			.collect::<Vec<_>>()
			.join(",");
		writeln!(
			out,
			"{}{} {pos} scroll=({}, {}) depth={} markers=[{markers}]",
			doc.name(),
			if doc.modified { " [+]" } else { "" },
			doc.viewport.x,
			doc.viewport.y,
			self.service.depth(doc.handle.id()),
		)?;
		Ok(())
	}
}
