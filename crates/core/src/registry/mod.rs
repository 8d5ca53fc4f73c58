//! Document → stack lookup.
//!
//! The registry only ever holds non-empty stacks between commands. A stack is
//! created on demand by a push and removed by the pop that empties it.

use rustc_hash::FxHashMap;

use crate::document::DocumentId;
use crate::stack::MarkerStack;


#[derive(Debug, Default)]
pub struct StackRegistry {
	stacks: FxHashMap<DocumentId, MarkerStack>,
}

impl StackRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the document's stack, registering an empty one if it has none.
	///
	/// Only push paths call this; the caller grows the stack before the
	/// command returns.
	pub fn get_or_create(&mut self, doc: DocumentId) -> &mut MarkerStack {
		self.stacks.entry(doc).or_default()
	}

	/// Returns the document's stack without creating one.
	pub fn get_if_exists(&self, doc: DocumentId) -> Option<&MarkerStack> {
		self.stacks.get(&doc)
	}

	pub fn get_mut_if_exists(&mut self, doc: DocumentId) -> Option<&mut MarkerStack> {
		self.stacks.get_mut(&doc)
	}

	/// Registers a stack rebuilt from persisted state.
	///
	/// Empty stacks are not registered. Returns whether an entry now exists.
	pub fn restore(&mut self, doc: DocumentId, stack: MarkerStack) -> bool {
		if stack.is_empty() {
			return self.stacks.contains_key(&doc);
		}
		self.stacks.insert(doc, stack);
		true
	}

	/// Drops the document's entry if its stack is empty.
	///
	/// Returns `true` when an entry was removed.
	pub fn remove_if_empty(&mut self, doc: DocumentId) -> bool {
		match self.stacks.get(&doc) {
			Some(stack) if stack.is_empty() => {
				self.stacks.remove(&doc);
				true
			}
			_ => false,
		}
	}

	/// Removes and returns the document's stack, emptied or not.
	pub fn remove(&mut self, doc: DocumentId) -> Option<MarkerStack> {
		self.stacks.remove(&doc)
	}

	pub fn contains(&self, doc: DocumentId) -> bool {
		self.stacks.contains_key(&doc)
	}

	/// Number of documents with a stack.
	pub fn len(&self) -> usize {
		self.stacks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stacks.is_empty()
	}

	/// Documents with a stack, in no particular order.
	pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
		self.stacks.keys().copied()
	}
}
