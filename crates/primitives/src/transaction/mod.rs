//! Edit feed primitives.
//!
//! A [`ChangeSet`] describes one atomic edit to a document as a sequence of
//! retain/delete/insert operations over the source text. Anything that stores
//! char positions (markers, cursors) maps them through each change set as it is
//! applied, so stored positions keep pointing at the same logical text.

mod changeset;
mod types;

pub use changeset::ChangeSet;
pub use types::{Bias, Change, Operation};
