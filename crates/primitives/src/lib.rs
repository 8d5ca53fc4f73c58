//! Core types for tracking saved positions through text edits.

/// Text coordinates: char indices, lengths, and line/column pairs.
pub mod range;
/// Rope utilities and extensions.
pub mod rope;
/// Change sets describing document edits and position mapping.
pub mod transaction;

pub use range::{CharIdx, CharLen, LineCol};
pub use rope::{clamp_char, line_of, max_cursor_pos};
pub use ropey::{Rope, RopeSlice};
pub use transaction::{Bias, Change, ChangeSet};
