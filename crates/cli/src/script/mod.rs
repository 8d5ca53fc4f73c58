//! Line-oriented command scripts.
//!
//! One command per line. Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! open notes.md
//! goto 10 1
//! scroll 0 240
//! push
//! insert fn main() {}\n
//! pop
//! status
//! ```

use std::path::PathBuf;

use anyhow::{Context, bail};
use markstack_core::{MarkerCommand, ViewportState};
use markstack_primitives::LineCol;

#[cfg(test)]
mod tests;

/// Which open document `focus` switches to.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentTarget {
	/// 1-based position in the open document list.
	Index(usize),
	Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
	/// Open a file, or focus it if it is already open.
	Open(PathBuf),
	/// Open an untitled buffer.
	New,
	Focus(DocumentTarget),
	/// Move the caret. Parsed from 1-based input.
	Goto(LineCol),
	Scroll(ViewportState),
	/// Insert text at the caret and move the caret past it.
	Insert(String),
	/// Delete chars forward from the caret.
	Delete(usize),
	Marker(MarkerCommand),
	Close,
	/// Write the active document back to its file.
	Write,
	Status,
}

impl ScriptCommand {
	/// Parses one script line. Returns `None` for blank lines and comments.
	pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
		let line = line.trim_start();
		if line.is_empty() || line.starts_with('#') {
			return Ok(None);
		}
		let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
		let args = rest.trim();

		let command = match name {
			"open" => Self::Open(PathBuf::from(required(name, args)?)),
			"new" => Self::New,
			"focus" => Self::Focus(parse_target(required(name, args)?)),
			"goto" => Self::Goto(parse_goto(args)?),
			"scroll" => Self::Scroll(parse_scroll(args)?),
			// Insert keeps surrounding whitespace; only the separator is dropped.
			"insert" => Self::Insert(unescape(rest)),
			"delete" => Self::Delete(
				required(name, args)?
					.parse()
					.with_context(|| format!("delete: invalid count {args:?}"))?,
			),
			"push" => Self::Marker(MarkerCommand::Push),
			"pop" => Self::Marker(MarkerCommand::Pop),
			"close" => Self::Close,
			"write" => Self::Write,
			"status" => Self::Status,
			other => Self::Marker(other.parse()?),
		};
		Ok(Some(command))
	}
}

fn required<'a>(name: &str, args: &'a str) -> anyhow::Result<&'a str> {
	if args.is_empty() {
		bail!("{name}: missing argument");
	}
	Ok(args)
}

fn parse_target(arg: &str) -> DocumentTarget {
	match arg.strip_prefix('#').unwrap_or(arg).parse::<usize>() {
		Ok(n) if arg.starts_with('#') => DocumentTarget::Index(n),
		_ => DocumentTarget::Path(PathBuf::from(arg)),
	}
}

fn parse_goto(args: &str) -> anyhow::Result<LineCol> {
	let mut parts = args.split_whitespace();
	let one_based = |part: Option<&str>, what: &str| -> anyhow::Result<usize> {
		let Some(part) = part else {
			return Ok(0);
		};
		let n: usize = part
			.parse()
			.with_context(|| format!("goto: invalid {what} {part:?}"))?;
		if n == 0 {
			bail!("goto: {what} is 1-based");
		}
		Ok(n - 1)
	};
	let Some(line) = parts.next() else {
		bail!("goto: missing line");
	};
	let line = one_based(Some(line), "line")?;
	let col = one_based(parts.next(), "column")?;
	Ok(LineCol::new(line, col))
}

fn parse_scroll(args: &str) -> anyhow::Result<ViewportState> {
	let values = args
		.split_whitespace()
		.map(|part| {
			part.parse::<f64>()
				.ok()
				.filter(|v| v.is_finite())
				.with_context(|| format!("scroll: invalid offset {part:?}"))
		})
		.collect::<anyhow::Result<Vec<_>>>()?;
	match values[..] {
		[y] => Ok(ViewportState::vertical(y)),
		[x, y] => Ok(ViewportState::new(x, y)),
		_ => bail!("scroll: expected `scroll Y` or `scroll X Y`"),
	}
}

/// Expands `\n`, `\t` and `\\`. Other escapes are kept literally.
fn unescape(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	let mut chars = s.chars();
	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);
			continue;
		}
		match chars.next() {
			Some('n') => out.push('\n'),
			Some('t') => out.push('\t'),
			Some('\\') => out.push('\\'),
			Some(other) => {
				out.push('\\');
				out.push(other);
			}
			None => out.push('\\'),
		}
	}
	out
}
