//! CLI schema and parsing helpers for the markstack binary.

use std::path::PathBuf;

use clap::Parser;

/// A file path with optional line and column position.
///
/// Supports:
/// * `file.txt` - just a path
/// * `file.txt:42` - path with line number (1-indexed)
/// * `file.txt:42:10` - path with line and column (1-indexed)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLocation {
	pub path: PathBuf,
	/// Line number (0-indexed). None means start of file.
	pub line: Option<usize>,
	/// Column number (0-indexed). None means start of line.
	pub column: Option<usize>,
}

impl FileLocation {
	/// Parses a file location from a string.
	///
	/// Line and column in input are 1-indexed, converted to 0-indexed.
	/// Anything that is not a valid `:line` or `:line:col` suffix stays part
	/// of the path.
	pub fn parse(s: &str) -> Self {
		Self::parse_suffix(s).unwrap_or_else(|| Self {
			path: PathBuf::from(s),
			..Self::default()
		})
	}

	fn parse_suffix(s: &str) -> Option<Self> {
		// Skip a Windows drive letter (`C:\...`) when looking for separators.
		let bytes = s.as_bytes();
		let drive = bytes.len() > 2
			&& bytes[0].is_ascii_alphabetic()
			&& bytes[1] == b':'
			&& matches!(bytes[2], b'\\' | b'/');
		let skip = if drive { 2 } else { 0 };
		let mut parts = s[skip..].rsplitn(3, ':');
		let last = parts.next()?;
		let middle = parts.next()?;
		let rest = parts.next();

		let one_based = |n: &str| n.parse::<usize>().ok().filter(|&n| n > 0);

		if let (Some(rest), Some(line), Ok(col)) = (rest, one_based(middle), last.parse::<usize>()) {
			return Some(Self {
				path: PathBuf::from(&s[..skip + rest.len()]),
				line: Some(line - 1),
				column: Some(col.saturating_sub(1)),
			});
		}

		let line = one_based(last)?;
		Some(Self {
			path: PathBuf::from(&s[..s.len() - last.len() - 1]),
			line: Some(line - 1),
			column: None,
		})
	}
}

#[derive(Parser, Debug)]
#[command(name = "markstack")]
#[command(about = "Drive per-document marker stacks from a command script")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Command script to run (reads stdin if omitted).
	pub script: Option<PathBuf>,

	/// File to open before the script runs.
	/// Supports path:line and path:line:col formats.
	#[arg(long, short = 'o', value_name = "FILE")]
	pub open: Option<String>,

	/// Config file (defaults to $XDG_CONFIG_HOME/markstack/config.toml).
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Directory holding persisted view settings
	/// (defaults to $XDG_STATE_HOME/markstack).
	#[arg(long, value_name = "DIR")]
	pub state_dir: Option<PathBuf>,

	/// Log at debug level.
	#[arg(long, short = 'v')]
	pub verbose: bool,
}

impl Cli {
	pub fn open_location(&self) -> Option<FileLocation> {
		self.open.as_deref().map(FileLocation::parse)
	}

	/// Config file to read, if a config directory can be found.
	pub fn config_path(&self) -> Option<PathBuf> {
		self.config
			.clone()
			.or_else(|| dirs::config_dir().map(|dir| dir.join("markstack").join("config.toml")))
	}

	/// Directory for the persisted settings file.
	pub fn state_dir(&self) -> Option<PathBuf> {
		self.state_dir.clone().or_else(|| {
			dirs::state_dir()
				.or_else(|| dirs::home_dir().map(|home| home.join(".local/state")))
				.map(|dir| dir.join("markstack"))
		})
	}
}
