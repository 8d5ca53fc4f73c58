//! Marker stack configuration.
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! icon_path = "markstack/marker_gutter_icon.png"
//! icon_color = "region.purplish"
//! animate_scrolling = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::gutter::GutterIcon;

/// Default gutter icon resource.
pub const DEFAULT_ICON_PATH: &str = "markstack/marker_gutter_icon.png";
/// Default theme scope for the gutter icon.
pub const DEFAULT_ICON_COLOR: &str = "region.purplish";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkerStackConfig {
	/// Icon drawn in the gutter for each stacked marker.
	pub icon_path: String,
	/// Theme scope used to color the icon.
	pub icon_color: String,
	/// Whether the host should animate the scroll back to a popped viewport.
	pub animate_scrolling: bool,
}

impl Default for MarkerStackConfig {
	fn default() -> Self {
		Self {
			icon_path: DEFAULT_ICON_PATH.to_owned(),
			icon_color: DEFAULT_ICON_COLOR.to_owned(),
			animate_scrolling: false,
		}
	}
}

impl MarkerStackConfig {
	pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}

	/// Reads a config file. A missing file yields the defaults.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		match std::fs::read_to_string(path) {
			Ok(src) => Self::from_toml(&src),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
			Err(source) => Err(ConfigError::Read {
				path: path.to_path_buf(),
				source,
			}),
		}
	}

	pub fn icon(&self) -> GutterIcon {
		GutterIcon {
			path: self.icon_path.clone(),
			color: self.icon_color.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_config_uses_defaults() {
		assert_eq!(MarkerStackConfig::from_toml("").unwrap(), MarkerStackConfig::default());
	}

	#[test]
	fn partial_config_overrides_given_keys() {
		let config = MarkerStackConfig::from_toml("animate_scrolling = true\nicon_color = \"accent\"\n").unwrap();
		assert!(config.animate_scrolling);
		assert_eq!(config.icon_color, "accent");
		assert_eq!(config.icon_path, DEFAULT_ICON_PATH);
	}

	#[test]
	fn unknown_keys_are_ignored() {
		let config = MarkerStackConfig::from_toml("stack_depth = 10\n").unwrap();
		assert_eq!(config, MarkerStackConfig::default());
	}

	#[test]
	fn wrong_type_is_an_error() {
		assert!(matches!(
			MarkerStackConfig::from_toml("animate_scrolling = \"yes\""),
			Err(ConfigError::Parse(_))
		));
	}

	#[test]
	fn missing_file_yields_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let config = MarkerStackConfig::load(&dir.path().join("config.toml")).unwrap();
		assert_eq!(config, MarkerStackConfig::default());
	}

	#[test]
	fn load_reads_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, "icon_path = \"custom.png\"\n").unwrap();
		assert_eq!(MarkerStackConfig::load(&path).unwrap().icon().path, "custom.png");
	}
}
