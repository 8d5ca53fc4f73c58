use std::path::PathBuf;

use thiserror::Error;

/// Failure writing to a settings store.
///
/// These never reach the user. The persistence adapter logs them and the
/// previously persisted value stays in place.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("failed to write settings file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to encode settings: {0}")]
	Encode(#[from] serde_json::Error),
}
