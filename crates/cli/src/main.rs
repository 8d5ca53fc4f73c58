//! markstack: headless host for per-document marker stacks.
//!
//! Reads a command script (from a file or stdin), drives the marker stack
//! service against real files, and persists stacks in the state directory so
//! a later run picks them up again.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use markstack_core::{FileSettingsStore, MarkerStackConfig, MarkerStackService};
use tracing::info;

mod cli;
mod script;
mod session;

use cli::Cli;
use session::Session;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = match cli.config_path() {
		Some(path) => MarkerStackConfig::load(&path)
			.with_context(|| format!("failed to load config from {}", path.display()))?,
		None => MarkerStackConfig::default(),
	};

	let state_dir = cli
		.state_dir()
		.context("no state directory; pass --state-dir")?;
	let store = FileSettingsStore::in_dir(&state_dir);
	info!(path = %store.path().display(), "view settings store");

	let mut session = Session::new(MarkerStackService::new(store, config));
	if let Some(location) = cli.open_location() {
		session.open_at(&location)?;
	}

	let input: Box<dyn BufRead> = match &cli.script {
		Some(path) => Box::new(BufReader::new(
			File::open(path).with_context(|| format!("failed to open script {}", path.display()))?,
		)),
		None => Box::new(io::stdin().lock()),
	};

	let mut stdout = io::stdout().lock();
	let result = session.run_script(input, &mut stdout);
	session.shutdown();
	result
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("markstack_core=debug,markstack_cli=debug,info")
			} else {
				EnvFilter::new("markstack_core=info,markstack_cli=info,warn")
			}
		})
	};

	// MARKSTACK_LOG_DIR sends logs to a per-process file instead of stderr.
	if let Some(log_dir) = std::env::var("MARKSTACK_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("markstack.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry()
				.with(filter())
				.with(file_layer)
				.init();

			info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(io::stderr)
		.init();
}
