pub mod records;

mod error;

pub use error::{Error, Result};

use std::{
	fs::File,
	io::BufReader,
	path::{Path, PathBuf},
};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kb_service::KbService;

#[derive(Debug, Parser)]
#[command(
	version = kb_cli::VERSION,
	rename_all = "kebab",
	styles = kb_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Drop and recreate both indices before loading.
	#[arg(long)]
	pub recreate: bool,
	/// JSON Lines file of name records.
	#[arg(long, value_name = "FILE")]
	pub names: Option<PathBuf>,
	/// JSON Lines file of fact records.
	#[arg(long, value_name = "FILE")]
	pub facts: Option<PathBuf>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = kb_config::load(&args.config)?;

	init_tracing(&config)?;

	let service = KbService::connect(config)?;

	service.ensure_indices(args.recreate).await?;

	if let Some(path) = &args.names {
		let entities = records::read_names(open(path)?)?;

		tracing::info!(path = %path.display(), records = entities.len(), "Loaded name records.");

		let report = service.index_names(&entities).await?;

		tracing::info!(
			index = %report.index,
			submitted = report.submitted,
			flushes = report.flushes,
			"Indexed names."
		);
	}
	if let Some(path) = &args.facts {
		let facts = records::read_facts(open(path)?)?;

		tracing::info!(path = %path.display(), records = facts.len(), "Loaded fact records.");

		let report = service.index_facts(&facts).await?;

		tracing::info!(
			index = %report.index,
			submitted = report.submitted,
			flushes = report.flushes,
			"Indexed facts."
		);
	}

	Ok(())
}

fn init_tracing(config: &kb_config::Config) -> color_eyre::Result<()> {
	tracing_subscriber::fmt().with_env_filter(log_filter(&config.service.log_level)).init();

	Ok(())
}

/// Falls back to `info` when the configured level does not parse.
fn log_filter(level: &str) -> EnvFilter {
	EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open(path: &Path) -> Result<BufReader<File>> {
	File::open(path)
		.map(BufReader::new)
		.map_err(|source| Error::ReadInput { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unparsable_log_level_falls_back_to_info() {
		assert_eq!(log_filter("kb_indexer=loud").to_string(), "info");
		assert_eq!(log_filter("debug").to_string(), "debug");
	}
}
