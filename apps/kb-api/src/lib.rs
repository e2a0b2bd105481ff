pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = kb_cli::VERSION,
	rename_all = "kebab",
	styles = kb_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = kb_config::load(&args.config)?;

	init_tracing(&config)?;

	let http_addr: SocketAddr = config.service.http_bind.parse()?;
	let state = AppState::new(config)?;
	let app = routes::router(state);
	let listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, "HTTP server listening.");

	axum::serve(listener, app).await?;

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
