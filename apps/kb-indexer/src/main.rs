use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = kb_indexer::Args::parse();

	kb_indexer::run(args).await
}
