use clap::Parser;

use vocrec::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	vocrec::run(args).await
}
