use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use actiongraph::core::Engine;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the JSON document
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting actiongraph v{}", env!("CARGO_PKG_VERSION"));

    // Create the engine with configuration
    let engine = Engine::from_config_path(cli.config.as_deref()).await?;

    // Execute the requested command
    cli.execute(engine).await
}
