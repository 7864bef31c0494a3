use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use seq_shortener::cli::Cli;
use seq_shortener::config::{self, Config};
use seq_shortener::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.load_env_file()?;

    let config = config::load_from_env(cli.storage_backend()?)?;
    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
