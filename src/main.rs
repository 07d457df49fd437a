use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use nws_weather_proxy::{VERSION, WeatherProxyConfig, logging, web};

/// Weather website backend: NWS forecast proxy and static frontend server
#[derive(Debug, Parser)]
#[command(name = "weather-proxy", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overrides the configured one
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = WeatherProxyConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    logging::init(&config.logging)?;
    tracing::info!(
        "weather-proxy {} serving {} via {}",
        VERSION,
        config.server.static_dir.display(),
        config.upstream.base_url
    );

    web::run(config).await
}
