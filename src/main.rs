use std::net::IpAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mock_inference_server::{
    config::{Config, LogFormat},
    server::{self, AppState},
};

/// Stub inference backend for investigation end-to-end tests
#[derive(Parser, Debug)]
#[command(name = "mock-inference-server", version, about)]
struct Cli {
    /// Port to listen on (overrides MOCK_LLM_PORT / PORT)
    #[arg(long, short)]
    port: Option<u16>,

    /// Address to bind (overrides MOCK_LLM_HOST)
    #[arg(long)]
    host: Option<IpAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Mock inference server starting..."
    );

    let addr = config.server.socket_addr();
    let listener = match server::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(addr = %addr, error = %e, "Failed to bind listener");
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(config));

    if let Err(e) = server::serve(listener, state).await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
