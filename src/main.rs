//! Local runtime for the load balancer invocation bridge.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  alb-bridge                  │
//!   event JSON         │  ┌─────────┐   ┌─────────┐   ┌──────────┐    │
//!   ───────────────────┼─▶│ runtime │──▶│ decoder │──▶│ handler  │    │
//!                      │  │ server  │   └─────────┘   └────┬─────┘    │
//!   plain HTTP         │  │         │                      │          │
//!   ───────────────────┼─▶│emulator │   ┌─────────┐        │          │
//!                      │  │         │◀──│ encoder │◀───────┘          │
//!                      │  └─────────┘   └─────────┘                   │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use alb_bridge::adapter::Adapter;
use alb_bridge::config::{self, BridgeConfig};
use alb_bridge::observability::{logging, metrics};
use alb_bridge::runtime::{EchoHandler, InvokeServer};

#[derive(Parser)]
#[command(name = "alb-bridge")]
#[command(about = "Serve a handler behind emulated load balancer invocations", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exchange headers and query parameters as value lists
    #[arg(long)]
    multi_value_headers: bool,

    /// Override runtime.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => BridgeConfig::default(),
    };
    if args.multi_value_headers {
        config.adapter.multi_value_headers = true;
    }
    if let Some(bind) = args.bind {
        config.runtime.bind_address = bind;
    }
    config::validate_config(&config).map_err(config::ConfigError::Validation)?;

    logging::init(&config.observability)?;
    tracing::info!("alb-bridge v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.runtime.bind_address,
        mode = config.adapter.header_mode().as_str(),
        request_timeout_secs = config.runtime.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.runtime.bind_address).await?;
    let adapter = Adapter::from_config(EchoHandler, &config.adapter);
    InvokeServer::new(adapter, config.runtime).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
