//! # payload-swagger-server
//!
//! A stand-in host that serves the generated OpenAPI document.
//!
//! This binary provides:
//! - Swagger UI at the configured path (default `/api/swagger`)
//! - The generated document next to it (`/api/swagger.json`)
//! - A health check at `/health`
//!
//! ## Running
//!
//! ```bash
//! payload-swagger-server --config payload.json
//!
//! # Settings from a file and the environment
//! PAYLOAD_SWAGGER_PORT=8080 PAYLOAD_SWAGGER_SWAGGER__COLLECTIONS=posts,users \
//!     payload-swagger-server --settings payload-swagger.toml
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use payload_swagger_core::HostConfig;
use payload_swagger_server::{api, logging, Host, ServerSettings, SwaggerPlugin};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "payload-swagger-server")]
#[command(about = "Serve the OpenAPI document of a Payload configuration through Swagger UI", long_about = None)]
struct Args {
    /// Host configuration file (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Settings file [default: payload-swagger.toml when present]
    #[arg(short, long, value_name = "FILE", env = "PAYLOAD_SWAGGER_SETTINGS")]
    settings: Option<PathBuf>,
}

fn load_host_config(settings: &ServerSettings, args: &Args) -> anyhow::Result<HostConfig> {
    let Some(path) = args
        .config
        .clone()
        .or_else(|| settings.resolve_host_config())
    else {
        warn!("No host configuration given, serving an empty document");
        return Ok(HostConfig::default());
    };

    let config = HostConfig::load(&path)
        .with_context(|| format!("Failed to load host configuration from {}", path.display()))?;
    config.validate()?;
    info!(
        path = %path.display(),
        collections = config.collections.len(),
        "Loaded host configuration"
    );
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = ServerSettings::load(args.settings.as_deref())?;

    logging::init(settings.production)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting payload-swagger-server");

    let config = load_host_config(&settings, &args)?;

    let host = Host::new(config).with_router(api::create_router());
    let mut host = SwaggerPlugin::new(settings.swagger.clone()).apply(host);
    host.init();

    let app = host
        .into_router()
        .unwrap_or_default()
        .layer(TraceLayer::new_for_http());

    let addr = settings.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, swagger = %settings.swagger.path, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
