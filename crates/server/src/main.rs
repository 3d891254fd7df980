//! Filegate server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use filegate_client::FileServiceClient;
use filegate_core::config::AppConfig;
use filegate_server::bootstrap::build_operator_registry;
use filegate_server::{AppState, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filegate - admin file-relay gateway
#[derive(Parser, Debug)]
#[command(name = "filegated")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "FILEGATE_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Filegate v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    // Check for FILEGATE_ environment variables (excluding FILEGATE_CONFIG which is just the path)
    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("FILEGATE_") && key != "FILEGATE_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: filegated --config /path/to/config.toml\n  \
             2. Environment variables: FILEGATE_SERVER__BIND=0.0.0.0:8080 \
             FILEGATE_UPSTREAM__BASE_URL=http://files.internal:3000 filegated\n\n\
             See config/server.example.toml for example configuration.\n\
             Set FILEGATE_CONFIG env var to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("FILEGATE_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Register Prometheus metrics
    filegate_server::metrics::register_metrics();

    // Validate and load the operator registry
    let operators = build_operator_registry(&config.operators)?;

    // Build the downstream client
    let files = FileServiceClient::new(&config.upstream)
        .context("failed to initialize downstream client")?;
    tracing::info!(upstream = %config.upstream.base_url, "Downstream client initialized");

    // Create application state and router
    let state = AppState::new(config.clone(), files, operators);
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
