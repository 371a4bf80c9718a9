use anyhow::Result;
use imagen_proxy::{config, server};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    // A bare level is validated; full RUST_LOG directive lists are left to EnvFilter
    if !log_level.contains(['=', ',']) {
        if let Err(e) = validate_log_level(&log_level) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    let filter = tracing_subscriber::EnvFilter::try_new(&log_level)?;

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting imagen-proxy with log level: {}", log_level);
    info!("Configuration loaded successfully");
    config.check_api_key();

    server::run(config).await?;

    Ok(())
}
