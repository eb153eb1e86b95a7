use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use museum_web::{build_app, load_config, AppState};

#[derive(Parser)]
#[command(name = "web", about = "Museum universe wiki web server")]
struct Cli {
    /// Path to config TOML file
    #[arg(long, default_value = "./config/museum.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("museum=info".parse()?))
        .init();

    let cli = Cli::parse();

    info!(config = %cli.config.display(), "Loading config");
    let mut config = load_config(&cli.config)?;
    config.server.apply_env()?;

    let state = AppState::from_config(&config).context("Invalid locale configuration")?;
    info!(
        locales = ?state.locales.supported().collect::<Vec<_>>(),
        default = state.locales.default_tag(),
        "Locale registry ready"
    );

    let app = build_app(Arc::new(state));

    let addr = config.server.addr();
    info!("Museum web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
