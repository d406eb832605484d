use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use pay_tracker::api::{AppState, create_router};
use pay_tracker::config::ConfigLoader;

/// Environment variable naming an explicit settings file.
const CONFIG_ENV: &str = "PAY_TRACKER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config/settings.yaml";

/// Loads the explicit settings file if one is named, else the bundled one if
/// present, else the defaults.
fn load_config() -> Result<ConfigLoader> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let path = explicit.or_else(|| {
        let bundled = Path::new(DEFAULT_CONFIG_PATH);
        bundled.exists().then(|| bundled.to_path_buf())
    });
    ConfigLoader::load_or_default(path.as_deref()).context("failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = load_config()?;
    let address = config.bind_address().to_string();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!(address = %address, "Pay tracker API listening");

    axum::serve(listener, create_router(AppState::new(config)))
        .await
        .context("server error")?;
    Ok(())
}
