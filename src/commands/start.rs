use anyhow::Result;
use colored::Colorize;
use price_estimator::{config, server};
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// Loads configuration and serves until a shutdown signal arrives.
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting price estimator...".green());

    let cfg = config::load_config(config_path)?;

    info!(
        config = %config_path.display(),
        "Starting price estimator in foreground mode"
    );

    server::start_server(cfg, config_path.to_path_buf()).await?;

    Ok(())
}
