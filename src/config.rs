use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pricing::PriceCatalog;

/// Environment variable prefix, e.g. `PRICE_ESTIMATOR__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "PRICE_ESTIMATOR";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub pricing: PriceCatalog,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// "text" or "json"
    pub log_format: String,
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            max_upload_mb: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub predict_path: String,
    pub timeout_seconds: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            predict_path: "/predict/".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ClassifierConfig {
    pub fn predict_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.predict_path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/metrics".to_string(),
        }
    }
}

/// Load configuration from an optional TOML file layered with environment variables
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if !cfg.classifier.base_url.starts_with("http://")
        && !cfg.classifier.base_url.starts_with("https://")
    {
        anyhow::bail!(
            "Classifier base_url must be an http(s) URL, got '{}'",
            cfg.classifier.base_url
        );
    }

    if cfg.classifier.timeout_seconds == 0 {
        anyhow::bail!("Classifier timeout_seconds must be greater than zero");
    }

    if cfg.history.max_entries == 0 {
        anyhow::bail!("History max_entries must be greater than zero");
    }

    if cfg.server.max_upload_mb == 0 {
        anyhow::bail!("Server max_upload_mb must be greater than zero");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log_format '{}': expected text or json", other),
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!("Metrics endpoint must start with '/'");
    }

    cfg.pricing.validate()?;

    Ok(())
}
