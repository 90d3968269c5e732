use anyhow::Result;
use arc_swap::ArcSwap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::classifier::ClassifierClient;
use crate::config::{self, Config};
use crate::pricing::PriceEstimator;

/// Shutdown signal types
#[derive(Debug, Clone, Copy)]
pub enum ShutdownSignal {
    /// Graceful shutdown (drain connections)
    Graceful,
}

/// Values swapped atomically on reload
#[derive(Clone)]
pub struct Reloadable {
    pub config_path: PathBuf,
    pub config: Arc<ArcSwap<Config>>,
    pub estimator: Arc<ArcSwap<PriceEstimator>>,
    pub classifier: Arc<ArcSwap<ClassifierClient>>,
}

/// Setup signal handlers for the server
///
/// Handles:
/// - SIGTERM/SIGINT: Graceful shutdown
/// - SIGHUP: Reload the pricing tables from the config file
#[cfg(unix)]
pub fn setup_signal_handlers(
    reloadable: Reloadable,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        let (mut sigterm, mut sigint, mut sighup) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        ) {
            (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
            _ => {
                error!("Failed to install signal handlers, shutting down");
                let _ = tx_clone.send(ShutdownSignal::Graceful);
                return;
            }
        };

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("SIGTERM received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sigint.recv() => {
                    info!("SIGINT received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sighup.recv() => {
                    info!("SIGHUP received, reloading pricing tables");
                    if let Err(e) = reload_config(&reloadable) {
                        error!("Failed to reload configuration: {}", e);
                    } else {
                        info!("Pricing tables reloaded successfully");
                    }
                }
            }
        }
    });

    (shutdown_tx, handle)
}

/// Windows placeholder - only Ctrl+C is supported
#[cfg(not(unix))]
pub fn setup_signal_handlers(
    _reloadable: Reloadable,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl+C received, initiating shutdown");
                let _ = tx_clone.send(ShutdownSignal::Graceful);
            }
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    });

    (shutdown_tx, handle)
}

/// Load and validate the config file, then swap it in
///
/// Pricing tables and the classifier target/timeout are swapped together.
/// If loading or validation fails, the running values stay in place.
/// Server address and history size only take effect on restart.
pub fn reload_config(reloadable: &Reloadable) -> Result<()> {
    let new_config = config::load_config(&reloadable.config_path)?;

    info!(
        "New configuration loaded: {} categories, {} labels",
        new_config.pricing.categories.len(),
        new_config.pricing.labels.len()
    );

    let estimator = PriceEstimator::new(new_config.pricing.clone());
    let classifier = reloadable
        .classifier
        .load()
        .reconfigured(&new_config.classifier);

    if classifier.predict_url() != reloadable.classifier.load().predict_url() {
        info!("Classifier endpoint changed to {}", classifier.predict_url());
    }

    reloadable.estimator.store(Arc::new(estimator));
    reloadable.classifier.store(Arc::new(classifier));
    reloadable.config.store(Arc::new(new_config));

    Ok(())
}
