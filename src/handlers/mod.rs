pub mod appraise;
pub mod estimate;
pub mod health;
pub mod history;
pub mod metrics_handler;

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::{
    appraisal::Appraiser, classifier::ClassifierClient, config::Config, history::HistoryStore,
    pricing::PriceEstimator,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
    pub estimator: Arc<ArcSwap<PriceEstimator>>,
    pub classifier: Arc<ArcSwap<ClassifierClient>>,
    pub appraiser: Appraiser,
}

impl AppState {
    /// Build the shared state from a loaded configuration
    pub fn from_config(config: Config) -> Self {
        let classifier = Arc::new(ArcSwap::from_pointee(ClassifierClient::new(
            reqwest::Client::new(),
            &config.classifier,
        )));
        let estimator = Arc::new(ArcSwap::from_pointee(PriceEstimator::new(
            config.pricing.clone(),
        )));
        let history = Arc::new(HistoryStore::new(config.history.max_entries));
        let appraiser = Appraiser::new(classifier.clone(), estimator.clone(), history);

        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            estimator,
            classifier,
            appraiser,
        }
    }
}
