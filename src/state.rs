use crate::config::Config;
use crate::store;
use crate::tracking::TripEstimator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    estimator: Arc<TripEstimator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = store::from_config(&config);
        let estimator = TripEstimator::from_config(&config, store);
        Self::with_estimator(config, estimator)
    }

    pub fn with_estimator(config: Config, estimator: TripEstimator) -> Self {
        Self {
            config: Arc::new(config),
            estimator: Arc::new(estimator),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn estimator(&self) -> &TripEstimator {
        &self.estimator
    }
}
