pub mod clock;
pub mod geo;
pub mod simulate;

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::{Config, DEFAULT_TECHNICIAN_NAME};
use crate::error::StoreError;
use crate::store::TripStore;
use crate::types::route::RouteTemplate;
use crate::types::trip::{LiveLocationView, TripRecord};
use clock::{Clock, SystemClock};

/// Simulates a technician driving to a job, advancing the trip each time it is read.
///
/// Calls for the same request id are serialized so that concurrent polls cannot
/// overwrite each other's progress. Calls for different ids run independently.
pub struct TripEstimator {
    store: Arc<dyn TripStore>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
    routes: Vec<RouteTemplate>,
    default_technician_name: String,
    key_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TripEstimator {
    pub fn new(store: Arc<dyn TripStore>, routes: Vec<RouteTemplate>, rng: StdRng) -> Self {
        let routes = if routes.is_empty() {
            tracing::warn!("No route templates configured, using built-in routes");
            RouteTemplate::defaults()
        } else {
            routes
        };
        Self {
            store,
            clock: Arc::new(SystemClock),
            rng: Mutex::new(rng),
            routes,
            default_technician_name: DEFAULT_TECHNICIAN_NAME.to_string(),
            key_locks: DashMap::new(),
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn TripStore>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => {
                tracing::info!("Seeding trip simulator with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::new(store, config.routes.clone(), rng)
            .with_default_technician(&config.default_technician_name)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_default_technician(mut self, name: &str) -> Self {
        self.default_technician_name = name.to_string();
        self
    }

    /// Returns the current simulated position for `request_id`, creating a trip on first use.
    ///
    /// A non-empty `technician_name` replaces the stored display name.
    pub fn get_live_location(
        &self,
        request_id: &str,
        technician_name: Option<&str>,
    ) -> Result<LiveLocationView, StoreError> {
        let technician_name = technician_name.map(str::trim).filter(|name| !name.is_empty());

        let key_lock = self.key_lock(request_id);
        let _guard = key_lock.lock().map_err(|_| StoreError::Poisoned)?;

        let (record, mut dirty) = match self.store.get(request_id)? {
            Some(mut record) => {
                let mut renamed = false;
                if let Some(name) = technician_name {
                    if name != record.technician_name {
                        record.technician_name = name.to_string();
                        renamed = true;
                    }
                }
                (record, renamed)
            }
            None => {
                let name = technician_name.unwrap_or(self.default_technician_name.as_str());
                (self.create_record(request_id, name, self.clock.now()), true)
            }
        };

        // a fresh trip is advanced too, so it reflects the time spent creating it
        dirty |= !record.is_arrived();
        let now = self.clock.now();
        let record = simulate::advance_record(record, now, &mut *self.rng());

        if dirty {
            self.store.put(&record)?;
        }

        tracing::debug!(
            "Trip {} at {:.1}% (eta {} min, traffic {:.1} min)",
            record.request_id,
            record.progress * 100.0,
            record.eta_minutes,
            record.traffic_delay_minutes
        );

        Ok(LiveLocationView::from(&record))
    }

    /// Moves an existing trip to its arrived state. Returns `None` if no trip exists.
    pub fn mark_arrived(&self, request_id: &str) -> Result<Option<LiveLocationView>, StoreError> {
        let key_lock = self.key_lock(request_id);
        let _guard = key_lock.lock().map_err(|_| StoreError::Poisoned)?;

        let Some(record) = self.store.get(request_id)? else {
            return Ok(None);
        };
        if record.is_arrived() {
            return Ok(Some(LiveLocationView::from(&record)));
        }

        let record = simulate::mark_arrived(record, self.clock.now());
        self.store.put(&record)?;
        tracing::info!(
            "Technician {} arrived for request {}",
            record.technician_name,
            record.request_id
        );

        Ok(Some(LiveLocationView::from(&record)))
    }

    fn create_record(
        &self,
        request_id: &str,
        technician_name: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> TripRecord {
        let mut rng = self.rng();
        let route = self
            .routes
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_else(|| RouteTemplate::defaults().remove(0));
        let record = simulate::create_record(request_id, technician_name, &route, now, &mut *rng);
        tracing::info!(
            "Created trip for request {} on route {} ({:.0} min + {:.1} min traffic)",
            request_id,
            route.name,
            record.duration_minutes,
            record.traffic_delay_minutes
        );
        record
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn key_lock(&self, request_id: &str) -> Arc<Mutex<()>> {
        self.key_locks
            .entry(request_id.to_string())
            .or_default()
            .clone()
    }
}
