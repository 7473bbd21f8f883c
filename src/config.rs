use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::route::RouteTemplate;

pub const DEFAULT_TECHNICIAN_NAME: &str = "FieldAssist Pro";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Some(StoreBackend::Memory),
            "file" | "json" => Some(StoreBackend::File),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub data_dir: PathBuf,
    pub default_technician_name: String,
    pub rng_seed: Option<u64>,
    pub routes: Vec<RouteTemplate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            store_backend: StoreBackend::Memory,
            data_dir: PathBuf::from("data"),
            default_technician_name: DEFAULT_TECHNICIAN_NAME.to_string(),
            rng_seed: None,
            routes: RouteTemplate::defaults(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let store_backend = std::env::var("TRACKING_STORE")
            .ok()
            .and_then(|s| StoreBackend::from_str(&s))
            .unwrap_or(defaults.store_backend);

        let data_dir = std::env::var("TRACKING_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let default_technician_name = std::env::var("TRACKING_DEFAULT_TECHNICIAN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.default_technician_name);

        let rng_seed = std::env::var("TRACKING_SEED")
            .ok()
            .and_then(|s| s.parse().ok());

        let routes = match std::env::var("TRACKING_ROUTES_FILE") {
            Ok(path) if !path.trim().is_empty() => match load_routes(Path::new(&path)) {
                Ok(routes) => routes,
                Err(err) => {
                    tracing::warn!("{}. Falling back to built-in routes", err);
                    defaults.routes
                }
            },
            _ => defaults.routes,
        };

        Self {
            port,
            store_backend,
            data_dir,
            default_technician_name,
            rng_seed,
            routes,
        }
    }
}

/// Reads a JSON array of route templates.
pub fn load_routes(path: &Path) -> Result<Vec<RouteTemplate>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::RoutesFile {
        path: path.to_path_buf(),
        source,
    })?;
    let routes: Vec<RouteTemplate> =
        serde_json::from_str(&raw).map_err(|err| ConfigError::InvalidRoutes {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
    if routes.is_empty() {
        return Err(ConfigError::InvalidRoutes {
            path: path.to_path_buf(),
            reason: "no routes defined".to_string(),
        });
    }
    Ok(routes)
}
