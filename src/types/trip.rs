use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracking::geo;
use crate::types::route::Coordinate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    EnRoute,
    Arrived,
}

/// Persisted simulation state for one tracked service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub request_id: String,
    pub technician_name: String,
    pub start_lat: f64,
    pub start_lng: f64,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub current_lat: f64,
    pub current_lng: f64,
    pub progress: f64,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: f64,
    pub traffic_delay_minutes: f64,
    pub eta_minutes: u32,
    pub speed_kmh: f64,
    pub heading_degrees: f64,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub status: TripStatus,
}

impl TripRecord {
    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.start_lat, self.start_lng)
    }

    pub fn destination(&self) -> Coordinate {
        Coordinate::new(self.destination_lat, self.destination_lng)
    }

    pub fn current(&self) -> Coordinate {
        Coordinate::new(self.current_lat, self.current_lng)
    }

    pub fn is_arrived(&self) -> bool {
        self.status == TripStatus::Arrived
    }
}

/// Public projection of a [`TripRecord`] returned to polling clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveLocationView {
    pub request_id: String,
    pub technician_name: String,
    pub lat: f64,
    pub lng: f64,
    pub start_lat: f64,
    pub start_lng: f64,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub eta_minutes: u32,
    pub speed_kmh: f64,
    pub traffic_delay_minutes: f64,
    pub last_updated: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub heading_degrees: f64,
    pub progress: f64,
    pub status: TripStatus,
    pub remaining_km: f64,
}

impl From<&TripRecord> for LiveLocationView {
    fn from(record: &TripRecord) -> Self {
        Self {
            request_id: record.request_id.clone(),
            technician_name: record.technician_name.clone(),
            lat: record.current_lat,
            lng: record.current_lng,
            start_lat: record.start_lat,
            start_lng: record.start_lng,
            destination_lat: record.destination_lat,
            destination_lng: record.destination_lng,
            eta_minutes: record.eta_minutes,
            speed_kmh: record.speed_kmh,
            traffic_delay_minutes: record.traffic_delay_minutes,
            last_updated: record.last_updated,
            started_at: record.started_at,
            heading_degrees: record.heading_degrees,
            progress: record.progress,
            status: record.status,
            remaining_km: geo::haversine_km(record.current(), record.destination()),
        }
    }
}
