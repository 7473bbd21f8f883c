use std::sync::Arc;

use chrono::{TimeZone, Utc};
use fieldtrack_rs::{
    config::{load_routes, Config, StoreBackend},
    error::{ConfigError, StoreError},
    store::{FileStore, MemoryStore, TripStore},
    tracking::{clock::ManualClock, TripEstimator},
    types::trip::{TripRecord, TripStatus},
};
use rand::{rngs::StdRng, SeedableRng};

fn record(request_id: &str) -> TripRecord {
    let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    TripRecord {
        request_id: request_id.to_string(),
        technician_name: "Amina".to_string(),
        start_lat: -1.286,
        start_lng: 36.817,
        destination_lat: -1.3,
        destination_lng: 36.784,
        current_lat: -1.29,
        current_lng: 36.80,
        progress: 0.3,
        started_at: t0,
        duration_minutes: 45.0,
        traffic_delay_minutes: 4.5,
        eta_minutes: 35,
        speed_kmh: 33.0,
        heading_degrees: 245.0,
        last_updated: t0,
        status: TripStatus::EnRoute,
    }
}

#[test]
fn memory_store_upserts_by_request_id() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    assert!(store.get("SR-1").expect("get").is_none());

    store.put(&record("SR-1")).expect("put");
    let mut updated = record("SR-1");
    updated.progress = 0.6;
    store.put(&updated).expect("put");

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("SR-1").expect("get"), Some(updated));
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().join("data");

    let store = FileStore::new(&data_dir);
    assert!(store.get("SR-1").expect("missing file reads as empty").is_none());

    store.put(&record("SR-1")).expect("put");
    store.put(&record("SR-2")).expect("put");
    assert!(store.path().exists());

    let reopened = FileStore::new(&data_dir);
    assert_eq!(reopened.get("SR-1").expect("get"), Some(record("SR-1")));
    assert_eq!(reopened.get("SR-2").expect("get"), Some(record("SR-2")));
    assert!(reopened.get("SR-3").expect("get").is_none());

    let leftovers: Vec<_> = std::fs::read_dir(&data_dir)
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn file_store_writes_camel_case_keyed_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    store.put(&record("SR-9")).expect("put");

    let raw = std::fs::read_to_string(store.path()).expect("read");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["SR-9"]["requestId"], "SR-9");
    assert_eq!(json["SR-9"]["trafficDelayMinutes"].as_f64(), Some(4.5));
    assert_eq!(json["SR-9"]["status"], "en_route");
}

#[test]
fn file_store_accepts_records_without_status() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    let raw = r#"{
  "SR-old": {
    "requestId": "SR-old",
    "technicianName": "FieldAssist Pro",
    "startLat": -1.286389,
    "startLng": 36.817223,
    "destinationLat": -1.300761,
    "destinationLng": 36.784499,
    "currentLat": -1.286389,
    "currentLng": 36.817223,
    "progress": 0,
    "startedAt": "2026-03-01T09:00:00Z",
    "durationMinutes": 50,
    "trafficDelayMinutes": 3,
    "etaMinutes": 53,
    "speedKmh": 40,
    "headingDegrees": 0,
    "lastUpdated": "2026-03-01T09:00:00Z"
  }
}"#;
    std::fs::write(store.path(), raw).expect("write");

    let loaded = store.get("SR-old").expect("get").expect("record");
    assert_eq!(loaded.status, TripStatus::EnRoute);
    assert_eq!(loaded.eta_minutes, 53);
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    std::fs::write(store.path(), "{ not json").expect("write");

    let err = store.get("SR-1").unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn estimator_runs_on_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store: Arc<dyn TripStore> = Arc::new(FileStore::new(dir.path()));
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()));
    let estimator = TripEstimator::new(store.clone(), Config::default().routes, StdRng::seed_from_u64(5))
        .with_clock(clock.clone());

    let first = estimator.get_live_location("SR-file", None).expect("view");
    clock.advance(chrono::Duration::minutes(5));
    let second = estimator.get_live_location("SR-file", None).expect("view");

    assert!(second.progress > first.progress);
    let stored = store.get("SR-file").expect("get").expect("record");
    assert_eq!(stored.progress, second.progress);
}

#[test]
fn routes_file_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("routes.json");
    std::fs::write(
        &path,
        r#"[{"name": "harbour", "start": {"lat": -36.84, "lng": 174.76}, "end": {"lat": -36.90, "lng": 174.80}},
            {"start": {"lat": -36.85, "lng": 174.70}, "end": {"lat": -36.88, "lng": 174.75}}]"#,
    )
    .expect("write");

    let routes = load_routes(&path).expect("routes");
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].name, "harbour");
    assert_eq!(routes[1].name, "");
    assert_eq!(routes[1].end.lng, 174.75);
}

#[test]
fn empty_or_missing_routes_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("routes.json");
    assert!(matches!(load_routes(&path), Err(ConfigError::RoutesFile { .. })));

    std::fs::write(&path, "[]").expect("write");
    assert!(matches!(load_routes(&path), Err(ConfigError::InvalidRoutes { .. })));
}

#[test]
fn store_backend_parses_names() {
    assert_eq!(StoreBackend::from_str("file"), Some(StoreBackend::File));
    assert_eq!(StoreBackend::from_str(" Memory "), Some(StoreBackend::Memory));
    assert_eq!(StoreBackend::from_str("firestore"), None);
}
