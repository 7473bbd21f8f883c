use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::tracking::geo;
use crate::types::route::{Coordinate, RouteTemplate};
use crate::types::trip::{TripRecord, TripStatus};

/// Advancing never pushes progress past this; the remainder belongs to [`mark_arrived`].
pub const PROGRESS_CAP: f64 = 0.995;
pub const MIN_TRIP_MINUTES: f64 = 10.0;
pub const MAX_TRAFFIC_DELAY_MINUTES: f64 = 20.0;
/// Past this fraction the simulated congestion has cleared.
pub const TRAFFIC_CLEAR_PROGRESS: f64 = 0.9;

const START_JITTER_DEG: f64 = 0.01;
const DESTINATION_JITTER_DEG: f64 = 0.005;
const DURATION_MINUTES: RangeInclusive<f64> = 35.0..=65.0;
const INITIAL_TRAFFIC_DELAY_MINUTES: RangeInclusive<f64> = 0.0..=12.0;
const SPEED_KMH: RangeInclusive<f64> = 28.0..=55.0;
const TRAFFIC_CHANGE_PROBABILITY: f64 = 0.3;
const MAX_TRAFFIC_STEP_MINUTES: f64 = 2.0;

pub fn create_record<R: Rng + ?Sized>(
    request_id: &str,
    technician_name: &str,
    route: &RouteTemplate,
    now: DateTime<Utc>,
    rng: &mut R,
) -> TripRecord {
    let start = jitter(route.start, START_JITTER_DEG, rng);
    let destination = jitter(route.end, DESTINATION_JITTER_DEG, rng);
    let duration_minutes = rng.gen_range(DURATION_MINUTES);
    let traffic_delay_minutes = rng.gen_range(INITIAL_TRAFFIC_DELAY_MINUTES);

    TripRecord {
        request_id: request_id.to_string(),
        technician_name: technician_name.to_string(),
        start_lat: start.lat,
        start_lng: start.lng,
        destination_lat: destination.lat,
        destination_lng: destination.lng,
        current_lat: start.lat,
        current_lng: start.lng,
        progress: 0.0,
        started_at: now,
        duration_minutes,
        traffic_delay_minutes,
        eta_minutes: (duration_minutes + traffic_delay_minutes).round() as u32,
        speed_kmh: rng.gen_range(SPEED_KMH),
        heading_degrees: 0.0,
        last_updated: now,
        status: TripStatus::EnRoute,
    }
}

fn jitter<R: Rng + ?Sized>(point: Coordinate, max_deg: f64, rng: &mut R) -> Coordinate {
    Coordinate::new(
        point.lat + rng.gen_range(-max_deg..=max_deg),
        point.lng + rng.gen_range(-max_deg..=max_deg),
    )
}

pub fn total_trip_minutes(record: &TripRecord) -> f64 {
    (record.duration_minutes + record.traffic_delay_minutes).max(MIN_TRIP_MINUTES)
}

/// Moves the trip forward by the wall-clock time since `last_updated`.
/// Arrived trips are returned untouched.
pub fn advance_record<R: Rng + ?Sized>(
    mut record: TripRecord,
    now: DateTime<Utc>,
    rng: &mut R,
) -> TripRecord {
    if record.is_arrived() {
        return record;
    }

    let elapsed = elapsed_minutes(record.last_updated, now);
    let total_minutes = total_trip_minutes(&record);
    let progress = (record.progress + elapsed / total_minutes).min(PROGRESS_CAP);
    // a record that somehow sits above the cap must not move backwards
    let progress = progress.max(record.progress);

    let current = geo::interpolate(record.start(), record.destination(), progress);

    record.progress = progress;
    record.current_lat = current.lat;
    record.current_lng = current.lng;
    record.heading_degrees = geo::initial_bearing(current, record.destination());
    record.traffic_delay_minutes =
        drift_traffic_delay(record.traffic_delay_minutes, progress, elapsed, rng);
    // eta uses the delay just drifted to, so a repeat poll at the same instant agrees
    let remaining_minutes = (1.0 - progress) * total_trip_minutes(&record);
    record.eta_minutes = remaining_minutes.round().max(1.0) as u32;
    record.last_updated = now;
    record
}

fn elapsed_minutes(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = now - since;
    let minutes = match elapsed.num_nanoseconds() {
        Some(ns) => ns as f64 / 60_000_000_000.0,
        None => elapsed.num_milliseconds() as f64 / 60_000.0,
    };
    minutes.max(0.0)
}

/// Random walk of the congestion delay. Only moves when time has passed.
fn drift_traffic_delay<R: Rng + ?Sized>(
    current: f64,
    progress: f64,
    elapsed_minutes: f64,
    rng: &mut R,
) -> f64 {
    if progress > TRAFFIC_CLEAR_PROGRESS {
        return 0.0;
    }
    if elapsed_minutes <= 0.0 || !rng.gen_bool(TRAFFIC_CHANGE_PROBABILITY) {
        return current;
    }
    let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
    let step = rng.gen_range(0.0..=MAX_TRAFFIC_STEP_MINUTES);
    (current + sign * step).clamp(0.0, MAX_TRAFFIC_DELAY_MINUTES)
}

/// Terminal transition: the technician is at the destination.
pub fn mark_arrived(mut record: TripRecord, now: DateTime<Utc>) -> TripRecord {
    if record.is_arrived() {
        return record;
    }
    record.status = TripStatus::Arrived;
    record.progress = 1.0;
    record.current_lat = record.destination_lat;
    record.current_lng = record.destination_lng;
    record.eta_minutes = 0;
    record.traffic_delay_minutes = 0.0;
    record.last_updated = now;
    record
}
