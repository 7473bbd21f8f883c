use crate::types::route::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Straight-line position at fraction `t` of the way from `from` to `to`.
pub fn interpolate(from: Coordinate, to: Coordinate, t: f64) -> Coordinate {
    Coordinate::new(lerp(from.lat, to.lat, t), lerp(from.lng, to.lng, t))
}

/// Initial great-circle bearing from `from` towards `to`, in degrees within [0, 360).
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> f64 {
    let d_lng = (to.lng - from.lng).to_radians();
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();

    let y = d_lng.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lng.cos();

    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
