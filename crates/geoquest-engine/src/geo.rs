//! Great-circle distance on a spherical Earth.

use geoquest_types::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates in meters.
///
/// Symmetric and zero for identical points. Callers must not pass NaN.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Whether `point` lies within `radius_m` meters of `center`.
pub fn within_radius(point: Coordinate, center: Coordinate, radius_m: f64) -> bool {
    distance_meters(point, center) <= radius_m
}
