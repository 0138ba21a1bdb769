//! Implementation of the Haversine formula for calculating the distance
//! between two points on a sphere.
//!
//! See [Wikipedia](https://en.wikipedia.org/wiki/Haversine_formula) for
//! more.
//!
//! **Distance is returned in kilometers**.

use crate::ranker::ranker_types::location::Location;

/// Mean radius of the earth in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the distance between two points on a sphere.
///
/// # Notes
/// Inputs are expected to be valid coordinates, callers validate them
/// before getting here. NaN input propagates to the result.
///
/// Float 64 values are used so the known-distance checks and the
/// inclusive radius boundary hold at meter precision.
pub fn distance(start: &Location, end: &Location) -> f64 {
    distance_km(
        start.latitude.into_inner(),
        start.longitude.into_inner(),
        end.latitude.into_inner(),
        end.longitude.into_inner(),
    )
}

/// Calculate the distance between two coordinate pairs given in degrees.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat: f64 = (lat2 - lat1).to_radians();
    let d_lon: f64 = (lon2 - lon1).to_radians();
    let lat1: f64 = lat1.to_radians();
    let lat2: f64 = lat2.to_radians();

    let mut a: f64 = ((d_lat / 2.0).sin()) * ((d_lat / 2.0).sin())
        + (lat1.cos() * lat2.cos()) * (((d_lon / 2.0).sin()) * ((d_lon / 2.0).sin()));

    // rounding can push antipodal points just past 1
    if a > 1.0 {
        a = 1.0;
    }
    let c: f64 = 2.0 * ((a.sqrt()).atan2((1.0 - a).sqrt()));

    EARTH_RADIUS_KM * c
}
