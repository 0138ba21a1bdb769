//! Struct definitions and implementations for [`Location`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A [`Location`] is an interface type that represents a geographic
/// position on the earth's surface in degrees.
///
/// The coordinates are wrapped in [`OrderedFloat`] so a location can be
/// compared, hashed and used as a map key.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Location {
    /// The latitude of the location.
    pub latitude: OrderedFloat<f64>,

    /// The longitude of the location.
    pub longitude: OrderedFloat<f64>,
}

impl Location {
    /// Creates a location without validating the ranges.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }

    /// Returns `true` if both coordinates are finite and inside their
    /// documented ranges.
    pub fn is_valid(&self) -> bool {
        LATITUDE_RANGE.contains(&self.latitude.into_inner())
            && LONGITUDE_RANGE.contains(&self.longitude.into_inner())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:.4}, {:.4}",
            self.latitude.into_inner(),
            self.longitude.into_inner()
        )
    }
}
