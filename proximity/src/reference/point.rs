//! The [`ReferencePoint`] every proximity query is made around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranker::ranker_types::location::{Location, LATITUDE_RANGE, LONGITUDE_RANGE};

/// Error type for rejected coordinates
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ReferencePointError {
    /// Input could not be read as a number
    NotANumber,

    /// Latitude outside [-90, 90]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180]
    InvalidLongitude(f64),
}

impl std::fmt::Display for ReferencePointError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ReferencePointError::NotANumber => {
                write!(f, "Please enter valid latitude and longitude values")
            }
            ReferencePointError::InvalidLatitude(_) => {
                write!(f, "Latitude must be between -90 and 90")
            }
            ReferencePointError::InvalidLongitude(_) => {
                write!(f, "Longitude must be between -180 and 180")
            }
        }
    }
}

impl std::error::Error for ReferencePointError {}

/// How a reference point was obtained
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceSource {
    /// Device geolocation
    Device,

    /// Coordinates typed in by the user
    Manual,

    /// A candidate picked from a place-name search
    PlaceSearch,
}

/// The coordinate representing the user's location.
///
/// Only the coordinates take part in ranking. The label is for display
/// and is set when the point comes from a place-name search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    location: Location,
    label: Option<String>,
    source: ReferenceSource,
    acquired_at: DateTime<Utc>,
}

impl ReferencePoint {
    /// Validates the coordinates and builds a reference point.
    ///
    /// Out of range values are rejected, never clamped.
    pub fn new(
        latitude: f64,
        longitude: f64,
        source: ReferenceSource,
    ) -> Result<Self, ReferencePointError> {
        if latitude.is_nan() || longitude.is_nan() {
            return Err(ReferencePointError::NotANumber);
        }
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(ReferencePointError::InvalidLatitude(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(ReferencePointError::InvalidLongitude(longitude));
        }

        Ok(ReferencePoint {
            location: Location::new(latitude, longitude),
            label: None,
            source,
            acquired_at: Utc::now(),
        })
    }

    /// Parses the text of the manual latitude and longitude inputs.
    pub fn from_manual_input(latitude: &str, longitude: &str) -> Result<Self, ReferencePointError> {
        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| ReferencePointError::NotANumber)
        };

        Self::new(parse(latitude)?, parse(longitude)?, ReferenceSource::Manual)
    }

    /// Attaches a display label, e.g. a place name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The validated coordinates.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.location.latitude.into_inner()
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.location.longitude.into_inner()
    }

    /// The display label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// How the point was obtained.
    pub fn source(&self) -> ReferenceSource {
        self.source
    }

    /// When the point was obtained.
    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    /// Coordinates with six decimals, regardless of the label.
    pub fn precise(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude(), self.longitude())
    }
}

impl std::fmt::Display for ReferencePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "{}", self.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_input_accepted() {
        let point = ReferencePoint::from_manual_input(" 40.7128 ", "-74.0060").unwrap();
        assert_eq!(point.latitude(), 40.7128);
        assert_eq!(point.longitude(), -74.006);
        assert_eq!(point.source(), ReferenceSource::Manual);
        assert_eq!(point.label(), None);
        assert_eq!(point.to_string(), "40.7128, -74.0060");
        assert_eq!(point.precise(), "40.712800, -74.006000");
    }

    #[test]
    fn test_manual_input_bounds_are_inclusive() {
        assert!(ReferencePoint::from_manual_input("90", "180").is_ok());
        assert!(ReferencePoint::from_manual_input("-90", "-180").is_ok());
    }

    #[test]
    fn test_manual_input_not_a_number() {
        for (lat, lon) in [("", "1"), ("abc", "1"), ("1", "1,5"), ("NaN", "0"), ("0", "nan")] {
            assert_eq!(
                ReferencePoint::from_manual_input(lat, lon).unwrap_err(),
                ReferencePointError::NotANumber,
                "input ({lat}, {lon})"
            );
        }
    }

    #[test]
    fn test_out_of_range_rejected_not_clamped() {
        assert_eq!(
            ReferencePoint::from_manual_input("90.5", "0").unwrap_err(),
            ReferencePointError::InvalidLatitude(90.5)
        );
        assert_eq!(
            ReferencePoint::from_manual_input("0", "-181").unwrap_err(),
            ReferencePointError::InvalidLongitude(-181.0)
        );
        assert_eq!(
            ReferencePoint::new(f64::INFINITY, 0.0, ReferenceSource::Device).unwrap_err(),
            ReferencePointError::InvalidLatitude(f64::INFINITY)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ReferencePointError::NotANumber.to_string(),
            "Please enter valid latitude and longitude values"
        );
        assert_eq!(
            ReferencePointError::InvalidLatitude(91.0).to_string(),
            "Latitude must be between -90 and 90"
        );
        assert_eq!(
            ReferencePointError::InvalidLongitude(181.0).to_string(),
            "Longitude must be between -180 and 180"
        );
    }

    #[test]
    fn test_label_is_display_only() {
        let point = ReferencePoint::new(51.5074, -0.1278, ReferenceSource::PlaceSearch)
            .unwrap()
            .with_label("London, Greater London, England");

        assert_eq!(point.to_string(), "London, Greater London, England");
        assert_eq!(point.location(), Location::new(51.5074, -0.1278));
    }
}
