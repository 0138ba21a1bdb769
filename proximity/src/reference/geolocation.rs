//! Device geolocation contract.
//!
//! The crate does not talk to any positioning hardware itself. Hosts
//! implement [`GeolocationProvider`] on top of whatever the platform
//! offers and hand it to the
//! [`ReferencePointSelector`](super::selector::ReferencePointSelector).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;

use super::point::{ReferencePoint, ReferenceSource};

/// Options for a single position request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOptions {
    /// Ask the device for its most accurate fix
    pub enable_high_accuracy: bool,

    /// Give up after this many milliseconds
    pub timeout_ms: u64,

    /// Accept a cached position at most this old, 0 requires a fresh fix
    pub maximum_age_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        PositionOptions {
            enable_high_accuracy: true,
            timeout_ms: 10000,
            maximum_age_ms: 0,
        }
    }
}

/// A position reported by the device.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Accuracy radius in meters, when the device reports one
    pub accuracy_meters: Option<f64>,

    /// When the fix was taken
    pub timestamp: DateTime<Utc>,
}

impl Position {
    /// A fix taken now without accuracy information.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Position {
            latitude,
            longitude,
            accuracy_meters: None,
            timestamp: Utc::now(),
        }
    }

    /// Turns the position into a reference point.
    ///
    /// A device reporting coordinates outside the valid ranges is treated as
    /// having no position at all.
    pub fn into_reference_point(self) -> Result<ReferencePoint, GeolocationError> {
        ReferencePoint::new(self.latitude, self.longitude, ReferenceSource::Device)
            .map_err(|_| GeolocationError::PositionUnavailable)
    }
}

/// Reasons a device position could not be obtained
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The user or platform refused location access
    PermissionDenied,

    /// The device could not determine its position
    PositionUnavailable,

    /// No position within [`PositionOptions::timeout_ms`]
    Timeout,

    /// The platform has no geolocation support
    Unsupported,
}

impl std::fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GeolocationError::PermissionDenied => write!(
                f,
                "Location permission denied. Please enable location access in your settings."
            ),
            GeolocationError::PositionUnavailable => write!(
                f,
                "Location information unavailable. Please try again or enter manually."
            ),
            GeolocationError::Timeout => {
                write!(f, "Location request timed out. Please try again.")
            }
            GeolocationError::Unsupported => {
                write!(f, "Geolocation is not supported on this device")
            }
        }
    }
}

impl std::error::Error for GeolocationError {}

/// Source of device positions.
pub trait GeolocationProvider: Send + Sync {
    /// Whether the platform offers geolocation at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Request the current position of the device.
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Position, GeolocationError>> + Send;
}
