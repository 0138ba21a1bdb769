//! Request and response bodies of the Car Buddy REST API that are not
//! entities themselves.

use serde::{Deserialize, Serialize};

use crate::ranker::{Garage, Located, Location};
use crate::reference::ReferencePoint;

/// Body of `POST /garages/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageSearchRequest {
    /// Latitude of the search center
    pub latitude: f64,

    /// Longitude of the search center
    pub longitude: f64,

    /// Search radius, server default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,

    /// Only garages rated at least this high
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
}

impl GarageSearchRequest {
    /// Search around `reference` within `radius_km`.
    pub fn around(reference: &ReferencePoint, radius_km: Option<f64>) -> Self {
        GarageSearchRequest {
            latitude: reference.latitude(),
            longitude: reference.longitude(),
            radius_km,
            min_rating: None,
        }
    }

    /// Restricts the search to garages with at least `rating`.
    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }
}

/// A garage as returned by the server side search.
///
/// The server sends its distance as `distanceKm`. It is written back as
/// `serverDistanceKm` so that a locally ranked [`RankedEntity`] keeps a
/// single `distanceKm` key.
///
/// [`RankedEntity`]: crate::ranker::RankedEntity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageWithDistance {
    /// The garage itself
    #[serde(flatten)]
    pub garage: Garage,

    /// Distance computed by the server
    #[serde(rename = "serverDistanceKm", alias = "distanceKm")]
    pub distance_km: f64,

    /// Number of services the garage offers
    #[serde(default)]
    pub service_count: u32,
}

impl Located for GarageWithDistance {
    fn uid(&self) -> &str {
        self.garage.uid()
    }

    fn location(&self) -> Location {
        self.garage.location()
    }
}
