//! Struct definitions and implementations for objects that can be ranked
//! by their distance to a reference point.
//!
//! The most generic form is anything implementing [`Located`]. The
//! directory knows three kinds of those: [`Garage`], [`AutoPartsShop`]
//! and [`DetailingShop`]. Functions that only care about the position of
//! an entity take a `Located` parameter and stay agnostic of the kind.
//!
//! The structs mirror the JSON served by the Car Buddy API (camelCase
//! keys). Fields other than the coordinates are carried through the
//! ranking unchanged.
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::location::Location;
use crate::ranker::ranker_utils::haversine;

/// Capability shared by every entity that has a position on the map.
pub trait Located {
    /// Returns the opaque identifier of the entity.
    fn uid(&self) -> &str;

    /// Returns the position of the entity.
    fn location(&self) -> Location;

    /// Returns the distance in kilometers between the entity and `other`
    /// using the Haversine formula.
    fn distance_to(&self, other: &Location) -> OrderedFloat<f64> {
        haversine::distance(&self.location(), other).into()
    }
}

//------------------------------------------------------------------
// Structs and Implementations
//------------------------------------------------------------------

/// A garage offering repair and maintenance services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garage {
    /// Identifier assigned by the API.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Postal address.
    #[serde(default)]
    pub address: String,

    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Average customer rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,

    /// Creation timestamp as served by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update timestamp as served by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Located for Garage {
    fn uid(&self) -> &str {
        &self.id
    }

    fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

/// A shop selling car parts and accessories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoPartsShop {
    /// Identifier assigned by the API.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Postal address.
    #[serde(default)]
    pub address: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone_number: String,

    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Average customer rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,

    /// Creation timestamp as served by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update timestamp as served by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Located for AutoPartsShop {
    fn uid(&self) -> &str {
        &self.id
    }

    fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

/// A detailing shop (washing, polishing, ceramic coating).
///
/// There is no API endpoint for these yet, so they are loaded from local
/// JSON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailingShop {
    /// Identifier of the shop.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Postal address.
    #[serde(default)]
    pub address: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone_number: String,

    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Average customer rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,

    /// Number of reviews behind the rating.
    #[serde(default)]
    pub reviews: u32,

    /// Services offered, e.g. "Ceramic Coating".
    #[serde(default)]
    pub services: Vec<String>,
}

impl Located for DetailingShop {
    fn uid(&self) -> &str {
        &self.id
    }

    fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
