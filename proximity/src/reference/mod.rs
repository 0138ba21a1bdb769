//! Acquisition of the reference point proximity queries are made around.
//!
//! Three ways lead to a [`ReferencePoint`]: device geolocation through a
//! [`GeolocationProvider`], coordinates typed in by the user and a
//! place-name search through a [`Geocoder`]. The [`ReferencePointSelector`]
//! holds the point that is currently in effect.

#[macro_use]
pub mod macros;
pub mod geocoding;
pub mod geolocation;
pub mod point;
pub mod selector;

pub use geocoding::{Geocoder, GeocodingError, NominatimGeocoder, PlaceCandidate, PlaceSearch};
pub use geolocation::{GeolocationError, GeolocationProvider, Position, PositionOptions};
pub use point::{ReferencePoint, ReferencePointError, ReferenceSource};
pub use selector::{GeolocationOutcome, GeolocationTicket, ReferencePointSelector};
