//! Place-name search.
//!
//! A free text query is resolved to a list of [`PlaceCandidate`]s by a
//! [`Geocoder`]. The user picks one through [`PlaceSearch::select`]; no
//! candidate is ever chosen automatically, not even a lone one.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use super::point::{ReferencePoint, ReferenceSource};
use crate::ranker::ranker_types::location::Location;

/// Maximum number of candidates requested from the geocoder
const MAX_CANDIDATES: u8 = 5;

/// Error type for place-name search
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodingError {
    /// The query was blank
    EmptyQuery,

    /// Error communicating with the geocoding service
    ClientError(String),

    /// The geocoding service answered with something unreadable
    InvalidData(String),

    /// The selected index does not name a candidate
    InvalidSelection(usize),
}

impl std::fmt::Display for GeocodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GeocodingError::EmptyQuery => write!(f, "Please enter a place to search for"),
            GeocodingError::ClientError(e) => write!(f, "Client error: {}", e),
            GeocodingError::InvalidData(e) => write!(f, "Invalid data: {}", e),
            GeocodingError::InvalidSelection(index) => {
                write!(f, "No search result at position {}", index)
            }
        }
    }
}

impl std::error::Error for GeocodingError {}

/// One possible match for a place-name query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Human readable name of the place
    pub display_name: String,

    /// Where the place is
    pub location: Location,
}

/// Resolves free text to candidate coordinates.
pub trait Geocoder: Send + Sync {
    /// Forward geocode `query`. An empty list means nothing was found.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<PlaceCandidate>, GeocodingError>> + Send;
}

/// The candidates of one query, waiting for the user's choice.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSearch {
    query: String,
    candidates: Vec<PlaceCandidate>,
}

impl PlaceSearch {
    /// Runs `query` against `geocoder`.
    pub async fn run<G: Geocoder>(geocoder: &G, query: &str) -> Result<Self, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }

        let candidates = geocoder.search(query).await?;
        reference_debug!(
            "(PlaceSearch::run) {} candidates for [{}].",
            candidates.len(),
            query
        );

        Ok(PlaceSearch {
            query: query.to_owned(),
            candidates,
        })
    }

    /// The query as searched.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Every candidate, in the geocoder's order.
    pub fn candidates(&self) -> &[PlaceCandidate] {
        &self.candidates
    }

    /// Turns the candidate at `index` into a labeled reference point.
    pub fn select(&self, index: usize) -> Result<ReferencePoint, GeocodingError> {
        let candidate = self
            .candidates
            .get(index)
            .ok_or(GeocodingError::InvalidSelection(index))?;

        ReferencePoint::new(
            candidate.location.latitude.into_inner(),
            candidate.location.longitude.into_inner(),
            ReferenceSource::PlaceSearch,
        )
        .map(|point| point.with_label(candidate.display_name.clone()))
        .map_err(|e| GeocodingError::InvalidData(e.to_string()))
    }
}

/// A single entry of a Nominatim `/search?format=json` response.
#[derive(Debug, Clone, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// [`Geocoder`] backed by a Nominatim compatible HTTP service.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Creates a geocoder for the configured service.
    pub fn new(config: &crate::Config) -> Result<Self, GeocodingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.api_timeout_ms))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::ClientError(e.to_string()))?;

        Ok(NominatimGeocoder {
            http,
            base_url: config.geocoder_base_url.trim_end_matches('/').to_owned(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocodingError> {
        let url = format!("{}/search", self.base_url);
        let limit = MAX_CANDIDATES.to_string();
        reference_debug!("(search) GET {} q=[{}]", url, query);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", query), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| {
                reference_error!("(search) request failed: {}", e);
                GeocodingError::ClientError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            reference_error!("(search) geocoder answered with status {}.", status);
            return Err(GeocodingError::ClientError(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodingError::InvalidData(e.to_string()))?;

        Ok(candidates_from_places(places))
    }
}

/// Converts Nominatim entries, skipping those without usable coordinates.
fn candidates_from_places(places: Vec<NominatimPlace>) -> Vec<PlaceCandidate> {
    places
        .into_iter()
        .filter_map(|place| {
            let (Ok(latitude), Ok(longitude)) = (place.lat.parse::<f64>(), place.lon.parse::<f64>())
            else {
                reference_warn!(
                    "(candidates_from_places) skipping [{}], unreadable coordinates.",
                    place.display_name
                );
                return None;
            };

            let location = Location::new(latitude, longitude);
            if !location.is_valid() {
                reference_warn!(
                    "(candidates_from_places) skipping [{}], coordinates out of range.",
                    place.display_name
                );
                return None;
            }

            Some(PlaceCandidate {
                display_name: place.display_name,
                location,
            })
        })
        .collect()
}
