//! Proximity ranking of garages and shops around a reference point.

#[macro_use]
pub mod macros;
pub mod ranker_types;
pub mod ranker_utils;

pub use ranker_types::entity::{AutoPartsShop, DetailingShop, Garage, Located};
pub use ranker_types::location::Location;
pub use ranker_types::ranked::{ProximityResult, RankOutcome, RankedEntity};
pub use ranker_utils::haversine::{distance, distance_km, EARTH_RADIUS_KM};
pub use ranker_utils::proximity::{rank_by_proximity, DEFAULT_RADIUS_KM};

use crate::api::{ApiError, EntitySource};
use crate::reference::ReferencePoint;

/// Ranks entities around a [`ReferencePoint`] with a fixed radius.
///
/// Holds no state besides the radius, so one ranker can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityRanker {
    radius_km: f64,
}

impl Default for ProximityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_KM)
    }
}

impl ProximityRanker {
    /// Creates a ranker for the given radius in kilometers.
    pub fn new(radius_km: f64) -> Self {
        ProximityRanker { radius_km }
    }

    /// Creates a ranker using the configured default radius.
    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(config.default_radius_km)
    }

    /// The radius applied by this ranker.
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// See [`rank_by_proximity`].
    pub fn rank<T>(&self, reference: &ReferencePoint, entities: &[T]) -> ProximityResult<T>
    where
        T: Located + Clone,
    {
        rank_by_proximity(&reference.location(), entities, self.radius_km)
    }

    /// See [`rank_from_source`].
    pub async fn rank_from<T, S>(
        &self,
        source: &S,
        reference: &ReferencePoint,
    ) -> Result<ProximityResult<T>, ApiError>
    where
        T: Located + Clone,
        S: EntitySource<T>,
    {
        rank_from_source(source, &reference.location(), self.radius_km).await
    }
}

/// Fetches every entity from `source` and ranks them around `reference`.
///
/// Entities are fetched fresh on every call.
pub async fn rank_from_source<T, S>(
    source: &S,
    reference: &Location,
    radius_km: f64,
) -> Result<ProximityResult<T>, ApiError>
where
    T: Located + Clone,
    S: EntitySource<T>,
{
    let entities = match source.fetch_all().await {
        Ok(entities) => entities,
        Err(e) => {
            ranker_error!("(rank_from_source) Failed to fetch entities: {e}");
            return Err(e);
        }
    };

    Ok(rank_by_proximity(reference, &entities, radius_km))
}
