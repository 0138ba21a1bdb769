//! Radius filter and distance ranking of located entities.

use ordered_float::OrderedFloat;

use crate::ranker::ranker_types::{
    entity::Located,
    location::Location,
    ranked::{ProximityResult, RankedEntity},
};
use crate::ranker::ranker_utils::haversine;

/// Search radius in kilometers used when the caller has no preference.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Ranks `entities` by their distance to `reference`.
///
/// Entities within `radius_km` (inclusive) are returned closest first. The
/// sort is stable, so entities at the same distance keep their input order.
///
/// When the input is not empty but nothing lies within the radius, every
/// entity is returned in input order with its distance and
/// [`ProximityResult::fell_back`] is set. A radius of zero, below zero or
/// NaN matches nothing, not even an entity sitting on the reference point,
/// and therefore always takes that branch.
pub fn rank_by_proximity<T>(reference: &Location, entities: &[T], radius_km: f64) -> ProximityResult<T>
where
    T: Located + Clone,
{
    ranker_debug!(
        "(rank_by_proximity) ranking {} entities around [{}] within {} km.",
        entities.len(),
        reference,
        radius_km
    );

    let (mut matched, rest): (Vec<RankedEntity<T>>, Vec<RankedEntity<T>>) = entities
        .iter()
        .map(|entity| RankedEntity {
            distance_km: OrderedFloat(haversine::distance(reference, &entity.location())),
            entity: entity.clone(),
        })
        .partition(|ranked| radius_km > 0.0 && ranked.distance_km.into_inner() <= radius_km);

    if matched.is_empty() && !rest.is_empty() {
        ranker_info!(
            "(rank_by_proximity) nothing within {} km, falling back to all {} entities.",
            radius_km,
            rest.len()
        );
        return ProximityResult {
            matched: rest,
            fell_back: true,
            radius_km,
        };
    }

    matched.sort_by_key(|ranked| ranked.distance_km);
    ranker_debug!(
        "(rank_by_proximity) {} of {} entities within radius.",
        matched.len(),
        entities.len()
    );

    ProximityResult {
        matched,
        fell_back: false,
        radius_km,
    }
}
