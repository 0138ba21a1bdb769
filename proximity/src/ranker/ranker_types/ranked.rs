//! Output types of the proximity ranking.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// An entity annotated with its distance to the reference point.
///
/// Serializes flat: the entity's own fields followed by `distanceKm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity<T> {
    /// The entity, unchanged.
    #[serde(flatten)]
    pub entity: T,

    /// Great-circle distance to the reference point in kilometers.
    #[serde(rename = "distanceKm")]
    pub distance_km: OrderedFloat<f64>,
}

/// The result of a proximity ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityResult<T> {
    /// Entities within the radius sorted by distance, or every input
    /// entity in input order when `fell_back` is set.
    pub matched: Vec<RankedEntity<T>>,

    /// Set when nothing was within the radius and `matched` holds the full
    /// input instead.
    pub fell_back: bool,

    /// The radius that was applied, in kilometers.
    pub radius_km: f64,
}

/// Distinguishes the three shapes a [`ProximityResult`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOutcome {
    /// `n` entities were found within the radius.
    Matched(usize),

    /// Nothing was within the radius; all `n` entities are returned.
    FellBack(usize),

    /// There was nothing to rank at all.
    NoData,
}

impl<T> ProximityResult<T> {
    /// Classifies the result for display.
    pub fn outcome(&self) -> RankOutcome {
        match (self.matched.len(), self.fell_back) {
            (0, _) => RankOutcome::NoData,
            (n, true) => RankOutcome::FellBack(n),
            (n, false) => RankOutcome::Matched(n),
        }
    }

    /// User-facing summary of the result.
    pub fn message(&self) -> String {
        match self.outcome() {
            RankOutcome::Matched(n) => format!("Found {} nearby results", n),
            RankOutcome::FellBack(n) => format!(
                "No results found within {}km. Showing all {} results.",
                self.radius_km, n
            ),
            RankOutcome::NoData => String::from("No results found"),
        }
    }

    /// Returns `true` if the result holds no entity.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Iterates over the entities without their distances.
    pub fn entities(&self) -> impl Iterator<Item = &T> {
        self.matched.iter().map(|ranked| &ranked.entity)
    }
}
