//! Keeps track of the current reference point.
//!
//! Device geolocation is slow and may finish after the user has already
//! typed coordinates or picked a place. Every state change bumps a
//! generation counter and a geolocation result is only applied when its
//! [`GeolocationTicket`] still names the pending request.

use std::time::Duration;
use tokio::sync::Mutex;

use super::geocoding::{GeocodingError, PlaceSearch};
use super::geolocation::{GeolocationError, GeolocationProvider, Position, PositionOptions};
use super::point::ReferencePoint;

/// Identifies one geolocation request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GeolocationTicket(u64);

/// What became of a finished geolocation request
#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationOutcome {
    /// The position is the new reference point
    Applied(ReferencePoint),

    /// The request was cancelled or superseded, the result was dropped
    Discarded,
}

#[derive(Debug, Default)]
struct SelectorState {
    current: Option<ReferencePoint>,
    generation: u64,
    pending: Option<u64>,
}

/// Owner of the current reference point.
#[derive(Debug, Default)]
pub struct ReferencePointSelector {
    state: Mutex<SelectorState>,
}

impl ReferencePointSelector {
    /// A selector without a reference point.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current reference point, if one has been chosen.
    pub async fn current(&self) -> Option<ReferencePoint> {
        self.state.lock().await.current.clone()
    }

    /// Starts a geolocation request, superseding any request still pending.
    pub async fn begin_geolocation(&self) -> GeolocationTicket {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.pending = Some(state.generation);
        reference_debug!(
            "(begin_geolocation) geolocation request {} started.",
            state.generation
        );

        GeolocationTicket(state.generation)
    }

    /// Closes the request, its result will be discarded.
    pub async fn cancel(&self, ticket: GeolocationTicket) {
        let mut state = self.state.lock().await;
        if state.pending == Some(ticket.0) {
            reference_debug!("(cancel) geolocation request {} cancelled.", ticket.0);
            state.pending = None;
        }
    }

    /// Applies manually entered coordinates.
    pub async fn set_manual(&self, point: ReferencePoint) {
        reference_info!("(set_manual) reference point set to [{}].", point);
        self.apply(point).await;
    }

    /// Applies the candidate the user picked from a place search.
    pub async fn select_place(
        &self,
        search: &PlaceSearch,
        index: usize,
    ) -> Result<ReferencePoint, GeocodingError> {
        let point = search.select(index)?;
        reference_info!(
            "(select_place) reference point set to [{}] ({}).",
            point,
            point.precise()
        );
        self.apply(point.clone()).await;

        Ok(point)
    }

    /// Hands the result of a geolocation request to the selector.
    ///
    /// Results of cancelled or superseded requests are discarded, errors
    /// included. For the pending request an error is returned as is and a
    /// position becomes the new reference point.
    pub async fn complete_geolocation(
        &self,
        ticket: GeolocationTicket,
        result: Result<Position, GeolocationError>,
    ) -> Result<GeolocationOutcome, GeolocationError> {
        let mut state = self.state.lock().await;
        if state.pending != Some(ticket.0) {
            reference_debug!(
                "(complete_geolocation) discarding stale result of request {}.",
                ticket.0
            );
            return Ok(GeolocationOutcome::Discarded);
        }
        state.pending = None;

        let point = match result.and_then(Position::into_reference_point) {
            Ok(point) => point,
            Err(e) => {
                reference_warn!("(complete_geolocation) request {} failed: {}", ticket.0, e);
                return Err(e);
            }
        };

        reference_info!(
            "(complete_geolocation) reference point set to device position [{}].",
            point
        );
        state.current = Some(point.clone());

        Ok(GeolocationOutcome::Applied(point))
    }

    /// Requests the device position from `provider` and applies it.
    pub async fn locate_device<P: GeolocationProvider>(
        &self,
        provider: &P,
        options: &PositionOptions,
    ) -> Result<GeolocationOutcome, GeolocationError> {
        if !provider.is_available() {
            reference_warn!("(locate_device) geolocation is not available.");
            return Err(GeolocationError::Unsupported);
        }

        let ticket = self.begin_geolocation().await;
        let result = tokio::time::timeout(
            Duration::from_millis(options.timeout_ms),
            provider.current_position(options),
        )
        .await
        .unwrap_or(Err(GeolocationError::Timeout));

        self.complete_geolocation(ticket, result).await
    }

    async fn apply(&self, point: ReferencePoint) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        if let Some(pending) = state.pending.take() {
            reference_debug!("(apply) superseding geolocation request {}.", pending);
        }
        state.current = Some(point);
    }
}
