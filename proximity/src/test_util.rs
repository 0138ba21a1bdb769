//! Test utilities. Provides log macros, entity generators and stub
//! implementations of the acquisition and data source traits.

use geo::prelude::*;
use geo::Point;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::api::{ApiError, EntitySource};
use crate::ranker::{AutoPartsShop, DetailingShop, Garage, Location};
use crate::reference::{
    Geocoder, GeocodingError, GeolocationError, GeolocationProvider, PlaceCandidate, Position,
    PositionOptions,
};

/// Writes a debug! message to the test::ut logger
macro_rules! ut_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "test::ut", $($arg)+)
    };
}

/// Writes an info! message to the test::ut logger
macro_rules! ut_info {
    ($($arg:tt)+) => {
        log::info!(target: "test::ut", $($arg)+)
    };
}

/// Writes an warn! message to the test::ut logger
#[allow(unused_macros)]
macro_rules! ut_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "test::ut", $($arg)+)
    };
}

/// Writes an error! message to the test::ut logger
#[allow(unused_macros)]
macro_rules! ut_error {
    ($($arg:tt)+) => {
        log::error!(target: "test::ut", $($arg)+)
    };
}

//-----------------------------------------------------
// Entities
//-----------------------------------------------------

/// New York City Hall
pub fn new_york() -> Location {
    Location::new(40.7128, -74.0060)
}

/// Los Angeles City Hall
pub fn los_angeles() -> Location {
    Location::new(34.0522, -118.2437)
}

/// A garage with only the fields ranking needs.
pub fn garage(id: &str, latitude: f64, longitude: f64) -> Garage {
    Garage {
        id: id.to_owned(),
        name: format!("Garage {}", id),
        address: String::new(),
        latitude,
        longitude,
        rating: 4.0,
        created_at: None,
        updated_at: None,
    }
}

/// An auto-parts shop with only the fields ranking needs.
pub fn auto_parts_shop(id: &str, latitude: f64, longitude: f64) -> AutoPartsShop {
    AutoPartsShop {
        id: id.to_owned(),
        name: format!("Parts {}", id),
        address: String::new(),
        phone_number: String::new(),
        latitude,
        longitude,
        rating: 4.0,
        created_at: None,
        updated_at: None,
    }
}

/// A detailing shop with only the fields ranking needs.
pub fn detailing_shop(id: &str, latitude: f64, longitude: f64) -> DetailingShop {
    DetailingShop {
        id: id.to_owned(),
        name: format!("Detailing {}", id),
        address: String::new(),
        phone_number: String::new(),
        latitude,
        longitude,
        rating: 4.0,
        reviews: 0,
        services: vec![],
    }
}

fn destination(origin: &Location, bearing: f64, distance_km: f64) -> Location {
    let point = Point::new(origin.longitude.into_inner(), origin.latitude.into_inner())
        .haversine_destination(bearing, distance_km * 1000.0);
    Location::new(point.y(), point.x())
}

/// Generate one garage per distance, in kilometers from `origin`.
///
/// Garage `i` is named `garage-{i}` and lies at `distances_km[i]`, each on
/// a different bearing.
pub fn garages_at_distances(origin: &Location, distances_km: &[f64]) -> Vec<Garage> {
    distances_km
        .iter()
        .enumerate()
        .map(|(i, distance_km)| {
            let location = destination(origin, (i as f64 * 47.0) % 360.0, *distance_km);
            garage(
                &format!("garage-{}", i),
                location.latitude.into_inner(),
                location.longitude.into_inner(),
            )
        })
        .collect()
}

/// Generate garages at random bearings and distances up to `radius_km`
/// from `origin`.
pub fn random_garages_near(origin: &Location, radius_km: f64, capacity: usize) -> Vec<Garage> {
    let mut rng = rand::thread_rng();
    (0..capacity)
        .map(|i| {
            let location = destination(
                origin,
                rng.gen_range(0.0..360.0),
                rng.gen_range(0.0..radius_km),
            );
            garage(
                &format!("random-{}", i),
                location.latitude.into_inner(),
                location.longitude.into_inner(),
            )
        })
        .collect()
}

//-----------------------------------------------------
// Stubs
//-----------------------------------------------------

/// [`EntitySource`] serving a fixed result and counting fetches.
#[derive(Debug)]
pub struct StubSource<T> {
    result: Result<Vec<T>, ApiError>,
    calls: AtomicUsize,
}

impl<T> StubSource<T> {
    pub fn new(entities: Vec<T>) -> Self {
        StubSource {
            result: Ok(entities),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        StubSource {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T: Clone + Send + Sync> EntitySource<T> for StubSource<T> {
    async fn fetch_all(&self) -> Result<Vec<T>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// [`Geocoder`] answering every query with the same candidates.
#[derive(Debug)]
pub struct StubGeocoder {
    candidates: Vec<PlaceCandidate>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    pub fn new(candidates: Vec<PlaceCandidate>) -> Self {
        StubGeocoder {
            candidates,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for StubGeocoder {
    async fn search(&self, _query: &str) -> Result<Vec<PlaceCandidate>, GeocodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.candidates.clone())
    }
}

/// [`GeolocationProvider`] answering after a fixed delay.
#[derive(Debug)]
pub struct StubGeolocation {
    available: bool,
    delay: Duration,
    result: Result<Position, GeolocationError>,
    calls: AtomicUsize,
}

impl StubGeolocation {
    pub fn answering(position: Position, delay: Duration) -> Self {
        StubGeolocation {
            available: true,
            delay,
            result: Ok(position),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        StubGeolocation {
            available: true,
            delay: Duration::ZERO,
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        StubGeolocation {
            available: false,
            ..Self::failing(GeolocationError::Unsupported)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GeolocationProvider for StubGeolocation {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, GeolocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result
    }
}

//-----------------------------------------------------
// HTTP
//-----------------------------------------------------

/// Serve a single HTTP response on a local port.
///
/// Returns the base url to use and a handle resolving to the raw request
/// that was received.
pub async fn serve_once(
    status: u16,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        request
    });

    (format!("http://{}", address), handle)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let Some(end) = buffer.windows(4).position(|window| window == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buffer[..end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buffer.len() >= end + 4 + content_length {
            break;
        }
    }

    String::from_utf8_lossy(&buffer).into_owned()
}
