//! Access to the entities that get ranked.
//!
//! [`EntitySource`] is the seam between the ranker and wherever the
//! entities come from. [`ApiClient`] serves them from the Car Buddy REST
//! API, [`JsonFileSource`] from a local JSON file.

#[macro_use]
pub mod macros;
pub mod client;
pub mod file;
pub mod types;

pub use client::{ApiClient, DEFAULT_TOP_RATED_COUNT};
pub use file::JsonFileSource;
pub use types::{GarageSearchRequest, GarageWithDistance};

use std::future::Future;

/// Error type for entity sources
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request could not be made or no response arrived
    ClientError(String),

    /// The server answered with a non-success status
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The response could not be decoded
    InvalidData(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ApiError::ClientError(e) => write!(f, "Client error: {}", e),
            ApiError::HttpStatus { message, .. } => write!(f, "{}", message),
            ApiError::InvalidData(e) => write!(f, "Invalid data: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// Provides every entity of one kind.
pub trait EntitySource<T>: Send + Sync {
    /// Fetch all entities. Called once per ranking request, results are
    /// not cached.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<T>, ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::HttpStatus {
                status: 404,
                message: String::from("Garage not found"),
            }
            .to_string(),
            "Garage not found"
        );
        assert_eq!(
            ApiError::ClientError(String::from("connection refused")).to_string(),
            "Client error: connection refused"
        );
        assert_eq!(
            ApiError::InvalidData(String::from("expected array")).to_string(),
            "Invalid data: expected array"
        );
    }
}
