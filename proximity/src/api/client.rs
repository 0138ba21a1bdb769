//! HTTP client for the Car Buddy REST API

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::types::{GarageSearchRequest, GarageWithDistance};
use super::{ApiError, EntitySource};
use crate::ranker::{AutoPartsShop, Garage};

/// Number of garages returned by [`ApiClient::get_top_rated_garages`] when
/// the caller has no preference.
pub const DEFAULT_TOP_RATED_COUNT: u32 = 10;

/// Client for the garage and auto-parts shop endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client from the configured base url, timeout and token.
    pub fn new(config: &crate::Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.api_timeout_ms))
            .build()
            .map_err(|e| ApiError::ClientError(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            token: config.api_token.clone(),
        })
    }

    /// The base url requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /garages`
    pub async fn get_all_garages(&self) -> Result<Vec<Garage>, ApiError> {
        self.get(self.url(&["garages"])?).await
    }

    /// `POST /garages/search`
    pub async fn search_nearby_garages(
        &self,
        request: &GarageSearchRequest,
    ) -> Result<Vec<GarageWithDistance>, ApiError> {
        self.post(self.url(&["garages", "search"])?, request).await
    }

    /// `GET /garages/top-rated?count={count}`
    pub async fn get_top_rated_garages(&self, count: u32) -> Result<Vec<Garage>, ApiError> {
        let mut url = self.url(&["garages", "top-rated"])?;
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());
        self.get(url).await
    }

    /// `GET /garages/{id}`
    pub async fn get_garage_by_id(&self, id: &str) -> Result<Garage, ApiError> {
        self.get(self.url(&["garages", id])?).await
    }

    /// `GET /autopartsshops`
    pub async fn get_all_auto_parts_shops(&self) -> Result<Vec<AutoPartsShop>, ApiError> {
        self.get(self.url(&["autopartsshops"])?).await
    }

    /// `GET /autopartsshops/{id}`
    pub async fn get_auto_parts_shop_by_id(&self, id: &str) -> Result<AutoPartsShop, ApiError> {
        self.get(self.url(&["autopartsshops", id])?).await
    }

    /// Appends `segments` to the base url, each one percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            api_error!("(url) invalid API base url {}: {}", self.base_url, e);
            ApiError::ClientError(e.to_string())
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                api_error!("(url) API base url {} can not have a path", self.base_url);
                ApiError::ClientError(format!("Invalid API base url: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get<R: DeserializeOwned>(&self, url: Url) -> Result<R, ApiError> {
        self.send(self.http.get(url.clone()), &url).await
    }

    async fn post<B, R>(&self, url: Url, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.http.post(url.clone()).json(body), &url).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
        url: &Url,
    ) -> Result<R, ApiError> {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        api_debug!("(send) API request: {}", url);
        let response = request.send().await.map_err(|e| {
            api_error!("(send) API request to {} failed: {}", url, e);
            ApiError::ClientError(e.to_string())
        })?;

        let status = response.status();
        api_debug!("(send) API response: {} {}", url, status);

        let body = response.text().await.map_err(|e| {
            api_error!("(send) could not read response of {}: {}", url, e);
            ApiError::ClientError(e.to_string())
        })?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            api_error!("(send) API error response from {}: {}", url, message);
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            api_error!("(send) could not decode response of {}: {}", url, e);
            ApiError::InvalidData(e.to_string())
        })
    }
}

impl EntitySource<Garage> for ApiClient {
    async fn fetch_all(&self) -> Result<Vec<Garage>, ApiError> {
        self.get_all_garages().await
    }
}

impl EntitySource<AutoPartsShop> for ApiClient {
    async fn fetch_all(&self) -> Result<Vec<AutoPartsShop>, ApiError> {
        self.get_all_auto_parts_shops().await
    }
}

/// Message for a failed request.
///
/// A JSON body contributes its `message` or `error` field, any other body
/// is used as text. Without either the status code is reported.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    let fallback = || format!("HTTP error! status: {}", status);

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["message", "error"]
            .into_iter()
            .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
            .find(|text| !text.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(fallback),
        Err(_) if !body.is_empty() => body.to_owned(),
        Err(_) => fallback(),
    }
}
