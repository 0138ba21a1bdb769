//! # Config
//!
//! Define and implement config options for module

use anyhow::Result;
use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// base url of the Car Buddy REST API, without trailing slash
    pub api_base_url: String,

    /// request timeout in milliseconds for the REST API and geocoder
    pub api_timeout_ms: u64,

    /// bearer token sent to the REST API, if any
    #[serde(default)]
    pub api_token: Option<String>,

    /// base url of the Nominatim compatible geocoding service
    pub geocoder_base_url: String,

    /// search radius in kilometers when none is requested
    pub default_radius_km: f64,

    /// path to log configuration YAML file
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            api_base_url: String::from("https://carbuddy-web-api.azurewebsites.net/api"),
            api_timeout_ms: 10000,
            api_token: None,
            geocoder_base_url: String::from("https://nominatim.openstreetmap.org"),
            default_radius_km: crate::ranker::DEFAULT_RADIUS_KM,
            log_config: String::from("log4rs.yaml"),
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        config::Config::builder()
            .set_default("api_base_url", default_config.api_base_url)?
            .set_default("api_timeout_ms", default_config.api_timeout_ms)?
            .set_default("geocoder_base_url", default_config.geocoder_base_url)?
            .set_default("default_radius_km", default_config.default_radius_km)?
            .set_default("log_config", default_config.log_config)?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}
