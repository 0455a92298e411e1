//! Forward geocoding: resolve a free-text address to coordinates and a
//! postal code. Uses Nominatim (OpenStreetMap) - free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::types::Location;

/// Resolves a free-text address to zero or more candidate locations.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Search for an address, best match first. Callers generally use only
    /// the first result.
    async fn search(&self, address: &str) -> Result<Vec<Location>, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    address: Option<SearchAddress>,
}

#[derive(Debug, Deserialize)]
struct SearchAddress {
    postcode: Option<String>,
}

impl From<SearchResult> for Location {
    fn from(result: SearchResult) -> Self {
        // Nominatim serializes coordinates as strings; unparsable values
        // become None rather than failing the whole search.
        Self {
            latitude: result.lat.parse().ok(),
            longitude: result.lon.parse().ok(),
            postal_code: result.address.and_then(|a| a.postcode),
        }
    }
}

/// Nominatim-backed [`Geocoder`].
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Build a geocoder from config. Nominatim requires a User-Agent.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.geocode_url.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, address: &str) -> Result<Vec<Location>, WeatherError> {
        let url = format!(
            "{}?q={}&format=json&addressdetails=1&limit=1&accept-language=en",
            self.base_url,
            urlencoding::encode(address),
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("geocoder returned status {}", status);
            return Err(WeatherError::from_status(status));
        }

        let results: Vec<SearchResult> = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(results.into_iter().map(Location::from).collect())
    }
}
