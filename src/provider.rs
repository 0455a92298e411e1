//! Open-Meteo forecast client.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::types::{DailyForecast, Location, WeatherSnapshot};

/// Request parameters that never vary: current temperature plus daily
/// max/min in Fahrenheit over a 7-day horizon.
const FIXED_QUERY: &str = "current=temperature_2m&daily=temperature_2m_max,temperature_2m_min&temperature_unit=fahrenheit&forecast_days=7";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
    daily: Option<DailyForecast>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: Option<f64>,
}

/// HTTP client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.weather_url.clone(),
        })
    }

    /// Fetch current conditions and the daily forecast for a location.
    ///
    /// Missing payload fields surface as `None` in the snapshot; a
    /// non-success status is an error carrying the status code and message.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError> {
        // A location that resolved with only a postal code sends blank
        // coordinates; Open-Meteo rejects those with a client error, which
        // surfaces through the normal status path.
        let latitude = location.latitude.map(|v| v.to_string()).unwrap_or_default();
        let longitude = location.longitude.map(|v| v.to_string()).unwrap_or_default();

        let url = format!(
            "{}?{FIXED_QUERY}&latitude={latitude}&longitude={longitude}",
            self.base_url,
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::from_status(status));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let daily = body.daily;
        Ok(WeatherSnapshot {
            postal_code: location.postal_code.clone(),
            temperature: body.current.and_then(|c| c.temperature_2m),
            high: daily
                .as_ref()
                .and_then(|d| d.temperature_2m_max.first().copied()),
            low: daily
                .as_ref()
                .and_then(|d| d.temperature_2m_min.first().copied()),
            forecast: daily,
        })
    }
}
