//! Lookup configuration: upstream endpoints and HTTP behavior.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Production Open-Meteo forecast endpoint.
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Production Nominatim search endpoint.
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

const DEFAULT_USER_AGENT: &str = "skycast/0.1 (https://github.com/skycast/skycast)";

/// Weather lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo forecast endpoint.
    pub weather_url: String,

    /// Nominatim search endpoint.
    pub geocode_url: String,

    /// User-Agent sent with upstream requests (required by Nominatim).
    pub user_agent: String,

    /// Timeout for each upstream request, in seconds.
    ///
    /// Applies to both the geocoder and the weather provider so a slow
    /// upstream cannot block the caller indefinitely.
    pub request_timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            weather_url: OPEN_METEO_URL.to_string(),
            geocode_url: NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 3,
        }
    }
}

impl WeatherConfig {
    /// Validate endpoint URLs and HTTP settings.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("weather_url", &self.weather_url),
            ("geocode_url", &self.geocode_url),
        ] {
            let url =
                Url::parse(value).with_context(|| format!("{field} is not a valid URL"))?;
            ensure!(
                url.scheme() == "http" || url.scheme() == "https",
                "{} must use http or https, got: {}",
                field,
                url.scheme()
            );
        }

        ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be greater than 0"
        );

        Ok(())
    }
}
