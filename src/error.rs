//! Weather lookup error types.

use thiserror::Error;

/// Failures that can occur during a weather lookup.
///
/// None of these escape [`crate::WeatherService::get_weather`]; they are
/// converted into the report's `error` field at the boundary.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Address could not be resolved to usable coordinates.
    #[error("{0}")]
    Geocoding(String),

    /// Weather provider answered with a non-success status.
    #[error("{status} - {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure reaching an upstream provider (connect,
    /// timeout, TLS).
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(#[from] reqwest::Error),

    /// Provider payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Cache store failure.
    #[error("cache error: {0}")]
    Cache(String),
}

impl WeatherError {
    /// Caller-facing message for the report's `error` field.
    ///
    /// Geocoding failures keep their own prefix; cache, transport, parse,
    /// and status failures all share the weather API prefix.
    pub fn report_message(&self) -> String {
        match self {
            Self::Geocoding(message) => format!("Geocoding Error: {message}"),
            other => format!("Weather API Error: {other}"),
        }
    }

    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Api {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}
