//! Weather lookups for free-text addresses
//!
//! Geocodes an address to a location, caches per-location snapshots for a
//! fixed window, and normalizes Open-Meteo responses into a single report
//! shape. Collaborators (geocoder, cache store) are injected so they can be
//! swapped for fakes in tests.

pub mod cache;
pub mod config;
pub mod error;
pub mod geocode;
pub mod provider;
pub mod service;
pub mod types;

pub use cache::{MemoryStore, WeatherStore};
pub use config::WeatherConfig;
pub use error::WeatherError;
pub use geocode::{Geocoder, NominatimGeocoder};
pub use provider::WeatherProvider;
pub use service::{WeatherService, CACHE_TTL};
pub use types::{DailyForecast, ForecastDay, Location, WeatherReport, WeatherSnapshot};
