//! The lookup pipeline: geocode the address, consult the cache, fetch,
//! normalize.

use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::cache::WeatherStore;
use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::geocode::Geocoder;
use crate::provider::WeatherProvider;
use crate::types::{Location, WeatherReport};

/// How long fetched snapshots stay valid in the store.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Address-to-report weather lookups with location-keyed caching.
///
/// The geocoder and cache store are injected so tests can substitute fakes;
/// the Open-Meteo client is built from config.
pub struct WeatherService {
    provider: WeatherProvider,
    geocoder: Arc<dyn Geocoder>,
    store: Arc<dyn WeatherStore>,
}

impl WeatherService {
    pub fn new(
        config: &WeatherConfig,
        geocoder: Arc<dyn Geocoder>,
        store: Arc<dyn WeatherStore>,
    ) -> Result<Self, WeatherError> {
        Ok(Self {
            provider: WeatherProvider::new(config)?,
            geocoder,
            store,
        })
    }

    /// Look up current and forecast weather for a free-text address.
    ///
    /// Returns `None` for a blank address without touching any
    /// collaborator. Every other outcome is a [`WeatherReport`]: weather
    /// fields on success, or an `error` message on failure - a lookup never
    /// surfaces an `Err` to its caller.
    #[instrument(skip(self), level = "info")]
    pub async fn get_weather(&self, address: &str, use_cache: bool) -> Option<WeatherReport> {
        if address.trim().is_empty() {
            return None;
        }

        match self.lookup(address, use_cache).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!("weather lookup for {address:?} failed: {e}");
                Some(WeatherReport::failure(&e))
            }
        }
    }

    async fn lookup(&self, address: &str, use_cache: bool) -> Result<WeatherReport, WeatherError> {
        let location = self.resolve(address).await?;
        let key = location.cache_key().ok_or_else(|| {
            WeatherError::Geocoding(format!("{address} not found with latitude and longitude"))
        })?;

        if !use_cache {
            let snapshot = self.provider.fetch(&location).await?;
            return Ok(snapshot.into_report(address, false));
        }

        // The hit flag is decided before the populate below can write the key.
        let hit = self.store.exists(&key).await?;
        let snapshot = match self.store.get(&key).await? {
            Some(snapshot) => snapshot,
            None => {
                let snapshot = self.provider.fetch(&location).await?;
                self.store.put(&key, snapshot.clone(), CACHE_TTL).await?;
                snapshot
            }
        };

        Ok(snapshot.into_report(address, hit))
    }

    /// First geocoder match for the address. Resolver failures of any kind
    /// fold into the geocoding error path.
    async fn resolve(&self, address: &str) -> Result<Location, WeatherError> {
        let locations = self
            .geocoder
            .search(address)
            .await
            .map_err(|e| WeatherError::Geocoding(e.to_string()))?;

        locations
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Geocoding(format!("{address} not found")))
    }
}
