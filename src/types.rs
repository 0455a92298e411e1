use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Geographic location produced by geocoding.
///
/// Coordinates are optional so a resolver result that carries only a postal
/// code (or nothing usable at all) can be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub postal_code: Option<String>,
}

impl Location {
    /// Cache key for this location: the postal code when present, otherwise
    /// coordinates rounded to two decimals. `None` when neither is usable.
    ///
    /// Two-decimal rounding means nearby addresses can share a key; that is
    /// the keying policy, not an accident.
    pub fn cache_key(&self) -> Option<String> {
        if let Some(postal) = self.postal_code.as_deref().filter(|p| !p.is_empty()) {
            return Some(format!("weather:{postal}"));
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(format!("weather:{lat:.2}:{lon:.2}")),
            _ => None,
        }
    }
}

/// The provider's daily block, kept whole so consumers can label days.
///
/// Sequences are index-aligned; index 0 is today. Missing sequences
/// deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
}

/// One date-aligned row of the daily forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
}

impl DailyForecast {
    /// Pair the aligned sequences into per-day rows, truncating to the
    /// shortest sequence.
    pub fn days(&self) -> Vec<ForecastDay> {
        self.time
            .iter()
            .zip(&self.temperature_2m_max)
            .zip(&self.temperature_2m_min)
            .map(|((&date, &high), &low)| ForecastDay { date, high, low })
            .collect()
    }
}

/// Cached weather value: everything the store keeps for a location.
///
/// Per-request fields (`address`, `cached`) are merged in later so a cache
/// hit never echoes another caller's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub postal_code: Option<String>,
    pub temperature: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub forecast: Option<DailyForecast>,
}

impl WeatherSnapshot {
    /// Merge per-request fields into a caller-facing report.
    pub fn into_report(self, address: &str, cached: bool) -> WeatherReport {
        WeatherReport {
            postal_code: self.postal_code,
            temperature: self.temperature,
            high: self.high,
            low: self.low,
            forecast: self.forecast,
            address: Some(address.to_string()),
            cached,
            error: None,
        }
    }
}

/// Result of a weather lookup.
///
/// Either the weather fields are set, or `error` is - never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<DailyForecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WeatherReport {
    /// Error-only report; every weather field stays absent.
    pub fn failure(error: &WeatherError) -> Self {
        Self {
            error: Some(error.report_message()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn location(lat: Option<f64>, lon: Option<f64>, postal: Option<&str>) -> Location {
        Location {
            latitude: lat,
            longitude: lon,
            postal_code: postal.map(String::from),
        }
    }

    #[test]
    fn test_cache_key_prefers_postal_code() {
        let loc = location(Some(40.7127753), Some(-74.0059728), Some("10007"));
        assert_eq!(loc.cache_key().as_deref(), Some("weather:10007"));
    }

    #[test]
    fn test_cache_key_rounds_coordinates() {
        let loc = location(Some(40.7127753), Some(-74.0059728), None);
        assert_eq!(loc.cache_key().as_deref(), Some("weather:40.71:-74.01"));
    }

    #[test]
    fn test_cache_key_ignores_empty_postal_code() {
        let loc = location(Some(40.7127753), Some(-74.0059728), Some(""));
        assert_eq!(loc.cache_key().as_deref(), Some("weather:40.71:-74.01"));
    }

    #[test]
    fn test_cache_key_requires_both_coordinates() {
        assert_eq!(location(Some(40.71), None, None).cache_key(), None);
        assert_eq!(location(None, Some(-74.01), None).cache_key(), None);
    }

    #[test]
    fn test_cache_key_none_when_nothing_usable() {
        assert_eq!(location(None, None, None).cache_key(), None);
    }

    #[test]
    fn test_into_report_merges_request_fields() {
        let snapshot = WeatherSnapshot {
            postal_code: Some("10007".to_string()),
            temperature: Some(72.5),
            high: Some(75.2),
            low: Some(62.1),
            forecast: None,
        };

        let report = snapshot.into_report("New York, NY", true);

        assert_eq!(report.address.as_deref(), Some("New York, NY"));
        assert!(report.cached);
        assert_eq!(report.temperature, Some(72.5));
        assert!(report.error.is_none());
    }

    #[test]
    fn test_failure_report_has_no_weather_fields() {
        let report = WeatherReport::failure(&WeatherError::Geocoding("nowhere not found".into()));

        assert_eq!(
            report.error.as_deref(),
            Some("Geocoding Error: nowhere not found")
        );
        assert!(!report.cached);
        assert!(report.temperature.is_none());
        assert!(report.high.is_none());
        assert!(report.low.is_none());
        assert!(report.forecast.is_none());
        assert!(report.address.is_none());
    }

    #[test]
    fn test_days_pairs_aligned_sequences() {
        let forecast = DailyForecast {
            time: vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ],
            temperature_2m_max: vec![75.2, 74.1],
            temperature_2m_min: vec![62.1, 61.8],
        };

        let days = forecast.days();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(days[0].high, 75.2);
        assert_eq!(days[0].low, 62.1);
        assert_eq!(days[1].high, 74.1);
    }

    #[test]
    fn test_days_truncates_to_shortest_sequence() {
        let forecast = DailyForecast {
            time: vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ],
            temperature_2m_max: vec![75.2],
            temperature_2m_min: vec![62.1, 61.8, 60.9],
        };

        assert_eq!(forecast.days().len(), 1);
    }

    #[test]
    fn test_daily_forecast_defaults_missing_sequences() {
        let forecast: DailyForecast = serde_json::from_str("{}").unwrap();
        assert!(forecast.time.is_empty());
        assert!(forecast.days().is_empty());
    }
}
