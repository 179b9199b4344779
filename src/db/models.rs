use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A cached current-weather reading for one (city, language) pair.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct WeatherRecord {
    pub id: i64,
    pub city_name: String,
    pub language: String,

    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
    pub wind_speed: f64,
    pub wind_deg: i32,
    pub description: String,

    /// When the reading was last fetched from the provider (UTC).
    pub timestamp: DateTime<Utc>,
}

/// Weather values as returned by the provider, before they are keyed and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
    pub wind_speed: f64,
    pub wind_deg: i32,
    pub description: String,
}

impl WeatherRecord {
    /// Build a record from a provider reading.
    pub fn from_reading(
        id: i64,
        city_name: &str,
        language: &str,
        reading: &WeatherReading,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            city_name: city_name.to_string(),
            language: language.to_string(),
            temp: reading.temp,
            feels_like: reading.feels_like,
            temp_min: reading.temp_min,
            temp_max: reading.temp_max,
            pressure: reading.pressure,
            humidity: reading.humidity,
            wind_speed: reading.wind_speed,
            wind_deg: reading.wind_deg,
            description: reading.description.clone(),
            timestamp,
        }
    }

    /// Overwrite every weather field and the timestamp, keeping the identity.
    pub fn apply_reading(&mut self, reading: &WeatherReading, timestamp: DateTime<Utc>) {
        *self = Self::from_reading(self.id, &self.city_name, &self.language, reading, timestamp);
    }
}
