//! OpenWeatherMap current-weather client.
//!
//! Issues a single GET per lookup and maps every failure (transport, non-2xx,
//! unusable body) to a [`ProviderError`]. No retries.
//! See: https://openweathermap.org/current

use async_trait::async_trait;
use serde::Deserialize;

use crate::db::models::WeatherReading;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Source of current-weather readings.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, city_name: &str, lang: &str) -> Result<WeatherReading, ProviderError>;
}

/// Client for the OpenWeatherMap "current weather" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

// --- OpenWeatherMap JSON response types ---

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    wind: OwmWind,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    deg: i32,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, city_name: &str, lang: &str) -> Result<WeatherReading, ProviderError> {
        let result = self.fetch_once(city_name, lang).await;
        if let Err(ref e) = result {
            tracing::warn!(city = city_name, lang, "OpenWeatherMap lookup failed: {}", e);
        }
        result
    }
}

impl OpenWeatherClient {
    async fn fetch_once(&self, city_name: &str, lang: &str) -> Result<WeatherReading, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", city_name),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", lang),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        parse_current_weather(&body)
    }
}

/// Parse a current-weather response body into a [`WeatherReading`].
pub fn parse_current_weather(body: &[u8]) -> Result<WeatherReading, ProviderError> {
    let parsed: OwmResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .ok_or_else(|| ProviderError::MalformedPayload("empty weather array".to_string()))?;

    Ok(WeatherReading {
        temp: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        temp_min: parsed.main.temp_min,
        temp_max: parsed.main.temp_max,
        pressure: parsed.main.pressure,
        humidity: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        wind_deg: parsed.wind.deg,
        description,
    })
}
