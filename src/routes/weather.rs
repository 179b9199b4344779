//! Weather lookup endpoints on the service root.
//!
//! - GET /     — service description
//! - POST /    — cached weather for `{city_name, lang?}`
//! - DELETE /  — drop the cached weather for `{city_name, lang?}`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::WeatherRecord;
use crate::errors::{AppError, ErrorResponse};
use crate::services::validation::{validate_city_query, CityQuery, ValidationError};
use crate::services::weather::WeatherService;

/// Body of `POST /` and `DELETE /`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CityRequest {
    /// City name: 2-50 letters, spaces or hyphens
    #[schema(example = "New-York")]
    pub city_name: Option<String>,
    /// Alphabetic language code for the description, defaults to "en"
    #[schema(example = "en")]
    pub lang: Option<String>,
}

/// Service description returned by `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub message: String,
    pub usage: String,
}

/// Temperature block of a weather response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TemperatureResponse {
    /// Air temperature in Celsius
    pub temp: f64,
    /// Perceived temperature in Celsius
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Atmospheric pressure in hPa
    pub pressure: i32,
    /// Relative humidity percentage
    pub humidity: i32,
}

/// Wind block of a weather response.
#[derive(Debug, Serialize, ToSchema)]
pub struct WindResponse {
    /// Wind speed in metres per second
    pub speed: f64,
    /// Wind direction in degrees (0 = north, 90 = east)
    pub deg: i32,
}

/// A cached weather reading.
#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherResponse {
    pub id: i64,
    pub city: String,
    pub language: String,
    pub temperature: TemperatureResponse,
    pub wind: WindResponse,
    /// Provider description in the requested language
    pub description: String,
    /// When the reading was fetched from the provider (ISO 8601)
    pub timestamp: String,
}

impl From<&WeatherRecord> for WeatherResponse {
    fn from(r: &WeatherRecord) -> Self {
        Self {
            id: r.id,
            city: r.city_name.clone(),
            language: r.language.clone(),
            temperature: TemperatureResponse {
                temp: r.temp,
                feels_like: r.feels_like,
                temp_min: r.temp_min,
                temp_max: r.temp_max,
                pressure: r.pressure,
                humidity: r.humidity,
            },
            wind: WindResponse {
                speed: r.wind_speed,
                deg: r.wind_deg,
            },
            description: r.description.clone(),
            timestamp: r.timestamp.to_rfc3339(),
        }
    }
}

/// Confirmation returned by `DELETE /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub city: String,
    pub language: String,
    /// When the record was removed (ISO 8601)
    pub deleted_at: String,
}

/// Turn an extracted JSON body into a validated cache key.
/// `null`, arrays and scalars count as no body at all; only objects are
/// decoded into a `CityRequest`.
fn city_query_from(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<CityQuery, AppError> {
    let Json(value) = payload.map_err(|_| ValidationError::MissingBody)?;
    if !value.is_object() {
        return Err(ValidationError::MissingBody.into());
    }
    let body: CityRequest = serde_json::from_value(value)
        .map_err(|e| ValidationError::InvalidBody(e.to_string()))?;
    Ok(validate_city_query(
        body.city_name.as_deref(),
        body.lang.as_deref(),
    )?)
}

/// Describe the service.
#[utoipa::path(
    get,
    path = "/",
    tag = "Weather",
    responses(
        (status = 200, description = "Service description", body = HomeResponse),
    )
)]
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome to the Weather API".to_string(),
        usage: r#"Send a POST request to / with {"city_name": "city", "lang": "language_code"}"#
            .to_string(),
    })
}

/// Get the current weather for a city.
///
/// Serves the cached reading while it is younger than the configured TTL,
/// otherwise fetches a new one from OpenWeatherMap and stores it.
#[utoipa::path(
    post,
    path = "/",
    tag = "Weather",
    request_body = CityRequest,
    responses(
        (status = 200, description = "Current weather for the city", body = WeatherResponse),
        (status = 400, description = "Invalid city name or language", body = ErrorResponse),
        (status = 404, description = "City not found or provider error", body = ErrorResponse),
        (status = 500, description = "Persistence error", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(service): State<WeatherService>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<WeatherResponse>, AppError> {
    let query = city_query_from(payload)?;
    let record = service.lookup(&query).await?;
    Ok(Json(WeatherResponse::from(&record)))
}

/// Delete the cached weather for a city.
#[utoipa::path(
    delete,
    path = "/",
    tag = "Weather",
    request_body = CityRequest,
    responses(
        (status = 200, description = "Cached weather deleted", body = DeleteResponse),
        (status = 400, description = "Invalid city name or language", body = ErrorResponse),
        (status = 404, description = "No cached weather for this city", body = ErrorResponse),
    )
)]
pub async fn delete_weather(
    State(service): State<WeatherService>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let query = city_query_from(payload)?;
    let deleted_at = service.delete(&query).await?;
    Ok(Json(DeleteResponse {
        message: format!(
            "Weather data for {} in language {} deleted",
            query.city_name, query.lang
        ),
        city: query.city_name,
        language: query.lang,
        deleted_at: deleted_at.to_rfc3339(),
    }))
}
