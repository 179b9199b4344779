use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::{AppError, ErrorResponse};
use crate::routes::weather::WeatherResponse;
use crate::services::weather::{AnnotatedRecord, WeatherService};

/// One entry of `GET /cities`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CityListItem {
    pub id: i64,
    pub city: String,
    pub language: String,
    /// When the reading was fetched (ISO 8601)
    pub last_updated: String,
    /// Whether the reading is still within the cache TTL
    pub is_fresh: bool,
}

impl From<&AnnotatedRecord> for CityListItem {
    fn from(a: &AnnotatedRecord) -> Self {
        Self {
            id: a.record.id,
            city: a.record.city_name.clone(),
            language: a.record.language.clone(),
            last_updated: a.record.timestamp.to_rfc3339(),
            is_fresh: a.is_fresh,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CityListResponse {
    pub count: usize,
    pub cities: Vec<CityListItem>,
}

/// A cached reading plus its freshness flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct CityDetailResponse {
    #[serde(flatten)]
    pub weather: WeatherResponse,
    pub is_fresh: bool,
}

/// List every cached city with its freshness.
#[utoipa::path(
    get,
    path = "/cities",
    tag = "Cities",
    responses(
        (status = 200, description = "All cached cities", body = CityListResponse),
    )
)]
pub async fn list_cities(
    State(service): State<WeatherService>,
) -> Result<Json<CityListResponse>, AppError> {
    let records = service.list().await?;
    let cities: Vec<CityListItem> = records.iter().map(CityListItem::from).collect();
    Ok(Json(CityListResponse {
        count: cities.len(),
        cities,
    }))
}

/// Get one cached city by id.
#[utoipa::path(
    get,
    path = "/cities/{id}",
    tag = "Cities",
    params(
        ("id" = i64, Path, description = "Cached record id"),
    ),
    responses(
        (status = 200, description = "Cached weather for the city", body = CityDetailResponse),
        (status = 404, description = "No cached record with this id", body = ErrorResponse),
    )
)]
pub async fn get_city(
    State(service): State<WeatherService>,
    Path(raw_id): Path<String>,
) -> Result<Json<CityDetailResponse>, AppError> {
    // Non-numeric ids cannot match a record, so they are a plain 404.
    let id: i64 = raw_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("City with id {} not found", raw_id)))?;

    let annotated = service.get(id).await?;
    Ok(Json(CityDetailResponse {
        weather: WeatherResponse::from(&annotated.record),
        is_fresh: annotated.is_fresh,
    }))
}
