use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::{WeatherReading, WeatherRecord};

const WEATHER_COLUMNS: &str = "id, city_name, language, temp, feels_like, temp_min, temp_max,
     pressure, humidity, wind_speed, wind_deg, description, timestamp";

/// Get the cached reading for a (city, language) pair.
pub async fn find_by_key(
    pool: &PgPool,
    city_name: &str,
    language: &str,
) -> Result<Option<WeatherRecord>, sqlx::Error> {
    sqlx::query_as::<_, WeatherRecord>(&format!(
        "SELECT {WEATHER_COLUMNS} FROM weather WHERE city_name = $1 AND language = $2"
    ))
    .bind(city_name)
    .bind(language)
    .fetch_optional(pool)
    .await
}

/// Get a cached reading by its numeric id.
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<WeatherRecord>, sqlx::Error> {
    sqlx::query_as::<_, WeatherRecord>(&format!(
        "SELECT {WEATHER_COLUMNS} FROM weather WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List every cached reading, oldest id first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<WeatherRecord>, sqlx::Error> {
    sqlx::query_as::<_, WeatherRecord>(&format!(
        "SELECT {WEATHER_COLUMNS} FROM weather ORDER BY id"
    ))
    .fetch_all(pool)
    .await
}

/// Insert a reading, or overwrite the existing row for the same (city, language).
///
/// The unique constraint makes this a single atomic statement, so two
/// concurrent first fetches for one key still leave exactly one row.
pub async fn upsert_weather(
    pool: &PgPool,
    city_name: &str,
    language: &str,
    reading: &WeatherReading,
    timestamp: DateTime<Utc>,
) -> Result<WeatherRecord, sqlx::Error> {
    sqlx::query_as::<_, WeatherRecord>(&format!(
        "INSERT INTO weather (
            city_name, language, temp, feels_like, temp_min, temp_max,
            pressure, humidity, wind_speed, wind_deg, description, timestamp
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT ON CONSTRAINT unique_city_lang DO UPDATE SET
            temp = EXCLUDED.temp,
            feels_like = EXCLUDED.feels_like,
            temp_min = EXCLUDED.temp_min,
            temp_max = EXCLUDED.temp_max,
            pressure = EXCLUDED.pressure,
            humidity = EXCLUDED.humidity,
            wind_speed = EXCLUDED.wind_speed,
            wind_deg = EXCLUDED.wind_deg,
            description = EXCLUDED.description,
            timestamp = EXCLUDED.timestamp
        RETURNING {WEATHER_COLUMNS}"
    ))
    .bind(city_name)
    .bind(language)
    .bind(reading.temp)
    .bind(reading.feels_like)
    .bind(reading.temp_min)
    .bind(reading.temp_max)
    .bind(reading.pressure)
    .bind(reading.humidity)
    .bind(reading.wind_speed)
    .bind(reading.wind_deg)
    .bind(&reading.description)
    .bind(timestamp)
    .fetch_one(pool)
    .await
}

/// Delete the reading for a (city, language) pair. Returns whether a row was removed.
pub async fn delete_weather(
    pool: &PgPool,
    city_name: &str,
    language: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM weather WHERE city_name = $1 AND language = $2")
        .bind(city_name)
        .bind(language)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
