//! Record store for cached weather readings.
//!
//! Handlers talk to a [`WeatherStore`] trait object so the service can run
//! against PostgreSQL in production and an in-process map in testing mode.

pub mod memory;
pub mod models;
pub mod queries;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use models::{WeatherReading, WeatherRecord};

pub use memory::MemoryWeatherStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence of at most one [`WeatherRecord`] per (city, language).
#[async_trait]
pub trait WeatherStore: Send + Sync {
    async fn find_by_key(
        &self,
        city_name: &str,
        language: &str,
    ) -> Result<Option<WeatherRecord>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<WeatherRecord>, StoreError>;

    /// Insert or overwrite the record for the key. Must be atomic with
    /// respect to the existence check.
    async fn upsert(
        &self,
        city_name: &str,
        language: &str,
        reading: &WeatherReading,
        timestamp: DateTime<Utc>,
    ) -> Result<WeatherRecord, StoreError>;

    /// Remove the record for the key, returning whether one existed.
    async fn delete(&self, city_name: &str, language: &str) -> Result<bool, StoreError>;

    async fn list_all(&self) -> Result<Vec<WeatherRecord>, StoreError>;

    /// Whether the backing store is reachable.
    async fn ping(&self) -> bool;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgWeatherStore {
    pool: PgPool,
}

impl PgWeatherStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeatherStore for PgWeatherStore {
    async fn find_by_key(
        &self,
        city_name: &str,
        language: &str,
    ) -> Result<Option<WeatherRecord>, StoreError> {
        Ok(queries::find_by_key(&self.pool, city_name, language).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<WeatherRecord>, StoreError> {
        Ok(queries::find_by_id(&self.pool, id).await?)
    }

    async fn upsert(
        &self,
        city_name: &str,
        language: &str,
        reading: &WeatherReading,
        timestamp: DateTime<Utc>,
    ) -> Result<WeatherRecord, StoreError> {
        Ok(queries::upsert_weather(&self.pool, city_name, language, reading, timestamp).await?)
    }

    async fn delete(&self, city_name: &str, language: &str) -> Result<bool, StoreError> {
        Ok(queries::delete_weather(&self.pool, city_name, language).await?)
    }

    async fn list_all(&self) -> Result<Vec<WeatherRecord>, StoreError> {
        Ok(queries::list_all(&self.pool).await?)
    }

    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
