//! In-process record store used in testing mode.
//!
//! All operations take the same mutex, which gives `upsert` the same
//! one-row-per-key guarantee the database's unique constraint provides.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::models::{WeatherReading, WeatherRecord};
use super::{StoreError, WeatherStore};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    records: Vec<WeatherRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryWeatherStore {
    inner: Mutex<Inner>,
}

impl MemoryWeatherStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WeatherStore for MemoryWeatherStore {
    async fn find_by_key(
        &self,
        city_name: &str,
        language: &str,
    ) -> Result<Option<WeatherRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .records
            .iter()
            .find(|r| r.city_name == city_name && r.language == language)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<WeatherRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.iter().find(|r| r.id == id).cloned())
    }

    async fn upsert(
        &self,
        city_name: &str,
        language: &str,
        reading: &WeatherReading,
        timestamp: DateTime<Utc>,
    ) -> Result<WeatherRecord, StoreError> {
        let mut inner = self.inner.lock().await;

        if let Some(existing) = inner
            .records
            .iter_mut()
            .find(|r| r.city_name == city_name && r.language == language)
        {
            existing.apply_reading(reading, timestamp);
            return Ok(existing.clone());
        }

        inner.next_id += 1;
        let record =
            WeatherRecord::from_reading(inner.next_id, city_name, language, reading, timestamp);
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, city_name: &str, language: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let before = inner.records.len();
        inner
            .records
            .retain(|r| !(r.city_name == city_name && r.language == language));
        Ok(inner.records.len() < before)
    }

    async fn list_all(&self) -> Result<Vec<WeatherRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.clone())
    }

    async fn ping(&self) -> bool {
        true
    }
}
