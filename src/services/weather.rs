//! Weather lookup orchestration.
//!
//! A lookup goes: cache lookup → freshness check → (on miss or stale)
//! provider fetch → upsert. Stale readings are never served when the
//! provider fails.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::db::models::WeatherRecord;
use crate::db::WeatherStore;
use crate::errors::AppError;
use crate::services::freshness::is_fresh;
use crate::services::openweather::WeatherProvider;
use crate::services::validation::CityQuery;

/// A stored record together with its freshness at read time.
#[derive(Debug, Clone)]
pub struct AnnotatedRecord {
    pub record: WeatherRecord,
    pub is_fresh: bool,
}

/// Shared handles for every request: store, provider and the cache TTL.
#[derive(Clone)]
pub struct WeatherService {
    store: Arc<dyn WeatherStore>,
    provider: Arc<dyn WeatherProvider>,
    cache_ttl: Duration,
}

impl WeatherService {
    pub fn new(
        store: Arc<dyn WeatherStore>,
        provider: Arc<dyn WeatherProvider>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            store,
            provider,
            cache_ttl,
        }
    }

    pub fn store(&self) -> &dyn WeatherStore {
        self.store.as_ref()
    }

    fn annotate(&self, record: WeatherRecord, now: DateTime<Utc>) -> AnnotatedRecord {
        let is_fresh = is_fresh(record.timestamp, now, self.cache_ttl);
        AnnotatedRecord { record, is_fresh }
    }

    /// Serve the cached reading if fresh, otherwise refresh it from the provider.
    pub async fn lookup(&self, query: &CityQuery) -> Result<WeatherRecord, AppError> {
        let city = query.city_name.as_str();
        let lang = query.lang.as_str();

        match self.store.find_by_key(city, lang).await? {
            Some(record) if is_fresh(record.timestamp, Utc::now(), self.cache_ttl) => {
                tracing::debug!(city, lang, id = record.id, "Serving cached weather");
                return Ok(record);
            }
            Some(record) => {
                tracing::info!(
                    city,
                    lang,
                    id = record.id,
                    last_updated = %record.timestamp,
                    "Cached weather is stale, refreshing"
                );
            }
            None => {
                tracing::info!(city, lang, "No cached weather, fetching");
            }
        }

        let reading = self.provider.fetch(city, lang).await?;
        let record = self.store.upsert(city, lang, &reading, Utc::now()).await?;
        tracing::debug!(city, lang, id = record.id, "Stored weather");
        Ok(record)
    }

    /// Remove the cached reading for a key, returning the deletion time.
    pub async fn delete(&self, query: &CityQuery) -> Result<DateTime<Utc>, AppError> {
        let removed = self.store.delete(&query.city_name, &query.lang).await?;
        if !removed {
            return Err(AppError::NotFound(format!(
                "No weather data found for {} in language {}",
                query.city_name, query.lang
            )));
        }
        tracing::info!(city = %query.city_name, lang = %query.lang, "Deleted cached weather");
        Ok(Utc::now())
    }

    /// Every cached reading with its freshness flag.
    pub async fn list(&self) -> Result<Vec<AnnotatedRecord>, AppError> {
        let now = Utc::now();
        let records = self.store.list_all().await?;
        Ok(records.into_iter().map(|r| self.annotate(r, now)).collect())
    }

    pub async fn get(&self, id: i64) -> Result<AnnotatedRecord, AppError> {
        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("City with id {} not found", id)))?;
        Ok(self.annotate(record, Utc::now()))
    }
}
