//! Fakes shared by service and route tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::db::models::{WeatherReading, WeatherRecord};
use crate::db::{StoreError, WeatherStore};
use crate::services::openweather::{ProviderError, WeatherProvider};

pub fn sample_reading(temp: f64) -> WeatherReading {
    WeatherReading {
        temp,
        feels_like: temp - 1.5,
        temp_min: temp - 2.0,
        temp_max: temp + 2.0,
        pressure: 1013,
        humidity: 70,
        wind_speed: 4.2,
        wind_deg: 250,
        description: "scattered clouds".to_string(),
    }
}

/// Provider that counts calls and either always succeeds or always fails.
#[derive(Debug)]
pub struct FakeProvider {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn working() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn fetch(&self, _city_name: &str, _lang: &str) -> Result<WeatherReading, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::Status(404));
        }
        // Vary the reading per call so refreshes are observable.
        Ok(sample_reading(10.0 + n as f64))
    }
}

/// Store whose database is gone: every query fails and `ping` reports false.
#[derive(Debug, Default)]
pub struct UnreachableStore;

impl UnreachableStore {
    fn down() -> StoreError {
        StoreError::Database(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl WeatherStore for UnreachableStore {
    async fn find_by_key(
        &self,
        _city_name: &str,
        _language: &str,
    ) -> Result<Option<WeatherRecord>, StoreError> {
        Err(Self::down())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<WeatherRecord>, StoreError> {
        Err(Self::down())
    }

    async fn upsert(
        &self,
        _city_name: &str,
        _language: &str,
        _reading: &WeatherReading,
        _timestamp: DateTime<Utc>,
    ) -> Result<WeatherRecord, StoreError> {
        Err(Self::down())
    }

    async fn delete(&self, _city_name: &str, _language: &str) -> Result<bool, StoreError> {
        Err(Self::down())
    }

    async fn list_all(&self) -> Result<Vec<WeatherRecord>, StoreError> {
        Err(Self::down())
    }

    async fn ping(&self) -> bool {
        false
    }
}

/// Tracing layer that counts `WARN` events.
#[derive(Debug, Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
