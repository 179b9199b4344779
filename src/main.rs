// Weather Cache API v0.1
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod db;
mod errors;
mod routes;
mod services;

use config::AppConfig;
use db::{MemoryWeatherStore, PgWeatherStore, WeatherStore};
use services::openweather::OpenWeatherClient;
use services::weather::WeatherService;

/// Maximum number of connections in the database pool.
const DB_POOL_MAX_CONNECTIONS: u32 = 5;
/// Minimum number of connections kept alive in the database pool.
const DB_POOL_MIN_CONNECTIONS: u32 = 1;

/// Weather Cache API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather Cache API",
        version = "0.1.0",
        description = "Current weather by city and language. Readings are fetched from \
            OpenWeatherMap and cached per (city, language) for a configurable number of \
            minutes before they are refreshed.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Weather", description = "Cached weather lookup and removal"),
        (name = "Cities", description = "Inspect cached cities"),
        (name = "Health", description = "Service health check"),
    ),
    paths(
        routes::weather::home,
        routes::weather::get_weather,
        routes::weather::delete_weather,
        routes::cities::list_cities,
        routes::cities::get_city,
        routes::health::health_check,
    ),
    components(
        schemas(
            routes::weather::CityRequest,
            routes::weather::HomeResponse,
            routes::weather::TemperatureResponse,
            routes::weather::WindResponse,
            routes::weather::WeatherResponse,
            routes::weather::DeleteResponse,
            routes::cities::CityListItem,
            routes::cities::CityListResponse,
            routes::cities::CityDetailResponse,
            routes::health::HealthResponse,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    });

    // Initialize tracing
    let default_filter = if config.debug {
        "weather_cache_api=debug,tower_http=debug"
    } else {
        "weather_cache_api=info,tower_http=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    if config.secret_key_generated {
        tracing::warn!("SECRET_KEY not set, using a random key for this process");
    }
    tracing::debug!(
        cache_ttl_minutes = config.cache_ttl.num_minutes(),
        "Configuration loaded"
    );

    let store: Arc<dyn WeatherStore> = match config.database_url.as_deref() {
        Some(database_url) if !config.testing => {
            let pool = PgPoolOptions::new()
                .max_connections(DB_POOL_MAX_CONNECTIONS)
                .min_connections(DB_POOL_MIN_CONNECTIONS)
                .connect(database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run database migrations");

            tracing::info!("Database migrations completed");
            Arc::new(PgWeatherStore::new(pool))
        }
        _ => {
            tracing::warn!("Testing mode: weather records are kept in memory only");
            Arc::new(MemoryWeatherStore::new())
        }
    };

    let provider = Arc::new(OpenWeatherClient::new(
        &config.openweather_base_url,
        &config.openweather_api_key,
    ));

    let service = WeatherService::new(store, provider, config.cache_ttl);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
        ])
        .allow_headers(Any);

    let app = routes::build_router(service)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
