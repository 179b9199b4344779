pub mod cities;
pub mod health;
pub mod weather;

use std::any::Any;

use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::{error_response, INTERNAL_ERROR_MESSAGE};
use crate::services::weather::WeatherService;

/// Build the API router with uniform JSON fallbacks.
pub fn build_router(service: WeatherService) -> Router {
    Router::new()
        .route(
            "/",
            get(weather::home)
                .post(weather::get_weather)
                .delete(weather::delete_weather),
        )
        .route("/cities", get(cities::list_cities))
        .route("/cities/:id", get(cities::get_city))
        .route("/health", get(health::health_check))
        .fallback(route_not_found)
        .layer(middleware::map_response(method_not_allowed_as_json))
        .layer(CatchPanicLayer::custom(panic_as_json))
        .with_state(service)
}

async fn route_not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "Route not found. Please check the URL and try again.",
    )
}

/// Axum answers a known path with an unsupported method with an empty 405.
async fn method_not_allowed_as_json(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.");
    }
    response
}

fn panic_as_json(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}
