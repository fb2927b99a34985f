use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/v1/insert", post(handlers::insert::insert))
        .route("/v1/code/receive", post(handlers::codes::receive_code))
        .route("/v1/code/available", get(handlers::codes::available_count))
        .route("/v1/imei/inspect", post(handlers::imei::inspect))
        .route("/v1/feedback", post(handlers::feedback::feedback));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
