use axum::{Router, middleware, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::AppState;
use super::handlers;
use super::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the API router with request-id and trace middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/feed", get(handlers::feed))
        .route("/coldstart", get(handlers::cold_start))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}
