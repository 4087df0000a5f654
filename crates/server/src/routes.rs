use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::FlavorStore;

use crate::metrics;

pub mod flavors;

/// Shared handler state: the one flavor collection.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FlavorStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn FlavorStore>) -> Self {
        Self { store }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: flavor CRUD plus health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/flavors", get(flavors::list_flavors).post(flavors::create_flavor))
        .route(
            "/api/flavors/:id",
            get(flavors::get_flavor)
                .put(flavors::update_flavor)
                .delete(flavors::delete_flavor),
        );

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler));

    api.merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
