use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::middleware::{cors_layer, metrics_middleware};
use super::{dashboard, handlers, tickets};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config().cors);

    Router::new()
        // Health and observability
        .route("/health", get(handlers::health))
        .route("/prometheus", get(handlers::prometheus_metrics))
        // Dashboard
        .route("/metrics", get(dashboard::get_metrics))
        // Tickets
        .route("/tickets", get(tickets::list_tickets))
        .route(
            "/tickets/{id}",
            get(tickets::get_ticket).patch(tickets::update_ticket),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
