//! HTTP API
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /evaluate | POST | authoritative cart evaluation |
//! | /campaigns/reload | POST | reload the CampaignSet document |
//! | /health | GET | liveness and loaded campaign count |

use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod campaigns;
pub mod evaluate;
pub mod health;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(evaluate::router())
        .merge(campaigns::router())
        .merge(health::router())
}

/// Build the fully configured application with middleware and state
///
/// Used by the HTTP server and by in-process tests
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // CORS - the POS front end calls from another origin
        .layer(CorsLayer::permissive())
        // Request timeout
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // Trace - request tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}
