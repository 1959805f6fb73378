//! HTTP server.
//!
//! Provides endpoints for:
//! - Planning page (`/`)
//! - Attendance (`/mark_attendance`, `/get_attendance`)
//! - Production planning and actuals (`/plan_production`, `/update_production_actual`)
//! - Material usage (`/save_material`)
//! - Dashboard aggregation (`/get_dashboard_data`)
//! - Health check (`/health`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(handlers::index))
        // API routes
        .route("/mark_attendance", post(handlers::mark_attendance))
        .route("/get_attendance", get(handlers::get_attendance))
        .route("/plan_production", post(handlers::plan_production))
        .route(
            "/update_production_actual",
            post(handlers::update_production_actual),
        )
        .route("/save_material", post(handlers::save_material))
        .route("/get_dashboard_data", get(handlers::get_dashboard_data))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
