//! Fitlog REST API
//!
//! HTTP API layer for fitlog, built with Axum.
//!
//! # Endpoints
//!
//! ## Workouts / Meals / Weight
//! - `GET /api/v1/{workouts,meals,weight}` - List, newest first
//! - `POST /api/v1/{workouts,meals,weight}` - Create
//! - `GET /api/v1/{workouts,meals,weight}/:id` - Get
//! - `PUT /api/v1/{workouts,meals,weight}/:id` - Partial update
//! - `DELETE /api/v1/{workouts,meals,weight}/:id` - Delete
//! - `GET /api/v1/meals/daily-summary` - Macro totals for one day
//! - `GET /api/v1/weight/trend` - Weight trend
//!
//! ## Goal
//! - `POST /api/v1/goals` - Create or replace
//! - `GET /api/v1/goals` - Current goal or `null`
//! - `GET /api/v1/goals/progress` - Progress toward the goal
//! - `PUT /api/v1/goals/:id` - Partial update
//! - `DELETE /api/v1/goals/:id` - Delete
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard/stats` - Daily totals
//! - `GET /api/v1/dashboard/streak` - Activity streak
//! - `GET /api/v1/dashboard/recent-activity` - Merged feed
//!
//! ## Health
//! - `GET /health` - Service identity
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /api/v1/health` - Status with version
//!
//! # Example
//!
//! ```rust,no_run
//! use fitlog::api::{serve, ApiConfig, AppState};
//! use fitlog::store::Store;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::open(Path::new("./fitlog_data"))?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health::version_health))
        // Workout routes
        .route(
            "/workouts",
            get(routes::workouts::list_workouts).post(routes::workouts::create_workout),
        )
        .route(
            "/workouts/:id",
            get(routes::workouts::get_workout)
                .put(routes::workouts::update_workout)
                .delete(routes::workouts::delete_workout),
        )
        // Meal routes
        .route(
            "/meals",
            get(routes::meals::list_meals).post(routes::meals::create_meal),
        )
        .route("/meals/daily-summary", get(routes::meals::daily_summary))
        .route(
            "/meals/:id",
            get(routes::meals::get_meal)
                .put(routes::meals::update_meal)
                .delete(routes::meals::delete_meal),
        )
        // Weight routes
        .route(
            "/weight",
            get(routes::weight::list_weights).post(routes::weight::create_weight),
        )
        .route("/weight/trend", get(routes::weight::weight_trend))
        .route(
            "/weight/:id",
            get(routes::weight::get_weight)
                .put(routes::weight::update_weight)
                .delete(routes::weight::delete_weight),
        )
        // Goal routes
        .route(
            "/goals",
            get(routes::goals::get_goal).post(routes::goals::upsert_goal),
        )
        .route("/goals/progress", get(routes::goals::goal_progress))
        .route(
            "/goals/:id",
            axum::routing::put(routes::goals::update_goal).delete(routes::goals::delete_goal),
        )
        // Dashboard routes
        .route("/dashboard/stats", get(routes::dashboard::stats))
        .route("/dashboard/streak", get(routes::dashboard::streak))
        .route(
            "/dashboard/recent-activity",
            get(routes::dashboard::recent_activity),
        );

    let health_routes = Router::new()
        .route("/", get(routes::health::service_health))
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness));

    let cors = cors_layer(&state.config.cors_origins);
    let prefix = state.config.prefix.trim_end_matches('/').to_string();

    // Create shared state
    let shared_state = Arc::new(state);

    let router = Router::new().nest("/health", health_routes);
    let router = if prefix.is_empty() {
        router.merge(api_routes)
    } else {
        router.nest(&prefix, api_routes)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS restricted to the configured origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Fitlog API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Fitlog API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
