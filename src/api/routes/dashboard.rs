//! Dashboard Routes
//!
//! - GET /api/v1/dashboard/stats - Totals for one day
//! - GET /api/v1/dashboard/streak - Consecutive active days
//! - GET /api/v1/dashboard/recent-activity - Merged feed across kinds

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::aggregate::{ActivityFeed, DashboardStats, Streak};
use crate::api::dto::{DateParams, RecentParams};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// Totals for `target_date` (default today).
pub async fn stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> ApiResult<Json<DashboardStats>> {
    let date = params.target_date.unwrap_or_else(|| state.clock.today());
    Ok(Json(state.aggregator.dashboard_stats(date)?))
}

/// GET /api/v1/dashboard/streak
pub async fn streak(State(state): State<Arc<AppState>>) -> ApiResult<Json<Streak>> {
    Ok(Json(state.aggregator.streak(state.clock.today())?))
}

/// GET /api/v1/dashboard/recent-activity
pub async fn recent_activity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> ApiResult<Json<ActivityFeed>> {
    let limit = params.limit()?;
    Ok(Json(state.aggregator.recent_activity(limit)?))
}
