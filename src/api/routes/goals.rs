//! Goal Routes
//!
//! At most one goal exists; posting again overwrites it in place.
//!
//! - POST /api/v1/goals - Create or replace the goal
//! - GET /api/v1/goals - The goal, or `null`
//! - GET /api/v1/goals/progress - Progress toward the goal
//! - PUT /api/v1/goals/:id - Partially update the goal
//! - DELETE /api/v1/goals/:id - Delete the goal

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::aggregate::GoalProgress;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::{Goal, GoalPatch, NewGoal};
use crate::validation::Validate;

/// POST /api/v1/goals
pub async fn upsert_goal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    req.validate()?;

    let goal = state.store.upsert_goal(req, state.clock.now())?;

    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /api/v1/goals
pub async fn get_goal(State(state): State<Arc<AppState>>) -> ApiResult<Json<Option<Goal>>> {
    Ok(Json(state.store.first::<Goal>()?))
}

/// GET /api/v1/goals/progress
///
/// 404 when no goal is set.
pub async fn goal_progress(State(state): State<Arc<AppState>>) -> ApiResult<Json<GoalProgress>> {
    Ok(Json(state.aggregator.goal_progress()?))
}

/// PUT /api/v1/goals/:id
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<GoalPatch>,
) -> ApiResult<Json<Goal>> {
    patch.validate()?;

    let now = state.clock.now();
    let goal = state.store.update(&id, |g: &mut Goal| g.apply(patch, now))?;

    tracing::info!(goal_id = %id, "Updated goal");

    Ok(Json(goal))
}

/// DELETE /api/v1/goals/:id
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete::<Goal>(&id)?;

    tracing::info!(goal_id = %id, "Deleted goal");

    Ok(StatusCode::NO_CONTENT)
}
