//! Workout Routes
//!
//! - GET /api/v1/workouts - List workouts, newest first
//! - POST /api/v1/workouts - Log a workout
//! - GET /api/v1/workouts/:id - Get a workout
//! - PUT /api/v1/workouts/:id - Partially update a workout
//! - DELETE /api/v1/workouts/:id - Delete a workout

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::ListParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::{NewWorkout, Workout, WorkoutPatch};
use crate::validation::Validate;

/// GET /api/v1/workouts
pub async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Workout>>> {
    let filter = params.instant_filter()?;
    let workouts: Vec<Workout> = state.store.find(&filter)?;
    Ok(Json(workouts))
}

/// POST /api/v1/workouts
pub async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewWorkout>,
) -> ApiResult<(StatusCode, Json<Workout>)> {
    req.validate()?;

    let workout = state
        .store
        .insert(Workout::from_new(req, state.clock.now()))?;

    tracing::info!(workout_id = %workout.id, kind = %workout.kind, "Created workout");

    Ok((StatusCode::CREATED, Json(workout)))
}

/// GET /api/v1/workouts/:id
pub async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Workout>> {
    Ok(Json(state.store.get(&id)?))
}

/// PUT /api/v1/workouts/:id
pub async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<WorkoutPatch>,
) -> ApiResult<Json<Workout>> {
    patch.validate()?;

    let now = state.clock.now();
    let workout = state
        .store
        .update(&id, |w: &mut Workout| w.apply(patch, now))?;

    tracing::info!(workout_id = %id, "Updated workout");

    Ok(Json(workout))
}

/// DELETE /api/v1/workouts/:id
pub async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete::<Workout>(&id)?;

    tracing::info!(workout_id = %id, "Deleted workout");

    Ok(StatusCode::NO_CONTENT)
}
