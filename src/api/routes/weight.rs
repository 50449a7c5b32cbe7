//! Weight Routes
//!
//! - GET /api/v1/weight - List weight entries, newest first
//! - POST /api/v1/weight - Log a weight entry
//! - GET /api/v1/weight/trend - Trend over the trailing `days`
//! - GET /api/v1/weight/:id - Get a weight entry
//! - PUT /api/v1/weight/:id - Partially update a weight entry
//! - DELETE /api/v1/weight/:id - Delete a weight entry

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::aggregate::WeightTrend;
use crate::api::dto::{ListParams, TrendParams};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::{NewWeight, Weight, WeightPatch};
use crate::validation::Validate;

/// GET /api/v1/weight
pub async fn list_weights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Weight>>> {
    let filter = params.date_filter()?;
    let weights: Vec<Weight> = state.store.find(&filter)?;
    Ok(Json(weights))
}

/// POST /api/v1/weight
///
/// `date` defaults to today.
pub async fn create_weight(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewWeight>,
) -> ApiResult<(StatusCode, Json<Weight>)> {
    req.validate()?;

    let weight = state.store.insert(Weight::from_new(req, state.clock.now()))?;

    tracing::info!(weight_id = %weight.id, date = %weight.date, "Logged weight");

    Ok((StatusCode::CREATED, Json(weight)))
}

/// GET /api/v1/weight/trend
pub async fn weight_trend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendParams>,
) -> ApiResult<Json<WeightTrend>> {
    let days = params.days()?;
    Ok(Json(state.aggregator.weight_trend(state.clock.today(), days)?))
}

/// GET /api/v1/weight/:id
pub async fn get_weight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Weight>> {
    Ok(Json(state.store.get(&id)?))
}

/// PUT /api/v1/weight/:id
pub async fn update_weight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<WeightPatch>,
) -> ApiResult<Json<Weight>> {
    patch.validate()?;

    let weight = state.store.update(&id, |w: &mut Weight| w.apply(patch))?;

    tracing::info!(weight_id = %id, "Updated weight entry");

    Ok(Json(weight))
}

/// DELETE /api/v1/weight/:id
pub async fn delete_weight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete::<Weight>(&id)?;

    tracing::info!(weight_id = %id, "Deleted weight entry");

    Ok(StatusCode::NO_CONTENT)
}
