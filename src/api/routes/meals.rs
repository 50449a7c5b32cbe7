//! Meal Routes
//!
//! - GET /api/v1/meals - List meals, newest first
//! - POST /api/v1/meals - Log a meal
//! - GET /api/v1/meals/daily-summary - Macro totals for one day
//! - GET /api/v1/meals/:id - Get a meal
//! - PUT /api/v1/meals/:id - Partially update a meal
//! - DELETE /api/v1/meals/:id - Delete a meal

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::aggregate::NutritionSummary;
use crate::api::dto::{DateParams, ListParams};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::{Meal, MealPatch, NewMeal};
use crate::validation::Validate;

/// GET /api/v1/meals
pub async fn list_meals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Meal>>> {
    let filter = params.instant_filter()?;
    let meals: Vec<Meal> = state.store.find(&filter)?;
    Ok(Json(meals))
}

/// POST /api/v1/meals
pub async fn create_meal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewMeal>,
) -> ApiResult<(StatusCode, Json<Meal>)> {
    req.validate()?;

    let meal = state.store.insert(Meal::from_new(req, state.clock.now()))?;

    tracing::info!(meal_id = %meal.id, calories = meal.calories, "Created meal");

    Ok((StatusCode::CREATED, Json(meal)))
}

/// GET /api/v1/meals/daily-summary
///
/// Totals for `target_date` (default today).
pub async fn daily_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> ApiResult<Json<NutritionSummary>> {
    let date = params.target_date.unwrap_or_else(|| state.clock.today());
    Ok(Json(state.aggregator.daily_nutrition(date)?))
}

/// GET /api/v1/meals/:id
pub async fn get_meal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Meal>> {
    Ok(Json(state.store.get(&id)?))
}

/// PUT /api/v1/meals/:id
pub async fn update_meal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<MealPatch>,
) -> ApiResult<Json<Meal>> {
    patch.validate()?;

    let now = state.clock.now();
    let meal = state.store.update(&id, |m: &mut Meal| m.apply(patch, now))?;

    tracing::info!(meal_id = %id, "Updated meal");

    Ok(Json(meal))
}

/// DELETE /api/v1/meals/:id
pub async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete::<Meal>(&id)?;

    tracing::info!(meal_id = %id, "Deleted meal");

    Ok(StatusCode::NO_CONTENT)
}
