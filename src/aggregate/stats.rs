//! Per-day totals: dashboard stats and the nutrition summary

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::store::{Meal, Weight, Workout};

/// Inclusive instant range covering the whole of `date` (UTC)
///
/// From 00:00:00.000000 to 23:59:59.999999.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = date
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .map(|dt| dt.and_utc())
        .unwrap_or(start);
    (start, end)
}

/// Sum of non-negative amounts, clamped at `i64::MAX`
fn total(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

/// Dashboard totals for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub date: NaiveDate,
    pub calories_consumed: i64,
    pub protein_consumed: i64,
    pub workout_count: usize,
    pub calories_burned: i64,
    /// Latest recorded weight overall, not only on `date`
    pub current_weight: Option<f64>,
    pub meal_count: usize,
}

impl DashboardStats {
    /// Sum the day's meals and workouts; `latest` is the most recent weight entry
    pub fn compute(
        date: NaiveDate,
        workouts: &[Workout],
        meals: &[Meal],
        latest: Option<&Weight>,
    ) -> Self {
        Self {
            date,
            calories_consumed: total(meals.iter().map(|m| m.calories)),
            protein_consumed: total(meals.iter().map(|m| m.protein)),
            workout_count: workouts.len(),
            calories_burned: total(workouts.iter().map(|w| w.calories_burned)),
            current_weight: latest.map(|w| w.weight),
            meal_count: meals.len(),
        }
    }
}

/// Macro totals over the day's meals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionSummary {
    pub date: NaiveDate,
    pub total_calories: i64,
    pub total_protein: i64,
    pub total_carbs: i64,
    pub total_fat: i64,
    pub meal_count: usize,
}

impl NutritionSummary {
    /// Absent carbs/fat count as zero
    pub fn compute(date: NaiveDate, meals: &[Meal]) -> Self {
        Self {
            date,
            total_calories: total(meals.iter().map(|m| m.calories)),
            total_protein: total(meals.iter().map(|m| m.protein)),
            total_carbs: total(meals.iter().filter_map(|m| m.carbs)),
            total_fat: total(meals.iter().filter_map(|m| m.fat)),
            meal_count: meals.len(),
        }
    }
}
