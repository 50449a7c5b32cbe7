//! Core record types for the fitlog store
//!
//! This module defines the four record kinds and their request shapes:
//! - `Workout`, `Meal`: timestamped activity entries
//! - `Weight`: a body-weight measurement on a calendar date
//! - `Goal`: the single weight/fitness goal
//!
//! Each kind has a `New*` type (create body, defaults applied on insert) and,
//! where mutable, a `*Patch` type carrying only the fields present in an update.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Generate a new opaque record id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Drop sub-millisecond precision so stored and returned instants agree
pub fn to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(3)
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Parse an RFC 3339 instant; timestamps without an offset are taken as UTC
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn optional_instant<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(de)? {
        None => Ok(None),
        Some(raw) => parse_instant(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime: {}", raw))),
    }
}

// ============================================
// WORKOUT
// ============================================

/// A logged workout session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: String,
    /// Free-form category: cardio, strength, flexibility, sports, other
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Duration in minutes
    pub duration: i64,
    pub calories_burned: i64,
    pub notes: Option<String>,
    /// When the workout happened
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create body for a workout
#[derive(Debug, Clone, Deserialize)]
pub struct NewWorkout {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub duration: i64,
    #[serde(default)]
    pub calories_burned: i64,
    #[serde(default = "empty_notes")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "optional_instant")]
    pub date: Option<DateTime<Utc>>,
}

/// Partial update for a workout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub calories_burned: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "optional_instant")]
    pub date: Option<DateTime<Utc>>,
}

fn empty_notes() -> Option<String> {
    Some(String::new())
}

impl Workout {
    /// Build a stored workout from a create body, defaulting `date` to `now`
    pub fn from_new(new: NewWorkout, now: DateTime<Utc>) -> Self {
        let now = to_millis(now);
        Self {
            id: new_id(),
            kind: new.kind,
            name: new.name,
            duration: new.duration,
            calories_burned: new.calories_burned,
            notes: new.notes,
            date: new.date.map(to_millis).unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `patch`; refreshes `updated_at` only if something was set
    pub fn apply(&mut self, patch: WorkoutPatch, now: DateTime<Utc>) {
        if patch.is_empty() {
            return;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(calories) = patch.calories_burned {
            self.calories_burned = calories;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(date) = patch.date {
            self.date = to_millis(date);
        }
        self.updated_at = to_millis(now);
    }
}

impl WorkoutPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.name.is_none()
            && self.duration.is_none()
            && self.calories_burned.is_none()
            && self.notes.is_none()
            && self.date.is_none()
    }
}

// ============================================
// MEAL
// ============================================

/// A logged meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: String,
    /// breakfast, lunch, dinner, snack (stored as given)
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub calories: i64,
    /// Protein in grams
    pub protein: i64,
    /// Carbohydrates in grams
    pub carbs: Option<i64>,
    /// Fat in grams
    pub fat: Option<i64>,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create body for a meal
#[derive(Debug, Clone, Deserialize)]
pub struct NewMeal {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub calories: i64,
    #[serde(default)]
    pub protein: i64,
    #[serde(default)]
    pub carbs: Option<i64>,
    #[serde(default)]
    pub fat: Option<i64>,
    #[serde(default = "empty_notes")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "optional_instant")]
    pub date: Option<DateTime<Utc>>,
}

/// Partial update for a meal
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub protein: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub carbs: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub fat: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "optional_instant")]
    pub date: Option<DateTime<Utc>>,
}

impl Meal {
    pub fn from_new(new: NewMeal, now: DateTime<Utc>) -> Self {
        let now = to_millis(now);
        Self {
            id: new_id(),
            kind: new.kind,
            description: new.description,
            calories: new.calories,
            protein: new.protein,
            carbs: new.carbs,
            fat: new.fat,
            notes: new.notes,
            date: new.date.map(to_millis).unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: MealPatch, now: DateTime<Utc>) {
        if patch.is_empty() {
            return;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(calories) = patch.calories {
            self.calories = calories;
        }
        if let Some(protein) = patch.protein {
            self.protein = protein;
        }
        if let Some(carbs) = patch.carbs {
            self.carbs = carbs;
        }
        if let Some(fat) = patch.fat {
            self.fat = fat;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(date) = patch.date {
            self.date = to_millis(date);
        }
        self.updated_at = to_millis(now);
    }
}

impl MealPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.description.is_none()
            && self.calories.is_none()
            && self.protein.is_none()
            && self.carbs.is_none()
            && self.fat.is_none()
            && self.notes.is_none()
            && self.date.is_none()
    }
}

// ============================================
// WEIGHT
// ============================================

/// A body-weight measurement (pounds) on a calendar date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Weight {
    pub id: String,
    pub weight: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewWeight {
    pub weight: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightPatch {
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Weight {
    /// Build a stored weight entry, defaulting `date` to the creation day
    pub fn from_new(new: NewWeight, now: DateTime<Utc>) -> Self {
        let now = to_millis(now);
        Self {
            id: new_id(),
            weight: new.weight,
            date: new.date.unwrap_or_else(|| now.date_naive()),
            created_at: now,
        }
    }

    pub fn apply(&mut self, patch: WeightPatch) {
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

// ============================================
// GOAL
// ============================================

/// The single weight/fitness goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: String,
    pub start_weight: f64,
    pub target_weight: f64,
    pub target_date: Option<NaiveDate>,
    pub daily_calorie_goal: Option<i64>,
    pub weekly_workouts: Option<i64>,
    pub active_days_per_week: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create (upsert) body for the goal
#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    pub start_weight: f64,
    pub target_weight: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub daily_calorie_goal: Option<i64>,
    #[serde(default)]
    pub weekly_workouts: Option<i64>,
    #[serde(default)]
    pub active_days_per_week: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalPatch {
    #[serde(default)]
    pub start_weight: Option<f64>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub target_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub daily_calorie_goal: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub weekly_workouts: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub active_days_per_week: Option<Option<i64>>,
}

impl Goal {
    pub fn from_new(new: NewGoal, now: DateTime<Utc>) -> Self {
        let now = to_millis(now);
        Self {
            id: new_id(),
            start_weight: new.start_weight,
            target_weight: new.target_weight,
            target_date: new.target_date,
            daily_calorie_goal: new.daily_calorie_goal,
            weekly_workouts: new.weekly_workouts,
            active_days_per_week: new.active_days_per_week,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every field from `new`, keeping `id` and `created_at`
    pub fn replace_with(&mut self, new: NewGoal, now: DateTime<Utc>) {
        self.start_weight = new.start_weight;
        self.target_weight = new.target_weight;
        self.target_date = new.target_date;
        self.daily_calorie_goal = new.daily_calorie_goal;
        self.weekly_workouts = new.weekly_workouts;
        self.active_days_per_week = new.active_days_per_week;
        self.updated_at = to_millis(now);
    }

    pub fn apply(&mut self, patch: GoalPatch, now: DateTime<Utc>) {
        if patch.is_empty() {
            return;
        }
        if let Some(start) = patch.start_weight {
            self.start_weight = start;
        }
        if let Some(target) = patch.target_weight {
            self.target_weight = target;
        }
        if let Some(date) = patch.target_date {
            self.target_date = date;
        }
        if let Some(calories) = patch.daily_calorie_goal {
            self.daily_calorie_goal = calories;
        }
        if let Some(weekly) = patch.weekly_workouts {
            self.weekly_workouts = weekly;
        }
        if let Some(active) = patch.active_days_per_week {
            self.active_days_per_week = active;
        }
        self.updated_at = to_millis(now);
    }
}

impl GoalPatch {
    pub fn is_empty(&self) -> bool {
        self.start_weight.is_none()
            && self.target_weight.is_none()
            && self.target_date.is_none()
            && self.daily_calorie_goal.is_none()
            && self.weekly_workouts.is_none()
            && self.active_days_per_week.is_none()
    }
}
