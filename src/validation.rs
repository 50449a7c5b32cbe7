//! Field constraints for create and update bodies
//!
//! Every violation in a request is collected so the caller sees all bad
//! fields at once.

use serde::Serialize;
use std::fmt;

use crate::store::{
    GoalPatch, MealPatch, NewGoal, NewMeal, NewWeight, NewWorkout, WeightPatch, WorkoutPatch,
};

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All constraint violations found in one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fields: {}", self.field_names().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-field error
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// `Ok(())` if nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn non_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "must not be empty");
        }
    }

    fn positive_int(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.add(field, "must be greater than 0");
        }
    }

    fn non_negative(&mut self, field: &str, value: i64) {
        if value < 0 {
            self.add(field, "must be greater than or equal to 0");
        }
    }

    fn positive_weight(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            self.add(field, "must be a finite number greater than 0");
        }
    }

    fn days_per_week(&mut self, field: &str, value: i64) {
        if !(0..=7).contains(&value) {
            self.add(field, "must be between 0 and 7");
        }
    }
}

/// Implemented by every request body with field constraints
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for NewWorkout {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.non_empty("type", &self.kind);
        errors.non_empty("name", &self.name);
        errors.positive_int("duration", self.duration);
        errors.non_negative("calories_burned", self.calories_burned);
        errors.into_result()
    }
}

impl Validate for WorkoutPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(kind) = &self.kind {
            errors.non_empty("type", kind);
        }
        if let Some(name) = &self.name {
            errors.non_empty("name", name);
        }
        if let Some(duration) = self.duration {
            errors.positive_int("duration", duration);
        }
        if let Some(calories) = self.calories_burned {
            errors.non_negative("calories_burned", calories);
        }
        errors.into_result()
    }
}

impl Validate for NewMeal {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.non_empty("type", &self.kind);
        errors.non_empty("description", &self.description);
        errors.non_negative("calories", self.calories);
        errors.non_negative("protein", self.protein);
        if let Some(carbs) = self.carbs {
            errors.non_negative("carbs", carbs);
        }
        if let Some(fat) = self.fat {
            errors.non_negative("fat", fat);
        }
        errors.into_result()
    }
}

impl Validate for MealPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(kind) = &self.kind {
            errors.non_empty("type", kind);
        }
        if let Some(description) = &self.description {
            errors.non_empty("description", description);
        }
        if let Some(calories) = self.calories {
            errors.non_negative("calories", calories);
        }
        if let Some(protein) = self.protein {
            errors.non_negative("protein", protein);
        }
        if let Some(Some(carbs)) = self.carbs {
            errors.non_negative("carbs", carbs);
        }
        if let Some(Some(fat)) = self.fat {
            errors.non_negative("fat", fat);
        }
        errors.into_result()
    }
}

impl Validate for NewWeight {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.positive_weight("weight", self.weight);
        errors.into_result()
    }
}

impl Validate for WeightPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(weight) = self.weight {
            errors.positive_weight("weight", weight);
        }
        errors.into_result()
    }
}

impl Validate for NewGoal {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.positive_weight("start_weight", self.start_weight);
        errors.positive_weight("target_weight", self.target_weight);
        if let Some(calories) = self.daily_calorie_goal {
            errors.positive_int("daily_calorie_goal", calories);
        }
        if let Some(weekly) = self.weekly_workouts {
            errors.days_per_week("weekly_workouts", weekly);
        }
        if let Some(active) = self.active_days_per_week {
            errors.days_per_week("active_days_per_week", active);
        }
        errors.into_result()
    }
}

impl Validate for GoalPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(start) = self.start_weight {
            errors.positive_weight("start_weight", start);
        }
        if let Some(target) = self.target_weight {
            errors.positive_weight("target_weight", target);
        }
        if let Some(Some(calories)) = self.daily_calorie_goal {
            errors.positive_int("daily_calorie_goal", calories);
        }
        if let Some(Some(weekly)) = self.weekly_workouts {
            errors.days_per_week("weekly_workouts", weekly);
        }
        if let Some(Some(active)) = self.active_days_per_week {
            errors.days_per_week("active_days_per_week", active);
        }
        errors.into_result()
    }
}

/// Check an integer query parameter against an inclusive range
pub fn check_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), ValidationErrors> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationErrors::single(
            field,
            format!("must be between {} and {}", min, max),
        ))
    }
}
