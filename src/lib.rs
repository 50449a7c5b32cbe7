//! # Fitlog
//!
//! Personal fitness tracking - a Rust service for logging workouts, meals,
//! body weight and a single weight goal, with dashboard views derived from
//! them.
//!
//! ## Modules
//!
//! - [`store`]: SQLite-backed record store
//! - [`validation`]: Field constraints for create and update bodies
//! - [`aggregate`]: Dashboard stats, streak, activity feed, trend, goal progress
//! - [`clock`]: Injectable reference time
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitlog::aggregate::Aggregator;
//! use fitlog::store::{NewWorkout, Store, Workout};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::in_memory()?);
//!
//!     let now = chrono::Utc::now();
//!     store.insert(Workout::from_new(
//!         NewWorkout {
//!             kind: "cardio".into(),
//!             name: "Morning Run".into(),
//!             duration: 30,
//!             calories_burned: 300,
//!             notes: None,
//!             date: None,
//!         },
//!         now,
//!     ))?;
//!
//!     let aggregator = Aggregator::new(Arc::clone(&store));
//!     let stats = aggregator.dashboard_stats(now.date_naive())?;
//!     println!("Burned {} calories today", stats.calories_burned);
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod clock;
pub mod config;
pub mod logging;
pub mod store;
pub mod validation;

// Re-export top-level types for convenience
pub use store::{
    Goal, Meal, NewGoal, NewMeal, NewWeight, NewWorkout, RecordFilter, Store, StoreError,
    StoreResult, Weight, Workout,
};

pub use aggregate::{
    ActivityFeed, AggregateError, Aggregator, DashboardStats, GoalProgress, NutritionSummary,
    Streak, WeightTrend,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use clock::{Clock, FixedClock, SystemClock};

pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig};

pub use validation::{FieldError, Validate, ValidationErrors};
