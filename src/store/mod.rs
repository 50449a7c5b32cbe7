//! Fitlog Record Store
//!
//! Persistence for the four record kinds:
//!
//! - **types**: Workout, Meal, Weight, Goal plus their create/patch shapes
//! - **record**: Row mapping traits (`Record`, `Dated`, `DateKey`)
//! - **query**: Date-range / category / sort / limit filters
//! - **engine**: The SQLite-backed `Store` handle
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use fitlog::store::{NewWeight, RecordFilter, Store, Weight};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::open(std::path::Path::new("./data"))?;
//!
//!     let entry = Weight::from_new(
//!         NewWeight { weight: 182.4, date: None },
//!         chrono::Utc::now(),
//!     );
//!     store.insert(entry)?;
//!
//!     let recent: Vec<Weight> = store.find(&RecordFilter::new().limit(7))?;
//!     println!("{} weight entries", recent.len());
//!
//!     store.close()?;
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod query;
pub mod record;
pub mod types;

pub use engine::{Store, DATABASE_FILE};
pub use error::{StoreError, StoreResult};
pub use query::{RecordFilter, SortOrder};
pub use record::{DateKey, Dated, Record};
pub use types::{
    Goal, GoalPatch, Meal, MealPatch, NewGoal, NewMeal, NewWeight, NewWorkout, Weight,
    WeightPatch, Workout, WorkoutPatch,
};
