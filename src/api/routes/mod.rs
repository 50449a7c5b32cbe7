//! API Routes
//!
//! Route handlers organized by record kind.

pub mod dashboard;
pub mod goals;
pub mod health;
pub mod meals;
pub mod weight;
pub mod workouts;
