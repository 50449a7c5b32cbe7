//! Fitlog Aggregation Engine
//!
//! Derived views computed from the record store:
//!
//! - **stats**: Dashboard totals and the daily nutrition summary
//! - **streak**: Consecutive-day activity streak
//! - **activity**: Merged recent-activity feed
//! - **trend**: Weight trend over a trailing window
//! - **progress**: Progress toward the goal
//!
//! The computations themselves are pure functions over records. `Aggregator`
//! fetches the inputs from a `Store` handle and calls them. The reference
//! date is always passed in by the caller; nothing here reads the clock.
//!
//! # Example
//!
//! ```rust,no_run
//! use fitlog::aggregate::Aggregator;
//! use fitlog::store::Store;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::in_memory()?);
//!     let aggregator = Aggregator::new(store);
//!
//!     let today = chrono::Utc::now().date_naive();
//!     let streak = aggregator.streak(today)?;
//!     println!("{} day streak", streak.streak);
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod progress;
pub mod stats;
pub mod streak;
pub mod trend;

pub use activity::{
    merge_recent, ActivityFeed, ActivityItem, ActivityKind, DEFAULT_RECENT_LIMIT,
    MAX_RECENT_LIMIT,
};
pub use progress::GoalProgress;
pub use stats::{day_bounds, DashboardStats, NutritionSummary};
pub use streak::{activity_dates, compute_streak, Streak};
pub use trend::{trend_window, TrendPoint, WeightTrend, DEFAULT_TREND_DAYS, MAX_TREND_DAYS};

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

use crate::store::{Goal, Meal, RecordFilter, Store, StoreError, Weight, Workout};

/// Errors from aggregate computations
#[derive(Error, Debug)]
pub enum AggregateError {
    /// Goal progress was requested but no goal is set
    #[error("No goals set")]
    NoGoal,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AggregateResult<T> = Result<T, AggregateError>;

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Computes derived views from an explicit store handle
#[derive(Debug, Clone)]
pub struct Aggregator {
    store: Arc<Store>,
}

impl Aggregator {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Meal/workout totals for `date` plus the latest weight
    pub fn dashboard_stats(&self, date: NaiveDate) -> AggregateResult<DashboardStats> {
        let (start, end) = day_bounds(date);
        let workouts: Vec<Workout> = self.store.find(&RecordFilter::between(start, end))?;
        let meals: Vec<Meal> = self.store.find(&RecordFilter::between(start, end))?;
        let latest = self.store.latest::<Weight>()?;

        let stats = DashboardStats::compute(date, &workouts, &meals, latest.as_ref());
        tracing::debug!(
            %date,
            meals = stats.meal_count,
            workouts = stats.workout_count,
            "Computed dashboard stats"
        );
        Ok(stats)
    }

    /// Macro totals over the meals logged on `date`
    pub fn daily_nutrition(&self, date: NaiveDate) -> AggregateResult<NutritionSummary> {
        let (start, end) = day_bounds(date);
        let meals: Vec<Meal> = self.store.find(&RecordFilter::between(start, end))?;
        Ok(NutritionSummary::compute(date, &meals))
    }

    /// Consecutive activity days ending at `today`
    pub fn streak(&self, today: NaiveDate) -> AggregateResult<Streak> {
        let workout_dates = self.store.distinct_dates::<Workout>()?;
        let meal_dates = self.store.distinct_dates::<Meal>()?;
        let dates = activity_dates(workout_dates.into_iter().chain(meal_dates));

        let streak = compute_streak(&dates, today);
        tracing::debug!(%today, streak = streak.streak, "Computed streak");
        Ok(streak)
    }

    /// Up to `limit` (capped at `MAX_RECENT_LIMIT`) most recent entries across all kinds
    pub fn recent_activity(&self, limit: usize) -> AggregateResult<ActivityFeed> {
        let limit = limit.min(MAX_RECENT_LIMIT);
        let workouts: Vec<Workout> = self.store.find(&RecordFilter::new().limit(limit))?;
        let meals: Vec<Meal> = self.store.find(&RecordFilter::new().limit(limit))?;
        let weights: Vec<Weight> = self.store.find(&RecordFilter::new().limit(limit))?;

        Ok(merge_recent(&workouts, &meals, &weights, limit))
    }

    /// Weight series over `[today - days, today]`, oldest first
    pub fn weight_trend(&self, today: NaiveDate, days: u32) -> AggregateResult<WeightTrend> {
        let (start, end) = trend_window(today, days);
        let weights: Vec<Weight> = self
            .store
            .find(&RecordFilter::between(start, end).ascending())?;
        Ok(WeightTrend::compute(start, end, &weights))
    }

    /// Progress toward the goal; `NoGoal` if none is set
    pub fn goal_progress(&self) -> AggregateResult<GoalProgress> {
        let goal = self
            .store
            .first::<Goal>()?
            .ok_or(AggregateError::NoGoal)?;
        let latest = self.store.latest::<Weight>()?;
        Ok(GoalProgress::compute(goal, latest.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewGoal, NewMeal, NewWeight, NewWorkout};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(h, m, 0).unwrap())
    }

    fn setup() -> (Arc<Store>, Aggregator) {
        let store = Arc::new(Store::in_memory().unwrap());
        let aggregator = Aggregator::new(Arc::clone(&store));
        (store, aggregator)
    }

    fn add_meal(store: &Store, when: DateTime<Utc>, calories: i64, protein: i64) {
        let meal = Meal::from_new(
            NewMeal {
                kind: "lunch".into(),
                description: format!("{} cal meal", calories),
                calories,
                protein,
                carbs: Some(10),
                fat: None,
                notes: None,
                date: Some(when),
            },
            when,
        );
        store.insert(meal).unwrap();
    }

    fn add_workout(store: &Store, when: DateTime<Utc>, burned: i64) {
        let workout = Workout::from_new(
            NewWorkout {
                kind: "cardio".into(),
                name: "Run".into(),
                duration: 30,
                calories_burned: burned,
                notes: None,
                date: Some(when),
            },
            when,
        );
        store.insert(workout).unwrap();
    }

    fn add_weight(store: &Store, date: NaiveDate, lbs: f64) {
        let weight = Weight::from_new(
            NewWeight {
                weight: lbs,
                date: Some(date),
            },
            at(date, 7, 0),
        );
        store.insert(weight).unwrap();
    }

    #[test]
    fn test_dashboard_stats_for_day() {
        let (store, aggregator) = setup();
        add_meal(&store, at(today(), 8, 0), 300, 20);
        add_meal(&store, at(today(), 19, 30), 450, 35);
        add_meal(&store, at(today() - Duration::days(1), 23, 59), 999, 99);
        add_workout(&store, at(today(), 0, 0), 200);
        add_workout(&store, at(today() + Duration::days(1), 0, 0), 500);
        add_weight(&store, today() - Duration::days(3), 186.0);
        add_weight(&store, today() - Duration::days(1), 185.2);

        let stats = aggregator.dashboard_stats(today()).unwrap();
        assert_eq!(stats.calories_consumed, 750);
        assert_eq!(stats.protein_consumed, 55);
        assert_eq!(stats.workout_count, 1);
        assert_eq!(stats.calories_burned, 200);
        assert_eq!(stats.current_weight, Some(185.2));
        assert_eq!(stats.meal_count, 2);
    }

    #[test]
    fn test_daily_nutrition() {
        let (store, aggregator) = setup();
        add_meal(&store, at(today(), 8, 0), 300, 20);
        add_meal(&store, at(today(), 23, 59), 450, 35);

        let summary = aggregator.daily_nutrition(today()).unwrap();
        assert_eq!(summary.total_calories, 750);
        assert_eq!(summary.total_carbs, 20);
        assert_eq!(summary.total_fat, 0);
        assert_eq!(summary.meal_count, 2);

        let empty = aggregator.daily_nutrition(today() - Duration::days(5)).unwrap();
        assert_eq!(empty.meal_count, 0);
    }

    #[test]
    fn test_streak_from_store() {
        let (store, aggregator) = setup();
        assert_eq!(aggregator.streak(today()).unwrap().streak, 0);

        add_workout(&store, at(today(), 7, 0), 100);
        add_meal(&store, at(today(), 12, 0), 400, 30);
        add_meal(&store, at(today() - Duration::days(1), 12, 0), 400, 30);
        add_workout(&store, at(today() - Duration::days(2), 18, 0), 100);

        let streak = aggregator.streak(today()).unwrap();
        assert_eq!(streak.streak, 3);
        assert_eq!(streak.last_activity_date, Some(today()));
    }

    #[test]
    fn test_streak_ignores_weights() {
        let (store, aggregator) = setup();
        add_weight(&store, today(), 180.0);
        add_meal(&store, at(today() - Duration::days(2), 12, 0), 400, 30);

        let streak = aggregator.streak(today()).unwrap();
        assert_eq!(streak.streak, 0);
        assert_eq!(streak.last_activity_date, Some(today() - Duration::days(2)));
    }

    #[test]
    fn test_recent_activity_limit_and_order() {
        let (store, aggregator) = setup();
        for i in 0..4 {
            let day = today() - Duration::days(i);
            add_workout(&store, at(day, 8, 0), 100);
            add_meal(&store, at(day, 12, 0), 500, 30);
            add_weight(&store, day, 180.0 + i as f64);
        }

        let feed = aggregator.recent_activity(5).unwrap();
        assert_eq!(feed.count, 5);
        assert!(feed
            .activities
            .windows(2)
            .all(|w| w[0].date >= w[1].date));
        assert_eq!(feed.activities[0].kind, ActivityKind::Meal);

        let capped = aggregator.recent_activity(500).unwrap();
        assert_eq!(capped.count, 12);
    }

    #[test]
    fn test_weight_trend_window() {
        let (store, aggregator) = setup();
        add_weight(&store, today() - Duration::days(10), 190.0);
        add_weight(&store, today() - Duration::days(7), 186.4);
        add_weight(&store, today() - Duration::days(3), 185.0);
        add_weight(&store, today(), 184.1);
        add_weight(&store, today() + Duration::days(1), 150.0);

        let trend = aggregator.weight_trend(today(), 7).unwrap();
        assert_eq!(trend.start_date, today() - Duration::days(7));
        assert_eq!(trend.end_date, today());
        assert_eq!(trend.data_points, 3);
        assert_eq!(trend.start_weight, Some(186.4));
        assert_eq!(trend.current_weight, Some(184.1));
        assert_eq!(trend.change, Some(-2.3));
        assert!(trend.trend.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_goal_progress() {
        let (store, aggregator) = setup();
        assert!(matches!(
            aggregator.goal_progress(),
            Err(AggregateError::NoGoal)
        ));

        store
            .upsert_goal(
                NewGoal {
                    start_weight: 200.0,
                    target_weight: 170.0,
                    target_date: None,
                    daily_calorie_goal: None,
                    weekly_workouts: None,
                    active_days_per_week: None,
                },
                at(today(), 8, 0),
            )
            .unwrap();
        add_weight(&store, today() - Duration::days(1), 190.0);
        add_weight(&store, today(), 185.0);

        let progress = aggregator.goal_progress().unwrap();
        assert_eq!(progress.current_weight, 185.0);
        assert_eq!(progress.total_to_lose, 30.0);
        assert_eq!(progress.lost_so_far, 15.0);
        assert_eq!(progress.remaining, 15.0);
        assert_eq!(progress.percent_complete, 50.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.005_1, 2), 1.01);
        assert_eq!(round_to(-2.349, 1), -2.3);
        assert_eq!(round_to(50.0, 1), 50.0);
    }
}
