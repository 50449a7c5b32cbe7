//! Recent activity feed
//!
//! Each source (workouts, meals, weights) is fetched pre-limited to `limit`,
//! mapped to a uniform `ActivityItem`, merged newest first and truncated.
//! Because the sources are limited before merging, a source that dominates
//! recency can crowd the others out; the feed is an approximation of a global
//! top-`limit`, not an exact one.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::store::{Meal, Weight, Workout};

/// Default number of feed entries
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Hard cap on feed entries
pub const MAX_RECENT_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Workout,
    Meal,
    Weight,
}

impl ActivityKind {
    pub fn icon(self) -> &'static str {
        match self {
            ActivityKind::Workout => "🏃",
            ActivityKind::Meal => "🍽️",
            ActivityKind::Weight => "⚖️",
        }
    }
}

/// One entry in the feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub id: String,
    pub title: String,
    pub details: String,
    pub date: DateTime<Utc>,
    pub icon: &'static str,
}

impl From<&Workout> for ActivityItem {
    fn from(workout: &Workout) -> Self {
        Self {
            kind: ActivityKind::Workout,
            id: workout.id.clone(),
            title: workout.name.clone(),
            details: format!(
                "{} min • {} cal burned",
                workout.duration, workout.calories_burned
            ),
            date: workout.date,
            icon: ActivityKind::Workout.icon(),
        }
    }
}

impl From<&Meal> for ActivityItem {
    fn from(meal: &Meal) -> Self {
        Self {
            kind: ActivityKind::Meal,
            id: meal.id.clone(),
            title: meal.description.clone(),
            details: format!("{} cal • {}g protein", meal.calories, meal.protein),
            date: meal.date,
            icon: ActivityKind::Meal.icon(),
        }
    }
}

impl From<&Weight> for ActivityItem {
    fn from(weight: &Weight) -> Self {
        Self {
            kind: ActivityKind::Weight,
            id: weight.id.clone(),
            title: "Weight Check".to_string(),
            // {:?} keeps the decimal point on whole numbers ("185.0 lbs")
            details: format!("{:?} lbs", weight.weight),
            date: weight.date.and_time(NaiveTime::MIN).and_utc(),
            icon: ActivityKind::Weight.icon(),
        }
    }
}

/// Feed response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityFeed {
    pub activities: Vec<ActivityItem>,
    pub count: usize,
}

/// Merge the pre-limited source lists into one feed of at most `limit` items
///
/// Sorting is stable, so equal timestamps keep source order
/// (workouts, then meals, then weights).
pub fn merge_recent(
    workouts: &[Workout],
    meals: &[Meal],
    weights: &[Weight],
    limit: usize,
) -> ActivityFeed {
    let mut activities: Vec<ActivityItem> = workouts
        .iter()
        .map(ActivityItem::from)
        .chain(meals.iter().map(ActivityItem::from))
        .chain(weights.iter().map(ActivityItem::from))
        .collect();

    activities.sort_by(|a, b| b.date.cmp(&a.date));
    activities.truncate(limit);

    ActivityFeed {
        count: activities.len(),
        activities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewMeal, NewWeight, NewWorkout};
    use chrono::{NaiveDate, TimeZone};

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, d, h, 0, 0).unwrap()
    }

    fn workout(d: u32, h: u32) -> Workout {
        Workout::from_new(
            NewWorkout {
                kind: "cardio".into(),
                name: "Morning Run".into(),
                duration: 30,
                calories_burned: 245,
                notes: None,
                date: Some(at(d, h)),
            },
            at(d, h),
        )
    }

    fn meal(d: u32, h: u32) -> Meal {
        Meal::from_new(
            NewMeal {
                kind: "lunch".into(),
                description: "Grilled chicken salad".into(),
                calories: 450,
                protein: 35,
                carbs: None,
                fat: None,
                notes: None,
                date: Some(at(d, h)),
            },
            at(d, h),
        )
    }

    fn weight(d: u32, lbs: f64) -> Weight {
        Weight::from_new(
            NewWeight {
                weight: lbs,
                date: NaiveDate::from_ymd_opt(2026, 2, d),
            },
            at(d, 7),
        )
    }

    #[test]
    fn test_item_formatting() {
        let item = ActivityItem::from(&workout(9, 8));
        assert_eq!(item.title, "Morning Run");
        assert_eq!(item.details, "30 min • 245 cal burned");
        assert_eq!(item.icon, "🏃");

        let item = ActivityItem::from(&meal(9, 12));
        assert_eq!(item.title, "Grilled chicken salad");
        assert_eq!(item.details, "450 cal • 35g protein");

        let item = ActivityItem::from(&weight(9, 185.0));
        assert_eq!(item.title, "Weight Check");
        assert_eq!(item.details, "185.0 lbs");
        assert_eq!(item.date, at(9, 0));

        let item = ActivityItem::from(&weight(9, 167.5));
        assert_eq!(item.details, "167.5 lbs");
    }

    #[test]
    fn test_merge_sorts_newest_first_and_truncates() {
        let workouts = vec![workout(9, 8), workout(7, 8)];
        let meals = vec![meal(9, 12), meal(8, 12)];
        let weights = vec![weight(9, 180.0), weight(6, 181.0)];

        let feed = merge_recent(&workouts, &meals, &weights, 5);
        assert_eq!(feed.count, 5);
        assert_eq!(feed.activities.len(), 5);

        let dates: Vec<_> = feed.activities.iter().map(|a| a.date).collect();
        assert_eq!(dates, vec![at(9, 12), at(9, 8), at(9, 0), at(8, 12), at(7, 8)]);
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_merge_ties_keep_source_order() {
        let workouts = vec![workout(9, 0)];
        let meals = vec![meal(9, 0)];
        let weights = vec![weight(9, 180.0)];

        let feed = merge_recent(&workouts, &meals, &weights, 10);
        let kinds: Vec<_> = feed.activities.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Workout, ActivityKind::Meal, ActivityKind::Weight]
        );
    }

    #[test]
    fn test_merge_empty_sources() {
        let feed = merge_recent(&[], &[], &[], 10);
        assert_eq!(feed.count, 0);
        assert!(feed.activities.is_empty());
    }

    #[test]
    fn test_item_serializes_type_tag() {
        let json = serde_json::to_value(ActivityItem::from(&meal(9, 12))).unwrap();
        assert_eq!(json["type"], "meal");
        assert_eq!(json["icon"], "🍽️");
    }
}
