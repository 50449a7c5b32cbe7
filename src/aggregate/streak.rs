//! Activity streak
//!
//! A streak counts consecutive calendar days with at least one workout or
//! meal, walking backward from today.
//!
//! When today has no activity but yesterday does, the walk still starts at
//! today and stops immediately: the streak is 0 while `last_activity_date`
//! reports yesterday. This boundary behavior is kept as-is.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Current streak and the day it is anchored to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub streak: u32,
    pub last_activity_date: Option<NaiveDate>,
}

/// Truncate activity instants to their calendar dates (UTC)
pub fn activity_dates<I>(instants: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    instants.into_iter().map(|dt| dt.date_naive()).collect()
}

/// Compute the streak over a set of activity dates relative to `today`
pub fn compute_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> Streak {
    let Some(&most_recent) = dates.last() else {
        return Streak {
            streak: 0,
            last_activity_date: None,
        };
    };

    let yesterday = today - Duration::days(1);
    if !dates.contains(&today) && !dates.contains(&yesterday) {
        return Streak {
            streak: 0,
            last_activity_date: Some(most_recent),
        };
    }

    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }

    let last_activity_date = if dates.contains(&today) {
        today
    } else {
        yesterday
    };

    Streak {
        streak,
        last_activity_date: Some(last_activity_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    fn set(days: &[i64]) -> BTreeSet<NaiveDate> {
        days.iter().map(|&n| days_ago(n)).collect()
    }

    #[test]
    fn test_no_activity() {
        let streak = compute_streak(&BTreeSet::new(), today());
        assert_eq!(streak.streak, 0);
        assert_eq!(streak.last_activity_date, None);
    }

    #[test]
    fn test_three_consecutive_days() {
        let streak = compute_streak(&set(&[0, 1, 2]), today());
        assert_eq!(streak.streak, 3);
        assert_eq!(streak.last_activity_date, Some(today()));
    }

    #[test]
    fn test_gap_stops_the_walk() {
        let streak = compute_streak(&set(&[0, 1, 3, 4]), today());
        assert_eq!(streak.streak, 2);
    }

    #[test]
    fn test_stale_activity_only() {
        let streak = compute_streak(&set(&[2]), today());
        assert_eq!(streak.streak, 0);
        assert_eq!(streak.last_activity_date, Some(days_ago(2)));
    }

    #[test]
    fn test_yesterday_without_today_reports_zero() {
        let streak = compute_streak(&set(&[1, 2, 3]), today());
        assert_eq!(streak.streak, 0);
        assert_eq!(streak.last_activity_date, Some(days_ago(1)));
    }

    #[test]
    fn test_future_dates_do_not_count() {
        let mut dates = set(&[0]);
        dates.insert(today() + Duration::days(1));
        let streak = compute_streak(&dates, today());
        assert_eq!(streak.streak, 1);
        assert_eq!(streak.last_activity_date, Some(today()));
    }

    #[test]
    fn test_activity_dates_truncate_time_of_day() {
        let instants = vec![
            Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 1).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 17, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 16, 6, 30, 0).unwrap(),
        ];
        let dates = activity_dates(instants);
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&today()));
        assert!(dates.contains(&days_ago(1)));
    }
}
