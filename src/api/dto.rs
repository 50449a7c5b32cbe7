//! Data Transfer Objects
//!
//! Query-string and response types that have no counterpart in the store.
//! Record bodies deserialize straight into the store's create and patch types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    day_bounds, DEFAULT_RECENT_LIMIT, DEFAULT_TREND_DAYS, MAX_RECENT_LIMIT, MAX_TREND_DAYS,
};
use crate::store::RecordFilter;
use crate::validation::{check_range, ValidationErrors};

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 500;

// ============================================
// QUERY PARAMETERS
// ============================================

/// Filters for listing workouts, meals and weights
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Category filter; ignored for weights
    #[serde(default, rename = "type", alias = "workout_type", alias = "meal_type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ListParams {
    /// Validated limit, defaulting to `DEFAULT_LIST_LIMIT`
    pub fn limit(&self) -> Result<usize, ValidationErrors> {
        let limit = self.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        check_range("limit", limit, 1, MAX_LIST_LIMIT)?;
        Ok(limit as usize)
    }

    /// Filter over whole UTC days for datetime-keyed records
    pub fn instant_filter(&self) -> Result<RecordFilter<DateTime<Utc>>, ValidationErrors> {
        let mut filter: RecordFilter<DateTime<Utc>> = RecordFilter::new().limit(self.limit()?);
        if let Some(start) = self.start_date {
            filter = filter.since(day_bounds(start).0);
        }
        if let Some(end) = self.end_date {
            filter = filter.until(day_bounds(end).1);
        }
        if let Some(kind) = &self.kind {
            filter = filter.category(kind.clone());
        }
        Ok(filter)
    }

    /// Filter for date-keyed records (weights)
    pub fn date_filter(&self) -> Result<RecordFilter<NaiveDate>, ValidationErrors> {
        let mut filter: RecordFilter<NaiveDate> = RecordFilter::new().limit(self.limit()?);
        if let Some(start) = self.start_date {
            filter = filter.since(start);
        }
        if let Some(end) = self.end_date {
            filter = filter.until(end);
        }
        Ok(filter)
    }
}

/// `?target_date=` for per-day views; defaults to today
#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

/// `?days=` for the weight trend
#[derive(Debug, Default, Deserialize)]
pub struct TrendParams {
    #[serde(default)]
    pub days: Option<i64>,
}

impl TrendParams {
    pub fn days(&self) -> Result<u32, ValidationErrors> {
        let days = self.days.unwrap_or(i64::from(DEFAULT_TREND_DAYS));
        check_range("days", days, 1, i64::from(MAX_TREND_DAYS))?;
        Ok(days as u32)
    }
}

/// `?limit=` for the recent-activity feed
#[derive(Debug, Default, Deserialize)]
pub struct RecentParams {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl RecentParams {
    pub fn limit(&self) -> Result<usize, ValidationErrors> {
        let limit = self.limit.unwrap_or(DEFAULT_RECENT_LIMIT as i64);
        check_range("limit", limit, 1, MAX_RECENT_LIMIT as i64)?;
        Ok(limit as usize)
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Root health check
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub service: String,
}

/// Versioned health check under the API prefix
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionHealth {
    pub status: String,
    pub version: String,
}

/// Readiness probe detail
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub store: String,
    pub uptime_seconds: u64,
}
