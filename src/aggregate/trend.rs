//! Weight trend over a trailing window of days

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::aggregate::round_to;
use crate::store::Weight;

pub const DEFAULT_TREND_DAYS: u32 = 7;
pub const MAX_TREND_DAYS: u32 = 365;

/// Inclusive window `[today - days, today]`
pub fn trend_window(today: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(i64::from(days)), today)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub weight: f64,
}

/// Ordered weight series with first/last values and their difference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightTrend {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    /// `current_weight - start_weight`, 2 decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    pub trend: Vec<TrendPoint>,
}

impl WeightTrend {
    /// Build from entries already sorted ascending by date
    pub fn compute(start_date: NaiveDate, end_date: NaiveDate, weights: &[Weight]) -> Self {
        let trend: Vec<TrendPoint> = weights
            .iter()
            .map(|w| TrendPoint {
                date: w.date,
                weight: w.weight,
            })
            .collect();

        let start_weight = weights.first().map(|w| w.weight);
        let current_weight = weights.last().map(|w| w.weight);
        let change = start_weight
            .zip(current_weight)
            .map(|(start, current)| round_to(current - start, 2));

        Self {
            start_date,
            end_date,
            data_points: trend.len(),
            start_weight,
            current_weight,
            change,
            trend,
        }
    }
}
