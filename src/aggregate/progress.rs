//! Progress toward the weight goal

use serde::Serialize;

use crate::aggregate::round_to;
use crate::store::{Goal, Weight};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub current_weight: f64,
    pub start_weight: f64,
    pub target_weight: f64,
    pub total_to_lose: f64,
    pub lost_so_far: f64,
    pub remaining: f64,
    pub percent_complete: f64,
}

impl GoalProgress {
    /// Current weight is the latest entry, or the goal's start weight if none exist.
    ///
    /// With nothing to lose (start == target) progress is 100% unless weight
    /// went up, in which case it is 0%.
    pub fn compute(goal: Goal, latest: Option<&Weight>) -> Self {
        let current_weight = latest.map(|w| w.weight).unwrap_or(goal.start_weight);

        let total_to_lose = goal.start_weight - goal.target_weight;
        let lost_so_far = goal.start_weight - current_weight;
        let remaining = current_weight - goal.target_weight;

        let percent_complete = if total_to_lose != 0.0 {
            lost_so_far / total_to_lose * 100.0
        } else if lost_so_far >= 0.0 {
            100.0
        } else {
            0.0
        };

        Self {
            current_weight,
            start_weight: goal.start_weight,
            target_weight: goal.target_weight,
            total_to_lose: round_to(total_to_lose, 2),
            lost_so_far: round_to(lost_so_far, 2),
            remaining: round_to(remaining, 2),
            percent_complete: round_to(percent_complete, 1),
            goal,
        }
    }
}
