use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Totals for one week of prayer marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekReport {
    pub prayed_count: u32,
    pub congregation_count: u32,
    pub total_slots: u32,
    pub percentage: u32,
}

impl WeekReport {
    pub fn remaining(&self) -> u32 {
        self.total_slots.saturating_sub(self.prayed_count)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScoreSummary {
    pub weekly_points: u32,
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub group: Option<String>,
    pub summary: UserScoreSummary,
    /// Monday of the week `summary.weekly_points` was computed for.
    pub week_start: Option<NaiveDate>,
}
