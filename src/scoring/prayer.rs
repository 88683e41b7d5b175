use serde::Serialize;

use crate::models::{DayStatuses, PrayerKind, PrayerStatus};

pub const DAWN_POINTS: u32 = 15;
pub const PRAYER_POINTS: u32 = 10;
pub const CONGREGATION_BONUS: u32 = 5;
pub const FULL_DAY_BONUS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Base,
    Congregation,
    FullDay,
}

impl ScoreLabel {
    pub fn display_name(&self) -> &'static str {
        match self {
            ScoreLabel::Base => "Prayer",
            ScoreLabel::Congregation => "Congregation bonus",
            ScoreLabel::FullDay => "All five prayed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreLine {
    pub label: ScoreLabel,
    pub points: u32,
}

/// Points for one marking action with a receipt in base, congregation,
/// full-day order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub points: u32,
    pub breakdown: Vec<ScoreLine>,
}

impl Score {
    fn push(&mut self, label: ScoreLabel, points: u32) {
        self.points += points;
        self.breakdown.push(ScoreLine { label, points });
    }
}

pub fn base_points(kind: PrayerKind) -> u32 {
    match kind {
        PrayerKind::Dawn => DAWN_POINTS,
        _ => PRAYER_POINTS,
    }
}

/// Points a single stored status is worth, bonuses for the whole day excluded.
pub fn status_points(kind: PrayerKind, status: PrayerStatus) -> u32 {
    match status {
        PrayerStatus::Prayed => base_points(kind),
        PrayerStatus::Congregation => base_points(kind) + CONGREGATION_BONUS,
        PrayerStatus::Unmarked | PrayerStatus::Missed => 0,
    }
}

/// Score the action of setting `kind` to `new_status` on a day whose statuses
/// before the change are `day`.
///
/// Returns `None` when nothing was performed. The full-day bonus is awarded
/// only when the change moves the day from incomplete to complete, so
/// re-saving a prayer on a day that already had all five earns no bonus.
pub fn score_mark(kind: PrayerKind, new_status: PrayerStatus, day: &DayStatuses) -> Option<Score> {
    if !new_status.is_performed() {
        return None;
    }

    let mut score = Score {
        points: 0,
        breakdown: Vec::with_capacity(3),
    };
    score.push(ScoreLabel::Base, base_points(kind));
    if new_status == PrayerStatus::Congregation {
        score.push(ScoreLabel::Congregation, CONGREGATION_BONUS);
    }

    let after = day.with(kind, new_status);
    if after.is_complete() && !day.is_complete() {
        score.push(ScoreLabel::FullDay, FULL_DAY_BONUS);
    }
    Some(score)
}

/// Everything a day's stored statuses are worth, the full-day bonus counted once.
pub fn day_points(day: &DayStatuses) -> u32 {
    let prayers: u32 = day.iter().map(|(k, s)| status_points(k, s)).sum();
    if day.is_complete() {
        prayers + FULL_DAY_BONUS
    } else {
        prayers
    }
}
