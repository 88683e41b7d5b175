use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{DayStatuses, PrayerKind, PrayerMark, PrayerStatus, WeekReport};
use crate::scoring::prayer::day_points;
use crate::scoring::week::WeekWindow;

pub const SLOTS_PER_WEEK: u32 = 7 * PrayerKind::ALL.len() as u32;

/// Totals for the marks of one week. Unmarked slots still count toward the
/// 35-slot denominator; a slot marked twice counts once.
pub fn aggregate_week(marks: &[PrayerMark]) -> WeekReport {
    let days = group_by_day(marks);
    let statuses = || days.values().flat_map(|day| day.iter().map(|(_, status)| status));
    let prayed_count = statuses().filter(PrayerStatus::is_performed).count() as u32;
    let congregation_count = statuses()
        .filter(|s| *s == PrayerStatus::Congregation)
        .count() as u32;

    WeekReport {
        prayed_count,
        congregation_count,
        total_slots: SLOTS_PER_WEEK,
        percentage: round_percentage(prayed_count, SLOTS_PER_WEEK),
    }
}

/// `part / whole * 100`, rounded half up.
fn round_percentage(part: u32, whole: u32) -> u32 {
    (part * 200 + whole) / (2 * whole)
}

/// Group marks by date, later marks for the same slot replacing earlier ones.
pub fn group_by_day(marks: &[PrayerMark]) -> BTreeMap<NaiveDate, DayStatuses> {
    let mut days: BTreeMap<NaiveDate, DayStatuses> = BTreeMap::new();
    for mark in marks {
        days.entry(mark.date).or_default().set(mark.kind, mark.status);
    }
    days
}

/// Statuses for each day of `week`, in order.
pub fn week_grid(week: &WeekWindow, marks: &[PrayerMark]) -> Vec<(NaiveDate, DayStatuses)> {
    let days = group_by_day(marks);
    week.days()
        .map(|d| (d, days.get(&d).copied().unwrap_or_default()))
        .collect()
}

/// Prayer points earned by `marks`, one full-day bonus per complete day.
pub fn prayer_points(marks: &[PrayerMark]) -> u32 {
    group_by_day(marks).values().map(day_points).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::week::resolve_week;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
    }

    fn full_week(status: PrayerStatus) -> Vec<PrayerMark> {
        resolve_week(monday(), 0)
            .days()
            .flat_map(|d| PrayerKind::ALL.map(|k| PrayerMark::new(d, k, status)))
            .collect()
    }

    #[test]
    fn empty_week() {
        let report = aggregate_week(&[]);
        assert_eq!(
            report,
            WeekReport {
                prayed_count: 0,
                congregation_count: 0,
                total_slots: 35,
                percentage: 0,
            }
        );
        assert_eq!(report.remaining(), 35);
    }

    #[test]
    fn full_congregation_week() {
        let report = aggregate_week(&full_week(PrayerStatus::Congregation));
        assert_eq!(
            report,
            WeekReport {
                prayed_count: 35,
                congregation_count: 35,
                total_slots: 35,
                percentage: 100,
            }
        );
    }

    #[test]
    fn missed_and_unmarked_are_not_prayed() {
        let d = monday();
        let marks = vec![
            PrayerMark::new(d, PrayerKind::Dawn, PrayerStatus::Prayed),
            PrayerMark::new(d, PrayerKind::Midday, PrayerStatus::Congregation),
            PrayerMark::new(d, PrayerKind::Afternoon, PrayerStatus::Missed),
            PrayerMark::new(d, PrayerKind::Sunset, PrayerStatus::Unmarked),
        ];
        let report = aggregate_week(&marks);
        assert_eq!(report.prayed_count, 2);
        assert_eq!(report.congregation_count, 1);
        // 2/35 = 5.71%
        assert_eq!(report.percentage, 6);
    }

    #[test]
    fn repeated_slots_count_once() {
        let mut marks = full_week(PrayerStatus::Prayed);
        marks.extend(full_week(PrayerStatus::Congregation));
        let report = aggregate_week(&marks);
        assert_eq!(report.prayed_count, 35);
        assert_eq!(report.congregation_count, 35);
        assert_eq!(report.percentage, 100);
        assert_eq!(report.remaining(), 0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 7/35 = 20%, 12/35 = 34.29%, 21/35 = 60%
        assert_eq!(round_percentage(7, 35), 20);
        assert_eq!(round_percentage(12, 35), 34);
        assert_eq!(round_percentage(1, 8), 13);
        assert_eq!(round_percentage(1, 200), 1);
        assert_eq!(round_percentage(35, 35), 100);
    }

    #[test]
    fn grid_fills_missing_days_with_unmarked() {
        let week = resolve_week(monday(), 0);
        let marks = vec![PrayerMark::new(
            week.dates[2],
            PrayerKind::Night,
            PrayerStatus::Prayed,
        )];
        let grid = week_grid(&week, &marks);
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0].1, DayStatuses::default());
        assert_eq!(grid[2].1.get(PrayerKind::Night), PrayerStatus::Prayed);
    }

    #[test]
    fn prayer_points_add_one_bonus_per_complete_day() {
        let marks = full_week(PrayerStatus::Prayed);
        assert_eq!(prayer_points(&marks), 7 * (15 + 40 + 20));
    }
}
