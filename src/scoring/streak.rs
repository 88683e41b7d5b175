use chrono::NaiveDate;

use crate::models::Streak;

/// Streak of fully prayed days. `complete_days` may be in any order. The
/// current run ends today, or yesterday while today is still open.
pub fn calculate_streak(complete_days: &[NaiveDate], today: NaiveDate) -> Streak {
    let mut sorted: Vec<NaiveDate> = complete_days.iter().copied().filter(|d| *d <= today).collect();
    sorted.sort();
    sorted.dedup();

    let mut current = 0u32;
    let mut check_date = if sorted.last() == Some(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };
    for d in sorted.iter().rev() {
        match check_date {
            Some(expected) if *d == expected => {
                current += 1;
                check_date = expected.pred_opt();
            }
            _ => break,
        }
    }

    Streak {
        current,
        best: best_streak(&sorted).max(current),
    }
}

fn best_streak(sorted: &[NaiveDate]) -> u32 {
    if sorted.is_empty() {
        return 0;
    }

    let mut best = 1u32;
    let mut current = 1u32;
    for pair in sorted.windows(2) {
        if pair[0].succ_opt() == Some(pair[1]) {
            current += 1;
        } else {
            current = 1;
        }
        best = best.max(current);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[test]
    fn no_days() {
        let s = calculate_streak(&[], d(18));
        assert_eq!((s.current, s.best), (0, 0));
    }

    #[test]
    fn run_ending_today() {
        let s = calculate_streak(&[d(16), d(18), d(17), d(10)], d(18));
        assert_eq!((s.current, s.best), (3, 3));
    }

    #[test]
    fn open_today_keeps_yesterdays_run() {
        let s = calculate_streak(&[d(15), d(16), d(17)], d(18));
        assert_eq!(s.current, 3);
    }

    #[test]
    fn gap_breaks_current_but_not_best() {
        let s = calculate_streak(&[d(1), d(2), d(3), d(4), d(16)], d(18));
        assert_eq!((s.current, s.best), (0, 4));
    }

    #[test]
    fn future_days_are_ignored() {
        let s = calculate_streak(&[d(18), d(19), d(20)], d(18));
        assert_eq!((s.current, s.best), (1, 1));
    }
}
