use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Seven consecutive dates, Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start_date: NaiveDate,
    pub dates: [NaiveDate; 7],
}

impl WeekWindow {
    pub fn end_date(&self) -> NaiveDate {
        self.dates[6]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Header label such as "2 - 8 March 2026". Month and year follow the Monday.
    pub fn range_label(&self) -> String {
        let first = self.start_date;
        format!(
            "{} - {} {} {}",
            first.day(),
            self.end_date().day(),
            MONTH_NAMES[first.month0() as usize],
            first.year()
        )
    }
}

/// Resolve the Monday-to-Sunday week `offset_weeks` away from the week holding
/// `reference`. Sunday closes the week regardless of locale. Offsets that
/// leave the representable calendar stop at its first or last full week.
pub fn resolve_week(reference: NaiveDate, offset_weeks: i64) -> WeekWindow {
    let to_monday = match reference.weekday() {
        Weekday::Sun => -6,
        other => 1 - other.number_from_monday() as i64,
    };
    let shift = offset_weeks.saturating_mul(7).saturating_add(to_monday);
    let start_date = Duration::try_days(shift)
        .and_then(|delta| reference.checked_add_signed(delta))
        .filter(|monday| monday.checked_add_signed(Duration::days(6)).is_some())
        .unwrap_or_else(|| if shift < 0 { first_monday() } else { last_monday() });
    let dates = std::array::from_fn(|i| start_date + Duration::days(i as i64));
    WeekWindow { start_date, dates }
}

fn first_monday() -> NaiveDate {
    let first = NaiveDate::MIN;
    let ahead = (7 - first.weekday().num_days_from_monday() as i64) % 7;
    first + Duration::days(ahead)
}

fn last_monday() -> NaiveDate {
    let last = NaiveDate::MAX;
    let past_sunday = (last.weekday().num_days_from_monday() as i64 + 1) % 7;
    last - Duration::days(past_sunday + 6)
}
