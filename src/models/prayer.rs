use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::scoring::ScoringError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerKind {
    Dawn,
    Midday,
    Afternoon,
    Sunset,
    Night,
}

impl PrayerKind {
    pub const ALL: [PrayerKind; 5] = [
        PrayerKind::Dawn,
        PrayerKind::Midday,
        PrayerKind::Afternoon,
        PrayerKind::Sunset,
        PrayerKind::Night,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerKind::Dawn => "dawn",
            PrayerKind::Midday => "midday",
            PrayerKind::Afternoon => "afternoon",
            PrayerKind::Sunset => "sunset",
            PrayerKind::Night => "night",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerKind::Dawn => "Fajr",
            PrayerKind::Midday => "Zuhr",
            PrayerKind::Afternoon => "Asr",
            PrayerKind::Sunset => "Maghrib",
            PrayerKind::Night => "Isha",
        }
    }

    /// Position in the day, 0 for dawn through 4 for night.
    pub fn index(&self) -> usize {
        match self {
            PrayerKind::Dawn => 0,
            PrayerKind::Midday => 1,
            PrayerKind::Afternoon => 2,
            PrayerKind::Sunset => 3,
            PrayerKind::Night => 4,
        }
    }
}

impl std::fmt::Display for PrayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerKind {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dawn" | "fajr" | "sabah" => Ok(PrayerKind::Dawn),
            "midday" | "zuhr" | "dhuhr" | "ogle" => Ok(PrayerKind::Midday),
            "afternoon" | "asr" | "ikindi" => Ok(PrayerKind::Afternoon),
            "sunset" | "maghrib" | "aksam" => Ok(PrayerKind::Sunset),
            "night" | "isha" | "yatsi" => Ok(PrayerKind::Night),
            _ => Err(ScoringError::InvalidInput(format!(
                "unknown prayer '{}'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerStatus {
    #[default]
    Unmarked,
    Prayed,
    Congregation,
    Missed,
}

impl PrayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerStatus::Unmarked => "unmarked",
            PrayerStatus::Prayed => "prayed",
            PrayerStatus::Congregation => "congregation",
            PrayerStatus::Missed => "missed",
        }
    }

    /// Prayed alone or in congregation.
    pub fn is_performed(&self) -> bool {
        matches!(self, PrayerStatus::Prayed | PrayerStatus::Congregation)
    }
}

impl FromStr for PrayerStatus {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unmarked" | "empty" | "none" => Ok(PrayerStatus::Unmarked),
            "prayed" | "done" => Ok(PrayerStatus::Prayed),
            "congregation" | "jamaah" | "cemaat" => Ok(PrayerStatus::Congregation),
            "missed" => Ok(PrayerStatus::Missed),
            _ => Err(ScoringError::InvalidInput(format!(
                "unknown prayer status '{}'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerMark {
    pub date: NaiveDate,
    pub kind: PrayerKind,
    pub status: PrayerStatus,
}

impl PrayerMark {
    pub fn new(date: NaiveDate, kind: PrayerKind, status: PrayerStatus) -> Self {
        Self { date, kind, status }
    }
}

/// Statuses of the five prayers of one day. Missing entries read as unmarked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatuses([PrayerStatus; 5]);

impl DayStatuses {
    pub fn get(&self, kind: PrayerKind) -> PrayerStatus {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: PrayerKind, status: PrayerStatus) {
        self.0[kind.index()] = status;
    }

    pub fn with(mut self, kind: PrayerKind, status: PrayerStatus) -> Self {
        self.set(kind, status);
        self
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(PrayerStatus::is_performed)
    }

    pub fn performed_count(&self) -> usize {
        self.0.iter().filter(|s| s.is_performed()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrayerKind, PrayerStatus)> + '_ {
        PrayerKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

impl FromIterator<(PrayerKind, PrayerStatus)> for DayStatuses {
    fn from_iter<I: IntoIterator<Item = (PrayerKind, PrayerStatus)>>(iter: I) -> Self {
        let mut day = DayStatuses::default();
        for (kind, status) in iter {
            day.set(kind, status);
        }
        day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_aliases() {
        assert_eq!("Fajr".parse::<PrayerKind>().unwrap(), PrayerKind::Dawn);
        assert_eq!("dhuhr".parse::<PrayerKind>().unwrap(), PrayerKind::Midday);
        assert_eq!("night".parse::<PrayerKind>().unwrap(), PrayerKind::Night);
        assert!("tahajjud".parse::<PrayerKind>().is_err());
    }

    #[test]
    fn parses_status() {
        assert_eq!(
            "congregation".parse::<PrayerStatus>().unwrap(),
            PrayerStatus::Congregation
        );
        assert!("late".parse::<PrayerStatus>().is_err());
    }

    #[test]
    fn absent_entries_read_as_unmarked() {
        let day: DayStatuses = [(PrayerKind::Dawn, PrayerStatus::Prayed)].into_iter().collect();
        assert_eq!(day.get(PrayerKind::Dawn), PrayerStatus::Prayed);
        assert_eq!(day.get(PrayerKind::Night), PrayerStatus::Unmarked);
        assert_eq!(day.performed_count(), 1);
        assert!(!day.is_complete());
    }

    #[test]
    fn complete_day_accepts_mixed_performed_statuses() {
        let day: DayStatuses = PrayerKind::ALL
            .iter()
            .map(|k| {
                let status = if *k == PrayerKind::Midday {
                    PrayerStatus::Congregation
                } else {
                    PrayerStatus::Prayed
                };
                (*k, status)
            })
            .collect();
        assert!(day.is_complete());
        assert!(!day.with(PrayerKind::Night, PrayerStatus::Missed).is_complete());
    }
}
