pub mod prayer;
pub mod quran;
pub mod stats;
pub mod task;

pub use prayer::{DayStatuses, PrayerKind, PrayerMark, PrayerStatus};
pub use quran::{JUZ_COUNT, JuzLayout, ReadingProgress};
pub use stats::{Streak, UserProfile, UserScoreSummary, WeekReport};
pub use task::{ResponsibilityTask, TaskCategory, TaskCompletion};
