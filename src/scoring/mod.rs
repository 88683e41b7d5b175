//! Pure scoring and calendar rules. Nothing in here reads the clock or
//! touches storage; callers pass dates and stored state in.

pub mod error;
pub mod leaderboard;
pub mod prayer;
pub mod reading;
pub mod report;
pub mod streak;
pub mod week;

pub use error::ScoringError;
pub use leaderboard::{Standing, rank};
pub use prayer::{Score, ScoreLabel, ScoreLine, day_points, score_mark};
pub use reading::{reading_points, score_reading};
pub use report::{aggregate_week, prayer_points, week_grid};
pub use streak::calculate_streak;
pub use week::{WeekWindow, resolve_week};
