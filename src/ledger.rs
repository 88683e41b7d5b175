//! User actions that change scored state. Each one reads what it needs from
//! the store, calls the pure scoring rules, writes the change, and then
//! recomputes the user's cached score summary.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;

use crate::catalog::{self, TASK_POINTS};
use crate::db::repository::{MarkRepo, QuranRepo, TaskRepo, UserRepo};
use crate::models::{JuzLayout, PrayerMark, ResponsibilityTask, UserScoreSummary};
use crate::scoring::{self, Score};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskToggle {
    Completed { points: u32 },
    PhotoAdded,
    Undone,
}

pub struct Ledger<'c> {
    conn: &'c Connection,
    layout: JuzLayout,
}

impl<'c> Ledger<'c> {
    pub fn new(conn: &'c Connection, layout: JuzLayout) -> Self {
        Self { conn, layout }
    }

    /// Store `mark` and return the receipt for it, scored against the day as
    /// it was before the write. `None` for missed or unmarked.
    pub fn record_mark(&self, user_id: i64, mark: &PrayerMark, today: NaiveDate) -> Result<Option<Score>> {
        let before = MarkRepo::get_day(self.conn, user_id, mark.date)?;
        let score = scoring::score_mark(mark.kind, mark.status, &before);

        MarkRepo::upsert(self.conn, user_id, mark)
            .with_context(|| format!("Saving {} on {}", mark.kind, mark.date))?;
        log::debug!(
            "user {} marked {} on {} as {} (+{})",
            user_id,
            mark.kind.as_str(),
            mark.date,
            mark.status.as_str(),
            score.as_ref().map_or(0, |s| s.points)
        );

        self.refresh_summary(user_id, today)?;
        Ok(score)
    }

    /// Save the page reached in `juz` and return the points shown for it.
    pub fn save_reading(&self, user_id: i64, juz: u8, page: i64, today: NaiveDate) -> Result<u32> {
        let capacity = self.layout.capacity(juz)?;
        let points = scoring::score_reading(page, capacity)?;
        // score_reading has bounded page to 0..=capacity
        QuranRepo::save(self.conn, user_id, juz, page as u32)?;
        log::debug!("user {} reached page {} of juz {}", user_id, page, juz);

        self.refresh_summary(user_id, today)?;
        Ok(points)
    }

    /// Complete the task on `date`, or undo it when it is already complete.
    /// A photo given for a task that is already complete is attached instead.
    pub fn toggle_task(
        &self,
        user_id: i64,
        task_id: u32,
        date: NaiveDate,
        photo: Option<&Path>,
        today: NaiveDate,
    ) -> Result<TaskToggle> {
        let task = find_task(task_id)?;
        let completed = TaskRepo::is_completed(self.conn, user_id, task.id, date)?;
        let outcome = match (completed, photo) {
            (true, None) => {
                TaskRepo::remove(self.conn, user_id, task.id, date)?;
                TaskToggle::Undone
            }
            (true, Some(photo)) => {
                let photo = checked_photo(photo)?;
                TaskRepo::set_photo(self.conn, user_id, task.id, date, &photo)?;
                TaskToggle::PhotoAdded
            }
            (false, photo) => {
                let photo = photo.map(checked_photo).transpose()?;
                TaskRepo::complete(self.conn, user_id, task.id, date, photo.as_deref())?;
                TaskToggle::Completed { points: TASK_POINTS }
            }
        };
        log::debug!("user {} task {} on {}: {:?}", user_id, task.id, date, outcome);

        self.refresh_summary(user_id, today)?;
        Ok(outcome)
    }

    /// Attach a photo to a task already completed on `date`.
    pub fn attach_photo(&self, user_id: i64, task_id: u32, date: NaiveDate, photo: &Path) -> Result<()> {
        let task = find_task(task_id)?;
        let photo = checked_photo(photo)?;
        if !TaskRepo::set_photo(self.conn, user_id, task.id, date, &photo)? {
            return Err(anyhow!(
                "'{}' is not completed on {}; complete it before adding a photo",
                task.title,
                date
            ));
        }
        Ok(())
    }

    /// Recompute weekly and total points from stored state.
    pub fn compute_summary(&self, user_id: i64, today: NaiveDate) -> Result<UserScoreSummary> {
        let week = scoring::resolve_week(today, 0);
        let week_marks = MarkRepo::get_range(self.conn, user_id, week.start_date, week.end_date())?;
        let all_marks = MarkRepo::get_all(self.conn, user_id)?;
        let progress = QuranRepo::get_all(self.conn, user_id)?;
        let tasks_done = TaskRepo::count(self.conn, user_id)?;

        Ok(UserScoreSummary {
            weekly_points: scoring::prayer_points(&week_marks),
            total_points: scoring::prayer_points(&all_marks)
                + scoring::reading_points(&progress, &self.layout)
                + tasks_done * TASK_POINTS,
        })
    }

    /// Recompute the summary and write it back to the profile.
    pub fn refresh_summary(&self, user_id: i64, today: NaiveDate) -> Result<UserScoreSummary> {
        let summary = self.compute_summary(user_id, today)?;
        let week_start = scoring::resolve_week(today, 0).start_date;
        UserRepo::update_summary(self.conn, user_id, &summary, week_start)?;
        log::debug!(
            "user {} summary: week {} total {}",
            user_id,
            summary.weekly_points,
            summary.total_points
        );
        Ok(summary)
    }
}

fn find_task(task_id: u32) -> Result<&'static ResponsibilityTask> {
    catalog::tasks::find(task_id).ok_or_else(|| anyhow!("No task with id {}", task_id))
}

fn checked_photo(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(anyhow!("Photo {:?} does not exist", path));
    }
    Ok(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{PrayerKind, PrayerStatus};
    use crate::scoring::{ScoreLabel, ScoringError};

    fn setup() -> (Connection, i64) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = UserRepo::create(&conn, "Yusuf", None).unwrap();
        (conn, user.id)
    }

    // Sunday 18 October 2026; its week starts Monday the 12th.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn stored_summary(conn: &Connection) -> UserScoreSummary {
        UserRepo::find_by_name(conn, "Yusuf").unwrap().unwrap().summary
    }

    #[test]
    fn completing_a_day_awards_the_bonus_once() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        let d = day(14);

        for kind in &PrayerKind::ALL[..4] {
            ledger
                .record_mark(user, &PrayerMark::new(d, *kind, PrayerStatus::Prayed), today())
                .unwrap();
        }
        let fifth = ledger
            .record_mark(user, &PrayerMark::new(d, PrayerKind::Night, PrayerStatus::Prayed), today())
            .unwrap()
            .unwrap();
        assert_eq!(fifth.points, 30);
        assert_eq!(fifth.breakdown.last().map(|l| l.label), Some(ScoreLabel::FullDay));

        let again = ledger
            .record_mark(user, &PrayerMark::new(d, PrayerKind::Night, PrayerStatus::Prayed), today())
            .unwrap()
            .unwrap();
        assert_eq!(again.points, 10);

        let summary = stored_summary(&conn);
        assert_eq!(summary.weekly_points, 15 + 40 + 20);
        assert_eq!(summary.total_points, 15 + 40 + 20);
    }

    #[test]
    fn missed_mark_scores_nothing_and_is_stored() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        let mark = PrayerMark::new(day(13), PrayerKind::Dawn, PrayerStatus::Missed);
        assert_eq!(ledger.record_mark(user, &mark, today()).unwrap(), None);
        assert_eq!(MarkRepo::get_all(&conn, user).unwrap(), vec![mark]);
        assert_eq!(stored_summary(&conn), UserScoreSummary::default());
    }

    #[test]
    fn downgrading_a_mark_lowers_the_summary() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        let d = day(15);
        ledger
            .record_mark(user, &PrayerMark::new(d, PrayerKind::Sunset, PrayerStatus::Congregation), today())
            .unwrap();
        assert_eq!(stored_summary(&conn).weekly_points, 15);

        ledger
            .record_mark(user, &PrayerMark::new(d, PrayerKind::Sunset, PrayerStatus::Unmarked), today())
            .unwrap();
        assert_eq!(stored_summary(&conn).weekly_points, 0);
    }

    #[test]
    fn earlier_weeks_count_toward_total_only() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        ledger
            .record_mark(user, &PrayerMark::new(day(5), PrayerKind::Dawn, PrayerStatus::Prayed), today())
            .unwrap();
        let summary = stored_summary(&conn);
        assert_eq!(summary.weekly_points, 0);
        assert_eq!(summary.total_points, 15);
    }

    #[test]
    fn reading_points_follow_the_latest_page() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        assert_eq!(ledger.save_reading(user, 1, 12, today()).unwrap(), 60);
        assert_eq!(ledger.save_reading(user, 1, 4, today()).unwrap(), 20);
        assert_eq!(stored_summary(&conn).total_points, 20);

        assert_eq!(ledger.save_reading(user, 30, 24, today()).unwrap(), 120);
        assert_eq!(stored_summary(&conn).total_points, 140);
    }

    #[test]
    fn invalid_reading_is_rejected_without_writing() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        for (juz, page) in [(1, -1), (1, 21), (0, 3), (31, 3)] {
            let err = ledger.save_reading(user, juz, page, today()).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ScoringError>(),
                Some(ScoringError::InvalidInput(_))
            ));
        }
        assert!(QuranRepo::get_all(&conn, user).unwrap().is_empty());
    }

    #[test]
    fn tasks_toggle_and_take_photos() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        let d = day(16);

        assert_eq!(
            ledger.toggle_task(user, 2, d, None, today()).unwrap(),
            TaskToggle::Completed { points: 10 }
        );
        assert_eq!(stored_summary(&conn).total_points, 10);

        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("bed.jpg");
        std::fs::write(&photo, b"jpeg").unwrap();
        ledger.attach_photo(user, 2, d, &photo).unwrap();
        let done = TaskRepo::get_for_date(&conn, user, d).unwrap();
        assert_eq!(done[0].photo.as_deref(), Some(photo.to_string_lossy().as_ref()));

        assert_eq!(ledger.toggle_task(user, 2, d, None, today()).unwrap(), TaskToggle::Undone);
        assert_eq!(stored_summary(&conn).total_points, 0);
    }

    #[test]
    fn photo_on_a_completed_task_earns_nothing_more() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        let d = day(16);
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("dishes.jpg");
        std::fs::write(&photo, b"jpeg").unwrap();

        ledger.toggle_task(user, 3, d, None, today()).unwrap();
        assert_eq!(
            ledger.toggle_task(user, 3, d, Some(photo.as_path()), today()).unwrap(),
            TaskToggle::PhotoAdded
        );
        assert_eq!(stored_summary(&conn).total_points, 10);
        let done = TaskRepo::get_for_date(&conn, user, d).unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].photo.as_deref(), Some(photo.to_string_lossy().as_ref()));
    }

    #[test]
    fn photo_needs_a_completed_task_and_a_real_file() {
        let (conn, user) = setup();
        let ledger = Ledger::new(&conn, JuzLayout::default());
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("plate.jpg");
        std::fs::write(&photo, b"jpeg").unwrap();

        assert!(ledger.attach_photo(user, 8, day(16), &photo).is_err());
        assert!(ledger.toggle_task(user, 8, day(16), Some(dir.path().join("nope.jpg").as_path()), today()).is_err());
        assert!(ledger.toggle_task(user, 999, day(16), None, today()).is_err());
        assert_eq!(TaskRepo::count(&conn, user).unwrap(), 0);
    }
}
