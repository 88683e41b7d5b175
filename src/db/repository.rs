use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::str::FromStr;

use crate::models::{
    DayStatuses, PrayerKind, PrayerMark, PrayerStatus, ReadingProgress, TaskCompletion,
    UserProfile, UserScoreSummary,
};

const DATE_FMT: &str = "%Y-%m-%d";

pub fn fmt_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|e| anyhow!("Bad date '{}': {}", s, e))
}

fn invalid_column(e: impl std::fmt::Display) -> rusqlite::Error {
    rusqlite::Error::InvalidParameterName(e.to_string())
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub struct UserRepo;

impl UserRepo {
    const COLUMNS: &'static str =
        "id, name, group_name, weekly_points, total_points, week_start";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
        let week_start: Option<String> = row.get(5)?;
        Ok(UserProfile {
            id: row.get(0)?,
            name: row.get(1)?,
            group: row.get(2)?,
            summary: UserScoreSummary {
                weekly_points: row.get(3)?,
                total_points: row.get(4)?,
            },
            week_start: week_start
                .map(|s| parse_date(&s).map_err(invalid_column))
                .transpose()?,
        })
    }

    pub fn create(conn: &Connection, name: &str, group: Option<&str>) -> Result<UserProfile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("User name cannot be empty"));
        }
        conn.execute(
            "INSERT INTO users (name, group_name) VALUES (?1, ?2)",
            params![name, group],
        )
        .with_context(|| format!("Creating user '{}'", name))?;
        log::info!("created user '{}'", name);
        Self::find_by_name(conn, name)?.ok_or_else(|| anyhow!("User '{}' vanished", name))
    }

    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<UserProfile>> {
        conn.query_row(
            &format!("SELECT {} FROM users WHERE name = ?1", Self::COLUMNS),
            params![name.trim()],
            Self::from_row,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn list(conn: &Connection) -> Result<Vec<UserProfile>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY name COLLATE NOCASE",
            Self::COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn set_group(conn: &Connection, user_id: i64, group: Option<&str>) -> Result<()> {
        conn.execute(
            "UPDATE users SET group_name = ?1 WHERE id = ?2",
            params![group, user_id],
        )?;
        Ok(())
    }

    /// Write the cached score projection back to the profile.
    pub fn update_summary(
        conn: &Connection,
        user_id: i64,
        summary: &UserScoreSummary,
        week_start: NaiveDate,
    ) -> Result<()> {
        conn.execute(
            "UPDATE users SET weekly_points = ?1, total_points = ?2, week_start = ?3 WHERE id = ?4",
            params![
                summary.weekly_points,
                summary.total_points,
                fmt_date(week_start),
                user_id
            ],
        )?;
        Ok(())
    }
}

// ─── Prayer marks ────────────────────────────────────────────────────────────

pub struct MarkRepo;

impl MarkRepo {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<PrayerMark> {
        let date: String = row.get(0)?;
        let kind: String = row.get(1)?;
        let status: String = row.get(2)?;
        Ok(PrayerMark {
            date: parse_date(&date).map_err(invalid_column)?,
            kind: PrayerKind::from_str(&kind).map_err(invalid_column)?,
            status: PrayerStatus::from_str(&status).map_err(invalid_column)?,
        })
    }

    /// Store a mark, replacing whatever the slot held. Unmarked removes the row.
    pub fn upsert(conn: &Connection, user_id: i64, mark: &PrayerMark) -> Result<()> {
        if mark.status == PrayerStatus::Unmarked {
            return Self::clear(conn, user_id, mark.date, mark.kind);
        }
        conn.execute(
            "INSERT INTO prayer_marks (user_id, date, prayer_kind, status)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, date, prayer_kind)
             DO UPDATE SET status = ?4, updated_at = datetime('now')",
            params![
                user_id,
                fmt_date(mark.date),
                mark.kind.as_str(),
                mark.status.as_str()
            ],
        )?;
        Ok(())
    }

    pub fn clear(conn: &Connection, user_id: i64, date: NaiveDate, kind: PrayerKind) -> Result<()> {
        conn.execute(
            "DELETE FROM prayer_marks WHERE user_id = ?1 AND date = ?2 AND prayer_kind = ?3",
            params![user_id, fmt_date(date), kind.as_str()],
        )?;
        Ok(())
    }

    pub fn get_day(conn: &Connection, user_id: i64, date: NaiveDate) -> Result<DayStatuses> {
        let marks = Self::get_range(conn, user_id, date, date)?;
        Ok(marks.into_iter().map(|m| (m.kind, m.status)).collect())
    }

    pub fn get_range(
        conn: &Connection,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PrayerMark>> {
        let mut stmt = conn.prepare(
            "SELECT date, prayer_kind, status
             FROM prayer_marks WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date, CASE prayer_kind
               WHEN 'dawn' THEN 1 WHEN 'midday' THEN 2 WHEN 'afternoon' THEN 3
               WHEN 'sunset' THEN 4 WHEN 'night' THEN 5 END",
        )?;
        let rows = stmt.query_map(
            params![user_id, fmt_date(start), fmt_date(end)],
            Self::from_row,
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn get_all(conn: &Connection, user_id: i64) -> Result<Vec<PrayerMark>> {
        let mut stmt = conn.prepare(
            "SELECT date, prayer_kind, status FROM prayer_marks WHERE user_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![user_id], Self::from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Dates on which all five prayers were prayed, alone or in congregation.
    pub fn complete_days(conn: &Connection, user_id: i64) -> Result<Vec<NaiveDate>> {
        let mut stmt = conn.prepare(
            "SELECT date FROM prayer_marks
             WHERE user_id = ?1
             GROUP BY date
             HAVING SUM(CASE WHEN status IN ('prayed','congregation') THEN 1 ELSE 0 END) >= 5
             ORDER BY date",
        )?;
        let dates: Vec<String> = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        dates.iter().map(|s| parse_date(s)).collect()
    }
}

// ─── Quran ───────────────────────────────────────────────────────────────────

pub struct QuranRepo;

impl QuranRepo {
    pub fn save(conn: &Connection, user_id: i64, juz: u8, page_reached: u32) -> Result<()> {
        conn.execute(
            "INSERT INTO quran_progress (user_id, juz, page_reached) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, juz)
             DO UPDATE SET page_reached = ?3, updated_at = datetime('now')",
            params![user_id, juz, page_reached],
        )?;
        Ok(())
    }

    pub fn get(conn: &Connection, user_id: i64, juz: u8) -> Result<u32> {
        conn.query_row(
            "SELECT page_reached FROM quran_progress WHERE user_id = ?1 AND juz = ?2",
            params![user_id, juz],
            |row| row.get(0),
        )
        .optional()
        .map(|v| v.unwrap_or(0))
        .map_err(anyhow::Error::from)
    }

    pub fn get_all(conn: &Connection, user_id: i64) -> Result<Vec<ReadingProgress>> {
        let mut stmt = conn.prepare(
            "SELECT juz, page_reached FROM quran_progress WHERE user_id = ?1 ORDER BY juz",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(ReadingProgress {
                juz: row.get(0)?,
                page_reached: row.get(1)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }
}

// ─── Responsibility tasks ────────────────────────────────────────────────────

pub struct TaskRepo;

impl TaskRepo {
    pub fn get_for_date(conn: &Connection, user_id: i64, date: NaiveDate) -> Result<Vec<TaskCompletion>> {
        let mut stmt = conn.prepare(
            "SELECT task_id, date, photo FROM task_completions
             WHERE user_id = ?1 AND date = ?2 ORDER BY task_id",
        )?;
        let rows = stmt.query_map(params![user_id, fmt_date(date)], |row| {
            let date: String = row.get(1)?;
            Ok(TaskCompletion {
                task_id: row.get(0)?,
                date: parse_date(&date).map_err(invalid_column)?,
                photo: row.get(2)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn is_completed(conn: &Connection, user_id: i64, task_id: u32, date: NaiveDate) -> Result<bool> {
        let found: Option<i64> = conn
            .query_row(
                "SELECT id FROM task_completions WHERE user_id = ?1 AND task_id = ?2 AND date = ?3",
                params![user_id, task_id, fmt_date(date)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn complete(
        conn: &Connection,
        user_id: i64,
        task_id: u32,
        date: NaiveDate,
        photo: Option<&str>,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO task_completions (user_id, task_id, date, photo) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, task_id, date) DO UPDATE SET photo = COALESCE(?4, photo)",
            params![user_id, task_id, fmt_date(date), photo],
        )?;
        Ok(())
    }

    pub fn remove(conn: &Connection, user_id: i64, task_id: u32, date: NaiveDate) -> Result<()> {
        conn.execute(
            "DELETE FROM task_completions WHERE user_id = ?1 AND task_id = ?2 AND date = ?3",
            params![user_id, task_id, fmt_date(date)],
        )?;
        Ok(())
    }

    /// Attach a photo to an existing completion. Returns false when there is none.
    pub fn set_photo(
        conn: &Connection,
        user_id: i64,
        task_id: u32,
        date: NaiveDate,
        photo: &str,
    ) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE task_completions SET photo = ?1 WHERE user_id = ?2 AND task_id = ?3 AND date = ?4",
            params![photo, user_id, task_id, fmt_date(date)],
        )?;
        Ok(changed > 0)
    }

    pub fn count(conn: &Connection, user_id: i64) -> Result<u32> {
        conn.query_row(
            "SELECT COUNT(*) FROM task_completions WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
