use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL UNIQUE COLLATE NOCASE,
            group_name     TEXT,
            weekly_points  INTEGER NOT NULL DEFAULT 0,
            total_points   INTEGER NOT NULL DEFAULT 0,
            week_start     TEXT,
            created_at     TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS prayer_marks (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL REFERENCES users(id),
            date         TEXT NOT NULL,
            prayer_kind  TEXT NOT NULL
                         CHECK(prayer_kind IN ('dawn','midday','afternoon','sunset','night')),
            status       TEXT NOT NULL
                         CHECK(status IN ('prayed','congregation','missed')),
            updated_at   TEXT DEFAULT (datetime('now')),
            UNIQUE(user_id, date, prayer_kind)
        );

        CREATE TABLE IF NOT EXISTS quran_progress (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       INTEGER NOT NULL REFERENCES users(id),
            juz           INTEGER NOT NULL CHECK(juz BETWEEN 1 AND 30),
            page_reached  INTEGER NOT NULL DEFAULT 0,
            updated_at    TEXT DEFAULT (datetime('now')),
            UNIQUE(user_id, juz)
        );

        CREATE TABLE IF NOT EXISTS task_completions (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id   INTEGER NOT NULL REFERENCES users(id),
            task_id   INTEGER NOT NULL,
            date      TEXT NOT NULL,
            photo     TEXT,
            UNIQUE(user_id, task_id, date)
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }
}
