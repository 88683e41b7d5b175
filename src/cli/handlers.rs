use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::catalog::{self, TASK_POINTS};
use crate::cli::args::{QuranCommands, TaskCommands, UserCommands};
use crate::config::AppConfig;
use crate::db::repository::{MarkRepo, MetaRepo, QuranRepo, TaskRepo, UserRepo, parse_date};
use crate::ledger::{Ledger, TaskToggle};
use crate::models::{
    JUZ_COUNT, PrayerKind, PrayerMark, PrayerStatus, Streak, TaskCategory, UserProfile,
    UserScoreSummary, WeekReport,
};
use crate::scoring::{self, WeekWindow, day_points, leaderboard};
use crate::utils::format::{format_points, pad_display, progress_bar, status_star};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";
const RESET: &str = "\x1b[0m";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => parse_date(s),
        None => Ok(today()),
    }
}

/// The profile marks are recorded for.
pub fn active_user(conn: &Connection, config: &AppConfig) -> Result<UserProfile> {
    let name = config
        .user
        .active
        .as_deref()
        .ok_or_else(|| anyhow!("No active profile. Run `sevap setup` or `sevap user use <name>`"))?;
    UserRepo::find_by_name(conn, name)?
        .ok_or_else(|| anyhow!("Profile '{}' does not exist. Run `sevap user add {}`", name, name))
}

fn star_color(status: PrayerStatus) -> &'static str {
    match status {
        PrayerStatus::Prayed => RED,
        PrayerStatus::Congregation => GREEN,
        PrayerStatus::Missed => BOLD,
        PrayerStatus::Unmarked => DIM,
    }
}

// ─── Setup ───────────────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &mut AppConfig, reset: bool) -> Result<()> {
    if !reset {
        if let Some(done) = MetaRepo::get(conn, "setup_done")? {
            if done == "1" {
                println!("Sevap is already configured. Use --reset to reconfigure.");
                return Ok(());
            }
        }
    }

    println!();
    println_colored!(GOLD, "  Welcome to sevap");
    println!();
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let name = loop {
        let input = prompt(&mut reader, "  Your name: ")?;
        if !input.trim().is_empty() {
            break input.trim().to_string();
        }
        println_colored!(RED, "  Name cannot be empty");
    };
    let group = prompt(&mut reader, "  Group to compete in (empty for none): ")?;
    let group = Some(group.trim().to_string()).filter(|g| !g.is_empty());

    if UserRepo::find_by_name(conn, &name)?.is_none() {
        UserRepo::create(conn, &name, group.as_deref())?;
    }
    config.user.active = Some(name.clone());
    config.user.group = group;
    config.save()?;
    MetaRepo::set(conn, "setup_done", "1")?;

    println!();
    println_colored!(GREEN, "  ✓ Ready, {}! Try `sevap mark fajr` or `sevap week`", name);
    println!();
    Ok(())
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub fn handle_user(conn: &Connection, config: &mut AppConfig, action: &UserCommands) -> Result<()> {
    match action {
        UserCommands::Add { name, group } => {
            let group = group.as_deref().or(config.user.group.as_deref());
            let user = UserRepo::create(conn, name, group)?;
            if config.user.active.is_none() {
                config.user.active = Some(user.name.clone());
                config.save()?;
            }
            println_colored!(GREEN, "  ✓ Added {}", user.name);
        }
        UserCommands::Use { name } => {
            let user = UserRepo::find_by_name(conn, name)?
                .ok_or_else(|| anyhow!("No profile named '{}'", name))?;
            config.user.active = Some(user.name.clone());
            config.save()?;
            println_colored!(GREEN, "  ✓ Now tracking {}", user.name);
        }
        UserCommands::Group { group } => {
            let user = active_user(conn, config)?;
            UserRepo::set_group(conn, user.id, group.as_deref())?;
            match group {
                Some(g) => println_colored!(GREEN, "  ✓ {} joined {}", user.name, g),
                None => println_colored!(DIM, "  {} left their group", user.name),
            }
        }
        UserCommands::List => {
            let users = UserRepo::list(conn)?;
            let active = config.user.active.as_deref().unwrap_or_default();
            println!();
            for u in &users {
                let marker = if u.name.eq_ignore_ascii_case(active) { "▸" } else { " " };
                println!(
                    "  {} {:<20} {:<12} {:>6} pts",
                    marker,
                    u.name,
                    u.group.as_deref().unwrap_or("-"),
                    u.summary.total_points
                );
            }
            if users.is_empty() {
                println_colored!(DIM, "  No profiles yet. Run `sevap user add <name>`");
            }
            println!();
        }
    }
    Ok(())
}

// ─── Weekly grid ─────────────────────────────────────────────────────────────

pub fn handle_week(conn: &Connection, config: &AppConfig, offset: i64) -> Result<()> {
    let user = active_user(conn, config)?;
    let today = today();
    let week = scoring::resolve_week(today, offset);
    let marks = MarkRepo::get_range(conn, user.id, week.start_date, week.end_date())?;
    let report = scoring::aggregate_week(&marks);

    println!();
    println_colored!(GOLD, "  {} — {}", user.name, week.range_label());
    println!();
    print!("  {}", pad_display("", 16));
    for kind in PrayerKind::ALL {
        print!("{}", pad_display(kind.display_name(), 9));
    }
    println!();

    for (date, day) in scoring::week_grid(&week, &marks) {
        let label = format!("{} {}", date.format("%a"), date.format("%d.%m"));
        if date == today {
            print!("  {}{}{}", BOLD, pad_display(&format!("{} ◂", label), 16), RESET);
        } else {
            print!("  {}", pad_display(&label, 16));
        }
        for (_, status) in day.iter() {
            print!("{}{}{}        ", star_color(status), status_star(status), RESET);
        }
        let points = day_points(&day);
        if points > 0 {
            print!("{}{}{}", DIM, format_points(points), RESET);
        }
        println!();
    }

    println!();
    print_report(&report);
    println_colored!(
        DIM,
        "  {}★{} prayed  {}★{} congregation  {}★{} missed  ☆ open",
        RED,
        DIM,
        GREEN,
        DIM,
        BOLD,
        DIM
    );
    if offset != 0 {
        println_colored!(DIM, "  `sevap week` returns to the current week");
    }
    println!();
    Ok(())
}

fn print_report(report: &WeekReport) {
    println_colored!(
        BOLD,
        "  {}/{} prayed  ·  {} in congregation  ·  {} left  ·  {}%",
        report.prayed_count,
        report.total_slots,
        report.congregation_count,
        report.remaining(),
        report.percentage
    );
    println!(
        "  {}",
        progress_bar(report.prayed_count, report.total_slots, 35)
    );
}

// ─── Mark prayer ─────────────────────────────────────────────────────────────

pub fn handle_mark(
    conn: &Connection,
    config: &AppConfig,
    prayer: &str,
    status: &str,
    date: Option<&str>,
) -> Result<()> {
    let kind = PrayerKind::from_str(prayer)
        .map_err(|_| anyhow!("Unknown prayer '{}'. Use: fajr, zuhr, asr, maghrib, isha", prayer))?;
    let status = PrayerStatus::from_str(status)
        .map_err(|_| anyhow!("Unknown status '{}'. Use: prayed, congregation, missed", status))?;
    let date = date_or_today(date)?;
    let user = active_user(conn, config)?;

    let ledger = Ledger::new(conn, config.quran.layout());
    let mark = PrayerMark::new(date, kind, status);
    match ledger.record_mark(user.id, &mark, today())? {
        Some(score) => {
            println_colored!(GREEN, "  ★ {} on {} — {}", kind.display_name(), date, status.as_str());
            for line in &score.breakdown {
                println!("    {:<22} {}", line.label.display_name(), format_points(line.points));
            }
            println_colored!(GOLD, "    {:<22} {}", "Sevap", format_points(score.points));
        }
        None => match status {
            PrayerStatus::Missed => {
                println_colored!(RED, "  ✗ {} on {} marked as missed", kind.display_name(), date);
            }
            _ => println_colored!(DIM, "  ☆ {} on {} cleared", kind.display_name(), date),
        },
    }
    Ok(())
}

pub fn handle_clear(conn: &Connection, config: &AppConfig, prayer: &str, date: Option<&str>) -> Result<()> {
    handle_mark(conn, config, prayer, PrayerStatus::Unmarked.as_str(), date)
}

// ─── Quran ───────────────────────────────────────────────────────────────────

pub fn handle_quran(conn: &Connection, config: &AppConfig, action: &QuranCommands) -> Result<()> {
    let user = active_user(conn, config)?;
    let layout = config.quran.layout();

    match action {
        QuranCommands::Save { juz, page } => {
            let ledger = Ledger::new(conn, layout);
            let points = ledger.save_reading(user.id, *juz, *page, today())?;
            println_colored!(
                GREEN,
                "  ✓ Read up to page {} of juz {} — {} sevap",
                page,
                juz,
                format_points(points)
            );
        }
        QuranCommands::Show => {
            let progress = QuranRepo::get_all(conn, user.id)?;
            let read: u32 = progress.iter().map(|p| p.page_reached).sum();
            let completed = progress.iter().filter(|p| p.is_complete(&layout)).count();

            println!();
            println_colored!(GOLD, "  Quran — {}", user.name);
            println!();
            for juz in 1..=JUZ_COUNT {
                let capacity = layout.capacity(juz)?;
                let reached = progress
                    .iter()
                    .find(|p| p.juz == juz)
                    .map_or(0, |p| p.page_reached.min(capacity));
                let color = if reached >= capacity {
                    GREEN
                } else if reached > 0 {
                    AMBER
                } else {
                    DIM
                };
                println_colored!(
                    color,
                    "  {:>2}. juz  {}  {:>2}/{}",
                    juz,
                    progress_bar(reached, capacity, 20),
                    reached,
                    capacity
                );
            }
            println!();
            println_colored!(
                BOLD,
                "  {}/{} pages  ·  {}/{} juz completed",
                read,
                layout.total_pages(),
                completed,
                JUZ_COUNT
            );
            println!();
        }
    }
    Ok(())
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

pub fn handle_tasks(conn: &Connection, config: &AppConfig, action: &TaskCommands) -> Result<()> {
    let user = active_user(conn, config)?;
    let ledger = Ledger::new(conn, config.quran.layout());

    match action {
        TaskCommands::List { category } => {
            let categories = match category {
                Some(c) => vec![TaskCategory::from_str(c)?],
                None => TaskCategory::ALL.to_vec(),
            };
            let done = TaskRepo::get_for_date(conn, user.id, today())?;

            println!();
            for cat in categories {
                let tasks: Vec<_> = catalog::tasks::by_category(cat).collect();
                let finished = tasks
                    .iter()
                    .filter(|t| done.iter().any(|d| d.task_id == t.id))
                    .count() as u32;
                println_colored!(
                    GOLD,
                    "  {} {}  {}/{}  {}",
                    cat.icon(),
                    cat.display_name(),
                    finished,
                    tasks.len(),
                    progress_bar(finished, tasks.len() as u32, 10)
                );
                for task in tasks {
                    match done.iter().find(|d| d.task_id == task.id) {
                        Some(c) => {
                            let photo = if c.photo.is_some() { " 📸" } else { "" };
                            println_colored!(
                                GREEN,
                                "   [✓] {:>2} {} {}  {}{}",
                                task.id,
                                task.icon,
                                task.title,
                                format_points(TASK_POINTS),
                                photo
                            );
                        }
                        None => println!("   [ ] {:>2} {} {}", task.id, task.icon, task.title),
                    }
                }
                println!();
            }
        }
        TaskCommands::Done { id, photo, date } => {
            let date = date_or_today(date.as_deref())?;
            let title = catalog::tasks::find(*id).map_or("", |t| t.title);
            match ledger.toggle_task(user.id, *id, date, photo.as_deref(), today())? {
                TaskToggle::Completed { points } => {
                    println_colored!(GREEN, "  ✓ {} — {}", title, format_points(points));
                }
                TaskToggle::PhotoAdded => {
                    println_colored!(GREEN, "  📸 {} — photo saved", title);
                }
                TaskToggle::Undone => {
                    println_colored!(DIM, "  ○ {} — unmarked", title);
                }
            }
        }
        TaskCommands::Photo { id, path } => {
            ledger.attach_photo(user.id, *id, today(), path)?;
            println_colored!(GREEN, "  📸 Photo saved for task {}", id);
        }
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

struct Overview {
    week: WeekWindow,
    report: WeekReport,
    summary: UserScoreSummary,
    streak: Streak,
}

fn overview(conn: &Connection, config: &AppConfig, user: &UserProfile) -> Result<Overview> {
    let today = today();
    let ledger = Ledger::new(conn, config.quran.layout());
    let summary = ledger.refresh_summary(user.id, today)?;
    let week = scoring::resolve_week(today, 0);
    let marks = MarkRepo::get_range(conn, user.id, week.start_date, week.end_date())?;
    let complete = MarkRepo::complete_days(conn, user.id)?;
    Ok(Overview {
        report: scoring::aggregate_week(&marks),
        streak: scoring::calculate_streak(&complete, today),
        week,
        summary,
    })
}

pub fn handle_stats(conn: &Connection, config: &AppConfig) -> Result<()> {
    let user = active_user(conn, config)?;
    let o = overview(conn, config, &user)?;

    println!();
    println_colored!(GOLD, "  Statistics — {}", user.name);
    println!();
    println_colored!(BOLD, "  This week:   {} sevap  ({})", o.summary.weekly_points, o.week.range_label());
    println_colored!(BOLD, "  All time:    {} sevap", o.summary.total_points);
    println!(
        "  Streak:      {} days current  |  {} days best",
        o.streak.current, o.streak.best
    );
    println!();
    print_report(&o.report);
    println!();
    Ok(())
}

// ─── Leaderboard ─────────────────────────────────────────────────────────────

pub fn handle_board(conn: &Connection, config: &AppConfig, group: Option<&str>, mine: bool) -> Result<()> {
    let me = active_user(conn, config).ok();
    let group = if mine {
        let g = me
            .as_ref()
            .and_then(|u| u.group.clone())
            .context("The active profile is not in a group")?;
        Some(g)
    } else {
        group.map(str::to_string)
    };

    // Keep the active user's projection fresh before ranking.
    if let Some(me) = &me {
        Ledger::new(conn, config.quran.layout()).refresh_summary(me.id, today())?;
    }
    let profiles = UserRepo::list(conn)?;
    let week = scoring::resolve_week(today(), 0);
    let board = leaderboard::rank(&profiles, week.start_date, group.as_deref());

    println!();
    match &group {
        Some(g) => println_colored!(GOLD, "  Leaderboard — {} — {}", g, week.range_label()),
        None => println_colored!(GOLD, "  Leaderboard — everyone — {}", week.range_label()),
    }
    println!();
    if board.is_empty() {
        println_colored!(DIM, "  Nobody here yet");
    }
    for s in &board {
        let is_me = me.as_ref().is_some_and(|u| u.name == s.name);
        let medal = match s.rank {
            1 => "🥇",
            2 => "🥈",
            3 => "🥉",
            _ => "  ",
        };
        let line = format!(
            "  {} {:>2}. {:<20} {:>6}",
            medal, s.rank, s.name, s.weekly_points
        );
        if is_me {
            println_colored!(BOLD, "{} ◂", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DayExport {
    date: NaiveDate,
    prayers: BTreeMap<PrayerKind, PrayerStatus>,
    points: u32,
}

#[derive(Serialize)]
struct WeeklyExport<'a> {
    user: &'a str,
    group: Option<&'a str>,
    week_start: NaiveDate,
    week_end: NaiveDate,
    report: WeekReport,
    summary: UserScoreSummary,
    streak: Streak,
    days: Vec<DayExport>,
}

pub fn handle_export(conn: &Connection, config: &AppConfig, json: bool) -> Result<()> {
    let user = active_user(conn, config)?;
    let o = overview(conn, config, &user)?;
    let marks = MarkRepo::get_range(conn, user.id, o.week.start_date, o.week.end_date())?;
    let days: Vec<DayExport> = scoring::week_grid(&o.week, &marks)
        .into_iter()
        .map(|(date, day)| DayExport {
            date,
            prayers: day.iter().collect(),
            points: day_points(&day),
        })
        .collect();

    if json {
        let export = WeeklyExport {
            user: &user.name,
            group: user.group.as_deref(),
            week_start: o.week.start_date,
            week_end: o.week.end_date(),
            report: o.report,
            summary: o.summary,
            streak: o.streak,
            days,
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    println!("# sevap — Weekly Summary");
    println!("# {} ({})", user.name, o.week.range_label());
    println!();
    println!("## Prayers");
    for day in &days {
        let stars: String = day.prayers.values().map(|s| status_star(*s)).collect();
        println!("  {}  {}  {:>3} pts", day.date, stars, day.points);
    }
    println!();
    println!("## Summary");
    println!(
        "  Prayed:       {}/{} ({}%)",
        o.report.prayed_count, o.report.total_slots, o.report.percentage
    );
    println!("  Congregation: {}", o.report.congregation_count);
    println!("  Sevap (week): {}", o.summary.weekly_points);
    println!("  Sevap (all):  {}", o.summary.total_points);
    println!("  Streak:       {} days (best: {})", o.streak.current, o.streak.best);
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Print `message` and read one line from `input`. Fails once input is closed.
fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        println!();
        bail!("Input closed during setup. Run `sevap setup` in a terminal or `sevap user add <name>`");
    }
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_reads_one_line() {
        let mut input = Cursor::new("Yusuf\r\nClass 4B\n");
        assert_eq!(prompt(&mut input, "").unwrap(), "Yusuf");
        assert_eq!(prompt(&mut input, "").unwrap(), "Class 4B");
    }

    #[test]
    fn prompt_fails_when_input_is_closed() {
        let mut input = Cursor::new("");
        assert!(prompt(&mut input, "").is_err());

        let mut input = Cursor::new("\n");
        assert_eq!(prompt(&mut input, "").unwrap(), "");
        assert!(prompt(&mut input, "").is_err());
    }
}
