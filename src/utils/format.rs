use unicode_width::UnicodeWidthStr;

use crate::models::PrayerStatus;

/// Star glyph for a grid cell.
pub fn status_star(status: PrayerStatus) -> &'static str {
    match status {
        PrayerStatus::Unmarked => "☆",
        _ => "★",
    }
}

/// Pad `s` with spaces to `width` terminal columns. Emoji count double.
pub fn pad_display(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// "+25" style point delta
pub fn format_points(points: u32) -> String {
    format!("+{}", points)
}
