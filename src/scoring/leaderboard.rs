use chrono::NaiveDate;
use serde::Serialize;

use crate::models::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: u32,
    pub name: String,
    pub group: Option<String>,
    pub weekly_points: u32,
}

/// Weekly points of `profile` for the week starting at `week_start`. A cached
/// value computed for another week has been reset and reads as zero.
pub fn current_weekly_points(profile: &UserProfile, week_start: NaiveDate) -> u32 {
    match profile.week_start {
        Some(start) if start == week_start => profile.summary.weekly_points,
        _ => 0,
    }
}

/// Rank profiles by weekly points, highest first. Ties share a rank and the
/// next rank skips ahead (1, 2, 2, 4). Names break ties in display order only.
pub fn rank(profiles: &[UserProfile], week_start: NaiveDate, group: Option<&str>) -> Vec<Standing> {
    let mut entries: Vec<Standing> = profiles
        .iter()
        .filter(|p| match group {
            Some(g) => p.group.as_deref().is_some_and(|pg| pg.eq_ignore_ascii_case(g)),
            None => true,
        })
        .map(|p| Standing {
            rank: 0,
            name: p.name.clone(),
            group: p.group.clone(),
            weekly_points: current_weekly_points(p, week_start),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.weekly_points
            .cmp(&a.weekly_points)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    let mut previous: Option<u32> = None;
    for i in 0..entries.len() {
        entries[i].rank = match previous {
            Some(points) if points == entries[i].weekly_points => entries[i - 1].rank,
            _ => i as u32 + 1,
        };
        previous = Some(entries[i].weekly_points);
    }
    entries
}
