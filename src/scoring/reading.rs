use crate::models::{JuzLayout, ReadingProgress};
use crate::scoring::ScoringError;

pub const POINTS_PER_PAGE: u32 = 5;

/// Points for saving `page_reached` in a juz holding `capacity` pages. The
/// value is absolute: saving a smaller page later scores the smaller page.
pub fn score_reading(page_reached: i64, capacity: u32) -> Result<u32, ScoringError> {
    if page_reached < 0 {
        return Err(ScoringError::InvalidInput(format!(
            "page cannot be negative, got {}",
            page_reached
        )));
    }
    if page_reached > capacity as i64 {
        return Err(ScoringError::InvalidInput(format!(
            "page {} exceeds the {} pages of this juz",
            page_reached, capacity
        )));
    }
    Ok(page_reached as u32 * POINTS_PER_PAGE)
}

/// Reading points across all stored progress. Rows that no longer fit the
/// layout are clamped to its capacity.
pub fn reading_points(progress: &[ReadingProgress], layout: &JuzLayout) -> u32 {
    progress
        .iter()
        .filter_map(|p| {
            let cap = layout.capacity(p.juz).ok()?;
            Some(p.page_reached.min(cap) * POINTS_PER_PAGE)
        })
        .sum()
}
