use serde::{Deserialize, Serialize};

use crate::scoring::ScoringError;

pub const JUZ_COUNT: u8 = 30;

/// Page capacity of every juz. The last juz may carry its own page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuzLayout {
    pub pages_per_juz: u32,
    pub last_juz_pages: Option<u32>,
}

impl Default for JuzLayout {
    fn default() -> Self {
        Self {
            pages_per_juz: 20,
            last_juz_pages: Some(24),
        }
    }
}

impl JuzLayout {
    pub fn capacity(&self, juz: u8) -> Result<u32, ScoringError> {
        match juz {
            1..=29 => Ok(self.pages_per_juz),
            JUZ_COUNT => Ok(self.last_juz_pages.unwrap_or(self.pages_per_juz)),
            _ => Err(ScoringError::InvalidInput(format!(
                "juz must be between 1 and {}, got {}",
                JUZ_COUNT, juz
            ))),
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.pages_per_juz * (JUZ_COUNT as u32 - 1) + self.last_juz_pages.unwrap_or(self.pages_per_juz)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub juz: u8,
    pub page_reached: u32,
}

impl ReadingProgress {
    pub fn is_complete(&self, layout: &JuzLayout) -> bool {
        layout
            .capacity(self.juz)
            .map(|cap| self.page_reached >= cap)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_longer_last_juz() {
        let layout = JuzLayout::default();
        assert_eq!(layout.capacity(1).unwrap(), 20);
        assert_eq!(layout.capacity(29).unwrap(), 20);
        assert_eq!(layout.capacity(30).unwrap(), 24);
        assert_eq!(layout.total_pages(), 604);
    }

    #[test]
    fn uniform_layout_without_override() {
        let layout = JuzLayout {
            pages_per_juz: 20,
            last_juz_pages: None,
        };
        assert_eq!(layout.capacity(30).unwrap(), 20);
    }

    #[test]
    fn juz_out_of_range_is_invalid() {
        let layout = JuzLayout::default();
        assert!(matches!(layout.capacity(0), Err(ScoringError::InvalidInput(_))));
        assert!(matches!(layout.capacity(31), Err(ScoringError::InvalidInput(_))));
    }

    #[test]
    fn progress_completion_uses_capacity() {
        let layout = JuzLayout::default();
        let done = ReadingProgress { juz: 30, page_reached: 24 };
        let partial = ReadingProgress { juz: 30, page_reached: 20 };
        assert!(done.is_complete(&layout));
        assert!(!partial.is_complete(&layout));
    }
}
