use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Home,
    Personal,
    Family,
    Social,
    Devotion,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Home,
        TaskCategory::Personal,
        TaskCategory::Family,
        TaskCategory::Social,
        TaskCategory::Devotion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Home => "home",
            TaskCategory::Personal => "personal",
            TaskCategory::Family => "family",
            TaskCategory::Social => "social",
            TaskCategory::Devotion => "devotion",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TaskCategory::Home => "At Home",
            TaskCategory::Personal => "Personal",
            TaskCategory::Family => "Family",
            TaskCategory::Social => "Social",
            TaskCategory::Devotion => "Towards Allah",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskCategory::Home => "🏡",
            TaskCategory::Personal => "🙋",
            TaskCategory::Family => "👪",
            TaskCategory::Social => "🌍",
            TaskCategory::Devotion => "🕌",
        }
    }
}

impl std::str::FromStr for TaskCategory {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(TaskCategory::Home),
            "personal" => Ok(TaskCategory::Personal),
            "family" => Ok(TaskCategory::Family),
            "social" => Ok(TaskCategory::Social),
            "devotion" => Ok(TaskCategory::Devotion),
            _ => Err(anyhow::anyhow!("Unknown task category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsibilityTask {
    pub id: u32,
    pub category: TaskCategory,
    pub title: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub task_id: u32,
    pub date: NaiveDate,
    pub photo: Option<String>,
}
