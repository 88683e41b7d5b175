use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sevap", version, author, about = "Weekly prayer tracker with sevap points, Quran progress and leaderboards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup: create a profile and make it active
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Manage local profiles
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    #[command(flatten)]
    Tracked(TrackedCommands),
}

/// Commands that act on the active profile.
#[derive(Subcommand, Debug)]
pub enum TrackedCommands {
    /// Show the weekly prayer grid
    Week {
        /// Weeks away from the current one (-1 = last week)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
    /// Mark a prayer as prayed, congregation or missed
    Mark {
        /// Prayer name (fajr, zuhr, asr, maghrib, isha)
        prayer: String,
        /// Status: prayed, congregation, missed or unmarked
        #[arg(default_value = "prayed")]
        status: String,
        /// Date to mark (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove the mark of a prayer
    Clear {
        /// Prayer name
        prayer: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Quran reading progress
    Quran {
        #[command(subcommand)]
        action: QuranCommands,
    },
    /// Daily responsibilities
    Tasks {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Show points and streak
    Stats,
    /// Weekly leaderboard
    Board {
        /// Only show this group
        #[arg(long, conflicts_with = "mine")]
        group: Option<String>,
        /// Only show the active user's group
        #[arg(long)]
        mine: bool,
    },
    /// Export a weekly summary to stdout
    Export {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a profile
    Add {
        name: String,
        /// Group to compete in
        #[arg(long)]
        group: Option<String>,
    },
    /// Switch the active profile
    Use { name: String },
    /// Change the active profile's group
    Group {
        /// New group; omit to leave all groups
        group: Option<String>,
    },
    /// List profiles with their points
    List,
}

#[derive(Subcommand, Debug)]
pub enum QuranCommands {
    /// Save the page reached in a juz
    Save {
        /// Juz number (1-30)
        juz: u8,
        /// Page reached within the juz
        #[arg(allow_hyphen_values = true)]
        page: i64,
    },
    /// Show progress across all 30 juz
    Show,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks with today's completions
    List {
        /// home, personal, family, social or devotion
        #[arg(long)]
        category: Option<String>,
    },
    /// Toggle a task as done for today
    Done {
        /// Task id
        id: u32,
        /// Photo to attach as evidence
        #[arg(long)]
        photo: Option<PathBuf>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Attach a photo to a task completed today
    Photo {
        /// Task id
        id: u32,
        /// Path to the photo
        path: PathBuf,
    },
}
