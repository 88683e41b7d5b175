//! Prayer tracking with sevap points.
//!
//! [`scoring`] holds the pure rules: week windows, prayer and reading
//! points, weekly aggregation, streaks and leaderboards. The rest of the
//! crate stores marks in SQLite and drives the rules from the command line.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod ledger;
pub mod models;
pub mod scoring;
pub mod utils;
