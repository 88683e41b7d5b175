use anyhow::Result;
use clap::Parser;
use rusqlite::Connection;

use sevap::cli::args::{Cli, Commands, TrackedCommands};
use sevap::cli::handlers;
use sevap::config::AppConfig;
use sevap::db;
use sevap::db::repository::MetaRepo;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    AppConfig::ensure_data_dir()?;
    let conn = db::open(&AppConfig::db_path()?)?;
    log::debug!("database ready, active user {:?}", config.user.active);

    match cli.command {
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &mut config, reset)?;
        }
        Some(Commands::User { action }) => {
            handlers::handle_user(&conn, &mut config, &action)?;
        }
        Some(Commands::Tracked(cmd)) => {
            ensure_setup(&conn, &mut config)?;
            run_tracked(&conn, &config, cmd)?;
        }
        // No subcommand → this week's grid
        None => {
            ensure_setup(&conn, &mut config)?;
            handlers::handle_week(&conn, &config, 0)?;
        }
    }

    Ok(())
}

/// Commands that need an active profile.
fn run_tracked(conn: &Connection, config: &AppConfig, cmd: TrackedCommands) -> Result<()> {
    match cmd {
        TrackedCommands::Week { offset } => handlers::handle_week(conn, config, offset),
        TrackedCommands::Mark { prayer, status, date } => {
            handlers::handle_mark(conn, config, &prayer, &status, date.as_deref())
        }
        TrackedCommands::Clear { prayer, date } => {
            handlers::handle_clear(conn, config, &prayer, date.as_deref())
        }
        TrackedCommands::Quran { action } => handlers::handle_quran(conn, config, &action),
        TrackedCommands::Tasks { action } => handlers::handle_tasks(conn, config, &action),
        TrackedCommands::Stats => handlers::handle_stats(conn, config),
        TrackedCommands::Board { group, mine } => {
            handlers::handle_board(conn, config, group.as_deref(), mine)
        }
        TrackedCommands::Export { json } => handlers::handle_export(conn, config, json),
    }
}

/// Check if setup has been done; if not, run it automatically.
fn ensure_setup(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let done = MetaRepo::get(conn, "setup_done")?;
    if done.as_deref() != Some("1") && config.user.active.is_none() {
        eprintln!("No profile found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, false)?;
    }
    Ok(())
}
