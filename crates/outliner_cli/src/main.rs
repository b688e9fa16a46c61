//! Outliner command-line entry point.
//!
//! # Responsibility
//! - Act as the presentation layer over `outliner_core`, one event per run.
//! - Resolve logging config from flags and environment.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use outliner_core::{init_logging, LogLevel, LoggingConfig};
use std::path::PathBuf;

/// Group free-text notes into topics and export them as an outline.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level: trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, global = true, env = "OUTLINER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "OUTLINER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a plain text note list into a new project file.
    ///
    /// `.otln` is appended when PROJECT has no extension; an existing file is
    /// never overwritten.
    New { notes: PathBuf, project: PathBuf },
    /// Show the current note, the unassigned queue and all topics
    Show { project: PathBuf },
    /// Create a new topic
    AddTopic { project: PathBuf, name: String },
    /// Assign the current note to a topic
    Assign { project: PathBuf, topic: String },
    /// Browse forward to the next unassigned note
    Next { project: PathBuf },
    /// Browse back to the previous unassigned note
    Prev { project: PathBuf },
    /// Move a topic to a new position
    MoveTopic {
        project: PathBuf,
        name: String,
        index: usize,
    },
    /// Move a note within a topic
    MoveNote {
        project: PathBuf,
        topic: String,
        from: usize,
        to: usize,
    },
    /// Export the outline as a text file
    Export { project: PathBuf, out: PathBuf },
    /// Save the project under a new file name
    SaveAs { project: PathBuf, target: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    start_logging(cli.log_level.as_deref(), cli.log_dir.as_ref())?;

    let output = match &cli.command {
        Command::New { notes, project } => commands::new_project(notes, project)?,
        Command::Show { project } => commands::show(project)?,
        Command::AddTopic { project, name } => commands::add_topic(project, name)?,
        Command::Assign { project, topic } => commands::assign(project, topic)?,
        Command::Next { project } => commands::next(project)?,
        Command::Prev { project } => commands::prev(project)?,
        Command::MoveTopic {
            project,
            name,
            index,
        } => commands::move_topic(project, name, *index)?,
        Command::MoveNote {
            project,
            topic,
            from,
            to,
        } => commands::move_note(project, topic, *from, *to)?,
        Command::Export { project, out } => commands::export(project, out)?,
        Command::SaveAs { project, target } => commands::save_as(project, target)?,
    };

    println!("{}", output.trim_end());
    Ok(())
}

// The level is validated even when no log directory is set.
fn start_logging(level: Option<&str>, log_dir: Option<&PathBuf>) -> Result<()> {
    let level = match level {
        Some(value) => LogLevel::parse(value)?,
        None => LogLevel::build_default(),
    };
    let Some(log_dir) = log_dir else {
        return Ok(());
    };
    init_logging(&LoggingConfig::new(level, log_dir)?)?;
    log::debug!("event=cli_start module=cli status=ok");
    Ok(())
}
