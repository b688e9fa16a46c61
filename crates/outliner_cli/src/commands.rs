//! Command handlers for the outliner CLI.
//!
//! Each handler opens the project, applies one presentation event, and saves
//! back when the event mutates state. Handlers return the text to print.

use anyhow::{bail, Context, Result};
use outliner_core::{project_path, ListArrangement, OutlinerSession, Project, SessionError};
use std::fmt::Write as _;
use std::path::Path;

fn open(project: &Path) -> Result<OutlinerSession> {
    let mut session = OutlinerSession::new();
    session
        .open_project(project)
        .with_context(|| format!("failed to open `{}`", project.display()))?;
    Ok(session)
}

fn save(session: &mut OutlinerSession, arrangement: &ListArrangement) -> Result<()> {
    match session.save(arrangement) {
        Ok(_) => Ok(()),
        Err(SessionError::NoBackingFile) => bail!("project has no file; use save-as"),
        Err(err) => Err(err).context("failed to save project"),
    }
}

/// Imports raw notes into a fresh project saved at `project`.
///
/// `.otln` is appended when `project` has no extension. An existing file is
/// never overwritten.
pub fn new_project(notes: &Path, project: &Path) -> Result<String> {
    let target = project_path(project)
        .with_context(|| format!("cannot create `{}`", project.display()))?;
    if target.exists() {
        bail!(
            "`{}` already exists; open it or pick another name",
            target.display()
        );
    }

    let mut session = OutlinerSession::new();
    let count = session
        .new_project_from_file(notes)
        .with_context(|| format!("failed to read notes from `{}`", notes.display()))?;
    let arrangement = ListArrangement::from_project(session.project());
    let saved = session
        .save_as(&arrangement, &target)
        .with_context(|| format!("failed to save `{}`", target.display()))?;
    Ok(format!("Imported {count} note(s) into {}", saved.display()))
}

/// Renders the current note, the queue, and every topic in order.
pub fn show(project: &Path) -> Result<String> {
    let session = open(project)?;
    Ok(describe(session.project()))
}

pub fn add_topic(project: &Path, name: &str) -> Result<String> {
    let mut session = open(project)?;
    let mut arrangement = ListArrangement::from_project(session.project());
    let created = session.new_topic(name)?.name().to_string();
    arrangement.add_topic(created.as_str());
    save(&mut session, &arrangement)?;
    Ok(format!("Created topic `{created}`"))
}

pub fn assign(project: &Path, topic: &str) -> Result<String> {
    let mut session = open(project)?;
    let mut arrangement = ListArrangement::from_project(session.project());
    let Some(note) = session.assign_current_note(topic)? else {
        return Ok("No unassigned notes left".to_string());
    };
    arrangement.push_note(topic, note.as_str())?;
    save(&mut session, &arrangement)?;
    Ok(format!(
        "Assigned to `{topic}`: {note}\nNext: {}",
        session.current_note().unwrap_or("(none)")
    ))
}

pub fn next(project: &Path) -> Result<String> {
    browse(project, OutlinerSession::next_note)
}

pub fn prev(project: &Path) -> Result<String> {
    browse(project, OutlinerSession::previous_note)
}

fn browse(
    project: &Path,
    step: for<'a> fn(&'a mut OutlinerSession) -> Option<&'a str>,
) -> Result<String> {
    let mut session = open(project)?;
    let arrangement = ListArrangement::from_project(session.project());
    let current = step(&mut session).map(str::to_string);
    save(&mut session, &arrangement)?;
    Ok(format!(
        "Current note: {}",
        current.as_deref().unwrap_or("(none)")
    ))
}

pub fn move_topic(project: &Path, name: &str, index: usize) -> Result<String> {
    let mut session = open(project)?;
    let mut arrangement = ListArrangement::from_project(session.project());
    arrangement.move_topic(name, index)?;
    save(&mut session, &arrangement)?;
    Ok(describe(session.project()))
}

pub fn move_note(project: &Path, topic: &str, from: usize, to: usize) -> Result<String> {
    let mut session = open(project)?;
    let mut arrangement = ListArrangement::from_project(session.project());
    arrangement.move_note(topic, from, to)?;
    save(&mut session, &arrangement)?;
    Ok(describe(session.project()))
}

pub fn export(project: &Path, out: &Path) -> Result<String> {
    let mut session = open(project)?;
    let arrangement = ListArrangement::from_project(session.project());
    session
        .export(&arrangement, out)
        .with_context(|| format!("failed to export `{}`", out.display()))?;
    Ok(format!("Exported outline to {}", out.display()))
}

pub fn save_as(project: &Path, target: &Path) -> Result<String> {
    let mut session = open(project)?;
    let arrangement = ListArrangement::from_project(session.project());
    let saved = session
        .save_as(&arrangement, target)
        .with_context(|| format!("failed to save `{}`", target.display()))?;
    Ok(format!("Saved project as {}", saved.display()))
}

fn describe(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Current note: {}",
        project.current_note().unwrap_or("(none)")
    );
    let _ = writeln!(out, "Unassigned ({}):", project.notes().len());
    for note in project.notes() {
        let _ = writeln!(out, "  - {note}");
    }
    for topic in project.topics_in_order() {
        let _ = writeln!(out, "[{}] {}:", topic.number(), topic.name());
        for (index, note) in topic.notes().iter().enumerate() {
            let _ = writeln!(out, "  {index}. {note}");
        }
    }
    out
}
