//! Outliner session use-case service.
//!
//! # Responsibility
//! - Hold the single in-process project.
//! - Map presentation events (open, save, export, new topic, browse, assign)
//!   onto model and codec calls.
//! - Commit the presentation order before every persist.
//!
//! # Invariants
//! - A failed open or order commit leaves the current project untouched.
//! - `filename` changes only after a successful open or save-as.

use crate::codec::{self, CodecError};
use crate::model::project::{Project, ProjectError};
use crate::model::topic::Topic;
use crate::service::arrangement::Arrangement;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors from session operations.
#[derive(Debug)]
pub enum SessionError {
    /// Model invariant rejected the operation.
    Project(ProjectError),
    /// Reading or writing a file failed.
    Codec(CodecError),
    /// `save` was called before the project had a backing file.
    NoBackingFile,
}

// Wrappers show the inner message and forward to its source.
impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::NoBackingFile => write!(f, "project has no file yet; use save-as"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Project(err) => err.source(),
            Self::Codec(err) => err.source(),
            Self::NoBackingFile => None,
        }
    }
}

impl From<ProjectError> for SessionError {
    fn from(value: ProjectError) -> Self {
        Self::Project(value)
    }
}

impl From<CodecError> for SessionError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Session facade over one outliner project.
#[derive(Debug, Default)]
pub struct OutlinerSession {
    project: Project,
}

impl OutlinerSession {
    /// Starts a session with an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(project: Project) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Replaces the unassigned queue with the notes read from `path`.
    ///
    /// Returns the number of imported notes.
    pub fn new_project_from_file(&mut self, path: impl AsRef<Path>) -> SessionResult<usize> {
        let notes = codec::read_raw_notes(path)?;
        let count = notes.len();
        self.project.replace_queue(notes);
        info!("event=notes_import module=service status=ok notes={count}");
        Ok(count)
    }

    /// Loads the project at `path`, replacing the current one on success.
    pub fn open_project(&mut self, path: impl AsRef<Path>) -> SessionResult<()> {
        let loaded = codec::load_project(path)?;
        self.project = loaded;
        Ok(())
    }

    /// Saves to the current backing file.
    ///
    /// # Errors
    /// - `NoBackingFile` when the project was never opened or saved; the
    ///   caller should ask for a path and use [`Self::save_as`].
    pub fn save<A: Arrangement + ?Sized>(&mut self, arrangement: &A) -> SessionResult<PathBuf> {
        let path = self
            .project
            .filename()
            .map(Path::to_path_buf)
            .ok_or(SessionError::NoBackingFile)?;
        self.commit_order(arrangement)?;
        codec::save_project(&self.project, &path)?;
        Ok(path)
    }

    /// Saves to `path` and makes it the backing file.
    ///
    /// A path without an extension gets `.otln` appended; the resolved path
    /// is returned.
    ///
    /// # Errors
    /// - `Codec(InvalidFormat)` for any other extension; nothing is written.
    pub fn save_as<A: Arrangement + ?Sized>(
        &mut self,
        arrangement: &A,
        path: impl AsRef<Path>,
    ) -> SessionResult<PathBuf> {
        let path = codec::project_path(path)?;
        self.commit_order(arrangement)?;
        codec::save_project(&self.project, &path)?;
        self.project.set_filename(&path);
        Ok(path)
    }

    /// Writes the outline text export to `path`.
    pub fn export<A: Arrangement + ?Sized>(
        &mut self,
        arrangement: &A,
        path: impl AsRef<Path>,
    ) -> SessionResult<()> {
        self.commit_order(arrangement)?;
        codec::export_outline(&self.project, path)?;
        Ok(())
    }

    /// Re-derives topic numbers and per-topic note order from `arrangement`.
    ///
    /// All-or-nothing: the project is only updated when every topic commits.
    pub fn commit_order<A: Arrangement + ?Sized>(
        &mut self,
        arrangement: &A,
    ) -> SessionResult<()> {
        let mut staged = self.project.clone();
        let topic_order = arrangement.topic_order();
        staged.recompute_topic_order(&topic_order)?;
        for name in &topic_order {
            if let Some(notes) = arrangement.note_order(name) {
                staged.recompute_note_order(name, notes)?;
            }
        }
        self.project = staged;
        debug!(
            "event=order_commit module=service status=ok topics={}",
            topic_order.len()
        );
        Ok(())
    }

    /// Creates a topic. Duplicate names are reported, never merged.
    pub fn new_topic(&mut self, name: impl Into<String>) -> SessionResult<&Topic> {
        match self.project.create_topic(name) {
            Ok(topic) => Ok(topic),
            Err(err) => {
                warn!("event=topic_create module=service status=rejected error={err}");
                Err(err.into())
            }
        }
    }

    /// Moves the current note into `topic`; `None` when nothing is queued.
    pub fn assign_current_note(&mut self, topic: &str) -> SessionResult<Option<String>> {
        Ok(self.project.assign_current_note(topic)?)
    }

    /// Shows the next queued note.
    pub fn next_note(&mut self) -> Option<&str> {
        self.project.advance_note();
        self.project.current_note()
    }

    /// Shows the previous queued note.
    pub fn previous_note(&mut self) -> Option<&str> {
        self.project.retreat_note();
        self.project.current_note()
    }

    pub fn current_note(&self) -> Option<&str> {
        self.project.current_note()
    }

    pub fn view_topic(&self, name: &str) -> Option<&Topic> {
        self.project.topic(name)
    }
}
