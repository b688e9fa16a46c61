//! Presentation-order contract.
//!
//! # Responsibility
//! - Describe how a presentation layer reports its current visual order.
//! - Provide a plain list-backed arrangement for non-graphical callers.
//!
//! # Invariants
//! - `ListArrangement` only reorders what it was given; it never invents
//!   or drops notes.

use crate::model::project::Project;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current visual ordering owned by a presentation layer.
///
/// Queried immediately before every save or export.
pub trait Arrangement {
    /// Topic names in display order.
    fn topic_order(&self) -> Vec<String>;

    /// Notes of `topic` in display order, or `None` to keep the model's order.
    fn note_order(&self, topic: &str) -> Option<Vec<String>>;
}

/// Errors from list arrangement edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrangementError {
    TopicNotFound(String),
    NoteIndexOutOfRange {
        topic: String,
        index: usize,
        len: usize,
    },
}

impl Display for ArrangementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopicNotFound(name) => write!(f, "topic not found: `{name}`"),
            Self::NoteIndexOutOfRange { topic, index, len } => write!(
                f,
                "note index {index} out of range for topic `{topic}` with {len} notes"
            ),
        }
    }
}

impl Error for ArrangementError {}

/// Arrangement held as plain vectors, edited by index moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArrangement {
    topics: Vec<String>,
    notes: HashMap<String, Vec<String>>,
}

impl ListArrangement {
    /// Mirrors the project's committed order.
    pub fn from_project(project: &Project) -> Self {
        let ordered = project.topics_in_order();
        let topics = ordered.iter().map(|topic| topic.name().to_string()).collect();
        let notes = ordered
            .iter()
            .map(|topic| (topic.name().to_string(), topic.notes().to_vec()))
            .collect();
        Self { topics, notes }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn notes(&self, topic: &str) -> Option<&[String]> {
        self.notes.get(topic).map(Vec::as_slice)
    }

    /// Appends a new topic at the end; existing names are left in place.
    pub fn add_topic(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.notes.contains_key(&name) {
            return;
        }
        self.topics.push(name.clone());
        self.notes.insert(name, Vec::new());
    }

    /// Appends `note` to the end of `topic`.
    pub fn push_note(
        &mut self,
        topic: &str,
        note: impl Into<String>,
    ) -> Result<(), ArrangementError> {
        self.notes
            .get_mut(topic)
            .ok_or_else(|| ArrangementError::TopicNotFound(topic.to_string()))?
            .push(note.into());
        Ok(())
    }

    /// Moves `name` to `target_index`, clamped to the last position.
    pub fn move_topic(&mut self, name: &str, target_index: usize) -> Result<(), ArrangementError> {
        let from = self
            .topics
            .iter()
            .position(|topic| topic == name)
            .ok_or_else(|| ArrangementError::TopicNotFound(name.to_string()))?;
        let moved = self.topics.remove(from);
        let to = target_index.min(self.topics.len());
        self.topics.insert(to, moved);
        Ok(())
    }

    /// Moves the note at `from` within `topic` to `to`, clamped to the end.
    pub fn move_note(
        &mut self,
        topic: &str,
        from: usize,
        to: usize,
    ) -> Result<(), ArrangementError> {
        let notes = self
            .notes
            .get_mut(topic)
            .ok_or_else(|| ArrangementError::TopicNotFound(topic.to_string()))?;
        if from >= notes.len() {
            return Err(ArrangementError::NoteIndexOutOfRange {
                topic: topic.to_string(),
                index: from,
                len: notes.len(),
            });
        }
        let moved = notes.remove(from);
        let to = to.min(notes.len());
        notes.insert(to, moved);
        Ok(())
    }
}

impl Arrangement for ListArrangement {
    fn topic_order(&self) -> Vec<String> {
        self.topics.clone()
    }

    fn note_order(&self, topic: &str) -> Option<Vec<String>> {
        self.notes.get(topic).cloned()
    }
}
