//! Project model: unassigned note queue plus topic table.
//!
//! # Responsibility
//! - Own both collections and the transfer between them.
//! - Accept externally committed orderings for topics and notes.
//!
//! # Invariants
//! - Topic names are unique and non-blank.
//! - A note lives either in the queue or in exactly one topic.
//! - After `recompute_topic_order`, numbers are a permutation of `0..count`.
//! - Every failing operation leaves the project unchanged.

use crate::model::topic::Topic;
use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors from project model operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// Topic name is empty after trim.
    BlankTopicName,
    /// A topic with this name already exists.
    DuplicateTopic(String),
    /// No topic with this name exists.
    TopicNotFound(String),
    /// Supplied topic order is not a total order over existing topics.
    InvalidTopicOrder(String),
    /// Supplied note order is not a permutation of the topic's notes.
    InvalidNoteOrder(String),
}

impl Display for ProjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTopicName => write!(f, "topic name must not be blank"),
            Self::DuplicateTopic(name) => write!(f, "topic `{name}` already exists"),
            Self::TopicNotFound(name) => write!(f, "topic not found: `{name}`"),
            Self::InvalidTopicOrder(details) => write!(f, "invalid topic order: {details}"),
            Self::InvalidNoteOrder(name) => {
                write!(f, "note order for topic `{name}` does not match its notes")
            }
        }
    }
}

impl Error for ProjectError {}

/// In-memory outliner project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    notes: VecDeque<String>,
    topics: HashMap<String, Topic>,
    filename: Option<PathBuf>,
}

impl Project {
    /// Creates an empty project with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        notes: VecDeque<String>,
        topics: HashMap<String, Topic>,
        filename: Option<PathBuf>,
    ) -> Self {
        Self {
            notes,
            topics,
            filename,
        }
    }

    /// Unassigned notes, head first.
    pub fn notes(&self) -> &VecDeque<String> {
        &self.notes
    }

    /// The note currently offered for assignment.
    pub fn current_note(&self) -> Option<&str> {
        self.notes.front().map(String::as_str)
    }

    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.get(name)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Topics sorted by ascending `number`, ties broken by name.
    pub fn topics_in_order(&self) -> Vec<&Topic> {
        let mut topics: Vec<&Topic> = self.topics.values().collect();
        topics.sort_by(|a, b| {
            a.number()
                .cmp(&b.number())
                .then_with(|| a.name().cmp(b.name()))
        });
        topics
    }

    /// Count of notes across the queue and every topic.
    pub fn total_note_count(&self) -> usize {
        self.notes.len()
            + self
                .topics
                .values()
                .map(|topic| topic.notes().len())
                .sum::<usize>()
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub(crate) fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.filename = Some(path.into());
    }

    /// Replaces the unassigned queue with the non-blank lines of `raw`.
    ///
    /// Previously unassigned notes are discarded; topics are untouched.
    pub fn load_notes_from_raw_list(&mut self, raw: &str) {
        self.replace_queue(parse_raw_notes(raw));
    }

    pub(crate) fn replace_queue(&mut self, notes: impl IntoIterator<Item = String>) {
        self.notes = notes.into_iter().collect();
    }

    /// Creates an empty topic ranked after all existing ones.
    ///
    /// # Errors
    /// - `BlankTopicName` when `name` is empty after trim.
    /// - `DuplicateTopic` when the name is already taken.
    pub fn create_topic(&mut self, name: impl Into<String>) -> Result<&Topic, ProjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProjectError::BlankTopicName);
        }
        if self.topics.contains_key(&name) {
            return Err(ProjectError::DuplicateTopic(name));
        }

        let number = self.topics.len();
        let topic: &Topic = self
            .topics
            .entry(name.clone())
            .or_insert_with(|| Topic::new(name, number));
        Ok(topic)
    }

    /// Moves the current note to the end of `topic`.
    ///
    /// Returns the moved note, or `None` when the queue is empty.
    pub fn assign_current_note(&mut self, topic: &str) -> Result<Option<String>, ProjectError> {
        let target = self
            .topics
            .get_mut(topic)
            .ok_or_else(|| ProjectError::TopicNotFound(topic.to_string()))?;

        let Some(note) = self.notes.pop_front() else {
            return Ok(None);
        };
        target.push_note(note.clone());
        Ok(Some(note))
    }

    /// Rotates the queue left: head moves to tail.
    pub fn advance_note(&mut self) {
        if self.notes.len() > 1 {
            self.notes.rotate_left(1);
        }
    }

    /// Rotates the queue right: tail moves to head.
    pub fn retreat_note(&mut self) {
        if self.notes.len() > 1 {
            self.notes.rotate_right(1);
        }
    }

    /// Sets every topic's `number` to its index in `ordered_names`.
    ///
    /// `ordered_names` must name each existing topic exactly once.
    pub fn recompute_topic_order<S: AsRef<str>>(
        &mut self,
        ordered_names: &[S],
    ) -> Result<(), ProjectError> {
        if ordered_names.len() != self.topics.len() {
            return Err(ProjectError::InvalidTopicOrder(format!(
                "expected {} topics, got {}",
                self.topics.len(),
                ordered_names.len()
            )));
        }

        let mut seen = HashSet::with_capacity(ordered_names.len());
        for name in ordered_names {
            let name = name.as_ref();
            if !self.topics.contains_key(name) {
                return Err(ProjectError::TopicNotFound(name.to_string()));
            }
            if !seen.insert(name) {
                return Err(ProjectError::InvalidTopicOrder(format!(
                    "topic `{name}` listed more than once"
                )));
            }
        }

        for (index, name) in ordered_names.iter().enumerate() {
            if let Some(topic) = self.topics.get_mut(name.as_ref()) {
                topic.set_number(index);
            }
        }
        Ok(())
    }

    /// Overwrites the notes of `topic` with `ordered_notes`.
    ///
    /// `ordered_notes` must be a permutation of the topic's current notes.
    pub fn recompute_note_order(
        &mut self,
        topic: &str,
        ordered_notes: Vec<String>,
    ) -> Result<(), ProjectError> {
        let target = self
            .topics
            .get_mut(topic)
            .ok_or_else(|| ProjectError::TopicNotFound(topic.to_string()))?;

        if !is_permutation(target.notes(), &ordered_notes) {
            return Err(ProjectError::InvalidNoteOrder(topic.to_string()));
        }
        target.replace_notes(ordered_notes);
        Ok(())
    }
}

/// Yields the non-blank lines of `raw` in order.
pub fn parse_raw_notes(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
}

fn is_permutation(current: &[String], proposed: &[String]) -> bool {
    if current.len() != proposed.len() {
        return false;
    }
    let mut left: Vec<&String> = current.iter().collect();
    let mut right: Vec<&String> = proposed.iter().collect();
    left.sort();
    right.sort();
    left == right
}
