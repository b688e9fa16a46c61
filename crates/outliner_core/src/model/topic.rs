//! Topic domain record.
//!
//! # Invariants
//! - `name` is fixed at construction and never changes.
//! - Only `name`, `notes` and `number` are part of the persisted shape.

use serde::{Deserialize, Serialize};

/// A user-named bucket collecting an ordered list of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    name: String,
    notes: Vec<String>,
    /// Display/export rank. Recomputed from the arrangement before persist.
    number: usize,
}

impl Topic {
    /// Creates an empty topic with the given creation-order rank.
    pub fn new(name: impl Into<String>, number: usize) -> Self {
        Self {
            name: name.into(),
            notes: Vec::new(),
            number,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Notes in their current committed order.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub(crate) fn push_note(&mut self, note: String) {
        self.notes.push(note);
    }

    pub(crate) fn set_number(&mut self, number: usize) {
        self.number = number;
    }

    pub(crate) fn replace_notes(&mut self, notes: Vec<String>) {
        self.notes = notes;
    }
}

#[cfg(test)]
mod tests {
    use super::Topic;

    #[test]
    fn new_topic_starts_empty() {
        let topic = Topic::new("Intro", 3);
        assert_eq!(topic.name(), "Intro");
        assert!(topic.notes().is_empty());
        assert_eq!(topic.number(), 3);
    }

    #[test]
    fn decode_ignores_presentation_fields() {
        let raw = r#"{"name":"Intro","notes":["a"],"number":0,"line":null,"frame":null,"dndlist":null}"#;
        let topic: Topic = serde_json::from_str(raw).expect("legacy record should decode");
        assert_eq!(topic.notes(), ["a".to_string()]);

        let encoded = serde_json::to_string(&topic).unwrap();
        assert_eq!(encoded, r#"{"name":"Intro","notes":["a"],"number":0}"#);
    }
}
