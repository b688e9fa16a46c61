//! Raw note list import: one note per line, blank lines dropped.

use super::CodecResult;
use crate::model::project::parse_raw_notes;
use log::info;
use std::path::Path;

/// Reads the non-blank lines of the text file at `path`, in order.
pub fn read_raw_notes(path: impl AsRef<Path>) -> CodecResult<Vec<String>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let notes: Vec<String> = parse_raw_notes(&contents).collect();
    info!(
        "event=raw_notes_read module=codec status=ok notes={}",
        notes.len()
    );
    Ok(notes)
}
