//! Write-only outline text export.
//!
//! Each topic, in ascending `number` order, renders as `<name>:` followed by
//! one tab-indented line per note (each trailed by a blank line) and a final
//! blank line closing the block.

use super::{write_atomically, CodecResult};
use crate::model::project::Project;
use log::{error, info};
use std::path::Path;

/// Renders the outline text for `project`.
pub fn render_outline(project: &Project) -> String {
    let mut out = String::new();
    for topic in project.topics_in_order() {
        out.push_str(topic.name());
        out.push_str(":\n");
        for note in topic.notes() {
            out.push('\t');
            out.push_str(note);
            out.push_str("\n\n");
        }
        out.push('\n');
    }
    out
}

/// Writes the outline text for `project` to `path`.
pub fn export_outline(project: &Project, path: impl AsRef<Path>) -> CodecResult<()> {
    let path = path.as_ref();
    let result = write_atomically(path, &render_outline(project));
    match &result {
        Ok(()) => info!(
            "event=outline_export module=codec status=ok topics={}",
            project.topic_count()
        ),
        Err(err) => error!(
            "event=outline_export module=codec status=error path={} error={}",
            path.display(),
            err.detail()
        ),
    }
    result
}
