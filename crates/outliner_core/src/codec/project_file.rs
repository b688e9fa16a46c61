//! Two-line JSON project file (`.otln`).
//!
//! Line 1 is the unassigned queue as a JSON array of strings, head first.
//! Line 2 is a JSON object mapping topic name to `{name, notes, number}`.

use super::{write_atomically, CodecError, CodecResult};
use crate::model::project::Project;
use crate::model::topic::Topic;
use log::{error, info};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File extension recognized for project files.
pub const PROJECT_EXTENSION: &str = "otln";

/// Topic table serialized with keys in ascending `number` order.
struct OrderedTopics<'a>(Vec<&'a Topic>);

impl Serialize for OrderedTopics<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for topic in &self.0 {
            map.serialize_entry(topic.name(), topic)?;
        }
        map.end()
    }
}

/// Encodes `project` into the two-line project text.
pub fn encode_project(project: &Project) -> CodecResult<String> {
    let queue = serde_json::to_string(project.notes())?;
    let topics = serde_json::to_string(&OrderedTopics(project.topics_in_order()))?;
    Ok(format!("{queue}\n{topics}\n"))
}

/// Decodes project text produced by [`encode_project`] or older writers.
///
/// Topic records may carry extra fields; they are ignored.
pub fn decode_project(contents: &str) -> CodecResult<Project> {
    let mut lines = contents.lines();
    let queue_line = lines.next().ok_or(CodecError::MissingLine("note queue"))?;
    let topics_line = lines.next().ok_or(CodecError::MissingLine("topic table"))?;

    let notes: VecDeque<String> = serde_json::from_str(queue_line)?;
    let topics: HashMap<String, Topic> = serde_json::from_str(topics_line)?;

    if let Some((key, topic)) = topics.iter().find(|(key, topic)| key.as_str() != topic.name()) {
        return Err(CodecError::InvalidData(format!(
            "topic stored under `{key}` is named `{}`",
            topic.name()
        )));
    }

    Ok(Project::from_parts(notes, topics, None))
}

/// Resolves the file a project should be saved to.
///
/// A path without an extension gets `.otln` appended; any other extension is
/// rejected with `InvalidFormat`, since [`load_project`] would refuse it.
pub fn project_path(path: impl AsRef<Path>) -> CodecResult<PathBuf> {
    let path = path.as_ref();
    if path.extension().is_none() {
        return Ok(path.with_extension(PROJECT_EXTENSION));
    }
    if has_project_extension(path) {
        Ok(path.to_path_buf())
    } else {
        Err(CodecError::InvalidFormat(path.to_path_buf()))
    }
}

/// Writes `project` to `path`.
///
/// Callers commit the presentation order first; this function writes the
/// model as it stands.
///
/// # Errors
/// - `InvalidFormat` when the path does not end in `.otln`; nothing is written.
pub fn save_project(project: &Project, path: impl AsRef<Path>) -> CodecResult<()> {
    let path = path.as_ref();
    if !has_project_extension(path) {
        return Err(CodecError::InvalidFormat(path.to_path_buf()));
    }
    let started_at = Instant::now();

    let result = encode_project(project).and_then(|contents| write_atomically(path, &contents));
    match &result {
        Ok(()) => info!(
            "event=project_save module=codec status=ok topics={} queued={} duration_ms={}",
            project.topic_count(),
            project.notes().len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=project_save module=codec status=error path={} error={}",
            path.display(),
            err.detail()
        ),
    }
    result
}

/// Reads a project from `path`.
///
/// # Errors
/// - `InvalidFormat` when the path does not end in `.otln`; no I/O happens.
/// - `Io`, `Json`, `MissingLine` or `InvalidData` when reading fails.
pub fn load_project(path: impl AsRef<Path>) -> CodecResult<Project> {
    let path = path.as_ref();
    if !has_project_extension(path) {
        return Err(CodecError::InvalidFormat(path.to_path_buf()));
    }

    let result = std::fs::read_to_string(path)
        .map_err(CodecError::from)
        .and_then(|contents| decode_project(&contents));

    match result {
        Ok(mut project) => {
            project.set_filename(path);
            info!(
                "event=project_load module=codec status=ok topics={} queued={}",
                project.topic_count(),
                project.notes().len()
            );
            Ok(project)
        }
        Err(err) => {
            error!(
                "event=project_load module=codec status=error path={} error={}",
                path.display(),
                err.detail()
            );
            Err(err)
        }
    }
}

fn has_project_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == PROJECT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::{decode_project, encode_project, has_project_extension, project_path, save_project};
    use crate::codec::CodecError;
    use crate::model::project::Project;
    use std::path::{Path, PathBuf};

    #[test]
    fn encode_emits_exactly_two_lines_in_number_order() {
        let mut project = Project::new();
        project.load_notes_from_raw_list("left");
        project.create_topic("A").unwrap();
        project.create_topic("B").unwrap();
        project.recompute_topic_order(&["B", "A"]).unwrap();

        let encoded = encode_project(&project).unwrap();
        let lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"["left"]"#);
        assert_eq!(
            lines[1],
            r#"{"B":{"name":"B","notes":[],"number":0},"A":{"name":"A","notes":[],"number":1}}"#
        );
    }

    #[test]
    fn decode_accepts_file_without_trailing_newline() {
        let contents = "[\"q\"]\n{\"T\": {\"name\": \"T\", \"notes\": [\"n\"], \"number\": 0, \"dndlist\": null}}";
        let project = decode_project(contents).unwrap();
        assert_eq!(project.current_note(), Some("q"));
        assert_eq!(project.topic("T").unwrap().notes(), ["n"]);
    }

    #[test]
    fn decode_rejects_missing_topic_line() {
        let err = decode_project("[]\n").unwrap_err();
        assert!(matches!(err, CodecError::MissingLine("topic table")));
    }

    #[test]
    fn decode_rejects_key_name_mismatch() {
        let contents = "[]\n{\"A\": {\"name\": \"B\", \"notes\": [], \"number\": 0}}";
        assert!(matches!(
            decode_project(contents),
            Err(CodecError::InvalidData(_))
        ));
    }

    #[test]
    fn decode_rejects_wrong_shapes() {
        assert!(matches!(
            decode_project("{}\n{}"),
            Err(CodecError::Json(_))
        ));
        assert!(matches!(
            decode_project("[]\n{\"A\": {\"name\": \"A\"}}"),
            Err(CodecError::Json(_))
        ));
    }

    #[test]
    fn extension_check_is_exact() {
        assert!(has_project_extension(Path::new("/tmp/essay.otln")));
        assert!(!has_project_extension(Path::new("/tmp/essay.txt")));
        assert!(!has_project_extension(Path::new("/tmp/otln")));
    }

    #[test]
    fn project_path_appends_missing_extension() {
        assert_eq!(
            project_path("/tmp/essay").unwrap(),
            PathBuf::from("/tmp/essay.otln")
        );
        assert_eq!(
            project_path("/tmp/essay.otln").unwrap(),
            PathBuf::from("/tmp/essay.otln")
        );
        assert!(matches!(
            project_path("/tmp/notes.txt"),
            Err(CodecError::InvalidFormat(_))
        ));
    }

    #[test]
    fn save_refuses_foreign_extension_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("notes.txt");

        let err = save_project(&Project::new(), &target).unwrap_err();
        assert!(matches!(err, CodecError::InvalidFormat(_)));
        assert!(!target.exists());
    }
}
