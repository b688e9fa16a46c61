//! File codecs for outliner projects.
//!
//! # Responsibility
//! - Round-trip the project model through the two-line `.otln` format.
//! - Render the write-only outline text export.
//! - Read raw note lists for a fresh import.
//!
//! # Invariants
//! - Writes go through a sibling temp file and an atomic rename.
//! - Loads either return a complete project or an error, never a partial one.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub mod outline;
pub mod project_file;
pub mod raw_notes;

pub use outline::{export_outline, render_outline};
pub use project_file::{load_project, project_path, save_project, PROJECT_EXTENSION};
pub use raw_notes::read_raw_notes;

pub type CodecResult<T> = Result<T, CodecError>;

/// Errors from reading or writing outliner files.
#[derive(Debug)]
pub enum CodecError {
    /// Project path does not carry the `.otln` extension.
    InvalidFormat(PathBuf),
    /// Underlying file system failure.
    Io(std::io::Error),
    /// A project line is not valid JSON for its expected shape.
    Json(serde_json::Error),
    /// The project file ended before the named line.
    MissingLine(&'static str),
    /// Decoded data violates a model invariant.
    InvalidData(String),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(path) => write!(
                f,
                "`{}` is not an outliner project; expected a .{PROJECT_EXTENSION} file",
                path.display()
            ),
            Self::Io(_) => write!(f, "file access failed"),
            Self::Json(_) => write!(f, "malformed project data"),
            Self::MissingLine(line) => write!(f, "project file is missing the {line} line"),
            Self::InvalidData(message) => write!(f, "invalid project data: {message}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidFormat(_) | Self::MissingLine(_) | Self::InvalidData(_) => None,
        }
    }
}

impl CodecError {
    /// Message plus the underlying cause, on one line for log events.
    pub(crate) fn detail(&self) -> String {
        match self.source() {
            Some(cause) => format!("{self}: {cause}"),
            None => self.to_string(),
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<tempfile::PersistError> for CodecError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// Writes `contents` to `path` in one buffered pass and renames it into place.
///
/// The temp file lives next to `path` so the rename stays on one file system.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> CodecResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_atomically, CodecError};
    use std::error::Error;

    #[test]
    fn atomic_write_replaces_content_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");

        write_atomically(&target, "first").unwrap();
        write_atomically(&target, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "second");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn atomic_write_into_missing_directory_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.txt");

        let err = write_atomically(&target, "data").unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn wrapped_cause_is_only_reported_by_source() {
        let err = CodecError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        ));
        assert_eq!(err.to_string(), "file access failed");
        assert_eq!(err.source().unwrap().to_string(), "read-only volume");
        assert_eq!(err.detail(), "file access failed: read-only volume");
    }
}
