//! Core logic for the outliner.
//!
//! Owns the project model (unassigned note queue + topic table), its file
//! codecs, and the session facade a presentation layer drives.

pub mod codec;
pub mod logging;
pub mod model;
pub mod service;

pub use codec::{
    export_outline, load_project, project_path, read_raw_notes, render_outline, save_project,
    CodecError, CodecResult, PROJECT_EXTENSION,
};
pub use logging::{init_logging, logging_status, LogLevel, LoggingConfig, LoggingError};
pub use model::project::{Project, ProjectError};
pub use model::topic::Topic;
pub use service::arrangement::{Arrangement, ArrangementError, ListArrangement};
pub use service::outliner_service::{OutlinerSession, SessionError, SessionResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
