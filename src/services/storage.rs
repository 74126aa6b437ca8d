use crate::error::TrackError;
use std::path::Path;

/// Reads a managed file; a file that does not exist is `None`, not an error.
pub fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file not found, skipping");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Destination for applied change records.
pub trait PlanWriter {
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), TrackError>;
}

/// Writes straight to the local filesystem; last writer wins.
pub struct FsWriter;

impl PlanWriter for FsWriter {
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), TrackError> {
        std::fs::write(path, contents).map_err(|source| TrackError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}
