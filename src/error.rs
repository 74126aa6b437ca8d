use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    #[error("expected OPTION=VALUE (e.g. USB_UAS=m), got: {0}")]
    InvalidAssignment(String),
    #[error("layout file not found: {}", .0.display())]
    LayoutNotFound(PathBuf),
    #[error("{} not found", .0.display())]
    ReviewInputMissing(PathBuf),
    #[error("failed to write {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
