use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open container '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("container is not a readable zip archive: {0}")]
    Corrupted(#[source] zip::result::ZipError),

    #[error("failed to read entry #{index}: {source}")]
    EntryUnreadable {
        index:  usize,
        source: zip::result::ZipError,
    },

    #[error("failed to extract '{entry}': {source}")]
    ExtractionFailed {
        entry:  String,
        source: figex_fs::Error,
    },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
