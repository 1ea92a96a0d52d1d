use std::io;
use std::path::PathBuf;

use crate::config::ConfigError;

/// The container path cannot be used as input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),

    #[error("input is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("input file is empty: {0}")]
    Empty(PathBuf),

    #[error("input file is unreadable: {path}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },
}

/// Run-fatal failures. Anything scoped to a single asset is reported in
/// [`crate::AssetOutcome`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Archive(#[from] figex_archive::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create output directory '{path}': {source}")]
    Output { path: PathBuf, source: io::Error },

    #[error("failed to scan output directory '{path}': {source}")]
    Scan { path: PathBuf, source: io::Error },

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
