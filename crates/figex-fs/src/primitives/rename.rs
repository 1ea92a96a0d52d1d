use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Rename `from` to `to`, replacing any file already at `to`.
///
/// Both paths are expected on the same filesystem; the rename is a single
/// atomic step on every supported platform.
pub fn rename_over(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    fs::rename(from, to).map_err(|source| Error::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

pub fn remove_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::remove_file(path).map_err(|source| Error::Remove {
        path: path.to_path_buf(),
        source,
    })
}
