use std::fs;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Temp files live beside their target so the final rename never crosses a
/// filesystem boundary. The suffix gives them an extension, which keeps them
/// out of any scan for extensionless files.
const TMP_PREFIX: &str = ".tmp.";
const TMP_SUFFIX: &str = ".figex";

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Unix mode for the placed file. `None` means 0o644.
    pub permissions: Option<u32>,
}

impl Options {
    pub fn new() -> Self { Self::default() }

    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }
}

/// Write `content` to `path` through a sibling temp file and a rename.
///
/// Readers observe either the previous file or the complete new one. An
/// existing file at `path` is replaced.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8], options: Options) -> Result<()> {
    atomic_write_from(path, &mut io::Cursor::new(content), options).map(|_| ())
}

/// Stream `reader` into `path` with the same guarantees as [`atomic_write`].
///
/// Returns the number of bytes written.
pub fn atomic_write_from<R: Read + ?Sized>(
    path: impl AsRef<Path>,
    reader: &mut R,
    options: Options,
) -> Result<u64> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => return Err(Error::NoParent(path.to_path_buf())),
    };

    let write_err = |source: io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(TMP_PREFIX)
        .suffix(TMP_SUFFIX)
        .tempfile_in(parent)
        .map_err(write_err)?;

    let written = io::copy(reader, tmp.as_file_mut()).map_err(write_err)?;
    tmp.as_file_mut().flush().map_err(write_err)?;

    apply_permissions(&tmp, options.permissions).map_err(write_err)?;

    // A failed persist drops the temp file, which removes it.
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(written)
}

#[cfg(unix)]
fn apply_permissions(tmp: &NamedTempFile, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    // tempfile creates 0o600; widen to the usual default unless told otherwise.
    let mode = mode.unwrap_or(0o644);
    fs::set_permissions(tmp.path(), fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_permissions(_tmp: &NamedTempFile, _mode: Option<u32>) -> io::Result<()> { Ok(()) }

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read at most `limit` leading bytes of `path`.
pub fn read_head(path: impl AsRef<Path>, limit: usize) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let mut head = Vec::with_capacity(limit);
    file.take(limit as u64).read_to_end(&mut head).map_err(read_err)?;
    Ok(head)
}
