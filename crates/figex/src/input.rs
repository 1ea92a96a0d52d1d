use std::ffi::OsStr;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::InputError;

/// Directory name used when the input has no usable file stem.
const FALLBACK_OUTPUT: &str = "figex-out";
const COLLISION_SUFFIX: &str = "-images";

/// Check that `path` is a non-empty, readable regular file and return its
/// size. An unexpected extension only warns.
pub fn validate_input(path: &Path) -> Result<u64, InputError> {
    let metadata = fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _ => InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if !metadata.is_file() {
        return Err(InputError::NotAFile(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(InputError::Empty(path.to_path_buf()));
    }
    File::open(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if !has_container_extension(path) {
        warn!(
            "{} does not have a .fig or .zip extension; treating it as a zip container",
            path.display()
        );
    }
    Ok(metadata.len())
}

pub fn has_container_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fig") || ext.eq_ignore_ascii_case("zip"))
}

/// `design.fig` extracts into `<cwd>/design` unless `--out` says otherwise.
///
/// An extensionless input would collide with its own stem; it gets
/// `<stem>-images` instead.
pub fn default_output_dir(input: &Path, cwd: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(OsStr::new(FALLBACK_OUTPUT));
    let candidate = cwd.join(stem);
    if candidate != cwd.join(input) {
        return candidate;
    }
    let mut name = stem.to_os_string();
    name.push(COLLISION_SUFFIX);
    cwd.join(name)
}
