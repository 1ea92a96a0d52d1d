//! Selective extraction of the image entries of a container.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use figex_fs::AtomicWriteOptions;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::options::{ExtractOptions, Progress};
use crate::report::{ExtractReport, ExtractedEntry};
use crate::sanitize::{EntryClass, classify, normalize_entry_path};

/// Open `container` and extract its image entries into `destination`.
pub fn extract_images(
    container: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let container = container.as_ref();
    let file = File::open(container).map_err(|source| Error::Open {
        path: container.to_path_buf(),
        source,
    })?;
    extract_from_reader(BufReader::new(file), destination.as_ref(), options)
}

/// Extract every file entry whose normalized path starts with the options'
/// prefix into `destination/<basename>`.
///
/// Existing files are overwritten; when two entries share a basename the
/// later one wins. Each file is written to a temp name and renamed into
/// place.
pub fn extract_from_reader<R: Read + Seek>(
    reader: R,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let mut archive = zip::ZipArchive::new(reader).map_err(Error::Corrupted)?;

    ensure_directory(destination)?;

    let mut report = ExtractReport {
        total_entries: archive.len(),
        ..ExtractReport::default()
    };

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|source| Error::EntryUnreadable { index, source })?;

        let raw_path = file.name().to_owned();
        let normalized = normalize_entry_path(&raw_path);

        let basename = match classify(&normalized, &options.prefix, file.is_dir()) {
            EntryClass::Outside => {
                report.ignored += 1;
                continue;
            }
            EntryClass::Directory => continue,
            EntryClass::Unsafe => {
                report.found += 1;
                report.rejected += 1;
                warn!("skipping entry with unusable name: {raw_path:?}");
                continue;
            }
            EntryClass::Asset(name) => name.to_owned(),
        };
        report.found += 1;

        let target_path = destination.join(&basename);
        let write_options = match file.unix_mode() {
            Some(mode) => AtomicWriteOptions::new().permissions(entry_mode(mode)),
            None => AtomicWriteOptions::new(),
        };
        let size = figex_fs::atomic_write_from(&target_path, &mut file, write_options)
            .map_err(|source| Error::ExtractionFailed {
                entry: raw_path.clone(),
                source,
            })?;
        debug!("extracted {raw_path} -> {} ({size} bytes)", target_path.display());

        report.total_bytes += size;

        if let Some(ref callback) = options.on_progress {
            callback(Progress {
                entries_processed: index + 1,
                entries_total:     report.total_entries,
                current:           target_path.clone(),
            });
        }

        report.entries.push(ExtractedEntry {
            archive_path: raw_path,
            target_path,
            size,
        });
    }

    Ok(report)
}

/// Permission bits of an archive entry, always owner read/write so later
/// stages can rename and replace the file.
fn entry_mode(mode: u32) -> u32 { (mode & 0o777) | 0o600 }

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
