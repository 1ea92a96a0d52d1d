//! End-to-end run: validate, extract, then sniff and place every asset.
//!
//! Extraction is sequential. Placement fans out over a rayon pool; each
//! asset is handled independently and its result lands in the report, so a
//! bad asset never stops the batch.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figex_archive::{ExtractOptions, Progress};
use figex_media::{Detection, MediaType, RasterOutcome, TEXT_SNIFF_LEN, TransformOptions};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::input::validate_input;
use crate::report::{AssetOutcome, AssetReport, RunReport};

pub fn run(settings: &Settings) -> Result<RunReport> {
    let input = &settings.input;
    let output = &settings.output;

    let size = validate_input(input)?;
    debug!("input {} is {size} bytes", input.display());

    fs::create_dir_all(output).map_err(|source| Error::Output {
        path: output.clone(),
        source,
    })?;

    let magic_anomaly = check_container(input);

    let progress = Arc::new(|p: Progress| {
        debug!(
            "[{}/{} {:.0}%] extracted {}",
            p.entries_processed,
            p.entries_total,
            p.percentage(),
            p.current.display()
        );
    });
    let options = ExtractOptions::default()
        .prefix(&settings.prefix)
        .on_progress(progress);
    let extraction = figex_archive::extract_images(input, output, &options)?;

    info!(
        "found {} image entries, extracted {}",
        extraction.found,
        extraction.extracted()
    );
    if extraction.is_empty() {
        warn!("no images found under '{}' in {}", settings.prefix, input.display());
    }

    let candidates = extensionless_files(output)?;
    debug!("{} extensionless files to place", candidates.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.jobs.get())
        .build()?;
    let transform = &settings.transform;
    let mut assets: Vec<AssetReport> = pool.install(|| {
        candidates
            .par_iter()
            .map(|path| process_asset(path, transform))
            .collect()
    });
    assets.sort_by(|a, b| a.source.cmp(&b.source));

    Ok(RunReport {
        input: input.clone(),
        output: output.clone(),
        magic_anomaly,
        entries_total: extraction.total_entries,
        found: extraction.found,
        extracted: extraction.extracted(),
        ignored: extraction.ignored,
        rejected: extraction.rejected,
        assets,
    })
}

/// Advisory header check. Returns whether the header looked wrong.
fn check_container(input: &Path) -> bool {
    match figex_archive::precheck(input) {
        Ok(check) if check.is_anomaly() => {
            match check.format {
                Some(format) => warn!(
                    "{} is a {format:?} document without a zip wrapper",
                    input.display()
                ),
                None => warn!(
                    "{} has unexpected magic bytes [{}]; attempting extraction anyway",
                    input.display(),
                    check.magic_hex()
                ),
            }
            true
        }
        Ok(check) => {
            debug!("container format {:?}", check.format);
            false
        }
        Err(e) => {
            warn!("could not read header of {}: {e}", input.display());
            false
        }
    }
}

/// Immediate regular files in `dir` whose name carries no extension.
pub fn extensionless_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let scan_error = |source| Error::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        let file_type = entry.file_type().map_err(scan_error)?;
        let path = entry.path();
        if file_type.is_file() && path.extension().is_none() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Sniff one extracted asset and give it its final name and content.
pub fn process_asset(path: &Path, options: &TransformOptions) -> AssetReport {
    let outcome = place(path, options).unwrap_or_else(|e| {
        warn!("failed to process {}: {e}", path.display());
        AssetOutcome::Failed {
            reason: e.to_string(),
        }
    });
    AssetReport {
        source: path.to_path_buf(),
        outcome,
    }
}

fn place(path: &Path, options: &TransformOptions) -> figex_fs::Result<AssetOutcome> {
    let head = figex_fs::read_head(path, TEXT_SNIFF_LEN)?;
    let detection = figex_media::sniff(&head);

    match detection {
        Detection::Undetermined => {
            warn!(
                "could not determine the type of {}; left untouched",
                path.display()
            );
            Ok(AssetOutcome::Undetermined)
        }
        Detection::Raster(media) if options.needs_processing() => transform(path, media, options),
        Detection::Raster(media) | Detection::Vector(media) => rename(path, media),
    }
}

fn rename(path: &Path, media: MediaType) -> figex_fs::Result<AssetOutcome> {
    let output = figex_media::with_extension(path, media.extension());
    figex_fs::rename_over(path, &output)?;
    info!("{} -> {}", file_name(path), file_name(&output));
    Ok(AssetOutcome::Renamed {
        output,
        media,
        vector: media.is_vector(),
    })
}

fn transform(path: &Path, media: MediaType, options: &TransformOptions) -> figex_fs::Result<AssetOutcome> {
    match figex_media::transform_raster(path, media, options)? {
        RasterOutcome::Transformed(t) => {
            info!(
                "{} -> {} ({}x{} -> {}x{})",
                file_name(path),
                file_name(&t.output),
                t.source_size.width,
                t.source_size.height,
                t.output_size.width,
                t.output_size.height
            );
            Ok(AssetOutcome::Transformed {
                output: t.output,
                media,
                source_size: t.source_size,
                output_size: t.output_size,
                resized: t.resized,
                reencoded: t.reencoded,
            })
        }
        RasterOutcome::FellBack { output, error } => {
            warn!(
                "could not transform {}: {error}; kept original as {}",
                file_name(path),
                file_name(&output)
            );
            Ok(AssetOutcome::FellBack {
                output,
                media,
                reason: error.to_string(),
            })
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
