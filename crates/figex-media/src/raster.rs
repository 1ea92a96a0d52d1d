//! Conditional resize and re-encode of raster assets.
//!
//! The transformer always leaves exactly one file behind: either the
//! transformed output, or the untouched original under its detected
//! extension when anything in decode/resize/encode/write fails.

use std::path::{Path, PathBuf};

use figex_fs::AtomicWriteOptions;
use image::DynamicImage;
use image::imageops::FilterType;
use serde::Serialize;
use tracing::debug;

use crate::encode;
use crate::error::{Result, TransformError};
use crate::media::MediaType;
use crate::options::{TargetEncoding, TransformOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width:  u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self { Self { width, height } }

    fn of(image: &DynamicImage) -> Self { Self::new(image.width(), image.height()) }
}

/// A successful transformation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transformed {
    pub output:      PathBuf,
    pub source_size: Dimensions,
    pub output_size: Dimensions,
    pub resized:     bool,
    /// `false` when the original bytes were kept as-is.
    pub reencoded:   bool,
}

#[derive(Debug)]
pub enum RasterOutcome {
    Transformed(Transformed),
    /// The original bytes were renamed to `output` after `error`.
    FellBack { output: PathBuf, error: TransformError },
}

impl RasterOutcome {
    pub fn output(&self) -> &Path {
        match self {
            Self::Transformed(t) => &t.output,
            Self::FellBack { output, .. } => output,
        }
    }
}

/// Downscale factor that fits `width × height` inside the configured
/// bounds. An unset bound does not constrain; the result never exceeds 1.
pub fn compute_scale(width: u32, height: u32, max_width: Option<u32>, max_height: Option<u32>) -> f64 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    let ratio = |bound: Option<u32>, size: u32| bound.map_or(1.0, |b| f64::from(b) / f64::from(size));
    ratio(max_width, width).min(ratio(max_height, height)).min(1.0)
}

/// Apply `scale` to `size`, rounding each axis and keeping at least 1 px.
pub fn scaled_dimensions(size: Dimensions, scale: f64) -> Dimensions {
    if scale >= 1.0 {
        return size;
    }
    let axis = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    Dimensions::new(axis(size.width), axis(size.height))
}

/// `dir/abc123` -> `dir/abc123.<extension>`.
pub fn with_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}

/// Resize and/or re-encode the asset at `path` per `options`, replacing it.
///
/// `original` is the sniffed type of the file. Transformation failures are
/// not errors: the asset is renamed to `<name>.<original extension>` with its
/// bytes untouched and [`RasterOutcome::FellBack`] is returned. `Err` means
/// even that rename failed.
pub fn transform_raster(
    path: &Path,
    original: MediaType,
    options: &TransformOptions,
) -> figex_fs::Result<RasterOutcome> {
    match try_transform(path, original, options) {
        Ok(transformed) => Ok(RasterOutcome::Transformed(transformed)),
        Err(error) => {
            let output = with_extension(path, original.extension());
            figex_fs::rename_over(path, &output)?;
            Ok(RasterOutcome::FellBack { output, error })
        }
    }
}

fn try_transform(path: &Path, original: MediaType, options: &TransformOptions) -> Result<Transformed> {
    let bytes = figex_fs::atomic_read(path).map_err(TransformError::Read)?;
    let format = original
        .image_format()
        .ok_or(TransformError::Unsupported(original))?;
    let image = image::load_from_memory_with_format(&bytes, format)
        .map_err(|source| TransformError::Decode { media: original, source })?;

    let source_size = Dimensions::of(&image);
    let scale = compute_scale(
        source_size.width,
        source_size.height,
        options.max_width.map(|v| v.get()),
        options.max_height.map(|v| v.get()),
    );
    let output_size = scaled_dimensions(source_size, scale);
    let resized = output_size != source_size;

    let image = if resized {
        debug!(
            "resizing {} from {}x{} to {}x{}",
            path.display(),
            source_size.width,
            source_size.height,
            output_size.width,
            output_size.height
        );
        image.resize_exact(output_size.width, output_size.height, FilterType::Lanczos3)
    } else {
        image
    };

    let (extension, encoded) = match options.target {
        TargetEncoding::Webp => ("webp", Some(encode::webp(&image, options.quality)?)),
        TargetEncoding::Avif => (
            "avif",
            Some(encode::avif(&image, options.quality, options.avif_speed)?),
        ),
        TargetEncoding::None if resized => (
            original.extension(),
            Some(encode::same_format(&image, original, options.quality)?),
        ),
        TargetEncoding::None => (original.extension(), None),
    };

    let output = with_extension(path, extension);
    let reencoded = encoded.is_some();
    match encoded {
        Some(data) => {
            figex_fs::atomic_write(&output, &data, AtomicWriteOptions::new())
                .map_err(TransformError::Write)?;
            figex_fs::remove_file(path).map_err(TransformError::Write)?;
        }
        None => figex_fs::rename_over(path, &output).map_err(TransformError::Write)?,
    }

    Ok(Transformed {
        output,
        source_size,
        output_size,
        resized,
        reencoded,
    })
}
