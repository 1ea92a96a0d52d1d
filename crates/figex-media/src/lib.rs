//! Type sniffing and raster transformation for extracted Figma assets.
//!
//! - [`sniff`] classifies a byte buffer as raster, vector, or undetermined.
//! - [`transform_raster`] resizes and/or re-encodes one raster file in place,
//!   falling back to a plain rename when the image cannot be processed.
//! - [`TransformOptions`] is the immutable run-wide configuration both
//!   consume.

pub use error::{Result, TransformError};
pub use media::MediaType;
pub use options::{DEFAULT_AVIF_SPEED, InvalidQuality, Quality, TargetEncoding, TransformOptions};
pub use raster::{
    Dimensions, RasterOutcome, Transformed, compute_scale, scaled_dimensions, transform_raster,
    with_extension,
};
pub use sniff::{Detection, TEXT_SNIFF_LEN, by_markup, by_signature, sniff};

mod encode;
mod error;
mod media;
mod options;
mod raster;
mod sniff;
