use crate::media::MediaType;

/// Why a raster asset could not be transformed.
///
/// Never fatal: the transformer keeps the original bytes under their detected
/// extension and hands this back for reporting.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Read(figex_fs::Error),

    #[error("no raster codec for {0} images")]
    Unsupported(MediaType),

    #[error("failed to decode {media} image: {source}")]
    Decode {
        media:  MediaType,
        source: image::ImageError,
    },

    #[error("failed to encode {format}: {reason}")]
    Encode {
        format: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Write(figex_fs::Error),
}

pub type Result<T> = std::result::Result<T, TransformError>;
