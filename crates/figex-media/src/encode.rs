use std::io::Cursor;

use image::DynamicImage;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;

use crate::error::{Result, TransformError};
use crate::media::MediaType;
use crate::options::Quality;

/// Lossy WebP through libwebp.
pub(crate) fn webp(image: &DynamicImage, quality: Quality) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    let memory = encoder
        .encode_simple(false, f32::from(quality.get()))
        .map_err(|e| TransformError::Encode {
            format: "webp",
            reason: format!("{e:?}"),
        })?;
    Ok(memory.to_vec())
}

pub(crate) fn avif(image: &DynamicImage, quality: Quality, speed: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = AvifEncoder::new_with_speed_quality(&mut out, speed, quality.get());
    DynamicImage::ImageRgba8(image.to_rgba8())
        .write_with_encoder(encoder)
        .map_err(|e| encode_error("avif", e))?;
    Ok(out)
}

/// Re-encode in the asset's own format after a resize.
pub(crate) fn same_format(image: &DynamicImage, media: MediaType, quality: Quality) -> Result<Vec<u8>> {
    match media {
        MediaType::Webp => webp(image, quality),
        MediaType::Jpeg => {
            let mut out = Vec::new();
            let encoder = JpegEncoder::new_with_quality(&mut out, quality.get());
            // JPEG has no alpha channel.
            DynamicImage::ImageRgb8(image.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|e| encode_error("jpg", e))?;
            Ok(out)
        }
        other => {
            let format = other
                .image_format()
                .ok_or(TransformError::Unsupported(other))?;
            let mut out = Cursor::new(Vec::new());
            image
                .write_to(&mut out, format)
                .map_err(|e| encode_error(other.extension(), e))?;
            Ok(out.into_inner())
        }
    }
}

fn encode_error(format: &'static str, error: image::ImageError) -> TransformError {
    TransformError::Encode {
        format,
        reason: error.to_string(),
    }
}
