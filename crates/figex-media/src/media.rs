use std::fmt;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Media types the sniffer can recognize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
    Tiff,
    Ico,
    Cur,
    Avif,
    Heic,
    Jxl,
    Psd,
    Pdf,
    Eps,
    Svg,
}

impl MediaType {
    /// File extension written for this type.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
            Self::Tiff => "tif",
            Self::Ico => "ico",
            Self::Cur => "cur",
            Self::Avif => "avif",
            Self::Heic => "heic",
            Self::Jxl => "jxl",
            Self::Psd => "psd",
            Self::Pdf => "pdf",
            Self::Eps => "eps",
            Self::Svg => "svg",
        }
    }

    pub fn is_vector(self) -> bool { matches!(self, Self::Svg | Self::Eps) }

    /// Codec used to decode and re-encode this type, if one is compiled in.
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            Self::Png => Some(ImageFormat::Png),
            Self::Jpeg => Some(ImageFormat::Jpeg),
            Self::Gif => Some(ImageFormat::Gif),
            Self::Webp => Some(ImageFormat::WebP),
            Self::Bmp => Some(ImageFormat::Bmp),
            Self::Tiff => Some(ImageFormat::Tiff),
            Self::Ico => Some(ImageFormat::Ico),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.extension()) }
}
