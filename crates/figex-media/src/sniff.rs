//! Content-based type detection for extensionless assets.
//!
//! Detection runs an ordered chain of independent classifiers over the
//! leading bytes. The first one to recognize the buffer decides; when none
//! does, the result is [`Detection::Undetermined`].

use serde::Serialize;

use crate::media::MediaType;

/// Bytes inspected by the markup classifier.
pub const TEXT_SNIFF_LEN: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "media", rename_all = "lowercase")]
pub enum Detection {
    Raster(MediaType),
    Vector(MediaType),
    Undetermined,
}

impl Detection {
    pub fn media(self) -> Option<MediaType> {
        match self {
            Self::Raster(media) | Self::Vector(media) => Some(media),
            Self::Undetermined => None,
        }
    }

    pub fn extension(self) -> Option<&'static str> { self.media().map(MediaType::extension) }

    pub fn is_vector(self) -> bool { matches!(self, Self::Vector(_)) }
}

impl From<MediaType> for Detection {
    fn from(media: MediaType) -> Self {
        if media.is_vector() {
            Self::Vector(media)
        } else {
            Self::Raster(media)
        }
    }
}

type Classifier = fn(&[u8]) -> Option<MediaType>;

const CLASSIFIERS: &[Classifier] = &[by_signature, by_markup];

/// Classify `bytes`. Pure: the same buffer always yields the same result.
pub fn sniff(bytes: &[u8]) -> Detection {
    CLASSIFIERS
        .iter()
        .find_map(|classify| classify(bytes))
        .map_or(Detection::Undetermined, Detection::from)
}

/// Magic-number table for image and image-bearing container formats.
pub fn by_signature(data: &[u8]) -> Option<MediaType> {
    match data {
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(MediaType::Png),
        [0xFF, 0xD8, 0xFF, ..] => Some(MediaType::Jpeg),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(MediaType::Gif),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(MediaType::Webp),
        [_, _, _, _, b'f', b't', b'y', b'p', brand @ ..] => iso_brand(brand),
        [0x00, 0x00, 0x00, 0x0C, b'J', b'X', b'L', b' ', 0x0D, 0x0A, 0x87, 0x0A, ..]
        | [0xFF, 0x0A, ..] => Some(MediaType::Jxl),
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(MediaType::Tiff),
        [0x00, 0x00, 0x01, 0x00, ..] => Some(MediaType::Ico),
        [0x00, 0x00, 0x02, 0x00, ..] => Some(MediaType::Cur),
        [b'8', b'B', b'P', b'S', ..] => Some(MediaType::Psd),
        [b'%', b'P', b'D', b'F', ..] => Some(MediaType::Pdf),
        [0xC5, 0xD0, 0xD3, 0xC6, ..] => Some(MediaType::Eps),
        [b'%', b'!', b'P', b'S', b'-', b'A', b'd', b'o', b'b', b'e', b'-', rest @ ..]
            if first_line(rest).windows(4).any(|w| w == b"EPSF") =>
        {
            Some(MediaType::Eps)
        }
        [b'B', b'M', ..] => Some(MediaType::Bmp),
        _ => None,
    }
}

/// Major brand of an ISO base media file (`ftyp` box).
fn iso_brand(brand: &[u8]) -> Option<MediaType> {
    match brand.get(..4)? {
        b"avif" | b"avis" => Some(MediaType::Avif),
        b"heic" | b"heix" | b"hevc" | b"hevx" | b"mif1" | b"msf1" => Some(MediaType::Heic),
        _ => None,
    }
}

fn first_line(data: &[u8]) -> &[u8] {
    let end = data
        .iter()
        .position(|&b| b == b'\n' || b == b'\r')
        .unwrap_or(data.len());
    &data[..end]
}

/// SVG written as text, with or without an XML prolog.
pub fn by_markup(data: &[u8]) -> Option<MediaType> {
    let head = &data[..data.len().min(TEXT_SNIFF_LEN)];
    let text = String::from_utf8_lossy(head);
    let is_svg = text.contains("<svg") || (text.contains("<?xml") && text.contains("svg"));
    is_svg.then_some(MediaType::Svg)
}
