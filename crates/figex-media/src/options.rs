use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Re-encoding target for raster assets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetEncoding {
    /// Keep each asset's own format.
    #[default]
    None,
    Webp,
    Avif,
}

impl TargetEncoding {
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Webp => Some("webp"),
            Self::Avif => Some("avif"),
        }
    }
}

impl fmt::Display for TargetEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension().unwrap_or("none"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("quality must be between 1 and 100, got {0}")]
pub struct InvalidQuality(pub u32);

/// Lossy encoder quality, 1 (smallest) to 100 (least lossy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quality(u8);

impl Quality {
    pub const DEFAULT: Self = Self(80);
    pub const MAX: Self = Self(100);
    pub const MIN: Self = Self(1);

    pub fn new(value: u32) -> Result<Self, InvalidQuality> {
        match value {
            1..=100 => Ok(Self(value as u8)),
            _ => Err(InvalidQuality(value)),
        }
    }

    pub fn get(self) -> u8 { self.0 }
}

impl Default for Quality {
    fn default() -> Self { Self::DEFAULT }
}

impl TryFrom<u32> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: u32) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Quality> for u32 {
    fn from(quality: Quality) -> Self { u32::from(quality.0) }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// rav1e speed preset: 1 is slowest/best, 10 is fastest.
pub const DEFAULT_AVIF_SPEED: u8 = 6;

/// Run-wide raster settings, shared read-only by every asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransformOptions {
    pub target:     TargetEncoding,
    pub quality:    Quality,
    pub max_width:  Option<NonZeroU32>,
    pub max_height: Option<NonZeroU32>,
    pub avif_speed: u8,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            target:     TargetEncoding::None,
            quality:    Quality::DEFAULT,
            max_width:  None,
            max_height: None,
            avif_speed: DEFAULT_AVIF_SPEED,
        }
    }
}

impl TransformOptions {
    pub fn target(mut self, target: TargetEncoding) -> Self {
        self.target = target;
        self
    }

    pub fn quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn max_width(mut self, max_width: Option<NonZeroU32>) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn max_height(mut self, max_height: Option<NonZeroU32>) -> Self {
        self.max_height = max_height;
        self
    }

    /// Clamped to rav1e's 1..=10 range.
    pub fn avif_speed(mut self, speed: u8) -> Self {
        self.avif_speed = speed.clamp(1, 10);
        self
    }

    /// Whether raster assets must go through the transformer at all.
    pub fn needs_processing(&self) -> bool {
        self.target != TargetEncoding::None || self.max_width.is_some() || self.max_height.is_some()
    }
}
