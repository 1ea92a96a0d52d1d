use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerFormat {
    /// Local file header: an archive with at least one entry.
    Zip,
    /// End-of-central-directory record first: an archive with no entries.
    EmptyZip,
    /// Spanned/split archive marker.
    SpannedZip,
    /// Raw Figma document without the ZIP wrapper.
    FigKiwi,
}

impl ContainerFormat {
    pub fn is_zip(self) -> bool { !matches!(self, Self::FigKiwi) }
}

pub fn detect_format(data: &[u8]) -> Option<ContainerFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] => Some(ContainerFormat::Zip),
        [0x50, 0x4B, 0x05, 0x06, ..] => Some(ContainerFormat::EmptyZip),
        [0x50, 0x4B, 0x07, 0x08, ..] => Some(ContainerFormat::SpannedZip),
        [b'f', b'i', b'g', b'-', b'k', b'i', b'w', b'i', ..] => Some(ContainerFormat::FigKiwi),
        _ => None,
    }
}

/// Outcome of the advisory header check run before extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MagicCheck {
    /// Up to the first 8 bytes of the file.
    pub header: Vec<u8>,
    pub format: Option<ContainerFormat>,
}

impl MagicCheck {
    pub fn from_header(header: &[u8]) -> Self {
        Self {
            header: header.to_vec(),
            format: detect_format(header),
        }
    }

    /// True when the header is not a ZIP signature. Extraction still runs.
    pub fn is_anomaly(&self) -> bool { !self.format.is_some_and(ContainerFormat::is_zip) }

    /// Hex rendering of the first four bytes, for diagnostics.
    pub fn magic_hex(&self) -> String {
        self.header
            .iter()
            .take(4)
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn precheck_reader<R: Read>(reader: R) -> io::Result<MagicCheck> {
    let mut header = Vec::with_capacity(8);
    reader.take(8).read_to_end(&mut header)?;
    Ok(MagicCheck::from_header(&header))
}

pub fn precheck(path: impl AsRef<Path>) -> io::Result<MagicCheck> {
    precheck_reader(File::open(path)?)
}
