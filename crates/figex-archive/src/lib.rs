//! Selective extraction of image payloads from Figma design-file containers.
//!
//! A `.fig` container is a ZIP archive. Image payloads live under `images/`
//! and are named by content hash with no extension; everything else in the
//! archive is ignored.
//!
//! # Architecture
//!
//! - `format.rs` - Advisory container signature check
//! - `sanitize.rs` - Separator normalization and entry classification
//! - `extract.rs` - Streaming extraction into the destination directory
//! - `report.rs` - Extraction counts and per-entry records

pub use error::{Error, Result};
pub use extract::{extract_from_reader, extract_images};
pub use format::{ContainerFormat, MagicCheck, detect_format, precheck, precheck_reader};
pub use options::{ExtractOptions, IMAGE_PREFIX, Progress};
pub use report::{ExtractReport, ExtractedEntry};
pub use sanitize::{EntryClass, classify, normalize_entry_path};

mod error;
mod extract;
mod format;
pub mod options;
mod report;
mod sanitize;
