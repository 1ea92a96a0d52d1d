//! Extract image assets from Figma design files.
//!
//! [`run`] drives the whole pipeline for one container: input validation,
//! extraction of `images/` entries, content sniffing, and the optional
//! raster resize/re-encode pass. The `figex` binary is a thin shell around
//! it.

pub mod cli;
pub mod config;
mod error;
pub mod input;
pub mod logging;
pub mod pipeline;
mod report;

pub use config::{ConfigError, FileConfig, Overrides, Settings, Verbosity};
pub use error::{Error, InputError, Result};
pub use pipeline::run;
pub use report::{AssetOutcome, AssetReport, RunReport};
