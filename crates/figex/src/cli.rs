use std::num::{NonZeroU32, NonZeroUsize};
use std::path::{Path, PathBuf};

use clap::Parser;
use figex_media::{Quality, TargetEncoding};

use crate::config::{ConfigError, FileConfig, Overrides, Settings, Verbosity};
use crate::input::default_output_dir;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "figex",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract image assets from a Figma design file",
    long_about = None
)]
pub struct Cli {
    /// Figma container to read (.fig or .zip)
    pub input: PathBuf,

    /// Output directory [default: input file name without extension]
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Re-encode raster images as lossy WebP
    #[arg(long, conflicts_with = "avif")]
    pub webp: bool,

    /// Re-encode raster images as AVIF
    #[arg(long)]
    pub avif: bool,

    /// Encoder quality, 1-100 [default: 80]
    #[arg(long, value_name = "N", value_parser = parse_quality)]
    pub quality: Option<Quality>,

    /// Downscale raster images wider than this
    #[arg(long, value_name = "PX")]
    pub max_width: Option<NonZeroU32>,

    /// Downscale raster images taller than this
    #[arg(long, value_name = "PX")]
    pub max_height: Option<NonZeroU32>,

    /// Worker threads [default: available parallelism]
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<NonZeroUsize>,

    /// TOML file with default settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Only report fatal errors
    #[arg(short, long, conflicts_with = "debug")]
    pub quiet: bool,

    /// Report every entry and asset
    #[arg(short, long)]
    pub debug: bool,
}

fn parse_quality(s: &str) -> Result<Quality, String> {
    let value: u32 = s.parse().map_err(|e| format!("{e}"))?;
    Quality::new(value).map_err(|e| e.to_string())
}

impl Cli {
    pub fn target(&self) -> Option<TargetEncoding> {
        if self.webp {
            Some(TargetEncoding::Webp)
        } else if self.avif {
            Some(TargetEncoding::Avif)
        } else {
            None
        }
    }

    pub fn verbosity(&self) -> Option<Verbosity> {
        if self.quiet {
            Some(Verbosity::Quiet)
        } else if self.debug {
            Some(Verbosity::Debug)
        } else {
            None
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            target:     self.target(),
            quality:    self.quality,
            max_width:  self.max_width,
            max_height: self.max_height,
            jobs:       self.jobs,
            verbosity:  self.verbosity(),
        }
    }

    /// Resolve against the config file (if any) and `cwd`.
    pub fn settings(&self, cwd: &Path) -> Result<Settings, ConfigError> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let output = match &self.out {
            Some(out) => cwd.join(out),
            None => default_output_dir(&self.input, cwd),
        };
        Ok(Settings::new(&self.input, output).merge(self.overrides(), file))
    }
}
