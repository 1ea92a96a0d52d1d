//! Run settings and the optional TOML config file.
//!
//! Values resolve as CLI flag, then config file, then built-in default.

use std::fs;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::{Path, PathBuf};

use figex_archive::IMAGE_PREFIX;
use figex_media::{Quality, TargetEncoding, TransformOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path:   PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Debug,
}

impl Verbosity {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "off",
            Self::Normal => "info",
            Self::Debug => "debug",
        }
    }
}

/// Contents of a `--config` file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub format:     Option<TargetEncoding>,
    pub quality:    Option<Quality>,
    pub max_width:  Option<NonZeroU32>,
    pub max_height: Option<NonZeroU32>,
    pub jobs:       Option<NonZeroUsize>,
    pub verbosity:  Option<Verbosity>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> { toml::from_str(text) }
}

/// Fully resolved, immutable settings for one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub input:     PathBuf,
    pub output:    PathBuf,
    /// Archive directory holding the image payloads.
    pub prefix:    String,
    pub transform: TransformOptions,
    pub jobs:      NonZeroUsize,
    pub verbosity: Verbosity,
}

impl Settings {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input:     input.into(),
            output:    output.into(),
            prefix:    IMAGE_PREFIX.to_string(),
            transform: TransformOptions::default(),
            jobs:      default_jobs(),
            verbosity: Verbosity::default(),
        }
    }

    pub fn transform(mut self, transform: TransformOptions) -> Self {
        self.transform = transform;
        self
    }

    pub fn jobs(mut self, jobs: NonZeroUsize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Fill every setting the CLI left unset from `file`.
    pub fn merge(mut self, overrides: Overrides, file: FileConfig) -> Self {
        let transform = TransformOptions::default()
            .target(overrides.target.or(file.format).unwrap_or_default())
            .quality(overrides.quality.or(file.quality).unwrap_or_default())
            .max_width(overrides.max_width.or(file.max_width))
            .max_height(overrides.max_height.or(file.max_height));
        self.transform = transform;
        self.jobs = overrides.jobs.or(file.jobs).unwrap_or_else(default_jobs);
        self.verbosity = overrides.verbosity.or(file.verbosity).unwrap_or_default();
        self
    }
}

/// Settings given explicitly on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub target:     Option<TargetEncoding>,
    pub quality:    Option<Quality>,
    pub max_width:  Option<NonZeroU32>,
    pub max_height: Option<NonZeroU32>,
    pub jobs:       Option<NonZeroUsize>,
    pub verbosity:  Option<Verbosity>,
}

pub fn default_jobs() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
