use std::path::PathBuf;

use figex_media::{Dimensions, MediaType};
use serde::Serialize;

/// Everything one run did, in a shape suitable for `--json`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    pub input:         PathBuf,
    pub output:        PathBuf,
    /// The container did not start with a ZIP signature.
    pub magic_anomaly: bool,
    pub entries_total: usize,
    pub found:         usize,
    pub extracted:     usize,
    pub ignored:       usize,
    pub rejected:      usize,
    pub assets:        Vec<AssetReport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetReport {
    /// The extensionless file as extracted.
    pub source:  PathBuf,
    pub outcome: AssetOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetOutcome {
    /// Bytes unchanged, extension added.
    Renamed {
        output: PathBuf,
        media:  MediaType,
        vector: bool,
    },
    Transformed {
        output:      PathBuf,
        media:       MediaType,
        source_size: Dimensions,
        output_size: Dimensions,
        resized:     bool,
        reencoded:   bool,
    },
    /// Transformation failed; original bytes kept under `output`.
    FellBack {
        output: PathBuf,
        media:  MediaType,
        reason: String,
    },
    Undetermined,
    Failed {
        reason: String,
    },
}

impl AssetOutcome {
    pub fn output(&self) -> Option<&PathBuf> {
        match self {
            Self::Renamed { output, .. }
            | Self::Transformed { output, .. }
            | Self::FellBack { output, .. } => Some(output),
            Self::Undetermined | Self::Failed { .. } => None,
        }
    }
}

impl RunReport {
    fn count(&self, pred: impl Fn(&AssetOutcome) -> bool) -> usize {
        self.assets.iter().filter(|a| pred(&a.outcome)).count()
    }

    pub fn renamed(&self) -> usize { self.count(|o| matches!(o, AssetOutcome::Renamed { .. })) }

    pub fn transformed(&self) -> usize { self.count(|o| matches!(o, AssetOutcome::Transformed { .. })) }

    pub fn fell_back(&self) -> usize { self.count(|o| matches!(o, AssetOutcome::FellBack { .. })) }

    pub fn undetermined(&self) -> usize { self.count(|o| matches!(o, AssetOutcome::Undetermined)) }

    pub fn failed(&self) -> usize { self.count(|o| matches!(o, AssetOutcome::Failed { .. })) }

    /// Files left in the output directory with a known extension.
    pub fn placed(&self) -> usize { self.assets.iter().filter(|a| a.outcome.output().is_some()).count() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, outcome: AssetOutcome) -> AssetReport {
        AssetReport {
            source: PathBuf::from(name),
            outcome,
        }
    }

    #[test]
    fn outcome_counts() {
        let report = RunReport {
            assets: vec![
                asset("a", AssetOutcome::Renamed {
                    output: "a.svg".into(),
                    media:  MediaType::Svg,
                    vector: true,
                }),
                asset("b", AssetOutcome::Undetermined),
                asset("c", AssetOutcome::FellBack {
                    output: "c.png".into(),
                    media:  MediaType::Png,
                    reason: "decode".into(),
                }),
                asset("d", AssetOutcome::Failed { reason: "io".into() }),
            ],
            ..RunReport::default()
        };
        assert_eq!(report.renamed(), 1);
        assert_eq!(report.transformed(), 0);
        assert_eq!(report.fell_back(), 1);
        assert_eq!(report.undetermined(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.placed(), 2);
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let json = serde_json::to_value(AssetOutcome::Renamed {
            output: "x.png".into(),
            media:  MediaType::Png,
            vector: false,
        })
        .unwrap();
        assert_eq!(json["kind"], "renamed");
        assert_eq!(json["media"], "png");
        assert_eq!(json["output"], "x.png");

        let json = serde_json::to_value(AssetOutcome::Undetermined).unwrap();
        assert_eq!(json["kind"], "undetermined");
    }
}
