use std::path::PathBuf;

#[derive(Clone, Debug, Default)]
pub struct ExtractReport {
    /// Every entry in the container, directories included.
    pub total_entries: usize,
    /// Non-directory entries under the image prefix.
    pub found:         usize,
    /// Entries outside the prefix.
    pub ignored:       usize,
    /// Entries under the prefix with a basename that could not be written.
    pub rejected:      usize,
    pub total_bytes:   u64,
    pub entries:       Vec<ExtractedEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Entry name as stored in the archive, before normalization.
    pub archive_path: String,
    pub target_path:  PathBuf,
    pub size:         u64,
}

impl ExtractReport {
    pub fn extracted(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.found == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report() {
        let report = ExtractReport::default();
        assert!(report.is_empty());
        assert_eq!(report.extracted(), 0);
    }

    #[test]
    fn report_counts() {
        let report = ExtractReport {
            total_entries: 4,
            found:         2,
            ignored:       2,
            rejected:      0,
            total_bytes:   10,
            entries:       vec![
                ExtractedEntry {
                    archive_path: "images/a".into(),
                    target_path:  PathBuf::from("/out/a"),
                    size:         4,
                },
                ExtractedEntry {
                    archive_path: "images\\b".into(),
                    target_path:  PathBuf::from("/out/b"),
                    size:         6,
                },
            ],
        };
        assert!(!report.is_empty());
        assert_eq!(report.extracted(), 2);
    }
}
