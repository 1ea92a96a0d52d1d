use std::path::PathBuf;
use std::sync::Arc;

/// Logical directory inside a Figma container that holds image payloads.
pub const IMAGE_PREFIX: &str = "images/";

#[derive(Clone)]
pub struct ExtractOptions {
    pub prefix:      String,
    pub on_progress: Option<Arc<dyn Fn(Progress) + Send + Sync>>,
}

#[derive(Clone, Debug)]
pub struct Progress {
    pub entries_processed: usize,
    pub entries_total:     usize,
    pub current:           PathBuf,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            prefix:      IMAGE_PREFIX.to_string(),
            on_progress: None,
        }
    }
}

impl ExtractOptions {
    /// Override the entry prefix. Backslashes are normalized and a trailing
    /// `/` is added when missing, so `"assets"` and `"assets\\"` both mean
    /// `"assets/"`.
    pub fn prefix(mut self, prefix: impl AsRef<str>) -> Self {
        let mut prefix = crate::sanitize::normalize_entry_path(prefix.as_ref()).into_owned();
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        self.prefix = prefix;
        self
    }

    pub fn on_progress(mut self, callback: Arc<dyn Fn(Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

impl Progress {
    pub fn percentage(&self) -> f32 {
        if self.entries_total == 0 {
            100.0
        } else {
            (self.entries_processed as f32 / self.entries_total as f32) * 100.0
        }
    }
}
