use std::borrow::Cow;

/// How a single archive entry relates to the image prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryClass<'a> {
    /// Outside the prefix; ignored.
    Outside,
    /// Under the prefix but a directory.
    Directory,
    /// Under the prefix, but its basename cannot name a file safely.
    Unsafe,
    /// Extractable asset with the basename it will be written under.
    Asset(&'a str),
}

/// Rewrite every `\` separator to `/`.
pub fn normalize_entry_path(raw: &str) -> Cow<'_, str> {
    if raw.contains('\\') {
        Cow::Owned(raw.replace('\\', "/"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Classify an already-normalized entry path against `prefix`.
///
/// Only the final path component is kept, so nested entries such as
/// `images/a/b` flatten to `b` and nothing can resolve outside the
/// destination directory.
pub fn classify<'a>(normalized: &'a str, prefix: &str, is_dir: bool) -> EntryClass<'a> {
    if !normalized.starts_with(prefix) {
        return EntryClass::Outside;
    }
    if is_dir || normalized.ends_with('/') {
        return EntryClass::Directory;
    }

    let basename = normalized.rsplit('/').next().unwrap_or_default();
    match basename {
        "" | "." | ".." => EntryClass::Unsafe,
        name if name.contains('\0') || (cfg!(windows) && name.contains(':')) => EntryClass::Unsafe,
        name => EntryClass::Asset(name),
    }
}
