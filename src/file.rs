use crate::error::{Error, Result};
use crate::normalize::{count_words, normalize};
use std::fs;
use std::path::{Path, PathBuf};

/// A source fragment read from disk and normalized.
#[derive(Debug, Clone)]
pub struct SourceText {
    /// Path the fragment was read from
    pub path: PathBuf,

    /// Normalized body
    pub body: String,

    /// Character count of the normalized body, in Unicode scalar values
    /// rather than UTF-8 bytes
    pub characters: usize,

    /// Word count of the normalized body
    pub words: usize,
}

impl SourceText {
    /// Builds a fragment from already-read raw content.
    #[must_use]
    pub fn from_raw(path: impl Into<PathBuf>, raw: &str, strip_links: bool) -> Self {
        let body = normalize(raw, strip_links);
        let characters = body.chars().count();
        let words = count_words(&body);
        Self {
            path: path.into(),
            body,
            characters,
            words,
        }
    }

    /// Reads and normalizes the fragment at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8.
    pub fn read(path: &Path, strip_links: bool) -> Result<Self> {
        let raw = read_to_string(path)?;
        Ok(Self::from_raw(path, &raw, strip_links))
    }
}

/// Reads a whole file as UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::Io`] for missing or unreadable files and
/// [`Error::InvalidUtf8`] for non-UTF-8 content.
pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
