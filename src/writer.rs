use crate::{
    config::OutputTarget,
    error::{Error, Result},
    numbering::Numberer,
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Writes assembled text to the output file configured for a level.
///
/// The same operation serves the book, sections, chapters and scenes; each
/// level only differs in its [`OutputTarget`].
#[derive(Debug)]
pub(crate) struct Writer {
    numberer: Numberer,
    written: Vec<PathBuf>,
}

impl Writer {
    /// Creates a writer whose numbering skips `separator` lines.
    pub(crate) fn new(separator: &str) -> Self {
        Self {
            numberer: Numberer::new(separator),
            written: Vec::new(),
        }
    }

    /// Writes `text` to the target's path, numbering paragraphs if requested.
    ///
    /// Returns `false` without touching the filesystem when the target has
    /// no path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub(crate) fn emit(&mut self, text: &str, target: &OutputTarget) -> Result<bool> {
        let Some(path) = target.path() else {
            return Ok(false);
        };

        let content = if target.number_paragraphs {
            self.numberer.number(text)
        } else {
            text.replace("\r\n", "\n")
        };

        self.write_file(path, &content)?;
        debug!(
            numbered = target.number_paragraphs,
            bytes = content.len(),
            "Wrote {}",
            path.display()
        );
        Ok(true)
    }

    /// Writes the rendered summary report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub(crate) fn write_summary(&mut self, path: &Path, yaml: &str) -> Result<()> {
        self.write_file(path, yaml)?;
        info!("Wrote summary to {}", path.display());
        Ok(())
    }

    /// Paths written so far, in write order.
    pub(crate) fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Creates or truncates `path` and writes `content` in one go.
    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        let mut file = fs::File::create(path).map_err(|e| Error::io(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| Error::io(path, e))?;
        self.written.push(path.to_path_buf());
        Ok(())
    }
}
