//! Word and character statistics for the summary report.
//!
//! Counts accumulate bottom-up while the book is assembled: files into
//! scenes, scenes into chapters, chapters into the book. Averages are only
//! filled in by [`BookSummary::render`], which consumes the tree.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Running character and word totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Characters in normalized text
    pub characters: usize,

    /// Whitespace-delimited words in normalized text
    pub words: usize,
}

impl Summary {
    fn absorb(&mut self, other: Self) {
        self.characters += other.characters;
        self.words += other.words;
    }
}

/// Statistics for one scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSummary {
    /// Totals over the scene's files
    #[serde(flatten)]
    pub totals: Summary,

    /// Number of source files
    pub files: usize,

    /// Words per file, set at render time
    pub average: usize,
}

impl SceneSummary {
    /// Adds `n` characters.
    pub fn add_characters(&mut self, n: usize) {
        self.totals.characters += n;
    }

    /// Adds `n` words.
    pub fn add_words(&mut self, n: usize) {
        self.totals.words += n;
    }

    /// Counts one more file.
    pub fn add_file(&mut self) {
        self.files += 1;
    }

    fn finalize(&mut self, chapter: &str, index: usize) -> Result<()> {
        self.average = average(self.totals.words, self.files, || {
            format!("scene {} of chapter '{chapter}' has no files", index + 1)
        })?;
        Ok(())
    }
}

/// Statistics for one chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    /// Chapter title
    pub title: String,

    /// Totals over the chapter's scenes
    #[serde(flatten)]
    pub totals: Summary,

    /// Words per scene, set at render time
    pub average: usize,

    /// Scene statistics in document order
    pub scenes: Vec<SceneSummary>,
}

impl ChapterSummary {
    /// Creates an empty summary for the chapter titled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Folds a finished scene into this chapter.
    pub fn add_scene_summary(&mut self, scene: SceneSummary) {
        self.totals.absorb(scene.totals);
        self.scenes.push(scene);
    }

    fn finalize(&mut self) -> Result<()> {
        self.average = average(self.totals.words, self.scenes.len(), || {
            format!("chapter '{}' has no scenes", self.title)
        })?;
        for (idx, scene) in self.scenes.iter_mut().enumerate() {
            scene.finalize(&self.title, idx)?;
        }
        Ok(())
    }
}

/// Statistics for the whole book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Totals over all chapters
    #[serde(flatten)]
    pub totals: Summary,

    /// Words per chapter, set at render time
    pub average: usize,

    /// Chapter statistics in document order
    pub chapters: Vec<ChapterSummary>,
}

impl BookSummary {
    /// Folds a finished chapter into the book.
    pub fn add_chapter_summary(&mut self, chapter: ChapterSummary) {
        self.totals.absorb(chapter.totals);
        self.chapters.push(chapter);
    }

    /// Computes every average in the tree.
    ///
    /// Averages use truncating integer division: book words per chapter,
    /// chapter words per scene, scene words per file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the book has no chapters, a
    /// chapter has no scenes, or a scene has no files.
    pub fn finalize(mut self) -> Result<Self> {
        self.average = average(self.totals.words, self.chapters.len(), || {
            "book has no chapters".to_string()
        })?;
        for chapter in &mut self.chapters {
            chapter.finalize()?;
        }
        Ok(self)
    }

    /// Finalizes the tree and serializes it as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if finalization or serialization fails.
    pub fn render(self) -> Result<String> {
        let finalized = self.finalize()?;
        debug!(
            chapters = finalized.chapters.len(),
            words = finalized.totals.words,
            "Rendering summary report"
        );
        Ok(serde_yaml::to_string(&finalized)?)
    }
}

fn average(total: usize, count: usize, what: impl FnOnce() -> String) -> Result<usize> {
    if count == 0 {
        return Err(Error::empty_collection(what()));
    }
    Ok(total / count)
}
