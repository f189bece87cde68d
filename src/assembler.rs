use crate::{
    config::{ChapterSpec, SceneSpec, SectionSpec},
    error::Result,
    file::SourceText,
    summary::{BookSummary, ChapterSummary, SceneSummary},
    writer::Writer,
};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Counts gathered while assembling, for [`crate::PipelineStats`].
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct AssemblyCounts {
    /// Source files read
    pub files: usize,

    /// Scenes assembled
    pub scenes: usize,
}

/// Builds the text of sections, chapters and scenes.
///
/// Each level is written to its own output file, if one is configured, as
/// soon as it has been assembled.
pub(crate) struct Assembler<'w> {
    separator: String,
    strip_links: bool,
    writer: &'w mut Writer,
    counts: AssemblyCounts,
}

impl<'w> Assembler<'w> {
    pub(crate) fn new(separator: &str, strip_links: bool, writer: &'w mut Writer) -> Self {
        Self {
            separator: separator.to_string(),
            strip_links,
            writer,
            counts: AssemblyCounts::default(),
        }
    }

    pub(crate) fn counts(&self) -> AssemblyCounts {
        self.counts
    }

    /// Assembles a scene and attaches its statistics to `chapter`.
    ///
    /// File bodies are joined with one blank line; each ends with a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or the scene output
    /// cannot be written.
    pub(crate) fn assemble_scene(
        &mut self,
        spec: &SceneSpec,
        chapter: &mut ChapterSummary,
    ) -> Result<String> {
        let mut summary = SceneSummary::default();
        let text = self.join_files(&spec.files, |source| {
            summary.add_characters(source.characters);
            summary.add_words(source.words);
            summary.add_file();
        })?;

        self.writer.emit(&text, &spec.output)?;
        self.counts.scenes += 1;

        trace!(
            files = summary.files,
            words = summary.totals.words,
            "Assembled scene"
        );
        chapter.add_scene_summary(summary);
        Ok(text)
    }

    /// Assembles a section under a level-1 heading.
    ///
    /// Sections are not part of the summary report.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or the section output
    /// cannot be written.
    pub(crate) fn assemble_section(&mut self, spec: &SectionSpec) -> Result<String> {
        let mut text = format!("# {}\n", spec.title);
        text.push_str(&self.join_files(&spec.files, |_| {})?);

        self.writer.emit(&text, &spec.output)?;
        debug!(title = %spec.title, files = spec.files.len(), "Assembled section");
        Ok(text)
    }

    /// Assembles a chapter under a level-2 heading and attaches its
    /// statistics to `book`.
    ///
    /// The scene separator sits on its own line between consecutive scenes.
    ///
    /// # Errors
    ///
    /// Returns an error if any scene fails or the chapter output cannot be
    /// written.
    pub(crate) fn assemble_chapter(
        &mut self,
        spec: &ChapterSpec,
        book: &mut BookSummary,
    ) -> Result<String> {
        let mut summary = ChapterSummary::new(spec.title.clone());
        let mut text = format!("## {}\n", spec.title);

        for (idx, scene) in spec.scenes.iter().enumerate() {
            if idx > 0 {
                text.push('\n');
                text.push_str(&self.separator);
                text.push('\n');
            }
            text.push_str(&self.assemble_scene(scene, &mut summary)?);
        }

        self.writer.emit(&text, &spec.output)?;
        debug!(
            title = %spec.title,
            scenes = spec.scenes.len(),
            words = summary.totals.words,
            "Assembled chapter"
        );
        book.add_chapter_summary(summary);
        Ok(text)
    }

    fn join_files(
        &mut self,
        files: &[PathBuf],
        mut on_file: impl FnMut(&SourceText),
    ) -> Result<String> {
        let mut text = String::new();
        for (idx, path) in files.iter().enumerate() {
            if idx > 0 {
                text.push('\n');
            }
            let source = SourceText::read(path, self.strip_links)?;
            self.counts.files += 1;
            on_file(&source);
            text.push_str(&source.body);
            text.push('\n');
        }
        Ok(text)
    }
}
