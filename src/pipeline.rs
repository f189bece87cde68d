use crate::{
    assembler::Assembler,
    config::BookSpec,
    error::Result,
    front_matter,
    summary::BookSummary,
    writer::Writer,
};
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Statistics collected during pipeline execution.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Number of sections assembled
    pub sections: usize,

    /// Number of chapters assembled
    pub chapters: usize,

    /// Number of scenes assembled
    pub scenes: usize,

    /// Number of source files read
    pub files_read: usize,

    /// Characters across all chapters
    pub characters: usize,

    /// Words across all chapters
    pub words: usize,

    /// Output files written, in write order
    pub files_written: Vec<PathBuf>,

    /// Total execution time
    pub duration: Duration,
}

impl PipelineStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║              Manuscript Build Summary                 ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Sections:             {:>8}                        ║",
            self.sections
        );
        println!(
            "║ Chapters:             {:>8}                        ║",
            self.chapters
        );
        println!(
            "║ Scenes:               {:>8}                        ║",
            self.scenes
        );
        println!(
            "║ Source Files:         {:>8}                        ║",
            self.files_read
        );
        println!("║                                                       ║");
        println!(
            "║ Words:                {:>8}                        ║",
            self.words
        );
        println!(
            "║ Characters:           {:>8}                        ║",
            self.characters
        );
        println!("║                                                       ║");
        println!(
            "║ Files Written:        {:>8}                        ║",
            self.files_written.len()
        );
        for path in &self.files_written {
            println!("║   {}", path.display());
        }
        println!(
            "║ Total Time:           {:>8.2}s                     ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════════════════════╝\n");
    }
}

/// Main orchestrator for assembling a book.
pub struct Pipeline {
    spec: BookSpec,
    timestamp: Option<DateTime<FixedOffset>>,
}

impl Pipeline {
    /// Creates a new pipeline for the given spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec fails validation.
    pub fn new(spec: BookSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            timestamp: None,
        })
    }

    /// Fixes the metadata `Date:` instead of reading the clock, making the
    /// output reproducible.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Executes the pipeline and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Front matter**: metadata header, title page, dedication
    /// 2. **Sections**: each flat section in order
    /// 3. **Chapters**: each chapter, and its scenes, in order
    /// 4. **Book**: the whole manuscript to the book-level output
    /// 5. **Summary**: the statistics report, if requested
    ///
    /// Levels with their own output are written as soon as they are
    /// assembled. The first error stops the run.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read, an output file
    /// cannot be written, or the summary cannot be rendered.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use quire::{BookSpec, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let spec = BookSpec::from_file("book.yaml")?;
    /// let stats = Pipeline::new(spec)?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(title = %self.spec.title))]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let spec = &self.spec;
        let timestamp = self.timestamp.unwrap_or_else(|| Local::now().into());

        info!(
            "Assembling {} sections and {} chapters",
            spec.sections.len(),
            spec.chapters.len()
        );

        let mut book = String::new();
        book.push_str(&front_matter::metadata(spec, &timestamp));
        book.push_str(&front_matter::title_page(&spec.title, &spec.authors));
        if let Some(path) = spec.dedication() {
            book.push('\n');
            book.push_str(&front_matter::dedication(path)?);
        }

        let mut writer = Writer::new(&spec.scene_separator);
        let mut summary = BookSummary::default();
        let mut assembler = Assembler::new(&spec.scene_separator, spec.strip_wiki_links, &mut writer);

        for section in &spec.sections {
            book.push('\n');
            book.push_str(&assembler.assemble_section(section)?);
        }

        for chapter in &spec.chapters {
            book.push('\n');
            book.push_str(&assembler.assemble_chapter(chapter, &mut summary)?);
        }

        let counts = assembler.counts();
        info!(
            "✓ Assembled {} scenes from {} files",
            counts.scenes, counts.files
        );

        if writer.emit(&book, &spec.output)? {
            info!("✓ Wrote manuscript");
        }

        let characters = summary.totals.characters;
        let words = summary.totals.words;
        if let Some(path) = spec.summary_path() {
            let yaml = summary.render()?;
            writer.write_summary(path, &yaml)?;
        }

        let duration = start_time.elapsed();
        info!(
            "✓ Pipeline completed: {} words in {:.2}s",
            words,
            duration.as_secs_f64()
        );

        Ok(PipelineStats {
            sections: spec.sections.len(),
            chapters: spec.chapters.len(),
            scenes: counts.scenes,
            files_read: counts.files,
            characters,
            words,
            files_written: writer.written().to_vec(),
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChapterSpec, OutputTarget, SceneSpec, SectionSpec};
    use crate::summary::BookSummary as Report;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use std::fs;

    fn frozen() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap()
    }

    fn scene(files: Vec<PathBuf>) -> SceneSpec {
        SceneSpec {
            files,
            output: OutputTarget::default(),
        }
    }

    fn write(temp: &TempDir, name: &str, content: &str) -> PathBuf {
        let file = temp.child(name);
        file.write_str(content).unwrap();
        file.path().to_path_buf()
    }

    #[test]
    fn test_end_to_end() {
        let temp = TempDir::new().unwrap();
        let f1 = write(&temp, "f1.txt", "Hello   world.");
        let out = temp.child("book.md");
        let report = temp.child("summary.yaml");

        let spec = BookSpec::builder()
            .title("T")
            .author("X")
            .chapter(ChapterSpec {
                title: "One".to_string(),
                scenes: vec![scene(vec![f1])],
                output: OutputTarget::default(),
            })
            .output_filename(out.path())
            .summary_filename(report.path())
            .build()
            .unwrap();

        let stats = Pipeline::new(spec)
            .unwrap()
            .with_timestamp(frozen())
            .run()
            .unwrap();

        out.assert(
            "---\n\
             Title: T\n\
             Summary: \n\
             Date: 2024-01-02T03:04:05Z\n\
             Authors: X\n\
             ---\n\
             # T\n\
             By X\n\
             \n\
             ## One\n\
             Hello world.\n",
        );

        let parsed: Report = serde_yaml::from_str(&fs::read_to_string(report.path()).unwrap()).unwrap();
        assert_eq!(parsed.totals.characters, 12);
        assert_eq!(parsed.totals.words, 2);
        assert_eq!(parsed.average, 2);

        assert_eq!(stats.chapters, 1);
        assert_eq!(stats.scenes, 1);
        assert_eq!(stats.files_read, 1);
        assert_eq!(stats.words, 2);
        assert_eq!(stats.files_written, vec![out.path().to_path_buf(), report.path().to_path_buf()]);
    }

    #[test]
    fn test_document_order_and_levels() {
        let temp = TempDir::new().unwrap();
        let dedication = write(&temp, "dedication.txt", "For everyone.");
        let prologue = write(&temp, "prologue.txt", "Before it all.");
        let a = write(&temp, "a.txt", "Scene [[A]].");
        let b = write(&temp, "b.txt", "Scene B.");
        let c = write(&temp, "c.txt", "Scene C.");
        let chapter_out = temp.child("two.md");
        let scene_out = temp.child("scene-c.md");
        let section_out = temp.child("prologue.md");

        let spec = BookSpec::builder()
            .title("Book")
            .author("A")
            .author("B")
            .dedication(dedication)
            .scene_separator("* * *")
            .strip_wiki_links(true)
            .section(SectionSpec {
                title: "Prologue".to_string(),
                files: vec![prologue],
                output: OutputTarget::file(section_out.path(), false),
            })
            .chapter(ChapterSpec {
                title: "One".to_string(),
                scenes: vec![scene(vec![a])],
                output: OutputTarget::default(),
            })
            .chapter(ChapterSpec {
                title: "Two".to_string(),
                scenes: vec![
                    scene(vec![b]),
                    SceneSpec {
                        files: vec![c],
                        output: OutputTarget::file(scene_out.path(), false),
                    },
                ],
                output: OutputTarget::file(chapter_out.path(), true),
            })
            .build()
            .unwrap();

        let stats = Pipeline::new(spec)
            .unwrap()
            .with_timestamp(frozen())
            .run()
            .unwrap();

        section_out.assert("# Prologue\nBefore it all.\n");
        scene_out.assert("Scene C.\n");
        chapter_out.assert("## Two\nScene B. <1>\n\n* * *\nScene C. <2>");

        // Scene output is written before its chapter's.
        assert_eq!(
            stats.files_written,
            vec![
                section_out.path().to_path_buf(),
                scene_out.path().to_path_buf(),
                chapter_out.path().to_path_buf(),
            ]
        );
        assert_eq!(stats.sections, 1);
        assert_eq!(stats.scenes, 3);
        assert_eq!(stats.files_read, 4);
    }

    #[test]
    fn test_book_text_with_dedication_and_sections() {
        let temp = TempDir::new().unwrap();
        let dedication = write(&temp, "dedication.txt", "For everyone.");
        let prologue = write(&temp, "prologue.txt", "Before.");
        let a = write(&temp, "a.txt", "Body.");
        let out = temp.child("book.md");

        let spec = BookSpec::builder()
            .title("Book")
            .author("A")
            .author("B")
            .dedication(dedication)
            .section(SectionSpec {
                title: "Prologue".to_string(),
                files: vec![prologue],
                output: OutputTarget::default(),
            })
            .chapter(ChapterSpec {
                title: "One".to_string(),
                scenes: vec![scene(vec![a])],
                output: OutputTarget::default(),
            })
            .output_filename(out.path())
            .number_paragraphs(true)
            .build()
            .unwrap();

        Pipeline::new(spec)
            .unwrap()
            .with_timestamp(frozen())
            .run()
            .unwrap();

        out.assert(
            "---\n\
             Title: Book\n\
             Summary: \n\
             Date: 2024-01-02T03:04:05Z\n\
             Authors: A\n         B\n\
             ---\n\
             # Book\n\
             By A, B <1>\n\
             \n\
             ## Dedication\n\
             For everyone. <2>\n\
             \n\
             # Prologue\n\
             Before. <3>\n\
             \n\
             ## One\n\
             Body. <4>",
        );
    }

    #[test]
    fn test_missing_dedication_aborts_before_writing() {
        let temp = TempDir::new().unwrap();
        let a = write(&temp, "a.txt", "Body.");
        let out = temp.child("book.md");

        let spec = BookSpec::builder()
            .dedication(temp.path().join("missing.txt"))
            .chapter(ChapterSpec {
                title: "One".to_string(),
                scenes: vec![scene(vec![a])],
                output: OutputTarget::default(),
            })
            .output_filename(out.path())
            .build()
            .unwrap();

        let err = Pipeline::new(spec).unwrap().run().unwrap_err();
        assert!(err.is_io());
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_scene_file_aborts_run() {
        let temp = TempDir::new().unwrap();
        let out = temp.child("book.md");

        let spec = BookSpec::builder()
            .chapter(ChapterSpec {
                title: "One".to_string(),
                scenes: vec![scene(vec![temp.path().join("missing.txt")])],
                output: OutputTarget::default(),
            })
            .output_filename(out.path())
            .build()
            .unwrap();

        assert!(Pipeline::new(spec).unwrap().run().is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_chapter_without_scenes_rejected_when_summary_requested() {
        let temp = TempDir::new().unwrap();

        let mut spec = BookSpec::builder().build().unwrap();
        spec.chapters.push(ChapterSpec {
            title: "Empty".to_string(),
            ..ChapterSpec::default()
        });
        spec.summary_filename = Some(temp.path().join("summary.yaml"));

        let err = Pipeline::new(spec).err().unwrap();
        assert!(err.is_empty_collection());
        assert!(!temp.child("summary.yaml").exists());
    }

    #[test]
    fn test_chapter_without_scenes_allowed_without_summary() {
        let temp = TempDir::new().unwrap();
        let out = temp.child("book.md");

        let spec = BookSpec::builder()
            .chapter(ChapterSpec {
                title: "Empty".to_string(),
                ..ChapterSpec::default()
            })
            .output_filename(out.path())
            .build()
            .unwrap();

        let stats = Pipeline::new(spec)
            .unwrap()
            .with_timestamp(frozen())
            .run()
            .unwrap();

        assert_eq!(stats.scenes, 0);
        let text = fs::read_to_string(out.path()).unwrap();
        assert!(text.ends_with("\n## Empty\n"));
    }

    #[test]
    fn test_run_is_deterministic_with_frozen_clock() {
        let temp = TempDir::new().unwrap();
        let a = write(&temp, "a.txt", "Same  text.");
        let first = temp.child("first.md");
        let second = temp.child("second.md");

        for out in [&first, &second] {
            let spec = BookSpec::builder()
                .title("Same")
                .chapter(ChapterSpec {
                    title: "One".to_string(),
                    scenes: vec![scene(vec![a.clone()])],
                    output: OutputTarget::default(),
                })
                .output_filename(out.path())
                .build()
                .unwrap();
            Pipeline::new(spec)
                .unwrap()
                .with_timestamp(frozen())
                .run()
                .unwrap();
        }

        assert_eq!(
            fs::read(first.path()).unwrap(),
            fs::read(second.path()).unwrap()
        );
    }
}
