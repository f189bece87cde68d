use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Separator placed between scenes when the config does not set one.
pub const DEFAULT_SCENE_SEPARATOR: &str = "*&#9;*&#9;*";

/// Where a hierarchy level writes its own output, and whether it is numbered.
///
/// Every level (book, section, chapter, scene) carries one of these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputTarget {
    /// Output file for this level's assembled text
    #[serde(default)]
    pub output_filename: Option<PathBuf>,

    /// Append paragraph markers when writing this level
    #[serde(default)]
    pub number_paragraphs: bool,
}

impl OutputTarget {
    /// Creates a target writing to `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>, numbered: bool) -> Self {
        Self {
            output_filename: Some(path.into()),
            number_paragraphs: numbered,
        }
    }

    /// Returns the configured output path, treating an empty path as unset.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.output_filename
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// A flat group of files under a level-1 heading.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionSpec {
    /// Section heading
    #[serde(default)]
    pub title: String,

    /// Source files in document order
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Own output
    #[serde(flatten)]
    pub output: OutputTarget,
}

/// A chapter: a titled, ordered list of scenes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterSpec {
    /// Chapter heading
    #[serde(default)]
    pub title: String,

    /// Scenes in document order
    #[serde(default)]
    pub scenes: Vec<SceneSpec>,

    /// Own output
    #[serde(flatten)]
    pub output: OutputTarget,
}

/// A scene: source files concatenated together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneSpec {
    /// Source files in document order
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Own output
    #[serde(flatten)]
    pub output: OutputTarget,
}

/// Configuration for a whole book.
///
/// Usually loaded with [`BookSpec::from_file`]; use [`BookSpec::builder()`]
/// to construct one in code or to override loaded values.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct BookSpec {
    /// Book title
    #[serde(default)]
    pub title: String,

    /// Summary blurb for the metadata header
    #[serde(default)]
    pub summary: String,

    /// Author names in display order
    #[serde(default)]
    pub authors: Vec<String>,

    /// File whose contents form the dedication
    #[serde(default, rename = "dedication")]
    pub dedication_filename: Option<PathBuf>,

    /// Marker placed between consecutive scenes
    #[serde(default)]
    pub scene_separator: String,

    /// Replace `[[link]]` markup with its inner text
    #[serde(default)]
    pub strip_wiki_links: bool,

    /// Flat sections, emitted before chapters
    #[serde(default)]
    pub sections: Vec<SectionSpec>,

    /// Chapters in document order
    #[serde(default)]
    pub chapters: Vec<ChapterSpec>,

    /// Book-level output
    #[serde(flatten)]
    pub output: OutputTarget,

    /// Where to write the YAML summary report
    #[serde(default)]
    pub summary_filename: Option<PathBuf>,
}

impl Default for BookSpec {
    fn default() -> Self {
        Self {
            title: String::new(),
            summary: String::new(),
            authors: Vec::new(),
            dedication_filename: None,
            scene_separator: DEFAULT_SCENE_SEPARATOR.to_string(),
            strip_wiki_links: false,
            sections: Vec::new(),
            chapters: Vec::new(),
            output: OutputTarget::default(),
            summary_filename: None,
        }
    }
}

impl BookSpec {
    /// Creates a new spec builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use quire::{BookSpec, ChapterSpec};
    ///
    /// let spec = BookSpec::builder()
    ///     .title("The Long Road")
    ///     .author("A. Writer")
    ///     .chapter(ChapterSpec::default())
    ///     .build()
    ///     .expect("valid spec");
    /// assert_eq!(spec.chapters.len(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> BookSpecBuilder {
        BookSpecBuilder::default()
    }

    /// Parses a spec from YAML text and applies defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut spec: Self = serde_yaml::from_str(yaml)?;
        spec.apply_defaults();
        Ok(spec)
    }

    /// Loads a spec from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = crate::file::read_to_string(path)?;
        Self::from_yaml(&yaml).map_err(|e| match e {
            Error::Yaml { message } => Error::config(format!(
                "failed to parse {}: {message}",
                path.display()
            )),
            other => other,
        })
    }

    fn apply_defaults(&mut self) {
        if self.scene_separator.is_empty() {
            self.scene_separator = DEFAULT_SCENE_SEPARATOR.to_string();
        }
    }

    /// Returns the configured dedication path, treating an empty path as unset.
    #[must_use]
    pub fn dedication(&self) -> Option<&Path> {
        self.dedication_filename
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Returns the configured summary report path, treating an empty path as unset.
    #[must_use]
    pub fn summary_path(&self) -> Option<&Path> {
        self.summary_filename
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Validates the spec.
    ///
    /// A summary report averages words over chapters, scenes and files, so
    /// when one is requested the book needs at least one chapter, every
    /// chapter at least one scene, and every scene at least one file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] for an empty collection when a
    /// summary report is requested.
    pub fn validate(&self) -> Result<()> {
        if self.summary_path().is_none() {
            return Ok(());
        }

        if self.chapters.is_empty() {
            return Err(Error::empty_collection("book has no chapters"));
        }

        for chapter in &self.chapters {
            if chapter.scenes.is_empty() {
                return Err(Error::empty_collection(format!(
                    "chapter '{}' has no scenes",
                    chapter.title
                )));
            }

            if let Some(idx) = chapter.scenes.iter().position(|s| s.files.is_empty()) {
                return Err(Error::empty_collection(format!(
                    "scene {} of chapter '{}' has no files",
                    idx + 1,
                    chapter.title
                )));
            }
        }

        Ok(())
    }
}

/// Builder for creating or overriding a [`BookSpec`].
#[derive(Debug, Default)]
pub struct BookSpecBuilder {
    base: Option<BookSpec>,
    title: Option<String>,
    summary: Option<String>,
    authors: Vec<String>,
    dedication: Option<PathBuf>,
    scene_separator: Option<String>,
    strip_wiki_links: Option<bool>,
    sections: Vec<SectionSpec>,
    chapters: Vec<ChapterSpec>,
    output_filename: Option<PathBuf>,
    number_paragraphs: Option<bool>,
    summary_filename: Option<PathBuf>,
}

impl BookSpecBuilder {
    /// Starts from an existing spec; set values override it and added
    /// authors, sections and chapters are appended.
    #[must_use]
    pub fn from_spec(spec: BookSpec) -> Self {
        Self {
            base: Some(spec),
            ..Self::default()
        }
    }

    /// Sets the book title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the summary blurb.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Adds an author.
    #[must_use]
    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.authors.push(name.into());
        self
    }

    /// Sets the dedication file.
    #[must_use]
    pub fn dedication(mut self, path: impl Into<PathBuf>) -> Self {
        self.dedication = Some(path.into());
        self
    }

    /// Sets the scene separator.
    #[must_use]
    pub fn scene_separator(mut self, separator: impl Into<String>) -> Self {
        self.scene_separator = Some(separator.into());
        self
    }

    /// Enables or disables wiki-link stripping.
    #[must_use]
    pub fn strip_wiki_links(mut self, enabled: bool) -> Self {
        self.strip_wiki_links = Some(enabled);
        self
    }

    /// Adds a section.
    #[must_use]
    pub fn section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a chapter.
    #[must_use]
    pub fn chapter(mut self, chapter: ChapterSpec) -> Self {
        self.chapters.push(chapter);
        self
    }

    /// Sets the book-level output file.
    #[must_use]
    pub fn output_filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_filename = Some(path.into());
        self
    }

    /// Enables or disables paragraph numbering for the book-level output.
    #[must_use]
    pub fn number_paragraphs(mut self, enabled: bool) -> Self {
        self.number_paragraphs = Some(enabled);
        self
    }

    /// Sets the summary report file.
    #[must_use]
    pub fn summary_filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_filename = Some(path.into());
        self
    }

    /// Builds the spec.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<BookSpec> {
        let mut spec = self.base.unwrap_or_default();

        if let Some(title) = self.title {
            spec.title = title;
        }
        if let Some(summary) = self.summary {
            spec.summary = summary;
        }
        spec.authors.extend(self.authors);
        if let Some(dedication) = self.dedication {
            spec.dedication_filename = Some(dedication);
        }
        if let Some(separator) = self.scene_separator {
            spec.scene_separator = separator;
        }
        if let Some(strip) = self.strip_wiki_links {
            spec.strip_wiki_links = strip;
        }
        spec.sections.extend(self.sections);
        spec.chapters.extend(self.chapters);
        if let Some(path) = self.output_filename {
            spec.output.output_filename = Some(path);
        }
        if let Some(numbered) = self.number_paragraphs {
            spec.output.number_paragraphs = numbered;
        }
        if let Some(path) = self.summary_filename {
            spec.summary_filename = Some(path);
        }

        spec.apply_defaults();
        spec.validate()?;
        Ok(spec)
    }
}
