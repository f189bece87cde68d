//! # quire
//!
//! Assembles a manuscript from many small text fragments arranged as
//! book → sections → chapters → scenes → files.
//!
//! ## Features
//!
//! - Whitespace normalization and optional `[[wiki link]]` stripping
//! - Per-level output files (book, section, chapter, scene)
//! - Optional paragraph numbering of any output
//! - A YAML summary report with word and character statistics
//!
//! ## Quick Start
//!
//! ```no_run
//! use quire::{BookSpec, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let spec = BookSpec::from_file("book.yaml")?;
//! Pipeline::new(spec)?.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Normalizer**: cleans each fragment as it is read
//! 2. **Assembler**: joins fragments into scenes, chapters and sections
//! 3. **Writer**: writes each level that asks for output, numbering
//!    paragraphs on request
//! 4. **Summary**: aggregates counts and renders the report

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod assembler;
mod config;
mod error;
mod file;
mod pipeline;
mod writer;

pub mod front_matter;
pub mod normalize;
pub mod numbering;
pub mod summary;

pub use config::{
    BookSpec, BookSpecBuilder, ChapterSpec, OutputTarget, SceneSpec, SectionSpec,
    DEFAULT_SCENE_SEPARATOR,
};
pub use error::{Error, Result};
pub use file::SourceText;
pub use numbering::Numberer;
pub use pipeline::{Pipeline, PipelineStats};
pub use summary::{BookSummary, ChapterSummary, SceneSummary, Summary};

/// Assembles the book described by `spec`.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - The spec asks for a summary report but has an empty chapter, scene or book
/// - A source or dedication file cannot be read
/// - An output file cannot be written
///
/// # Examples
///
/// ```no_run
/// use quire::{BookSpec, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let spec = BookSpec::from_file("book.yaml")?;
/// let stats = run(spec)?;
/// println!("{} words", stats.words);
/// # Ok(())
/// # }
/// ```
pub fn run(spec: BookSpec) -> Result<PipelineStats> {
    Pipeline::new(spec)?.run()
}
