//! Metadata header, title page and dedication.

use crate::config::BookSpec;
use crate::error::Result;
use crate::file::read_to_string;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::path::Path;
use tracing::debug;

const AUTHORS_LABEL: &str = "Authors:";

/// Renders the `---`-fenced metadata block.
///
/// Authors after the first are indented to line up under the first name.
#[must_use]
pub fn metadata(spec: &BookSpec, timestamp: &DateTime<FixedOffset>) -> String {
    let mut out = format!(
        "---\nTitle: {}\nSummary: {}\nDate: {}\n",
        spec.title,
        spec.summary,
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    out.push_str(AUTHORS_LABEL);
    if spec.authors.is_empty() {
        out.push('\n');
    }
    for (idx, author) in spec.authors.iter().enumerate() {
        if idx > 0 {
            out.push_str(&" ".repeat(AUTHORS_LABEL.len()));
        }
        out.push_str(&format!(" {author}\n"));
    }

    out.push_str("---\n");
    out
}

/// Renders the title page, or nothing when the title is empty.
#[must_use]
pub fn title_page(title: &str, authors: &[String]) -> String {
    if title.is_empty() {
        return String::new();
    }
    format!("# {title}\nBy {}\n", authors.join(", "))
}

/// Reads the dedication file and renders it under its heading.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn dedication(path: &Path) -> Result<String> {
    let content = read_to_string(path)?;
    debug!("Read dedication from {}", path.display());
    Ok(format!("## Dedication\n{content}\n"))
}
