//! Paragraph numbering for rendered output.
//!
//! Classifies each line of an assembled text and appends a sequential
//! ` <N>` marker to body paragraphs. Headings, list items, blank lines,
//! scene separators, metadata blocks and blockquotes are left alone.

/// Line that opens and closes a metadata block.
const METADATA_FENCE: &str = "---";

/// Where the classifier is within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    Default,
    InMetadataBlock,
    InBlockquote,
}

/// Appends paragraph markers to qualifying lines.
#[derive(Debug, Clone)]
pub struct Numberer {
    separator: String,
}

impl Numberer {
    /// Creates a numberer that skips lines equal to `separator`.
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Numbers the paragraphs of `text`.
    ///
    /// The counter starts at 1 on every call. Windows line endings are
    /// normalized first and trailing whitespace is trimmed from the result.
    #[must_use]
    pub fn number(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n");
        let mut state = LineState::Default;
        let mut next = 1usize;
        let mut lines = Vec::new();

        for line in text.split('\n') {
            if self.classify(&mut state, line) {
                lines.push(format!("{line} <{next}>"));
                next += 1;
            } else {
                lines.push(line.to_string());
            }
        }

        let mut out = lines.join("\n");
        out.truncate(out.trim_end().len());
        out
    }

    /// Moves the tracker past `line` and reports whether it gets a marker.
    fn classify(&self, state: &mut LineState, line: &str) -> bool {
        let is_fence = line.trim_end() == METADATA_FENCE;
        match *state {
            LineState::InMetadataBlock => {
                if is_fence {
                    *state = LineState::Default;
                }
                false
            }
            _ if is_fence => {
                *state = LineState::InMetadataBlock;
                false
            }
            _ if line.starts_with('>') => {
                *state = LineState::InBlockquote;
                false
            }
            _ => {
                *state = LineState::Default;
                self.qualifies(line)
            }
        }
    }

    fn qualifies(&self, line: &str) -> bool {
        let trimmed = line.trim();
        !trimmed.is_empty()
            && !line.starts_with('#')
            && !line.starts_with('-')
            && line != self.separator
    }
}
