//! Block scanning.
//!
//! Finds annotated spans of the form
//! ```text
//! <!-- extract:box/card.html name:Card -->
//! content here
//! <!-- endextract -->
//! ```
//! Scanning runs left to right; each opening annotation is closed by the
//! nearest following `endextract`. Blocks do not nest: an `extract:`
//! annotation inside an open block is plain content.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Opening annotation; group 1 is the annotation text after `<!--`.
static OPEN_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--\s*(extract:.*?)-->").expect("Invalid open marker regex")
});

static CLOSE_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*endextract\s*-->").expect("Invalid close marker regex")
});

/// What to do with an opening annotation that is never closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnterminatedPolicy {
    /// Drop the dangling block.
    #[default]
    Discard,
    /// Treat end of document as the closing marker.
    CloseAtEnd,
}

/// An annotated span as found in the document, before any processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Text of the opening annotation without the comment delimiters.
    pub annotation: String,
    /// Text strictly between the opening and closing markers.
    pub content: String,
    /// 1-based line of the opening marker.
    pub start_line: usize,
    /// 1-based line of the closing marker, or the last line when the block
    /// was closed by end of document.
    pub end_line: usize,
    /// False when the block was closed by end of document.
    pub terminated: bool,
}

/// Result of scanning one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    pub blocks: Vec<RawBlock>,
    /// Start line of an opening annotation with no closing marker.
    pub unterminated: Option<usize>,
}

impl Scan {
    /// True when the document holds no opening annotation at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.unterminated.is_none()
    }
}

/// Convert CRLF line endings to LF.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Scan a document for extraction blocks, in order of appearance.
///
/// # Example
/// ```
/// use partial_blocks::scanner::{UnterminatedPolicy, scan};
///
/// let text = "<!-- extract:box/card.html -->\n    <div>X</div>\n<!-- endextract -->";
/// let scan = scan(text, UnterminatedPolicy::Discard);
/// assert_eq!(scan.blocks.len(), 1);
/// assert_eq!(scan.blocks[0].annotation, "extract:box/card.html");
/// assert_eq!(scan.blocks[0].content, "\n    <div>X</div>\n");
/// ```
pub fn scan(text: &str, policy: UnterminatedPolicy) -> Scan {
    let text = normalize_line_endings(text);
    let text = text.as_ref();
    let mut result = Scan::default();
    let mut position = 0;

    while let Some(caps) = OPEN_MARKER_REGEX.captures_at(text, position) {
        let (Some(open), Some(annotation)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let start_line = line_at(text, open.start());
        let annotation = annotation.as_str().trim().to_string();

        match CLOSE_MARKER_REGEX.find_at(text, open.end()) {
            Some(close) => {
                result.blocks.push(RawBlock {
                    annotation,
                    content: text[open.end()..close.start()].to_string(),
                    start_line,
                    end_line: line_at(text, close.start()),
                    terminated: true,
                });
                position = close.end();
            }
            None => {
                result.unterminated = Some(start_line);
                if policy == UnterminatedPolicy::CloseAtEnd {
                    result.blocks.push(RawBlock {
                        annotation,
                        content: text[open.end()..].to_string(),
                        start_line,
                        end_line: line_at(text, text.trim_end_matches('\n').len()),
                        terminated: false,
                    });
                }
                break;
            }
        }
    }

    result
}

fn line_at(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}
