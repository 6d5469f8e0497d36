//! Rendered-page adapter for the classifier
//!
//! Finds candidate tokens in an HTML page, asks the [`Classifier`] about each
//! one and rewrites the ones it marks:
//!
//! - `<span class="pln">PMEMoid</span>` becomes `<span class="typ">PMEMoid</span>`
//! - `<code>PMEMoid</code>` becomes `<code><span class="typ">PMEMoid</span></code>`
//!
//! The successor used for lookahead is the node directly after the token,
//! without skipping whitespace: `TOID (` does not read as a macro call.
//!
//! [`Classifier`]: crate::classify::Classifier

mod class_list;
mod rewrite;
mod scanner;

pub use class_list::ClassList;
pub use rewrite::{highlight_html, HighlightClasses, HighlightOutcome, Highlighter};
pub use scanner::{ClassAttr, MarkupScanner, RenderedToken, TokenRole};

/// Errors setting up the HTML parser
#[derive(Debug, Clone)]
pub enum MarkupError {
    /// Grammar rejected by the tree-sitter runtime
    Language(String),
    /// Element query failed to compile
    Query(String),
}

impl std::fmt::Display for MarkupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkupError::Language(e) => write!(f, "HTML grammar error: {}", e),
            MarkupError::Query(e) => write!(f, "HTML query error: {}", e),
        }
    }
}

impl std::error::Error for MarkupError {}
