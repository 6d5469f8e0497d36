//! Applying classification results to a page

use std::ops::Range;

use serde::Serialize;

use super::class_list::ClassList;
use super::scanner::{MarkupScanner, RenderedToken, TokenRole};
use super::MarkupError;
use crate::classify::Classifier;

/// Presentation classes touched by highlighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightClasses {
    /// Added to tokens recognised as types
    pub type_class: String,
    /// Removed from tokens recognised as types
    pub identifier_class: String,
}

impl Default for HighlightClasses {
    fn default() -> Self {
        Self {
            type_class: "typ".to_string(),
            identifier_class: "pln".to_string(),
        }
    }
}

/// Result of one highlighting pass over a page
#[derive(Debug, Clone, Serialize)]
pub struct HighlightOutcome {
    #[serde(skip)]
    pub html: String,
    /// Candidate tokens handed to the classifier
    pub scanned: usize,
    /// Tokens rewritten as types
    pub marked: usize,
}

impl HighlightOutcome {
    pub fn changed(&self) -> bool {
        self.marked > 0
    }
}

/// A byte-range replacement in the original source
#[derive(Debug)]
struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// Classifier plus the markup adapter that applies its decisions
pub struct Highlighter {
    scanner: MarkupScanner,
    classifier: Classifier,
    classes: HighlightClasses,
}

impl Highlighter {
    pub fn new(classifier: Classifier, classes: HighlightClasses) -> Result<Self, MarkupError> {
        Ok(Self {
            scanner: MarkupScanner::new()?,
            classifier,
            classes,
        })
    }

    /// Rewrite `html`, marking every token the classifier accepts as a type
    ///
    /// Bytes outside the rewritten elements are copied unchanged.
    pub fn highlight(&mut self, html: &str) -> HighlightOutcome {
        let Some(tokens) = self.scanner.scan(html, &self.classes.identifier_class) else {
            return HighlightOutcome {
                html: html.to_string(),
                scanned: 0,
                marked: 0,
            };
        };

        let mut edits = Vec::new();
        let mut marked = 0;
        for token in &tokens {
            let decision = self
                .classifier
                .classify(&token.text, token.successor.as_deref());
            tracing::trace!(
                "token {:?} (next {:?}) -> {:?}",
                token.text,
                token.successor,
                decision
            );
            if decision.is_type() {
                marked += 1;
                self.push_edits(token, &mut edits);
            }
        }

        HighlightOutcome {
            html: apply_edits(html, edits),
            scanned: tokens.len(),
            marked,
        }
    }

    fn push_edits(&self, token: &RenderedToken<'_>, edits: &mut Vec<Edit>) {
        let type_class = &self.classes.type_class;
        let identifier_class = &self.classes.identifier_class;

        match token.role {
            TokenRole::InlineCode => {
                // Class goes on an inner span so the code element keeps its own styling
                let mut classes = ClassList::default();
                classes.mark_as_type(type_class, identifier_class);
                edits.push(Edit {
                    range: token.inner.start..token.inner.start,
                    replacement: format!("<span class=\"{}\">", classes),
                });
                edits.push(Edit {
                    range: token.inner.end..token.inner.end,
                    replacement: "</span>".to_string(),
                });
            }
            TokenRole::Span => {
                let Some(attr) = &token.class_attr else {
                    return;
                };
                let mut classes = token.classes.clone();
                classes.mark_as_type(type_class, identifier_class);
                let quote = attr.quote.unwrap_or('"');
                edits.push(Edit {
                    range: attr.value_range.clone(),
                    replacement: format!("{quote}{classes}{quote}"),
                });
            }
        }
    }
}

/// Splice non-overlapping edits into `source`
fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    if edits.is_empty() {
        return source.to_string();
    }

    // Stable: an opening insertion stays ahead of a closing one at the same offset
    edits.sort_by_key(|e| e.range.start);

    let extra: usize = edits.iter().map(|e| e.replacement.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    let mut pos = 0;
    for edit in edits {
        if edit.range.start < pos {
            tracing::warn!("Skipping overlapping edit at byte {}", edit.range.start);
            continue;
        }
        out.push_str(&source[pos..edit.range.start]);
        out.push_str(&edit.replacement);
        pos = edit.range.end;
    }
    out.push_str(&source[pos..]);
    out
}

/// One-shot convenience wrapper around [`Highlighter`]
pub fn highlight_html(
    html: &str,
    classifier: &Classifier,
    classes: &HighlightClasses,
) -> Result<HighlightOutcome, MarkupError> {
    let mut highlighter = Highlighter::new(classifier.clone(), classes.clone())?;
    Ok(highlighter.highlight(html))
}
