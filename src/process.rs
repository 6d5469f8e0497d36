//! Page discovery and per-page processing

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::OutputMode;
use crate::markup::Highlighter;
use crate::util::{filename_for_display, is_html_file, validate_page, FileOpenError};

/// Outcome for one page
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub path: PathBuf,
    pub scanned: usize,
    pub marked: usize,
}

impl PageReport {
    pub fn changed(&self) -> bool {
        self.marked > 0
    }
}

/// A page that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FailedPage {
    pub path: PathBuf,
    pub error: String,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub pages: Vec<PageReport>,
    pub failed: Vec<FailedPage>,
}

impl RunSummary {
    pub fn marked(&self) -> usize {
        self.pages.iter().map(|p| p.marked).sum()
    }

    pub fn changed_pages(&self) -> impl Iterator<Item = &PageReport> {
        self.pages.iter().filter(|p| p.changed())
    }
}

/// Errors processing a single page
#[derive(Debug)]
pub enum PageError {
    Invalid(FileOpenError),
    Write { path: PathBuf, message: String },
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::Invalid(e) => write!(f, "{}", e),
            PageError::Write { path, message } => {
                write!(f, "Failed to write {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for PageError {}

impl From<FileOpenError> for PageError {
    fn from(e: FileOpenError) -> Self {
        PageError::Invalid(e)
    }
}

/// Expand inputs into a sorted list of pages
///
/// Files are taken as given; directories are walked recursively for HTML
/// pages. Unreadable directories are logged and skipped.
pub fn collect_pages(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut pages = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            walk_dir(input, &mut found);
            found.sort();
            tracing::debug!("Found {} pages under {}", found.len(), input.display());
            pages.extend(found);
        } else {
            pages.push(input.clone());
        }
    }
    pages
}

fn walk_dir(dir: &Path, found: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot read directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, found);
        } else if is_html_file(&path) {
            found.push(path);
        }
    }
}

/// Highlight one page and deliver it according to `output`
///
/// `stdout` receives the page in [`OutputMode::Stdout`]; it is unused otherwise.
pub fn process_page<W: Write>(
    highlighter: &mut Highlighter,
    path: &Path,
    output: &OutputMode,
    stdout: &mut W,
) -> Result<PageReport, PageError> {
    validate_page(path)?;
    let source = fs::read_to_string(path).map_err(|e| FileOpenError::IoError(e.to_string()))?;

    let outcome = highlighter.highlight(&source);
    tracing::info!(
        "{}: {} of {} tokens marked",
        filename_for_display(path),
        outcome.marked,
        outcome.scanned
    );

    let write_err = |target: &Path, e: std::io::Error| PageError::Write {
        path: target.to_path_buf(),
        message: e.to_string(),
    };

    match output {
        OutputMode::Stdout => stdout
            .write_all(outcome.html.as_bytes())
            .map_err(|e| write_err(Path::new("<stdout>"), e))?,
        OutputMode::File(target) => {
            fs::write(target, &outcome.html).map_err(|e| write_err(target, e))?
        }
        OutputMode::InPlace => {
            if outcome.changed() {
                fs::write(path, &outcome.html).map_err(|e| write_err(path, e))?;
            }
        }
        OutputMode::Check => {}
    }

    Ok(PageReport {
        path: path.to_path_buf(),
        scanned: outcome.scanned,
        marked: outcome.marked,
    })
}

/// Process every page, collecting failures instead of stopping at the first
pub fn process_all<W: Write>(
    highlighter: &mut Highlighter,
    pages: &[PathBuf],
    output: &OutputMode,
    stdout: &mut W,
) -> RunSummary {
    let mut summary = RunSummary::default();
    for page in pages {
        match process_page(highlighter, page, output, stdout) {
            Ok(report) => summary.pages.push(report),
            Err(e) => {
                tracing::warn!("{}", e);
                let error = match &e {
                    PageError::Invalid(inner) => inner.user_message(&page.display().to_string()),
                    PageError::Write { .. } => e.to_string(),
                };
                summary.failed.push(FailedPage {
                    path: page.clone(),
                    error,
                });
            }
        }
    }
    summary
}
