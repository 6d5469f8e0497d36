//! typemark - type name highlighting for rendered documentation
//!
//! Rendered API documentation shows library type names such as `PMEMoid` as
//! plain identifiers. This crate classifies each rendered token against a
//! profile of known and ambiguous type names and rewrites the page so the
//! types carry the "type" highlighting class.

pub mod classify;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod markup;
pub mod process;
pub mod profile;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use classify::{Classification, Classifier, TypeNames};
pub use config::Config;
pub use markup::{highlight_html, HighlightClasses, Highlighter};
pub use profile::Profile;
