//! Command-line argument parsing
//!
//! Supports:
//! - Rewriting pages or whole documentation directories
//! - Writing to stdout, a single output file, or in place
//! - Check mode for CI (report pages that would change)
//! - Classifying a single token for debugging profiles

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::markup::HighlightClasses;

/// Highlight library type names in rendered documentation
#[derive(Parser, Debug)]
#[command(
    name = "typemark",
    version,
    about = "Highlight library type names in rendered documentation pages"
)]
pub struct CliArgs {
    /// HTML pages or directories to process
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Profile id to activate (repeatable; name sets are merged)
    #[arg(short = 'p', long = "profile", value_name = "ID")]
    pub profiles: Vec<String>,

    /// Additional profile loaded from a YAML file (repeatable)
    #[arg(long = "profile-file", value_name = "FILE")]
    pub profile_files: Vec<PathBuf>,

    /// Class added to type tokens
    #[arg(long, value_name = "CLASS")]
    pub type_class: Option<String>,

    /// Class carried by plain identifier spans
    #[arg(long, value_name = "CLASS")]
    pub identifier_class: Option<String>,

    /// Write the result to FILE (single input page only)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Rewrite pages in place
    #[arg(short = 'i', long)]
    pub in_place: bool,

    /// Only report pages that would change; exit with status 1 if any would
    #[arg(long)]
    pub check: bool,

    /// Print a JSON summary instead of plain text
    #[arg(long)]
    pub json: bool,

    /// List available profiles and exit
    #[arg(long)]
    pub list_profiles: bool,

    /// Classify a single token and exit
    #[arg(long, value_name = "TOKEN")]
    pub classify: Option<String>,

    /// Successor text for --classify
    #[arg(long, value_name = "TEXT", requires = "classify")]
    pub next: Option<String>,
}

/// Where rewritten pages go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Print to stdout
    Stdout,
    /// Write a single page to this file
    File(PathBuf),
    /// Overwrite each input page
    InPlace,
    /// Write nothing, only report
    Check,
}

/// What the invocation asks for
#[derive(Debug, Clone)]
pub enum RunMode {
    ListProfiles,
    Classify { token: String, next: Option<String> },
    Process { paths: Vec<PathBuf>, output: OutputMode },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    /// Profile ids from the command line; `None` defers to the config file
    pub profiles: Option<Vec<String>>,
    pub profile_files: Vec<PathBuf>,
    pub type_class: Option<String>,
    pub identifier_class: Option<String>,
    pub json: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let mode = if self.list_profiles {
            RunMode::ListProfiles
        } else if let Some(token) = self.classify {
            RunMode::Classify {
                token,
                next: self.next,
            }
        } else {
            if self.paths.is_empty() {
                return Err("No input pages given".to_string());
            }

            let output = match (self.output, self.in_place, self.check) {
                (None, false, false) => OutputMode::Stdout,
                (Some(path), false, false) => {
                    if self.paths.len() > 1 || self.paths[0].is_dir() {
                        return Err("--output takes exactly one input page".to_string());
                    }
                    OutputMode::File(path)
                }
                (None, true, false) => OutputMode::InPlace,
                (None, false, true) => OutputMode::Check,
                _ => {
                    return Err(
                        "--output, --in-place and --check are mutually exclusive".to_string()
                    )
                }
            };

            RunMode::Process {
                paths: self.paths,
                output,
            }
        };

        let profiles = if self.profiles.is_empty() {
            None
        } else {
            Some(self.profiles)
        };

        Ok(RunConfig {
            mode,
            profiles,
            profile_files: self.profile_files,
            type_class: self.type_class,
            identifier_class: self.identifier_class,
            json: self.json,
        })
    }
}

impl RunConfig {
    /// Profile ids to load: command line first, then the config file
    pub fn profile_ids(&self, config: &Config) -> Vec<String> {
        self.profiles
            .clone()
            .unwrap_or_else(|| config.profiles.clone())
    }

    /// Highlight classes with command-line overrides applied
    pub fn classes(&self, config: &Config) -> HighlightClasses {
        let mut classes = config.classes();
        if let Some(type_class) = &self.type_class {
            classes.type_class = type_class.clone();
        }
        if let Some(identifier_class) = &self.identifier_class {
            classes.identifier_class = identifier_class.clone();
        }
        classes
    }
}
