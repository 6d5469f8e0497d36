//! Utility modules

pub mod file_validation;

pub use file_validation::{
    filename_for_display, is_html_file, is_likely_binary, validate_page, FileOpenError,
    MAX_FILE_SIZE,
};
