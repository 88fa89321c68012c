//! Output writers for normalized traces.
//!
//! This module handles:
//! - The versioned canonical-trace JSON document
//! - Writing and reading that document on disk
//! - Plain-text rendering of a single step for the terminal

pub mod document;
pub mod json;
pub mod summary;

// Re-export main functions
pub use document::{to_document, TraceDocument};
pub use json::{document_to_string, read_document, write_document};
pub use summary::render_step_summary;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
