//! JSON document writer and reader.

use super::document::TraceDocument;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a trace document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let document = to_document(&session);
/// write_document(&document, "trace.canonical.json")?;
/// ```
pub fn write_document(
    document: &TraceDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing canonical trace to: {}", output_path.display());

    super::validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document)?;

    info!(
        "Canonical trace written ({} steps, {} bytes)",
        document.total_steps,
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a document to a pretty JSON string (for tests and stdout)
pub fn document_to_string(document: &TraceDocument) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a trace document back from JSON
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_document(input_path: impl AsRef<Path>) -> Result<TraceDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading canonical trace from: {}", input_path.display());

    let file = File::open(input_path)?;
    let document: TraceDocument = serde_json::from_reader(file)?;

    debug!(
        "Canonical trace loaded: version {}, {} steps",
        document.version, document.total_steps
    );

    Ok(document)
}
