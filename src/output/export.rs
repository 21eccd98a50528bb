//! File and stdout writers

use crate::output::OutputResult;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Writes `value` as pretty-printed JSON
///
/// # Arguments
///
/// * `value` - Anything serializable: a summary, an export, a report
/// * `output_path` - Destination file; stdout when None
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the document
/// * `Err(OutputError)` - Serialization or IO failed
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: Option<&Path>) -> OutputResult<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_text(&json, output_path)
}

/// Writes `content` to a file, or to stdout when `output_path` is None
pub fn write_text(content: &str, output_path: Option<&Path>) -> OutputResult<()> {
    match output_path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(content.as_bytes())?;
            tracing::info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
