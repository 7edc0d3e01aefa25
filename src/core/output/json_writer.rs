//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::JsonRecord;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

/// Writes messages to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"author": "Alice", "body": "Hello"},
///   {"author": "Bob", "body": "Hi"}
/// ]
/// ```
pub fn write_json(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array.
///
/// Same format as [`write_json`].
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String, ChatlensError> {
    let records: Vec<JsonRecord<'_>> = messages
        .iter()
        .map(|m| JsonRecord::new(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
