//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::core::models::{OUTPUT_TIMESTAMP_FORMAT, OutputConfig};
use crate::error::ChatlensError;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: depend on `OutputConfig`
///   - Basic: `Author`, `Body`
///   - With timestamps: `Timestamp`, `Author`, `Body`
///   - With flags: `Author`, `Body`, `IsMedia`, `IsSystem`
/// - Encoding: UTF-8; multi-line bodies are quoted
pub fn write_csv(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut buf = Vec::new();
    write_records(&mut buf, messages, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(
    sink: W,
    messages: &[Message],
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.push("Author");
    header.push("Body");

    if config.include_flags {
        header.push("IsMedia");
        header.push("IsSystem");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_timestamps {
        record.push(msg.timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string());
    }

    record.push(msg.author.clone());
    record.push(msg.body.clone());

    if config.include_flags {
        record.push(msg.is_media.to_string());
        record.push(msg.is_system.to_string());
    }

    record
}
