//! JSON Lines (JSONL) output writer.
//!
//! One message per line, suited to line-oriented tooling and incremental
//! ingestion.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::JsonRecord;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"author":"Alice","body":"Hello"}
/// {"author":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string, one trailing newline per message.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut buf = Vec::new();
    write_lines(&mut buf, messages, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(
    writer: &mut W,
    messages: &[Message],
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    for msg in messages {
        let line = serde_json::to_string(&JsonRecord::new(msg, config))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    fn msg(author: &str, body: &str) -> Message {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Message::new(ts, author, body)
    }

    #[test]
    fn test_write_jsonl_basic() {
        let messages = vec![msg("Alice", "Hello"), msg("Bob", "Hi")];

        let temp_file = NamedTempFile::new().unwrap();
        write_jsonl(&messages, temp_file.path(), &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(temp_file.path()).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["author"], "Alice");
        assert_eq!(first["body"], "Hello");
    }

    #[test]
    fn test_multiline_body_stays_on_one_line() {
        let jsonl = to_jsonl(&[msg("Alice", "one\ntwo")], &OutputConfig::new()).unwrap();
        assert_eq!(jsonl.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(jsonl.trim()).unwrap();
        assert_eq!(parsed["body"], "one\ntwo");
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let jsonl = to_jsonl(&[msg("Alice", "Hello")], &OutputConfig::all()).unwrap();
        assert!(!jsonl.starts_with('['));
        assert!(jsonl.contains(r#""timestamp":"2024-06-15 12:30:00""#));
    }
}
