//! Tests for output writers (CSV, JSON, JSONL) over parsed tables

use chatlens::core::OutputConfig;
use chatlens::core::output::{to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};
use chatlens::format::{OutputFormat, table_to_string, write_table};
use chatlens::parser::ChatParser;
use chatlens::table::ChatTable;
use std::fs;
use tempfile::tempdir;

fn sample_table() -> ChatTable {
    ChatParser::new()
        .parse_str(
            "[15/01/2024, 10:30:00] Alice: Hello!\n\
             [15/01/2024, 10:31:00] Bob: Hi Alice; how are you?\n\
             second line with \"quotes\"\n\
             [15/01/2024, 10:32:00] Alice: <Media omitted>\n\
             [15/01/2024, 10:33:00] System: Bob changed the subject to Lunch",
        )
        .unwrap()
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_write_csv_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.csv");

        write_csv(sample_table().messages(), &path, &OutputConfig::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Author;Body\n"));
        assert!(content.contains("Alice;Hello!"));
    }

    #[test]
    fn test_csv_roundtrip_through_reader() {
        let csv = to_csv(sample_table().messages(), &OutputConfig::all()).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["Timestamp", "Author", "Body", "IsMedia", "IsSystem"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][0], "2024-01-15 10:30:00");
        assert_eq!(
            &rows[1][2],
            "Hi Alice; how are you?\nsecond line with \"quotes\""
        );
        assert_eq!(&rows[2][3], "true");
        assert_eq!(&rows[3][4], "true");
    }

    #[test]
    fn test_csv_empty_table_has_header_only() {
        let csv = to_csv(&[], &OutputConfig::new()).unwrap();
        assert_eq!(csv, "Author;Body\n");
    }
}

// ============================================================================
// JSON Writer Tests
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_write_json_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");

        write_json(sample_table().messages(), &path, &OutputConfig::new()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0]["author"], "Alice");
        assert!(items[0].get("timestamp").is_none());
        assert!(items[0].get("is_media").is_none());
    }

    #[test]
    fn test_json_with_all_fields() {
        let json = to_json(sample_table().messages(), &OutputConfig::all()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["timestamp"], "2024-01-15 10:30:00");
        assert_eq!(value[2]["is_media"], true);
        assert_eq!(value[3]["is_system"], true);
        assert_eq!(value[0]["is_system"], false);
    }

    #[test]
    fn test_json_empty_table() {
        let json = to_json(&[], &OutputConfig::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }
}

// ============================================================================
// JSONL Writer Tests
// ============================================================================

mod jsonl_writer_tests {
    use super::*;

    #[test]
    fn test_write_jsonl_one_line_per_message() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.jsonl");

        write_jsonl(sample_table().messages(), &path, &OutputConfig::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        for line in lines {
            let _: serde_json::Value = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn test_jsonl_escapes_multiline_body() {
        let jsonl = to_jsonl(sample_table().messages(), &OutputConfig::new()).unwrap();
        let second: serde_json::Value =
            serde_json::from_str(jsonl.lines().nth(1).unwrap()).unwrap();
        assert_eq!(
            second["body"],
            "Hi Alice; how are you?\nsecond line with \"quotes\""
        );
    }
}

// ============================================================================
// Format dispatch
// ============================================================================

mod format_dispatch_tests {
    use super::*;

    #[test]
    fn test_write_table_every_format() {
        let dir = tempdir().unwrap();
        let table = sample_table();
        let config = OutputConfig::new().with_timestamps();

        for format in OutputFormat::all() {
            let path = dir.path().join(format!("out.{}", format.extension()));
            write_table(&table, &path, *format, &config).unwrap();

            let on_disk = fs::read_to_string(&path).unwrap();
            let in_memory = table_to_string(&table, *format, &config).unwrap();
            assert_eq!(on_disk, in_memory, "{format} output differs");
        }
    }

    #[test]
    fn test_filtered_table_export() {
        let table = sample_table();
        let kept = table.filter(&chatlens::core::FilterConfig::new().without_system().without_media());
        let out = table_to_string(&kept, OutputFormat::Jsonl, &OutputConfig::new()).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains("changed the subject"));
    }

    #[test]
    fn test_write_to_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");
        let err = write_table(&sample_table(), &path, OutputFormat::Csv, &OutputConfig::new())
            .unwrap_err();
        assert!(err.is_io() || matches!(err, chatlens::ChatlensError::Csv(_)));
    }
}
