//! Edge case tests for chatlens
//!
//! These tests cover header shapes, line endings and classification corner
//! cases that real exports produce but the main integration tests do not.

use chatlens::core::filter::FilterConfig;
use chatlens::parser::ChatParser;
use chatlens::parsing::{LineClassifier, MessageClassifier};
use chatlens::{ChatTable, Message};
use chrono::{Datelike, NaiveDate, Timelike};

fn parse(input: &str) -> ChatTable {
    ChatParser::new().parse_str(input).unwrap()
}

// =========================================================================
// Header shapes
// =========================================================================

#[test]
fn test_narrow_no_break_space_before_meridiem() {
    let table = parse("[12/25/23, 10:30:00\u{202f}PM] Alice: iOS 17 style");
    let ts = table.messages()[0].timestamp;
    assert_eq!(ts.hour(), 22);
    assert_eq!(ts.year(), 2023);
}

#[test]
fn test_loose_grammar_dot_time_and_en_dash() {
    let table = parse("12/25/23 10.30pm – Alice: loose header");
    let msg = &table.messages()[0];
    assert_eq!(msg.author, "Alice");
    assert_eq!(msg.timestamp.hour(), 22);
    assert_eq!(msg.timestamp.minute(), 30);
}

#[test]
fn test_dotted_meridiem() {
    let table = parse("12/25/2023, 9:05 a.m. - Bob: early");
    assert_eq!(table.messages()[0].timestamp.hour(), 9);
}

#[test]
fn test_midnight_and_noon_in_twelve_hour_clock() {
    let table = parse(
        "12/25/2023, 12:00 AM - Alice: midnight\n\
         12/25/2023, 12:00 PM - Alice: noon",
    );
    assert_eq!(table.messages()[0].timestamp.hour(), 0);
    assert_eq!(table.messages()[1].timestamp.hour(), 12);
}

#[test]
fn test_twenty_four_hour_with_seconds_unbracketed() {
    let table = parse("25/12/2023, 22:15:03 - Bob: late");
    let ts = table.messages()[0].timestamp;
    assert_eq!(
        ts,
        NaiveDate::from_ymd_opt(2023, 12, 25)
            .unwrap()
            .and_hms_opt(22, 15, 3)
            .unwrap()
    );
}

#[test]
fn test_colon_inside_body_splits_at_first_delimiter() {
    let table = parse("12/25/2023, 10:30 AM - Alice: note: bring snacks");
    let msg = &table.messages()[0];
    assert_eq!(msg.author, "Alice");
    assert_eq!(msg.body, "note: bring snacks");
}

#[test]
fn test_unicode_and_phone_number_authors() {
    let table = parse(
        "12/25/2023, 10:30 AM - Мария Иванова: Привет!\n\
         12/25/2023, 10:31 AM - +1 555 123 4567: who is this?\n\
         12/25/2023, 10:32 AM - 村上 🎉: こんにちは",
    );
    let authors = table.authors();
    assert_eq!(authors, vec!["Мария Иванова", "+1 555 123 4567", "村上 🎉"]);
}

#[test]
fn test_date_like_continuation_is_not_a_header() {
    let table = parse(
        "12/25/2023, 10:30 AM - Alice: remember\n\
         12/25/2023 was a great day",
    );
    assert_eq!(table.len(), 1);
    assert_eq!(table.messages()[0].body, "remember\n12/25/2023 was a great day");
}

#[test]
fn test_date_glued_to_time_is_continuation() {
    let table = parse(
        "12/25/2023, 10:30 AM - Alice: schedule\n\
         1/5/2410:30 - Bob: hi",
    );
    assert_eq!(table.len(), 1);
    assert_eq!(table.messages()[0].body, "schedule\n1/5/2410:30 - Bob: hi");
}

#[test]
fn test_header_without_author_delimiter_is_continuation() {
    let table = parse(
        "12/25/2023, 10:30 AM - Alice: hi\n\
         12/25/2023, 10:31 AM - Messages and calls are end-to-end encrypted.",
    );
    assert_eq!(table.len(), 1);
    assert!(table.messages()[0].body.ends_with("end-to-end encrypted."));
}

// =========================================================================
// Line handling
// =========================================================================

#[test]
fn test_crlf_line_endings() {
    let table = parse(
        "12/25/2023, 10:30 AM - Alice: first\r\nsecond line\r\n12/25/2023, 10:31 AM - Bob: ok\r\n",
    );
    assert_eq!(table.len(), 2);
    assert_eq!(table.messages()[0].body, "first\nsecond line");
    assert_eq!(table.messages()[1].body, "ok");
}

#[test]
fn test_byte_order_mark_on_first_line() {
    let table = parse("\u{feff}12/25/2023, 10:30 AM - Alice: hi");
    assert_eq!(table.len(), 1);
    assert_eq!(table.messages()[0].author, "Alice");
}

#[test]
fn test_blank_lines_do_not_end_or_extend_message() {
    let table = parse(
        "12/25/2023, 10:30 AM - Alice: para one\n\
         \n\
         \t   \n\
         para two",
    );
    assert_eq!(table.len(), 1);
    assert_eq!(table.messages()[0].body, "para one\npara two");
}

#[test]
fn test_continuation_lines_are_trimmed() {
    let table = parse("12/25/2023, 10:30 AM - Alice: list\n   - item one   \n\t- item two");
    assert_eq!(table.messages()[0].body, "list\n- item one\n- item two");
}

#[test]
fn test_whitespace_only_body_is_discarded() {
    let (table, stats) = ChatParser::new()
        .parse_str_with_stats(
            "12/25/2023, 10:30 AM - Alice:  \u{a0}\n\
             12/25/2023, 10:31 AM - Bob: still here",
        )
        .unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.messages()[0].author, "Bob");
    assert_eq!(stats.empty_messages, 1);
}

#[test]
fn test_whitespace_only_input() {
    let table = parse("\n\n   \n\t\n");
    assert!(table.is_empty());
}

#[test]
fn test_only_garbage_lines() {
    let (table, stats) = ChatParser::new()
        .parse_str_with_stats("no headers here\nnor here")
        .unwrap();
    assert!(table.is_empty());
    assert_eq!(stats.orphan_lines, 2);
}

#[test]
fn test_very_long_body() {
    let long = "x".repeat(100 * 1024);
    let table = parse(&format!("12/25/2023, 10:30 AM - Alice: {long}"));
    assert_eq!(table.messages()[0].body.len(), 100 * 1024);
}

#[test]
fn test_error_reports_physical_line_number() {
    let err = ChatParser::new()
        .parse_str(
            "12/25/2023, 10:30 AM - Alice: hi\n\
             \n\
             continued\n\
             13/13/2023, 10:30 AM - Bob: bad month",
        )
        .unwrap_err();
    assert!(err.to_string().contains("line 4"));
}

// =========================================================================
// Classification
// =========================================================================

#[test]
fn test_system_author_is_case_insensitive_and_exact() {
    let classifier = MessageClassifier::new();
    assert!(classifier.is_system("whatsapp", "hello"));
    assert!(classifier.is_system("  SYSTEM ", "hello"));
    assert!(!classifier.is_system("Systems Team", "hello"));
}

#[test]
fn test_media_matched_case_insensitively_anywhere_in_body() {
    let classifier = MessageClassifier::new();
    assert!(classifier.is_media("look: IMG_0042.JPG"));
    assert!(classifier.is_media("<media OMITTED>"));
    assert!(!classifier.is_media("media is fun"));
}

#[test]
fn test_media_and_system_are_independent_flags() {
    let c = MessageClassifier::new().classify("Bob", "Alice added photo.jpg");
    assert!(c.is_media);
    assert!(c.is_system);
}

#[test]
fn test_classification_is_idempotent() {
    let classifier = MessageClassifier::new();
    for body in ["<Media omitted>", "Carol left", "plain text", ""] {
        assert_eq!(classifier.classify("Alice", body), classifier.classify("Alice", body));
    }
}

#[test]
fn test_multiline_media_body_is_still_media() {
    let table = parse("12/25/2023, 10:30 AM - Alice: caption first\nvideo omitted");
    assert!(table.messages()[0].is_media);
}

// =========================================================================
// Filtering corner cases
// =========================================================================

#[test]
fn test_author_filter_is_case_insensitive() {
    let table = parse(
        "12/25/2023, 10:30 AM - Alice: one\n\
         12/25/2023, 10:31 AM - Bob: two",
    );
    let kept = table.filter(&FilterConfig::new().with_author("ALICE"));
    assert_eq!(kept.len(), 1);
    assert_eq!(kept.messages()[0].body, "one");
}

#[test]
fn test_date_bounds_are_inclusive() {
    let table = parse(
        "12/24/2023, 11:59 PM - Alice: before\n\
         12/25/2023, 12:00 AM - Alice: start\n\
         12/25/2023, 11:59 PM - Alice: end\n\
         12/26/2023, 12:00 AM - Alice: after",
    );
    let filter = FilterConfig::new()
        .with_date_from("2023-12-25")
        .unwrap()
        .with_date_to("2023-12-25")
        .unwrap();
    let kept: Vec<String> = table.filter(&filter).iter().map(|m| m.body.clone()).collect();
    assert_eq!(kept, vec!["start", "end"]);
}

#[test]
fn test_line_classifier_rejects_unanchored_match() {
    let classifier = LineClassifier::new();
    assert!(!classifier.is_header("said: 12/25/2023, 10:30 AM - Alice: hi"));
}

#[test]
fn test_message_builder_flags() {
    let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let msg = Message::new(ts, "Alice", "hi").with_media(true);
    assert!(msg.is_media);
    assert!(!msg.is_text());
}
