//! Per-message derived features.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use regex::Regex;
use serde::Serialize;

use crate::Message;
use crate::table::ChatTable;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z0-9$\-_@.&+!*(),]|%[0-9a-fA-F]{2})+")
        .expect("URL pattern is valid")
});

/// A message with its calendar, length and content features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedMessage<'a> {
    pub message: &'a Message,
    pub date: NaiveDate,
    pub hour: u32,
    pub weekday: Weekday,
    /// ISO week number
    pub iso_week: u32,
    pub month: u32,
    pub year: i32,
    /// Body length in characters
    pub length: usize,
    /// Whitespace-separated tokens in the body
    pub word_count: usize,
    pub has_url: bool,
    pub emojis: Vec<char>,
}

impl<'a> EnrichedMessage<'a> {
    pub fn new(message: &'a Message) -> Self {
        let ts = message.timestamp;
        Self {
            message,
            date: ts.date(),
            hour: ts.hour(),
            weekday: ts.weekday(),
            iso_week: ts.iso_week().week(),
            month: ts.month(),
            year: ts.year(),
            length: message.body.chars().count(),
            word_count: message.body.split_whitespace().count(),
            has_url: contains_url(&message.body),
            emojis: extract_emojis(&message.body),
        }
    }

    pub fn emoji_count(&self) -> usize {
        self.emojis.len()
    }
}

/// Enriches every message of the table, keeping table order.
pub fn enrich(table: &ChatTable) -> Vec<EnrichedMessage<'_>> {
    table.iter().map(EnrichedMessage::new).collect()
}

/// Returns `true` if `text` holds an `http://` or `https://` link.
pub fn contains_url(text: &str) -> bool {
    URL_PATTERN.is_match(text)
}

/// Emoji code points in `text`, in order, repeats kept.
pub fn extract_emojis(text: &str) -> Vec<char> {
    text.chars().filter(|&c| is_emoji(c)).collect()
}

/// Returns `true` for code points in the pictographic emoji blocks.
///
/// Joiners and variation selectors are not emoji on their own, so a
/// composed sequence counts once per pictograph it contains.
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F5FF // symbols and pictographs
            | 0x1F600..=0x1F64F // emoticons
            | 0x1F680..=0x1F6FF // transport and map
            | 0x1F900..=0x1F9FF // supplemental symbols
            | 0x1FA70..=0x1FAFF // symbols extended-A
            | 0x1F1E6..=0x1F1FF // regional indicators
            | 0x1F004
            | 0x1F0CF
            | 0x1F18E
            | 0x1F191..=0x1F19A
            | 0x2600..=0x26FF // misc symbols
            | 0x2700..=0x27BF // dingbats
            | 0x231A..=0x231B
            | 0x23E9..=0x23F3
            | 0x23F8..=0x23FA
            | 0x2B50
            | 0x2B55
            | 0x2B1B..=0x2B1C
    )
}
