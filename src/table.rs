//! The Chat Table: the parser's output and the input to all analysis.
//!
//! A [`ChatTable`] is built once per parse, sorted by timestamp, and never
//! mutated afterwards. Every derived view (filtering, grouping, summaries)
//! returns new values and leaves the table untouched, so a table can be
//! shared read-only across threads.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::filter::FilterConfig;

/// Ordered, immutable collection of sealed messages.
///
/// # Example
///
/// ```rust
/// use chatlens::{ChatTable, Message};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let table = ChatTable::from_messages(vec![
///     Message::new(day.and_hms_opt(11, 0, 0).unwrap(), "Bob", "second"),
///     Message::new(day.and_hms_opt(10, 0, 0).unwrap(), "Alice", "first"),
/// ]);
///
/// assert_eq!(table.messages()[0].body, "first");
/// assert_eq!(table.authors(), vec!["Alice", "Bob"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatTable {
    messages: Vec<Message>,
}

impl ChatTable {
    /// Builds a table, stably sorting by timestamp.
    ///
    /// Messages sharing a timestamp keep their input order.
    pub fn from_messages(mut messages: Vec<Message>) -> Self {
        messages.sort_by_key(|m| m.timestamp);
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All messages in timestamp order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Consumes the table, returning its messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Distinct authors in order of first appearance.
    pub fn authors(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut authors = Vec::new();
        for msg in &self.messages {
            if seen.insert(msg.author.as_str()) {
                authors.push(msg.author.as_str());
            }
        }
        authors
    }

    /// Earliest and latest timestamps, or `None` for an empty table.
    pub fn date_range(&self) -> Option<DateRange> {
        let start = self.messages.first()?.timestamp;
        let end = self.messages.last()?.timestamp;
        Some(DateRange { start, end })
    }

    /// Returns a new table holding only messages that pass `filter`.
    pub fn filter(&self, filter: &FilterConfig) -> ChatTable {
        ChatTable {
            messages: self
                .messages
                .iter()
                .filter(|m| filter.matches(m))
                .cloned()
                .collect(),
        }
    }

    /// Messages that are neither system nor media.
    pub fn text_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_text())
    }

    /// Messages that are not system notifications.
    pub fn non_system(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_system)
    }

    /// Messages grouped by author, each group in timestamp order.
    pub fn by_author(&self) -> BTreeMap<&str, Vec<&Message>> {
        let mut groups: BTreeMap<&str, Vec<&Message>> = BTreeMap::new();
        for msg in &self.messages {
            groups.entry(msg.author.as_str()).or_default().push(msg);
        }
        groups
    }

    /// Message counts per time bucket, in bucket order.
    pub fn count_by(&self, bucket: TimeBucket) -> BTreeMap<BucketKey, usize> {
        let mut counts = BTreeMap::new();
        for msg in &self.messages {
            *counts.entry(bucket.key(msg.timestamp)).or_insert(0) += 1;
        }
        counts
    }

    /// Message counts per (time bucket, author).
    pub fn count_by_author(&self, bucket: TimeBucket) -> BTreeMap<(BucketKey, String), usize> {
        let mut counts = BTreeMap::new();
        for msg in &self.messages {
            *counts
                .entry((bucket.key(msg.timestamp), msg.author.clone()))
                .or_insert(0) += 1;
        }
        counts
    }

    /// Summary counts for reporting.
    pub fn summary(&self) -> ChatSummary {
        summary(self)
    }
}

impl<'a> IntoIterator for &'a ChatTable {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Inclusive timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Time bucket used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    /// Hour of day, 0-23
    Hour,
    /// Day of week, Monday first
    Weekday,
    /// Calendar date
    Date,
    /// ISO week
    Week,
    /// Calendar month
    Month,
}

impl TimeBucket {
    /// Computes the bucket key for a timestamp.
    pub fn key(self, ts: NaiveDateTime) -> BucketKey {
        match self {
            TimeBucket::Hour => BucketKey::Hour(ts.hour()),
            TimeBucket::Weekday => BucketKey::Weekday(ts.weekday().num_days_from_monday()),
            TimeBucket::Date => BucketKey::Date(ts.date()),
            TimeBucket::Week => {
                let week = ts.iso_week();
                BucketKey::Week {
                    year: week.year(),
                    week: week.week(),
                }
            }
            TimeBucket::Month => BucketKey::Month {
                year: ts.year(),
                month: ts.month(),
            },
        }
    }
}

/// A grouping key produced by [`TimeBucket::key`].
///
/// Ordering follows time within one bucket kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKey {
    Hour(u32),
    /// Days from Monday (0 = Monday)
    Weekday(u32),
    Date(NaiveDate),
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
}

impl BucketKey {
    /// Human-readable label: `"09"`, `"Monday"`, `"2024-01-15"`, `"2024-W03"`, `"2024-01"`.
    pub fn label(&self) -> String {
        match self {
            BucketKey::Hour(h) => format!("{h:02}"),
            BucketKey::Weekday(d) => weekday_name(weekday_from_index(*d)).to_string(),
            BucketKey::Date(d) => d.format("%Y-%m-%d").to_string(),
            BucketKey::Week { year, week } => format!("{year}-W{week:02}"),
            BucketKey::Month { year, month } => format!("{year}-{month:02}"),
        }
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Maps 0..=6 to Monday..=Sunday; larger values wrap.
pub fn weekday_from_index(index: u32) -> Weekday {
    match index % 7 {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// English day name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Headline numbers for a parsed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub total_messages: usize,
    pub participant_count: usize,
    /// Distinct authors in order of first appearance
    pub participant_names: Vec<String>,
    /// `None` for an empty table
    pub date_range: Option<DateRange>,
    pub media_count: usize,
    pub system_count: usize,
    /// Messages that are neither media nor system
    pub text_count: usize,
}

/// Computes a [`ChatSummary`]. Pure function of the table.
///
/// # Example
///
/// ```rust
/// use chatlens::{ChatTable, summary};
///
/// let s = summary(&ChatTable::default());
/// assert_eq!(s.total_messages, 0);
/// assert!(s.date_range.is_none());
/// ```
pub fn summary(table: &ChatTable) -> ChatSummary {
    let participant_names: Vec<String> = table.authors().into_iter().map(String::from).collect();

    ChatSummary {
        total_messages: table.len(),
        participant_count: participant_names.len(),
        participant_names,
        date_range: table.date_range(),
        media_count: table.iter().filter(|m| m.is_media).count(),
        system_count: table.iter().filter(|m| m.is_system).count(),
        text_count: table.text_messages().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn sample() -> ChatTable {
        ChatTable::from_messages(vec![
            Message::new(at(16, 9, 0), "Bob", "morning"),
            Message::new(at(15, 10, 0), "Alice", "hello"),
            Message::new(at(15, 10, 5), "Bob", "<Media omitted>").with_media(true),
            Message::new(at(15, 10, 6), "System", "Alice added Carol").with_system(true),
            Message::new(at(22, 23, 59), "Carol", "late"),
        ])
    }

    #[test]
    fn test_authors_many_repeats() {
        let messages = (0..500)
            .map(|i| Message::new(at(1, 0, 0), ["Zed", "Amy", "Kim"][i % 3], "x"))
            .collect();
        let table = ChatTable::from_messages(messages);
        assert_eq!(table.authors(), vec!["Zed", "Amy", "Kim"]);
    }

    #[test]
    fn test_sorted_on_construction() {
        let table = sample();
        let stamps: Vec<_> = table.iter().map(|m| m.timestamp).collect();
        let mut sorted = stamps.clone();
        sorted.sort();
        assert_eq!(stamps, sorted);
    }

    #[test]
    fn test_stable_sort_for_equal_timestamps() {
        let table = ChatTable::from_messages(vec![
            Message::new(at(15, 10, 0), "A", "1"),
            Message::new(at(15, 10, 0), "B", "2"),
            Message::new(at(15, 10, 0), "C", "3"),
        ]);
        let bodies: Vec<_> = table.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_authors_first_appearance() {
        assert_eq!(sample().authors(), vec!["Alice", "Bob", "System", "Carol"]);
    }

    #[test]
    fn test_date_range() {
        let range = sample().date_range().unwrap();
        assert_eq!(range.start, at(15, 10, 0));
        assert_eq!(range.end, at(22, 23, 59));
        assert!(ChatTable::default().date_range().is_none());
    }

    #[test]
    fn test_count_by_hour_and_weekday() {
        let table = sample();
        let hours = table.count_by(TimeBucket::Hour);
        assert_eq!(hours[&BucketKey::Hour(10)], 3);
        assert_eq!(hours[&BucketKey::Hour(23)], 1);

        // 2024-01-15 is a Monday
        let days = table.count_by(TimeBucket::Weekday);
        assert_eq!(days[&BucketKey::Weekday(0)], 4);
        assert_eq!(days[&BucketKey::Weekday(1)], 1);
    }

    #[test]
    fn test_count_by_week_and_month() {
        let table = sample();
        let weeks = table.count_by(TimeBucket::Week);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[&BucketKey::Week { year: 2024, week: 3 }], 4);

        let months = table.count_by(TimeBucket::Month);
        assert_eq!(months[&BucketKey::Month { year: 2024, month: 1 }], 5);
    }

    #[test]
    fn test_count_by_author() {
        let counts = sample().count_by_author(TimeBucket::Date);
        let key = (
            BucketKey::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            "Bob".to_string(),
        );
        assert_eq!(counts[&key], 1);
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(BucketKey::Hour(9).label(), "09");
        assert_eq!(BucketKey::Weekday(6).label(), "Sunday");
        assert_eq!(BucketKey::Week { year: 2024, week: 3 }.label(), "2024-W03");
        assert_eq!(BucketKey::Month { year: 2024, month: 1 }.to_string(), "2024-01");
    }

    #[test]
    fn test_by_author_groups() {
        let table = sample();
        let groups = table.by_author();
        assert_eq!(groups["Bob"].len(), 2);
        assert_eq!(groups["Bob"][0].body, "<Media omitted>");
    }

    #[test]
    fn test_summary_counts() {
        let s = summary(&sample());
        assert_eq!(s.total_messages, 5);
        assert_eq!(s.participant_count, 4);
        assert_eq!(s.media_count, 1);
        assert_eq!(s.system_count, 1);
        assert_eq!(s.text_count, 3);
        assert_eq!(s.date_range.unwrap().start, at(15, 10, 0));
    }

    #[test]
    fn test_summary_empty() {
        let s = ChatTable::default().summary();
        assert_eq!(s.total_messages, 0);
        assert_eq!(s.participant_count, 0);
        assert!(s.participant_names.is_empty());
        assert!(s.date_range.is_none());
    }

    #[test]
    fn test_filter_returns_new_table() {
        let table = sample();
        let filtered = table.filter(&FilterConfig::new().without_system());
        assert_eq!(filtered.len(), 4);
        assert_eq!(table.len(), 5);
    }
}
