//! Per-author statistics and activity distributions.
//!
//! Everything here skips system notifications.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::enrich::EnrichedMessage;
use super::round2;
use crate::table::{ChatTable, TimeBucket};

/// Message statistics for one author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub author: String,
    pub total_messages: usize,
    pub avg_message_length: f64,
    pub total_chars: usize,
    pub avg_words_per_message: f64,
    pub total_words: usize,
    pub media_messages: usize,
    pub urls_shared: usize,
    pub total_emojis: usize,
    /// Share of all non-system messages, rounded to 2 decimals
    pub message_percentage: f64,
}

/// Computes [`UserStats`] per author, most active first.
///
/// Authors with equal counts keep first-appearance order.
pub fn user_stats(table: &ChatTable) -> Vec<UserStats> {
    let mut order: Vec<&str> = Vec::new();
    let mut rows: BTreeMap<&str, UserStats> = BTreeMap::new();

    for msg in table.non_system() {
        let e = EnrichedMessage::new(msg);
        let row = rows.entry(msg.author.as_str()).or_insert_with(|| {
            order.push(msg.author.as_str());
            UserStats {
                author: msg.author.clone(),
                total_messages: 0,
                avg_message_length: 0.0,
                total_chars: 0,
                avg_words_per_message: 0.0,
                total_words: 0,
                media_messages: 0,
                urls_shared: 0,
                total_emojis: 0,
                message_percentage: 0.0,
            }
        });
        row.total_messages += 1;
        row.total_chars += e.length;
        row.total_words += e.word_count;
        row.media_messages += usize::from(msg.is_media);
        row.urls_shared += usize::from(e.has_url);
        row.total_emojis += e.emoji_count();
    }

    let total: usize = rows.values().map(|r| r.total_messages).sum();
    let mut out: Vec<UserStats> = order
        .into_iter()
        .filter_map(|author| rows.remove(author))
        .map(|mut row| {
            let n = row.total_messages as f64;
            row.avg_message_length = row.total_chars as f64 / n;
            row.avg_words_per_message = row.total_words as f64 / n;
            row.message_percentage = round2(row.total_messages as f64 / total as f64 * 100.0);
            row
        })
        .collect();
    out.sort_by(|a, b| b.total_messages.cmp(&a.total_messages));
    out
}

/// Timeline granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Day,
    /// Weeks starting on Monday
    Week,
    Month,
}

impl Frequency {
    /// First day of the period holding `date`.
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Day => date,
            Frequency::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Frequency::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

/// One `(period, author)` cell of the activity timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub period: NaiveDate,
    pub author: String,
    pub message_count: usize,
}

/// Message counts per period and author, ordered by period then author.
pub fn activity_timeline(table: &ChatTable, freq: Frequency) -> Vec<TimelinePoint> {
    let mut counts: BTreeMap<(NaiveDate, &str), usize> = BTreeMap::new();
    for msg in table.non_system() {
        let period = freq.period_start(msg.timestamp.date());
        *counts.entry((period, msg.author.as_str())).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((period, author), message_count)| TimelinePoint {
            period,
            author: author.to_string(),
            message_count,
        })
        .collect()
}

/// Message count for one author in one hour-of-day or weekday slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotActivity {
    /// `"00"`..`"23"` for hours, `"Monday"`..`"Sunday"` for weekdays
    pub slot: String,
    pub author: String,
    pub message_count: usize,
}

/// Messages per hour of day and author, hours ascending.
pub fn hourly_activity(table: &ChatTable) -> Vec<SlotActivity> {
    slot_activity(table, TimeBucket::Hour)
}

/// Messages per weekday and author, Monday through Sunday.
pub fn daily_activity(table: &ChatTable) -> Vec<SlotActivity> {
    slot_activity(table, TimeBucket::Weekday)
}

fn slot_activity(table: &ChatTable, bucket: TimeBucket) -> Vec<SlotActivity> {
    let mut counts = BTreeMap::new();
    for msg in table.non_system() {
        *counts
            .entry((bucket.key(msg.timestamp), msg.author.as_str()))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((key, author), message_count)| SlotActivity {
            slot: key.label(),
            author: author.to_string(),
            message_count,
        })
        .collect()
}

/// A busy calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveDay {
    pub date: NaiveDate,
    pub message_count: usize,
    pub author_breakdown: BTreeMap<String, usize>,
}

/// The `top_n` days with the most messages; ties go to the earlier date.
pub fn most_active_days(table: &ChatTable, top_n: usize) -> Vec<ActiveDay> {
    let mut days: BTreeMap<NaiveDate, ActiveDay> = BTreeMap::new();
    for msg in table.non_system() {
        let date = msg.timestamp.date();
        let day = days.entry(date).or_insert_with(|| ActiveDay {
            date,
            message_count: 0,
            author_breakdown: BTreeMap::new(),
        });
        day.message_count += 1;
        *day.author_breakdown.entry(msg.author.clone()).or_insert(0) += 1;
    }
    let mut out: Vec<ActiveDay> = days.into_values().collect();
    out.sort_by(|a, b| b.message_count.cmp(&a.message_count));
    out.truncate(top_n);
    out
}
