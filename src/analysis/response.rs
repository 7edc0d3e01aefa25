//! Response times between consecutive messages of different authors.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Message;
use crate::table::ChatTable;

/// Two consecutive non-system messages from different authors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exchange<'a> {
    /// Author of the earlier message
    pub from_author: &'a str,
    /// Author of the later message, the responder
    pub to_author: &'a str,
    /// Gap between the two messages
    pub minutes: f64,
}

/// Every author change in the non-system message stream, in time order.
///
/// No window is applied; callers pick their own cutoff.
pub fn exchanges(table: &ChatTable) -> Vec<Exchange<'_>> {
    let stream: Vec<&Message> = table.non_system().collect();
    stream
        .windows(2)
        .filter(|pair| pair[0].author != pair[1].author)
        .map(|pair| {
            let (prev, curr) = (pair[0], pair[1]);
            Exchange {
                from_author: prev.author.as_str(),
                to_author: curr.author.as_str(),
                minutes: minutes_between(prev, curr),
            }
        })
        .collect()
}

pub(crate) fn minutes_between(earlier: &Message, later: &Message) -> f64 {
    (later.timestamp - earlier.timestamp).num_seconds() as f64 / 60.0
}

/// Exchanges no longer than `window_minutes`.
pub fn response_times(table: &ChatTable, window_minutes: i64) -> Vec<Exchange<'_>> {
    let window = window_minutes as f64;
    exchanges(table)
        .into_iter()
        .filter(|e| e.minutes <= window)
        .collect()
}

/// Central tendency and spread of a set of durations, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingStats {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` below two samples
    pub std: Option<f64>,
    pub count: usize,
}

impl TimingStats {
    /// Returns `None` for an empty sample.
    pub fn from_minutes(values: &[f64]) -> Option<Self> {
        Some(Self {
            mean: mean(values)?,
            median: median(values)?,
            std: sample_std(values),
            count: values.len(),
        })
    }
}

/// Response-time statistics overall and per responder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseSummary {
    /// `None` when no exchange fell inside the window
    pub overall: Option<TimingStats>,
    /// Keyed by the responding author
    pub per_responder: BTreeMap<String, TimingStats>,
}

/// Summarizes [`response_times`] for the given window.
pub fn response_summary(table: &ChatTable, window_minutes: i64) -> ResponseSummary {
    let times = response_times(table, window_minutes);
    let all: Vec<f64> = times.iter().map(|e| e.minutes).collect();

    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for e in &times {
        grouped.entry(e.to_author).or_default().push(e.minutes);
    }

    ResponseSummary {
        overall: TimingStats::from_minutes(&all),
        per_responder: grouped
            .into_iter()
            .filter_map(|(author, values)| {
                TimingStats::from_minutes(&values).map(|s| (author.to_string(), s))
            })
            .collect(),
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn sample() -> ChatTable {
        ChatTable::from_messages(vec![
            Message::new(at(9, 0), "Alice", "hi"),
            Message::new(at(9, 2), "Bob", "hey"),
            Message::new(at(9, 3), "Bob", "what's up"),
            Message::new(at(9, 4), "System", "Carol joined").with_system(true),
            Message::new(at(9, 8), "Alice", "not much"),
            Message::new(at(13, 0), "Bob", "back"),
        ])
    }

    #[test]
    fn test_exchanges_skip_same_author_and_system() {
        let table = sample();
        let ex = exchanges(&table);
        assert_eq!(ex.len(), 3);
        assert_eq!((ex[0].from_author, ex[0].to_author), ("Alice", "Bob"));
        assert!((ex[0].minutes - 2.0).abs() < 1e-9);
        assert_eq!((ex[1].from_author, ex[1].to_author), ("Bob", "Alice"));
        assert!((ex[1].minutes - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_response_window() {
        let table = sample();
        let times = response_times(&table, 120);
        assert_eq!(times.len(), 2);
        assert_eq!(response_times(&table, 2).len(), 1);
    }

    #[test]
    fn test_summary_stats() {
        let summary = response_summary(&sample(), 120);
        let overall = summary.overall.unwrap();
        assert!((overall.mean - 3.5).abs() < 1e-9);
        assert!((overall.median - 3.5).abs() < 1e-9);
        assert!((overall.std.unwrap() - 2.121_320_343).abs() < 1e-6);
        assert_eq!(summary.per_responder["Bob"].count, 1);
        assert!(summary.per_responder["Bob"].std.is_none());
    }

    #[test]
    fn test_summary_empty() {
        let summary = response_summary(&ChatTable::default(), 120);
        assert!(summary.overall.is_none());
        assert!(summary.per_responder.is_empty());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[]), None);
        assert_eq!(mean(&[1.0, 2.0]), Some(1.5));
        assert_eq!(sample_std(&[1.0]), None);
    }
}
