//! Downstream analytics over a [`ChatTable`].
//!
//! Every function here reads the table and never changes it. An empty table
//! gives empty or zero results, never an error.
//!
//! - [`enrich`]: per-message calendar and content features
//! - [`stats`]: per-author statistics and activity distributions
//! - [`lexical`]: emoji and word frequency
//! - [`sentiment`]: the [`SentimentScorer`] seam and summaries
//! - [`response`]: response times
//! - [`group`]: interaction matrix, starters, overlap, dominance, topics
//! - [`report`]: [`AnalysisReport`], all of the above at once
//!
//! # Example
//!
//! ```rust
//! use chatlens::analysis::Analyzer;
//! use chatlens::parser::ChatParser;
//!
//! let table = ChatParser::new().parse_str(
//!     "1/15/24, 09:00 - Alice: pizza tonight? 🍕\n\
//!      1/15/24, 09:02 - Bob: pizza sounds great\n\
//!      1/15/24, 09:03 - Carol: count me in",
//! )?;
//!
//! let analyzer = Analyzer::new(&table);
//! assert!(analyzer.is_group());
//! assert_eq!(analyzer.user_stats().len(), 3);
//! assert_eq!(analyzer.response_times().len(), 2);
//!
//! let report = analyzer.report();
//! assert_eq!(report.emojis.total_emojis, 1);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

pub mod enrich;
pub mod group;
pub mod lexical;
pub mod report;
pub mod response;
pub mod sentiment;
pub mod stats;

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

pub use enrich::{EnrichedMessage, contains_url, extract_emojis, is_emoji};
pub use group::{
    ConversationPair, DominanceScore, GroupSummary, InteractionMatrix, PairDay, ReplyPattern,
    StarterStats, TimeOverlap, Topics, is_group,
};
pub use lexical::{EmojiSummary, WordFrequency};
pub use report::{AnalysisReport, GroupReport};
pub use response::{Exchange, ResponseSummary, TimingStats};
pub use sentiment::{
    LexiconScorer, ScoredMessage, SentimentCounts, SentimentLabel, SentimentScorer,
    SentimentScores, SentimentSummary,
};
pub use stats::{ActiveDay, Frequency, SlotActivity, TimelinePoint, UserStats};

use crate::config::AnalysisConfig;
use crate::table::ChatTable;

/// Minimum bidirectional responses for a pair to appear in a report.
pub const DEFAULT_MIN_PAIR_INTERACTIONS: usize = 5;

/// Runs analyses over one table with one [`AnalysisConfig`].
///
/// Borrows the table; build as many analyzers over the same table as needed.
pub struct Analyzer<'a> {
    table: &'a ChatTable,
    config: AnalysisConfig,
    scorer: Box<dyn SentimentScorer + 'a>,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer with default config and the built-in
    /// [`LexiconScorer`].
    pub fn new(table: &'a ChatTable) -> Self {
        Self {
            table,
            config: AnalysisConfig::default(),
            scorer: Box::new(LexiconScorer::new()),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the sentiment scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: impl SentimentScorer + 'a) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn table(&self) -> &'a ChatTable {
        self.table
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn enrich(&self) -> Vec<EnrichedMessage<'a>> {
        enrich::enrich(self.table)
    }

    pub fn user_stats(&self) -> Vec<UserStats> {
        stats::user_stats(self.table)
    }

    pub fn activity_timeline(&self, freq: Frequency) -> Vec<TimelinePoint> {
        stats::activity_timeline(self.table, freq)
    }

    pub fn hourly_activity(&self) -> Vec<SlotActivity> {
        stats::hourly_activity(self.table)
    }

    pub fn daily_activity(&self) -> Vec<SlotActivity> {
        stats::daily_activity(self.table)
    }

    /// Busiest days, `top_n` of them.
    pub fn most_active_days(&self) -> Vec<ActiveDay> {
        stats::most_active_days(self.table, self.config.top_n)
    }

    pub fn emoji_analysis(&self) -> EmojiSummary {
        lexical::emoji_analysis(self.table, self.config.top_n)
    }

    pub fn word_frequency(&self) -> WordFrequency {
        lexical::word_frequency(self.table, self.config.top_n, self.config.min_word_length)
    }

    pub fn scored_messages(&self) -> Vec<ScoredMessage<'a>> {
        sentiment::score_messages(self.table, self.scorer.as_ref())
    }

    pub fn sentiment_summary(&self) -> SentimentSummary {
        sentiment::sentiment_summary(self.table, self.scorer.as_ref())
    }

    /// Exchanges within `response_window_minutes`.
    pub fn response_times(&self) -> Vec<Exchange<'a>> {
        response::response_times(self.table, self.config.response_window_minutes)
    }

    pub fn response_summary(&self) -> ResponseSummary {
        response::response_summary(self.table, self.config.response_window_minutes)
    }

    pub fn is_group(&self) -> bool {
        group::is_group(self.table)
    }

    pub fn interaction_matrix(&self) -> InteractionMatrix {
        group::interaction_matrix(self.table, self.config.interaction_window_minutes)
    }

    pub fn conversation_pairs(&self, min_interactions: usize) -> Vec<ConversationPair> {
        group::conversation_pairs(&self.interaction_matrix(), min_interactions)
    }

    pub fn reply_patterns(&self) -> Vec<ReplyPattern> {
        group::reply_patterns(
            self.table,
            self.config.reply_window_minutes,
            self.config.min_reply_samples,
        )
    }

    pub fn conversation_starters(&self) -> Vec<StarterStats> {
        group::conversation_starters(self.table, self.config.conversation_gap_hours)
    }

    pub fn active_time_overlap(&self) -> Vec<TimeOverlap> {
        group::active_time_overlap(self.table)
    }

    pub fn dominance_scores(&self) -> Vec<DominanceScore> {
        group::dominance_scores(self.table, self.config.conversation_gap_hours)
    }

    pub fn topics(&self) -> Topics {
        group::topics(self.table, self.config.topic_min_word_length, self.config.top_n)
    }

    /// Topic words shared by a pair of authors.
    pub fn pair_topics(&self, first: &str, second: &str) -> Vec<(String, usize)> {
        group::pair_topics(
            self.table,
            first,
            second,
            self.config.topic_min_word_length,
            self.config.top_n,
        )
    }

    pub fn most_active_days_by_pair(&self, first: &str, second: &str) -> Vec<PairDay> {
        group::most_active_days_by_pair(self.table, first, second, self.config.top_n)
    }

    pub fn group_summary(&self) -> GroupSummary {
        group::group_summary(
            self.table,
            self.config.interaction_window_minutes,
            self.config.conversation_gap_hours,
        )
    }

    /// Runs every analysis.
    pub fn report(&self) -> AnalysisReport {
        debug!(messages = self.table.len(), "building analysis report");
        let matrix = self.interaction_matrix();
        AnalysisReport {
            summary: self.table.summary(),
            user_stats: self.user_stats(),
            timeline: self.activity_timeline(Frequency::Day),
            hourly_activity: self.hourly_activity(),
            daily_activity: self.daily_activity(),
            most_active_days: self.most_active_days(),
            emojis: self.emoji_analysis(),
            words: self.word_frequency(),
            sentiment: self.sentiment_summary(),
            response_times: self.response_summary(),
            group: GroupReport {
                summary: self.group_summary(),
                conversation_pairs: group::conversation_pairs(
                    &matrix,
                    DEFAULT_MIN_PAIR_INTERACTIONS,
                ),
                interaction_matrix: matrix,
                reply_patterns: self.reply_patterns(),
                conversation_starters: self.conversation_starters(),
                active_time_overlap: self.active_time_overlap(),
                dominance: self.dominance_scores(),
                topics: self.topics(),
            },
        }
    }
}

impl std::fmt::Debug for Analyzer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("messages", &self.table.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Rounds to two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Insertion-ordered counter. Ties in [`most_common`](Self::most_common)
/// keep first-seen order.
#[derive(Debug, Clone)]
pub(crate) struct Tally<K> {
    counts: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, key: K) {
        if let Some(&i) = self.index.get(&key) {
            self.counts[i].1 += 1;
        } else {
            self.index.insert(key.clone(), self.counts.len());
            self.counts.push((key, 1));
        }
    }

    /// Sum of all counts.
    pub(crate) fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Distinct keys.
    pub(crate) fn len(&self) -> usize {
        self.counts.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` highest counts.
    pub(crate) fn most_common(&self, n: usize) -> Vec<(K, usize)> {
        let mut sorted = self.counts.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for Tally<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use chrono::NaiveDate;

    #[test]
    fn test_tally_orders_ties_by_first_seen() {
        let mut tally = Tally::new();
        tally.extend(["b", "a", "b", "c", "a"]);
        assert_eq!(tally.most_common(10), vec![("b", 2), ("a", 2), ("c", 1)]);
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.len(), 3);
        assert_eq!(tally.most_common(1), vec![("b", 2)]);
    }

    #[test]
    fn test_round2() {
        assert!((round2(33.333_333) - 33.33).abs() < 1e-9);
        assert!((round2(66.666_666) - 66.67).abs() < 1e-9);
    }

    #[test]
    fn test_analyzer_pair_drill_down() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let next = day.succ_opt().unwrap();
        let table = ChatTable::from_messages(vec![
            Message::new(day.and_hms_opt(9, 0, 0).unwrap(), "Alice", "pizza tonight"),
            Message::new(day.and_hms_opt(9, 1, 0).unwrap(), "Bob", "pizza sounds good"),
            Message::new(next.and_hms_opt(9, 0, 0).unwrap(), "Alice", "again"),
            Message::new(next.and_hms_opt(9, 5, 0).unwrap(), "Bob", "sure"),
            Message::new(next.and_hms_opt(9, 6, 0).unwrap(), "Carol", "pizza?"),
            Message::new(next.and_hms_opt(9, 7, 0).unwrap(), "Bob", "see you"),
        ]);

        let analyzer = Analyzer::new(&table);
        assert_eq!(analyzer.pair_topics("Alice", "Bob")[0], ("pizza".to_string(), 2));
        assert_eq!(analyzer.most_active_days_by_pair("Alice", "Bob").len(), 2);

        let analyzer = Analyzer::new(&table).with_config(AnalysisConfig::new().with_top_n(1));
        let days = analyzer.most_active_days_by_pair("Alice", "Bob");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, next);
        assert!(analyzer.most_active_days_by_pair("Alice", "Nobody").is_empty());
    }

    #[test]
    fn test_analyzer_uses_config_windows() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = ChatTable::from_messages(vec![
            Message::new(day.and_hms_opt(9, 0, 0).unwrap(), "Alice", "hi"),
            Message::new(day.and_hms_opt(9, 45, 0).unwrap(), "Bob", "hello"),
        ]);
        let analyzer = Analyzer::new(&table);
        assert_eq!(analyzer.response_times().len(), 1);
        assert_eq!(analyzer.interaction_matrix().count("Bob", "Alice"), 0);

        let analyzer = Analyzer::new(&table).with_config(
            AnalysisConfig::new()
                .with_response_window(30)
                .with_interaction_window(60),
        );
        assert!(analyzer.response_times().is_empty());
        assert_eq!(analyzer.interaction_matrix().count("Bob", "Alice"), 1);
    }

    #[test]
    fn test_analyzer_custom_scorer() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = ChatTable::from_messages(vec![Message::new(
            day.and_hms_opt(9, 0, 0).unwrap(),
            "Alice",
            "neutral words",
        )]);
        let analyzer = Analyzer::new(&table).with_scorer(|_: &str| SentimentScores {
            compound: 0.8,
            positive: 1.0,
            ..SentimentScores::default()
        });
        assert_eq!(analyzer.sentiment_summary().overall.positive, 1);
    }

    #[test]
    fn test_report_on_empty_table() {
        let table = ChatTable::default();
        let report = Analyzer::new(&table).report();
        assert_eq!(report.summary.total_messages, 0);
        assert!(report.user_stats.is_empty());
        assert!(report.response_times.overall.is_none());
        assert!(!report.group.summary.is_group);
    }
}
