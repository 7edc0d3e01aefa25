//! Group dynamics: who answers whom, who starts conversations, who dominates.
//!
//! Most of these are meaningful only when [`is_group`] holds, but all of them
//! work on any table and return empty results for an empty one.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Timelike};
use serde::Serialize;
use tracing::debug;

use super::lexical::{STOP_WORDS, TOPIC_STOP_WORDS, count_words};
use super::response::{exchanges, mean, median};
use super::{Tally, round2};
use crate::table::ChatTable;

/// Length (in chars) at which the length factor of a dominance score is 1.
const DOMINANCE_LENGTH_UNIT: f64 = 50.0;
/// Cap on the length factor.
const DOMINANCE_LENGTH_CAP: f64 = 2.0;

/// Returns `true` for chats with more than two authors.
pub fn is_group(table: &ChatTable) -> bool {
    table.authors().len() > 2
}

/// Square matrix of response counts.
///
/// `count(responder, original)` is how often `responder` wrote right after
/// `original` within the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InteractionMatrix {
    /// Row and column labels, sorted
    authors: Vec<String>,
    /// `counts[responder][original]`
    counts: Vec<Vec<usize>>,
}

impl InteractionMatrix {
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Count for a `(responder, original)` pair; 0 for unknown authors.
    pub fn count(&self, responder: &str, original: &str) -> usize {
        match (self.index(responder), self.index(original)) {
            (Some(r), Some(o)) => self.counts[r][o],
            _ => 0,
        }
    }

    /// Responses in both directions between two authors.
    pub fn bidirectional(&self, a: &str, b: &str) -> usize {
        self.count(a, b) + self.count(b, a)
    }

    fn index(&self, author: &str) -> Option<usize> {
        self.authors
            .binary_search_by(|a| a.as_str().cmp(author))
            .ok()
    }
}

/// Builds the [`InteractionMatrix`] over every author in the table.
pub fn interaction_matrix(table: &ChatTable, window_minutes: i64) -> InteractionMatrix {
    let authors: Vec<String> = table
        .iter()
        .map(|m| m.author.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let mut matrix = InteractionMatrix {
        counts: vec![vec![0; authors.len()]; authors.len()],
        authors,
    };

    let window = window_minutes as f64;
    for e in exchanges(table).into_iter().filter(|e| e.minutes <= window) {
        if let (Some(r), Some(o)) = (matrix.index(e.to_author), matrix.index(e.from_author)) {
            matrix.counts[r][o] += 1;
        }
    }
    matrix
}

/// Two authors and how often they answered each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationPair {
    pub first: String,
    pub second: String,
    pub interactions: usize,
}

/// Author pairs with at least `min_interactions` responses, busiest first.
pub fn conversation_pairs(matrix: &InteractionMatrix, min_interactions: usize) -> Vec<ConversationPair> {
    let authors = matrix.authors();
    let mut pairs = Vec::new();
    for (i, first) in authors.iter().enumerate() {
        for second in &authors[i + 1..] {
            let interactions = matrix.bidirectional(first, second);
            if interactions >= min_interactions {
                pairs.push(ConversationPair {
                    first: first.clone(),
                    second: second.clone(),
                    interactions,
                });
            }
        }
    }
    pairs.sort_by(|a, b| b.interactions.cmp(&a.interactions));
    pairs
}

/// How fast one author tends to answer another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyPattern {
    pub responder: String,
    pub responds_to: String,
    pub avg_response_minutes: f64,
    pub median_response_minutes: f64,
    pub total_responses: usize,
}

/// Reply patterns with at least `min_samples` replies inside the window,
/// fastest first.
pub fn reply_patterns(table: &ChatTable, window_minutes: i64, min_samples: usize) -> Vec<ReplyPattern> {
    let window = window_minutes as f64;
    let mut samples: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
    for e in exchanges(table).into_iter().filter(|e| e.minutes <= window) {
        samples
            .entry((e.to_author, e.from_author))
            .or_default()
            .push(e.minutes);
    }

    let mut patterns: Vec<ReplyPattern> = samples
        .into_iter()
        .filter(|(_, times)| times.len() >= min_samples)
        .filter_map(|((responder, responds_to), times)| {
            Some(ReplyPattern {
                responder: responder.to_string(),
                responds_to: responds_to.to_string(),
                avg_response_minutes: mean(&times)?,
                median_response_minutes: median(&times)?,
                total_responses: times.len(),
            })
        })
        .collect();
    patterns.sort_by(|a, b| a.avg_response_minutes.total_cmp(&b.avg_response_minutes));
    patterns
}

/// Conversations opened by one author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarterStats {
    pub author: String,
    pub conversations_started: usize,
    /// All messages by the author, system notices included
    pub total_messages: usize,
    /// Share of all detected conversation starts
    pub starter_percentage: f64,
}

/// Counts, per author, messages that follow more than `gap_hours` of silence.
///
/// The very first message of the chat does not count as a start.
pub fn conversation_starters(table: &ChatTable, gap_hours: i64) -> Vec<StarterStats> {
    let gap_seconds = gap_hours * 3600;
    let stream: Vec<_> = table.non_system().collect();
    let mut starters = Tally::new();
    for pair in stream.windows(2) {
        if (pair[1].timestamp - pair[0].timestamp).num_seconds() > gap_seconds {
            starters.add(pair[1].author.as_str());
        }
    }

    let total_starts = starters.total();
    starters
        .most_common(usize::MAX)
        .into_iter()
        .map(|(author, count)| StarterStats {
            author: author.to_string(),
            conversations_started: count,
            total_messages: table.iter().filter(|m| m.author == author).count(),
            starter_percentage: round2(count as f64 / total_starts as f64 * 100.0),
        })
        .collect()
}

/// Hours in which two authors both wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeOverlap {
    pub first: String,
    pub second: String,
    pub overlap_hours: usize,
    pub first_total_hours: usize,
    pub second_total_hours: usize,
    /// Overlap relative to the less active of the two, 2 decimals
    pub overlap_percentage: f64,
}

/// Shared active clock-hours per author pair, largest overlap first.
///
/// Pairs that never overlap are left out.
pub fn active_time_overlap(table: &ChatTable) -> Vec<TimeOverlap> {
    let mut hours: BTreeMap<&str, BTreeSet<(NaiveDate, u32)>> = BTreeMap::new();
    for msg in table.non_system() {
        hours
            .entry(msg.author.as_str())
            .or_default()
            .insert((msg.timestamp.date(), msg.timestamp.hour()));
    }

    let authors: Vec<(&str, &BTreeSet<(NaiveDate, u32)>)> =
        hours.iter().map(|(a, h)| (*a, h)).collect();
    let mut overlaps = Vec::new();
    for (i, (first, first_hours)) in authors.iter().enumerate() {
        for (second, second_hours) in &authors[i + 1..] {
            let overlap = first_hours.intersection(second_hours).count();
            if overlap == 0 {
                continue;
            }
            let smaller = first_hours.len().min(second_hours.len());
            overlaps.push(TimeOverlap {
                first: (*first).to_string(),
                second: (*second).to_string(),
                overlap_hours: overlap,
                first_total_hours: first_hours.len(),
                second_total_hours: second_hours.len(),
                overlap_percentage: round2(overlap as f64 / smaller as f64 * 100.0),
            });
        }
    }
    overlaps.sort_by(|a, b| b.overlap_hours.cmp(&a.overlap_hours));
    overlaps
}

/// Weighted measure of how much an author drives the chat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominanceScore {
    pub author: String,
    /// 2 decimals
    pub message_percentage: f64,
    /// Mean body length in chars, 1 decimal
    pub avg_message_length: f64,
    pub conversations_started: usize,
    /// 2 decimals
    pub dominance_score: f64,
}

/// Scores each author with at least one non-system message, highest first.
///
/// `score = 0.5 * message% + 0.3 * starter% + 0.2 * 10 * min(avg_len / 50, 2)`
pub fn dominance_scores(table: &ChatTable, gap_hours: i64) -> Vec<DominanceScore> {
    let total: usize = table.non_system().count();
    if total == 0 {
        return Vec::new();
    }

    let starters = conversation_starters(table, gap_hours);
    let total_starts: usize = starters.iter().map(|s| s.conversations_started).sum();

    let mut lengths: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for msg in table.non_system() {
        let entry = lengths.entry(msg.author.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += msg.body.chars().count();
    }

    let mut scores: Vec<DominanceScore> = table
        .authors()
        .into_iter()
        .filter_map(|author| {
            let &(count, chars) = lengths.get(author)?;
            let started = starters
                .iter()
                .find(|s| s.author == author)
                .map_or(0, |s| s.conversations_started);

            let message_pct = count as f64 / total as f64 * 100.0;
            let avg_len = chars as f64 / count as f64;
            let length_factor = (avg_len / DOMINANCE_LENGTH_UNIT).min(DOMINANCE_LENGTH_CAP);
            let starter_pct = started as f64 / total_starts.max(1) as f64 * 100.0;
            let score = message_pct * 0.5 + starter_pct * 0.3 + length_factor * 10.0 * 0.2;

            Some(DominanceScore {
                author: author.to_string(),
                message_percentage: round2(message_pct),
                avg_message_length: (avg_len * 10.0).round() / 10.0,
                conversations_started: started,
                dominance_score: round2(score),
            })
        })
        .collect();
    scores.sort_by(|a, b| b.dominance_score.total_cmp(&a.dominance_score));
    scores
}

/// Frequent words overall, per author and per month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Topics {
    pub overall: Vec<(String, usize)>,
    pub by_author: BTreeMap<String, Vec<(String, usize)>>,
    /// Keyed `YYYY-MM`; months without any topic word are omitted
    pub by_month: BTreeMap<String, Vec<(String, usize)>>,
}

/// Topic words from text messages, with the extended stop-word list.
pub fn topics(table: &ChatTable, min_word_length: usize, top_n: usize) -> Topics {
    let stop: [&[&str]; 2] = [STOP_WORDS, TOPIC_STOP_WORDS];

    let mut by_author: BTreeMap<&str, Vec<_>> = BTreeMap::new();
    let mut by_month: BTreeMap<String, Vec<_>> = BTreeMap::new();
    for msg in table.text_messages() {
        by_author.entry(msg.author.as_str()).or_default().push(msg);
        let month = format!("{}-{:02}", msg.timestamp.year(), msg.timestamp.month());
        by_month.entry(month).or_default().push(msg);
    }

    Topics {
        overall: count_words(table.text_messages(), min_word_length, &stop).most_common(top_n),
        by_author: by_author
            .into_iter()
            .map(|(author, msgs)| {
                let tally = count_words(msgs, min_word_length, &stop);
                (author.to_string(), tally.most_common(top_n))
            })
            .collect(),
        by_month: by_month
            .into_iter()
            .filter_map(|(month, msgs)| {
                let tally = count_words(msgs, min_word_length, &stop);
                (!tally.is_empty()).then(|| (month, tally.most_common(top_n)))
            })
            .collect(),
    }
}

/// Topic words from the text messages of two authors together.
pub fn pair_topics(
    table: &ChatTable,
    first: &str,
    second: &str,
    min_word_length: usize,
    top_n: usize,
) -> Vec<(String, usize)> {
    let pair = table
        .text_messages()
        .filter(|m| m.author == first || m.author == second);
    count_words(pair, min_word_length, &[STOP_WORDS]).most_common(top_n)
}

/// A day on which both authors of a pair wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairDay {
    pub date: NaiveDate,
    pub first_count: usize,
    pub second_count: usize,
    pub total: usize,
}

/// The `top_n` days where both `first` and `second` were active, busiest
/// first; ties go to the earlier date.
pub fn most_active_days_by_pair(
    table: &ChatTable,
    first: &str,
    second: &str,
    top_n: usize,
) -> Vec<PairDay> {
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for msg in table.non_system() {
        let counts = days.entry(msg.timestamp.date()).or_default();
        if msg.author == first {
            counts.0 += 1;
        } else if msg.author == second {
            counts.1 += 1;
        }
    }

    let mut out: Vec<PairDay> = days
        .into_iter()
        .filter(|(_, (a, b))| *a > 0 && *b > 0)
        .map(|(date, (a, b))| PairDay {
            date,
            first_count: a,
            second_count: b,
            total: a + b,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out.truncate(top_n);
    out
}

/// Headline group metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub is_group: bool,
    pub total_members: usize,
    pub total_messages: usize,
    pub messages_per_member: f64,
    pub most_active_pair: Option<ConversationPair>,
    pub top_conversation_starter: Option<String>,
    pub total_conversation_pairs: usize,
    pub avg_overlap_hours: f64,
}

/// Computes the [`GroupSummary`].
pub fn group_summary(
    table: &ChatTable,
    interaction_window_minutes: i64,
    gap_hours: i64,
) -> GroupSummary {
    let group = is_group(table);
    if !group {
        debug!("fewer than three authors; group metrics are of limited use");
    }

    let total_members = table.authors().len();
    let total_messages = table.non_system().count();
    let pairs = conversation_pairs(&interaction_matrix(table, interaction_window_minutes), 1);
    let starters = conversation_starters(table, gap_hours);
    let overlap_hours: Vec<f64> = active_time_overlap(table)
        .iter()
        .map(|o| o.overlap_hours as f64)
        .collect();

    GroupSummary {
        is_group: group,
        total_members,
        total_messages,
        messages_per_member: if total_members == 0 {
            0.0
        } else {
            round2(total_messages as f64 / total_members as f64)
        },
        total_conversation_pairs: pairs.len(),
        most_active_pair: pairs.into_iter().next(),
        top_conversation_starter: starters.into_iter().next().map(|s| s.author),
        avg_overlap_hours: mean(&overlap_hours).unwrap_or(0.0),
    }
}
