//! Emoji usage and word frequency.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::Tally;
use super::enrich::extract_emojis;
use crate::Message;
use crate::table::ChatTable;

/// Top emojis kept per author.
pub const PER_AUTHOR_EMOJIS: usize = 10;

/// Words too common to say anything about a conversation.
pub const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "and", "a", "to", "in", "was", "it", "of", "for", "as",
    "with", "be", "are", "by", "this", "that", "from", "or", "have", "an", "not", "but", "what",
    "all", "were", "when", "we", "there", "can", "been", "has", "if", "more", "her", "his",
    "they", "you", "me", "my", "i", "im", "dont", "didnt",
];

/// Extra filler words dropped for topic detection.
pub const TOPIC_STOP_WORDS: &[&str] = &[
    "will", "just", "now", "like", "get", "got", "going", "yeah", "yes", "okay",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word pattern is valid"));

/// Lower-cased ASCII words of at least `min_len` letters, minus `stop`.
///
/// A word glued to a non-ASCII letter (`café`) is not a word here.
pub fn tokenize(text: &str, min_len: usize, stop: &[&[&str]]) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| w.len() >= min_len)
        .filter(|w| !stop.iter().any(|list| list.contains(w)))
        .map(String::from)
        .collect()
}

/// Emoji usage across the chat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmojiSummary {
    pub total_emojis: usize,
    pub unique_emojis: usize,
    pub most_common: Vec<(char, usize)>,
    /// Each author's top emojis
    pub per_author: BTreeMap<String, Vec<(char, usize)>>,
}

/// Counts emojis over every message, system notices included.
pub fn emoji_analysis(table: &ChatTable, top_n: usize) -> EmojiSummary {
    let mut overall = Tally::new();
    let mut per_author: BTreeMap<&str, Tally<char>> = BTreeMap::new();

    for msg in table {
        let tally = per_author.entry(msg.author.as_str()).or_default();
        for emoji in extract_emojis(&msg.body) {
            overall.add(emoji);
            tally.add(emoji);
        }
    }

    EmojiSummary {
        total_emojis: overall.total(),
        unique_emojis: overall.len(),
        most_common: overall.most_common(top_n),
        per_author: per_author
            .into_iter()
            .map(|(author, tally)| (author.to_string(), tally.most_common(PER_AUTHOR_EMOJIS)))
            .collect(),
    }
}

/// Word usage across the chat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFrequency {
    pub total_words: usize,
    pub unique_words: usize,
    pub most_common: Vec<(String, usize)>,
    pub per_author: BTreeMap<String, Vec<(String, usize)>>,
}

/// Counts words in text messages (no media, no system notices).
///
/// Every author in the table gets an entry, possibly empty.
pub fn word_frequency(table: &ChatTable, top_n: usize, min_len: usize) -> WordFrequency {
    let stop = [STOP_WORDS];
    let mut overall = Tally::new();
    let mut per_author: BTreeMap<String, Tally<String>> = table
        .authors()
        .into_iter()
        .map(|a| (a.to_string(), Tally::new()))
        .collect();

    for msg in table.text_messages() {
        let words = tokenize(&msg.body, min_len, &stop);
        if let Some(tally) = per_author.get_mut(&msg.author) {
            tally.extend(words.iter().cloned());
        }
        overall.extend(words);
    }

    WordFrequency {
        total_words: overall.total(),
        unique_words: overall.len(),
        most_common: overall.most_common(top_n),
        per_author: per_author
            .into_iter()
            .map(|(author, tally)| (author, tally.most_common(top_n)))
            .collect(),
    }
}

/// Word tally over an arbitrary message stream.
pub(crate) fn count_words<'m>(
    messages: impl IntoIterator<Item = &'m Message>,
    min_len: usize,
    stop: &[&[&str]],
) -> Tally<String> {
    let mut tally = Tally::new();
    for msg in messages {
        tally.extend(tokenize(&msg.body, min_len, stop));
    }
    tally
}
