//! Sentiment scoring and per-author summaries.
//!
//! Scoring is a black box behind [`SentimentScorer`]. The crate ships
//! [`LexiconScorer`], a small valence lexicon with negation and emphasis
//! handling whose output has the usual `neg / neu / pos / compound` shape.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::table::ChatTable;

/// Compound score at or above which a message is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which a message is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Scores for one piece of text.
///
/// `negative + neutral + positive` is 1 for non-empty text; `compound` lies in
/// `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

impl SentimentScores {
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Anything that turns text into [`SentimentScores`].
pub trait SentimentScorer {
    fn score(&self, text: &str) -> SentimentScores;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> SentimentScores,
{
    fn score(&self, text: &str) -> SentimentScores {
        self(text)
    }
}

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "cannot", "dont",
    "don't", "didnt", "didn't", "isnt", "isn't", "wasnt", "wasn't", "wont", "won't", "cant",
    "can't", "aint", "ain't",
];

const BOOSTERS: &[&str] = &[
    "very", "really", "so", "extremely", "super", "totally", "absolutely", "incredibly", "too",
];

const DEFAULT_LEXICON: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("congrats", 2.4),
    ("cool", 1.3),
    ("excellent", 2.7),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("haha", 2.0),
    ("love", 3.2),
    ("lol", 1.8),
    ("merry", 2.1),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("wonderful", 2.7),
    ("yay", 2.4),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("cry", -2.1),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("miss", -0.6),
    ("problem", -1.7),
    ("sad", -2.1),
    ("sick", -2.3),
    ("sorry", -0.3),
    ("stupid", -2.4),
    ("terrible", -2.1),
    ("tired", -1.9),
    ("ugly", -2.3),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Valence-lexicon scorer.
///
/// # Example
///
/// ```rust
/// use chatlens::analysis::sentiment::{LexiconScorer, SentimentLabel, SentimentScorer};
///
/// let scorer = LexiconScorer::new();
/// assert_eq!(scorer.score("this is great!").label(), SentimentLabel::Positive);
/// assert_eq!(scorer.score("not good").label(), SentimentLabel::Negative);
/// assert_eq!(scorer.score("see you at 5").label(), SentimentLabel::Neutral);
/// ```
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Creates a scorer with the built-in lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(DEFAULT_LEXICON.iter().map(|(w, v)| (*w, *v)))
    }

    /// Creates a scorer from `(word, valence)` pairs. Words are lower-cased.
    pub fn with_lexicon<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        Self {
            lexicon: entries
                .into_iter()
                .map(|(w, v)| (w.as_ref().to_lowercase(), v))
                .collect(),
        }
    }

    /// Adds or replaces one lexicon entry.
    #[must_use]
    pub fn with_word(mut self, word: &str, valence: f64) -> Self {
        self.lexicon.insert(word.to_lowercase(), valence);
        self
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|t| {
                t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScores {
        let tokens = Self::tokens(text);
        if tokens.is_empty() {
            return SentimentScores::default();
        }

        let mut valences = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.lexicon.get(token) else {
                valences.push(0.0);
                continue;
            };
            let mut v = base;
            if i > 0 && BOOSTERS.contains(&tokens[i - 1].as_str()) {
                v += BOOSTER_INCREMENT * v.signum();
            }
            let window = &tokens[i.saturating_sub(3)..i];
            if window.iter().any(|t| NEGATIONS.contains(&t.as_str())) {
                v *= NEGATION_SCALAR;
            }
            valences.push(v);
        }

        let mut sum: f64 = valences.iter().sum();
        let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS);
        if sum != 0.0 {
            sum += (bangs as f64) * EXCLAMATION_INCREMENT * sum.signum();
        }
        let compound = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();

        let mut pos = 0.0;
        let mut neg = 0.0;
        let mut neu = 0.0;
        for v in valences {
            if v > 0.0 {
                pos += v + 1.0;
            } else if v < 0.0 {
                neg += v - 1.0;
            } else {
                neu += 1.0;
            }
        }
        let total = pos + neg.abs() + neu;

        SentimentScores {
            negative: neg.abs() / total,
            neutral: neu / total,
            positive: pos / total,
            compound,
        }
    }
}

/// A text message with its scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMessage<'a> {
    pub message: &'a Message,
    pub scores: SentimentScores,
    pub label: SentimentLabel,
}

/// Scores every text message (no media, no system notices).
pub fn score_messages<'a, S>(table: &'a ChatTable, scorer: &S) -> Vec<ScoredMessage<'a>>
where
    S: SentimentScorer + ?Sized,
{
    table
        .text_messages()
        .map(|message| {
            let scores = scorer.score(&message.body);
            ScoredMessage {
                message,
                scores,
                label: scores.label(),
            }
        })
        .collect()
}

/// Label counts and mean compound score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Mean compound score; 0 when nothing was scored
    pub avg_compound: f64,
}

impl SentimentCounts {
    fn from_scored<'s>(scored: impl IntoIterator<Item = &'s ScoredMessage<'s>>) -> Self {
        let mut counts = Self::default();
        let mut sum = 0.0;
        let mut n = 0usize;
        for s in scored {
            match s.label {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
                SentimentLabel::Negative => counts.negative += 1,
            }
            sum += s.scores.compound;
            n += 1;
        }
        if n > 0 {
            counts.avg_compound = sum / n as f64;
        }
        counts
    }
}

/// Overall and per-author sentiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub overall: SentimentCounts,
    pub per_author: BTreeMap<String, SentimentCounts>,
}

/// Summarizes sentiment over the table's text messages.
pub fn sentiment_summary<S>(table: &ChatTable, scorer: &S) -> SentimentSummary
where
    S: SentimentScorer + ?Sized,
{
    let scored = score_messages(table, scorer);
    let mut by_author: BTreeMap<&str, Vec<&ScoredMessage<'_>>> = BTreeMap::new();
    for s in &scored {
        by_author.entry(s.message.author.as_str()).or_default().push(s);
    }

    SentimentSummary {
        overall: SentimentCounts::from_scored(&scored),
        per_author: by_author
            .into_iter()
            .map(|(author, rows)| (author.to_string(), SentimentCounts::from_scored(rows)))
            .collect(),
    }
}
