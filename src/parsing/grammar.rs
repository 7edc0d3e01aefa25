//! Line classification against an ordered list of header grammars.
//!
//! A header line starts a new message and carries `(timestamp, author, body)`.
//! Every other line is a continuation of the message before it.
//!
//! Supported shapes (in default priority order):
//! - Bracketed: `[12/25/2023, 10:30:00 AM] Alice: Hello`
//! - Unbracketed: `12/25/2023, 10:30 AM - Alice: Hello`
//! - Loose: `12/25/23 10.30pm – Alice: Hello`
//!
//! Every pattern is anchored at line start. When several grammars match the
//! same line, the one with the lowest `priority` wins, whichever is "more
//! specific".

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;

/// Shared date token: 1-2 digit day/month, 2 or 4 digit year.
const DATE: &str = r"\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})";

/// A grammar descriptor: a named, prioritized header pattern.
///
/// The pattern must define three named groups: `ts`, `author`, `body`.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::GrammarSpec;
///
/// let spec = GrammarSpec::new(
///     "dotted",
///     5,
///     r"^(?P<ts>\d{2}\.\d{2}\.\d{4}, \d{2}:\d{2}) - (?P<author>.+?): (?P<body>.+)$",
/// );
/// assert_eq!(spec.priority, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarSpec {
    /// Short identifier used in logs and match results
    pub name: String,
    /// Lower value is tried first
    pub priority: u32,
    /// Regex with `ts`, `author` and `body` named groups
    pub pattern: String,
}

impl GrammarSpec {
    /// Creates a grammar descriptor.
    pub fn new(name: impl Into<String>, priority: u32, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority,
            pattern: pattern.into(),
        }
    }

    /// `[<date>, <time with seconds>] <author>: <body>`
    pub fn bracketed() -> Self {
        Self::new(
            "bracketed",
            0,
            format!(
                r"^\[(?P<ts>{DATE},\s\d{{1,2}}:\d{{2}}:\d{{2}}(?:\s?[APap][Mm])?)\]\s(?P<author>.+?):\s(?P<body>.+)$"
            ),
        )
    }

    /// `<date>, <time optionally with AM/PM> - <author>: <body>`
    pub fn unbracketed() -> Self {
        Self::new(
            "unbracketed",
            1,
            format!(
                r"^(?P<ts>{DATE},\s\d{{1,2}}:\d{{2}}(?::\d{{2}})?(?:\s?[APap][Mm])?)\s-\s(?P<author>.+?):\s(?P<body>.+)$"
            ),
        )
    }

    /// Permissive fallback: comma or whitespace after the date, `.` or `:`
    /// time separator, dotted meridiem, en dash, no seconds.
    pub fn loose() -> Self {
        Self::new(
            "loose",
            2,
            format!(
                r"^(?P<ts>{DATE}(?:,\s*|\s+)\d{{1,2}}[:.]\d{{2}}(?:\s*[APap]\.?\s?[Mm]\.?)?)\s*[-–]\s*(?P<author>.+?):\s(?P<body>.+)$"
            ),
        )
    }
}

/// Returns the built-in grammar list in priority order.
pub fn default_grammars() -> Vec<GrammarSpec> {
    vec![
        GrammarSpec::bracketed(),
        GrammarSpec::unbracketed(),
        GrammarSpec::loose(),
    ]
}

/// Result of classifying a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Name of the grammar that matched
    pub grammar: &'a str,
    /// Raw timestamp text, untouched
    pub timestamp: &'a str,
    /// Author text, untrimmed
    pub author: &'a str,
    /// Body text after the `: ` delimiter, untrimmed
    pub body: &'a str,
}

/// A compiled grammar.
#[derive(Debug, Clone)]
struct Grammar {
    name: String,
    priority: u32,
    regex: Regex,
}

impl Grammar {
    fn compile(spec: &GrammarSpec) -> Result<Self, ChatlensError> {
        let regex = Regex::new(&spec.pattern)?;
        for group in ["ts", "author", "body"] {
            if !regex.capture_names().flatten().any(|n| n == group) {
                return Err(ChatlensError::invalid_format(
                    "grammar",
                    format!("pattern '{}' lacks the '{group}' group", spec.name),
                ));
            }
        }
        Ok(Self {
            name: spec.name.clone(),
            priority: spec.priority,
            regex,
        })
    }
}

/// Decides whether a raw line opens a new message.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::LineClassifier;
///
/// let classifier = LineClassifier::new();
/// let header = classifier
///     .classify("12/25/2023, 10:30 AM - Alice: Hey! Merry Christmas!")
///     .unwrap();
///
/// assert_eq!(header.author, "Alice");
/// assert_eq!(header.body, "Hey! Merry Christmas!");
/// assert!(classifier.classify("just a continuation").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct LineClassifier {
    grammars: Vec<Grammar>,
}

impl LineClassifier {
    /// Creates a classifier with the built-in grammars.
    pub fn new() -> Self {
        Self::from_specs(&default_grammars()).expect("built-in grammars compile")
    }

    /// Compiles a classifier from descriptors, ordered by ascending priority.
    ///
    /// Descriptors with equal priority keep their given order.
    pub fn from_specs(specs: &[GrammarSpec]) -> Result<Self, ChatlensError> {
        let mut grammars = specs
            .iter()
            .map(Grammar::compile)
            .collect::<Result<Vec<_>, _>>()?;
        grammars.sort_by_key(|g| g.priority);
        Ok(Self { grammars })
    }

    /// Grammar names in the order they are tried.
    pub fn order(&self) -> Vec<&str> {
        self.grammars.iter().map(|g| g.name.as_str()).collect()
    }

    /// Returns the first grammar match for `line`, or `None` for a
    /// continuation line.
    pub fn classify<'a>(&'a self, line: &'a str) -> Option<HeaderMatch<'a>> {
        self.grammars.iter().find_map(|grammar| {
            let caps = grammar.regex.captures(line)?;
            // Patterns should anchor themselves; enforce it for custom ones.
            let whole = caps.get(0)?;
            if whole.start() != 0 {
                return None;
            }
            Some(HeaderMatch {
                grammar: &grammar.name,
                timestamp: caps.name("ts")?.as_str(),
                author: caps.name("author")?.as_str(),
                body: caps.name("body")?.as_str(),
            })
        })
    }

    /// Returns `true` if `line` is a header line.
    pub fn is_header(&self, line: &str) -> bool {
        self.classify(line).is_some()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
