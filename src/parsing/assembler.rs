//! Single-pass message assembly.
//!
//! [`MessageAssembler`] consumes physical lines in file order and keeps at
//! most one message open:
//!
//! | Line | No open message | Message open |
//! |------|-----------------|--------------|
//! | blank | ignored | ignored |
//! | header | open new | seal current, open new |
//! | other | dropped (orphan) | appended after `\n` |
//!
//! At end of input the open message, if any, is sealed. A header whose
//! timestamp cannot be normalized aborts the whole parse.

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use super::classifier::MessageClassifier;
use super::grammar::LineClassifier;
use super::timestamp::TimestampNormalizer;
use crate::Message;
use crate::error::ChatlensError;

/// Counters collected while assembling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParseStats {
    /// Physical lines seen
    pub lines_total: usize,
    /// Whitespace-only lines
    pub blank_lines: usize,
    /// Lines that opened a message
    pub header_lines: usize,
    /// Lines appended to an open message
    pub continuation_lines: usize,
    /// Non-header lines with no message to attach to
    pub orphan_lines: usize,
    /// Messages sealed with an empty body and discarded
    pub empty_messages: usize,
    /// Messages emitted
    pub messages: usize,
}

/// The in-progress accumulator.
#[derive(Debug)]
struct OpenMessage {
    timestamp: NaiveDateTime,
    author: String,
    body: String,
}

#[derive(Debug)]
enum State {
    NoOpenMessage,
    MessageOpen(OpenMessage),
}

/// Stateful reducer from lines to sealed [`Message`]s.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::{LineClassifier, MessageAssembler, MessageClassifier, TimestampNormalizer};
///
/// let lines = LineClassifier::new();
/// let stamps = TimestampNormalizer::new();
/// let tags = MessageClassifier::new();
///
/// let mut assembler = MessageAssembler::new(&lines, &stamps, &tags);
/// assembler.push_line("12/25/2023, 10:30 AM - Alice: Line one")?;
/// assembler.push_line("line two")?;
/// let (messages, stats) = assembler.finish();
///
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].body, "Line one\nline two");
/// assert_eq!(stats.continuation_lines, 1);
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug)]
pub struct MessageAssembler<'a> {
    lines: &'a LineClassifier,
    stamps: &'a TimestampNormalizer,
    tags: &'a MessageClassifier,
    state: State,
    sealed: Vec<Message>,
    stats: ParseStats,
}

impl<'a> MessageAssembler<'a> {
    /// Creates an assembler with no open message.
    pub fn new(
        lines: &'a LineClassifier,
        stamps: &'a TimestampNormalizer,
        tags: &'a MessageClassifier,
    ) -> Self {
        Self {
            lines,
            stamps,
            tags,
            state: State::NoOpenMessage,
            sealed: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// Returns `true` while a message is accumulating.
    pub fn has_open_message(&self) -> bool {
        matches!(self.state, State::MessageOpen(_))
    }

    /// Number of messages sealed so far.
    pub fn sealed_count(&self) -> usize {
        self.sealed.len()
    }

    /// Feeds the next physical line.
    pub fn push_line(&mut self, raw: &str) -> Result<(), ChatlensError> {
        self.stats.lines_total += 1;
        let line_no = self.stats.lines_total;
        let line = strip_marks(raw);

        if line.trim().is_empty() {
            self.stats.blank_lines += 1;
            return Ok(());
        }

        if let Some(header) = self.lines.classify(line) {
            let timestamp = self.stamps.normalize_at(header.timestamp, line_no)?;
            trace!(line = line_no, grammar = header.grammar, "header line");
            self.stats.header_lines += 1;

            let next = OpenMessage {
                timestamp,
                author: header.author.trim().to_string(),
                body: header.body.trim().to_string(),
            };
            if let State::MessageOpen(done) = std::mem::replace(&mut self.state, State::MessageOpen(next)) {
                self.seal(done);
            }
            return Ok(());
        }

        match &mut self.state {
            State::MessageOpen(open) => {
                open.body.push('\n');
                open.body.push_str(line.trim());
                self.stats.continuation_lines += 1;
            }
            State::NoOpenMessage => {
                debug!(line = line_no, "dropping line before first header");
                self.stats.orphan_lines += 1;
            }
        }
        Ok(())
    }

    /// Seals the open message, if any, and returns everything emitted.
    pub fn finish(mut self) -> (Vec<Message>, ParseStats) {
        if let State::MessageOpen(done) = std::mem::replace(&mut self.state, State::NoOpenMessage) {
            self.seal(done);
        }
        self.stats.messages = self.sealed.len();
        (self.sealed, self.stats)
    }

    fn seal(&mut self, open: OpenMessage) {
        let body = open.body.trim();
        if body.is_empty() {
            debug!(author = %open.author, "discarding message with empty body");
            self.stats.empty_messages += 1;
            return;
        }

        let flags = self.tags.classify(&open.author, body);
        let message = Message::new(open.timestamp, open.author, body)
            .with_media(flags.is_media)
            .with_system(flags.is_system);
        self.sealed.push(message);
    }
}

/// Drops a leading byte-order mark or directional marks.
fn strip_marks(line: &str) -> &str {
    line.trim_start_matches(['\u{feff}', '\u{200e}', '\u{200f}'])
}
