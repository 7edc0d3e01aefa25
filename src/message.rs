//! The sealed chat message record.
//!
//! This module provides [`Message`], one entry of a parsed export. Messages are
//! produced by the assembler in [`crate::parsing`] and collected into a
//! [`ChatTable`](crate::ChatTable); once sealed they are never mutated.
//!
//! # Examples
//!
//! ```
//! use chatlens::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 12, 25)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//!
//! let msg = Message::new(ts, "Alice", "Hey! Merry Christmas!");
//! assert_eq!(msg.author(), "Alice");
//! assert!(msg.is_text());
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatlens::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let msg = Message::new(ts, "Bob", "<Media omitted>").with_media(true);
//! let json = serde_json::to_string(&msg)?;
//! let parsed: Message = serde_json::from_str(&json)?;
//!
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One chat entry recovered from an export.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | When the message was sent (no timezone in source) |
/// | `author` | `String` | Display name exactly as exported, trimmed |
/// | `body` | `String` | Text, newline-joined across continuation lines, trimmed |
/// | `is_media` | `bool` | Body matched a media-attachment indicator |
/// | `is_system` | `bool` | Body or author matched an administrative indicator |
///
/// `is_media` and `is_system` are independent; both may be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent. Naive: exports carry no timezone.
    pub timestamp: NaiveDateTime,

    /// Display name of the author.
    pub author: String,

    /// Message text. May contain newlines for multi-line messages.
    pub body: String,

    /// Whether the body looks like an attachment placeholder.
    #[serde(default)]
    pub is_media: bool,

    /// Whether the message is an administrative notification.
    #[serde(default)]
    pub is_system: bool,
}

impl Message {
    /// Creates a plain text message (both flags false).
    pub fn new(
        timestamp: NaiveDateTime,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            author: author.into(),
            body: body.into(),
            is_media: false,
            is_system: false,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets the media flag.
    #[must_use]
    pub fn with_media(mut self, is_media: bool) -> Self {
        self.is_media = is_media;
        self
    }

    /// Sets the system flag.
    #[must_use]
    pub fn with_system(mut self, is_system: bool) -> Self {
        self.is_system = is_system;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` for ordinary text: neither media nor system.
    pub fn is_text(&self) -> bool {
        !self.is_media && !self.is_system
    }

    /// Number of physical lines the body spans.
    pub fn line_count(&self) -> usize {
        self.body.lines().count()
    }
}
