//! Heuristic media/system tagging for sealed messages.
//!
//! Both checks are case-insensitive substring searches against fixed
//! indicator lists. Any single hit sets the flag; the two flags are computed
//! independently, so one message may carry both. False positives such as
//! "left" inside "leftovers" are accepted imprecision.

use serde::{Deserialize, Serialize};

/// Default media-attachment indicators.
pub const DEFAULT_MEDIA_INDICATORS: &[&str] = &[
    "<Media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "document omitted",
    "sticker omitted",
    "GIF omitted",
    ".jpg",
    ".png",
    ".mp4",
    ".pdf",
];

/// Default administrative-notification indicators.
pub const DEFAULT_SYSTEM_INDICATORS: &[&str] = &[
    "changed the subject",
    "changed this group",
    "changed the group description",
    "created group",
    "added",
    "removed",
    "left",
    "joined using this group",
    "security code changed",
    "changed their phone number",
    "is now an admin",
    "turned on disappearing messages",
    "turned off disappearing messages",
    "Messages and calls are end-to-end encrypted",
    "You deleted this message",
    "This message was deleted",
];

/// Default author names that mark a message as administrative.
pub const DEFAULT_SYSTEM_AUTHORS: &[&str] = &["System", "WhatsApp"];

/// A lower-cased set of substrings.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::IndicatorSet;
///
/// let set = IndicatorSet::new(["Omitted"]);
/// assert!(set.matches("<Media OMITTED>"));
/// assert!(!set.matches("hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSet {
    needles: Vec<String>,
}

impl IndicatorSet {
    /// Builds a set from any string-like items.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            needles: items
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Returns `true` if any indicator occurs in `text`, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        if self.needles.is_empty() {
            return false;
        }
        let haystack = text.to_lowercase();
        self.needles.iter().any(|n| haystack.contains(n.as_str()))
    }

    /// The lower-cased indicators.
    pub fn indicators(&self) -> &[String] {
        &self.needles
    }

    pub fn len(&self) -> usize {
        self.needles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }
}

/// Flags produced for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub is_media: bool,
    pub is_system: bool,
}

/// Tags message bodies as media and/or system notifications.
///
/// Indicator sets are injected at construction; [`MessageClassifier::new`]
/// uses the built-in lists.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::MessageClassifier;
///
/// let classifier = MessageClassifier::new();
///
/// let c = classifier.classify("Alice", "<Media omitted>");
/// assert!(c.is_media && !c.is_system);
///
/// let c = classifier.classify("System", "Alice changed the subject to Test");
/// assert!(c.is_system);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageClassifier {
    media: IndicatorSet,
    system: IndicatorSet,
    system_authors: Vec<String>,
}

impl MessageClassifier {
    /// Creates a classifier with the default indicator lists.
    pub fn new() -> Self {
        Self::with_indicators(
            IndicatorSet::new(DEFAULT_MEDIA_INDICATORS),
            IndicatorSet::new(DEFAULT_SYSTEM_INDICATORS),
        )
        .with_system_authors(DEFAULT_SYSTEM_AUTHORS)
    }

    /// Creates a classifier from explicit indicator sets and no system authors.
    pub fn with_indicators(media: IndicatorSet, system: IndicatorSet) -> Self {
        Self {
            media,
            system,
            system_authors: Vec::new(),
        }
    }

    /// Sets author names (exact, case-insensitive) that mark system messages.
    #[must_use]
    pub fn with_system_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.system_authors = authors
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    /// Returns `true` if `body` matches a media indicator.
    pub fn is_media(&self, body: &str) -> bool {
        self.media.matches(body)
    }

    /// Returns `true` if the body matches a system indicator, or the author is
    /// blank or a known system sender.
    pub fn is_system(&self, author: &str, body: &str) -> bool {
        if self.system.matches(body) {
            return true;
        }
        let author = author.trim().to_lowercase();
        author.is_empty() || self.system_authors.iter().any(|a| *a == author)
    }

    /// Computes both flags.
    pub fn classify(&self, author: &str, body: &str) -> Classification {
        Classification {
            is_media: self.is_media(body),
            is_system: self.is_system(author, body),
        }
    }

    pub fn media_indicators(&self) -> &IndicatorSet {
        &self.media
    }

    pub fn system_indicators(&self) -> &IndicatorSet {
        &self.system
    }
}

impl Default for MessageClassifier {
    fn default() -> Self {
        Self::new()
    }
}
