//! Everything the analyzer knows about a chat, in one serializable value.

use serde::Serialize;

use super::group::{
    ConversationPair, DominanceScore, GroupSummary, InteractionMatrix, ReplyPattern, StarterStats,
    TimeOverlap, Topics,
};
use super::lexical::{EmojiSummary, WordFrequency};
use super::response::ResponseSummary;
use super::sentiment::SentimentSummary;
use super::stats::{ActiveDay, SlotActivity, TimelinePoint, UserStats};
use crate::table::ChatSummary;

/// Group-dynamics section of an [`AnalysisReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub summary: GroupSummary,
    pub interaction_matrix: InteractionMatrix,
    pub conversation_pairs: Vec<ConversationPair>,
    pub reply_patterns: Vec<ReplyPattern>,
    pub conversation_starters: Vec<StarterStats>,
    pub active_time_overlap: Vec<TimeOverlap>,
    pub dominance: Vec<DominanceScore>,
    pub topics: Topics,
}

/// Full analysis of one table. Built by
/// [`Analyzer::report`](super::Analyzer::report).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: ChatSummary,
    pub user_stats: Vec<UserStats>,
    /// Daily message counts per author
    pub timeline: Vec<TimelinePoint>,
    pub hourly_activity: Vec<SlotActivity>,
    pub daily_activity: Vec<SlotActivity>,
    pub most_active_days: Vec<ActiveDay>,
    pub emojis: EmojiSummary,
    pub words: WordFrequency,
    pub sentiment: SentimentSummary,
    pub response_times: ResponseSummary,
    pub group: GroupReport,
}

#[cfg(feature = "json-output")]
impl AnalysisReport {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Json`](crate::ChatlensError::Json) if
    /// serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes [`to_json`](Self::to_json) output to `path`.
    pub fn write_json(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
