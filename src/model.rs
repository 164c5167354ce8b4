use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of an entry in load order; stable for the lifetime of a loaded
/// knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub usize);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: EntryId,
    pub question: String,
    pub answer: String,
    pub has_video: bool,
    pub likes: u32,
    pub dislikes: u32,
}

impl KnowledgeEntry {
    pub fn new(id: EntryId, question: String, answer: String, has_video: bool) -> Self {
        Self {
            id,
            question,
            answer,
            has_video,
            likes: 0,
            dislikes: 0,
        }
    }

    pub fn net_feedback(&self) -> i64 {
        i64::from(self.likes) - i64::from(self.dislikes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Like,
    Dislike,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Relevance weighted against net likes, with a three-key tie-break.
    #[default]
    Feedback,
    /// Keyword relevance only; feedback counters are ignored.
    Relevance,
}

/// One entry scored for a single query. Built fresh by every ranking pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub entry: KnowledgeEntry,
    pub relevance: usize,
    pub final_score: i64,
}
