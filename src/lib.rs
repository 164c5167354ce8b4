//! Keyword question matching over a small question/answer knowledge base.
//!
//! The knowledge base is a text file of `"question","answer"` lines behind a
//! header line. [`MatchEngine`] loads it once, ranks entries against free
//! text queries by keyword overlap, and folds like/dislike feedback into the
//! ranking.

pub mod chat;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod keywords;
pub mod model;
pub mod output;
pub mod pager;
pub mod parse;
pub mod source;

pub use config::EngineConfig;
pub use engine::MatchEngine;
pub use error::{MatchError, Result};
pub use keywords::{KeywordExtractor, Keywords};
pub use model::{EntryId, Feedback, KnowledgeEntry, RankingMode, ScoredCandidate};
pub use source::KnowledgeSource;
