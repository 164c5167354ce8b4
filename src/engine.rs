//! Keyword matching and feedback-aware ranking over an in-memory knowledge
//! base.
//!
//! A query is reduced to a [`Keywords`] set and compared against every
//! entry's question keywords. The relevance of an entry is the size of the
//! overlap, plus a fixed bonus when the question contains the query keywords
//! verbatim as a phrase. Entries with no overlap never appear in results.
//!
//! In [`RankingMode::Feedback`] the final score is
//! `relevance * relevance_weight + (likes - dislikes)`, ties broken by
//! relevance, then net feedback, then raw likes, then load order.

use std::cmp::Reverse;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::keywords::{KeywordExtractor, Keywords};
use crate::model::{EntryId, Feedback, KnowledgeEntry, RankingMode, ScoredCandidate};
use crate::parse::{VideoDetector, parse_knowledge_base};
use crate::source::KnowledgeSource;

#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: KnowledgeEntry,
    keywords: Keywords,
}

#[derive(Debug)]
pub struct MatchEngine {
    config: EngineConfig,
    extractor: KeywordExtractor,
    videos: VideoDetector,
    entries: Vec<IndexedEntry>,
    ready: bool,
}

impl MatchEngine {
    /// An engine with no knowledge loaded. Queries return nothing until
    /// [`MatchEngine::load`] succeeds.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let extractor = KeywordExtractor::from_config(&config);
        let videos = VideoDetector::new(config.video_hosts.as_slice())?;
        Ok(Self {
            config,
            extractor,
            videos,
            entries: Vec::new(),
            ready: false,
        })
    }

    pub fn with_entries(config: EngineConfig, entries: Vec<KnowledgeEntry>) -> Result<Self> {
        let mut engine = Self::new(config)?;
        engine.install(entries);
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.entries.iter().map(|indexed| &indexed.entry)
    }

    pub fn entry(&self, id: EntryId) -> Option<&KnowledgeEntry> {
        self.entries.get(id.0).map(|indexed| &indexed.entry)
    }

    pub fn set_ranking(&mut self, ranking: RankingMode) {
        self.config.ranking = ranking;
    }

    /// Fetches and parses the knowledge base. On failure the engine is left
    /// empty and not ready.
    pub async fn load(&mut self, source: &KnowledgeSource) -> Result<usize> {
        match source.fetch().await {
            Ok(text) => Ok(self.load_from_str(&text)),
            Err(err) => {
                self.entries.clear();
                self.ready = false;
                Err(err)
            }
        }
    }

    pub fn load_from_str(&mut self, text: &str) -> usize {
        let report = parse_knowledge_base(text, &self.videos);
        info!(
            entries = report.entries.len(),
            skipped = report.skipped,
            "knowledge base loaded"
        );
        self.install(report.entries);
        self.entries.len()
    }

    fn install(&mut self, entries: Vec<KnowledgeEntry>) {
        self.entries = entries
            .into_iter()
            .enumerate()
            .map(|(position, mut entry)| {
                entry.id = EntryId(position);
                let keywords = self.extractor.extract(&entry.question);
                IndexedEntry { entry, keywords }
            })
            .collect();
        self.ready = true;
    }

    /// Ranks every entry sharing at least one keyword with `query`, best
    /// first. Paging is left to the caller.
    pub fn find_matches(&self, query: &str) -> Vec<ScoredCandidate> {
        if self.entries.is_empty() {
            return Vec::new();
        }

        let query_keywords = self.extractor.extract(query);
        if query_keywords.is_empty() {
            debug!("query has no keywords");
            return Vec::new();
        }

        let phrase = query_keywords.phrase();
        let mut candidates: Vec<ScoredCandidate> = self
            .entries
            .iter()
            .filter_map(|indexed| {
                let relevance = self.relevance(&query_keywords, &phrase, indexed);
                (relevance > 0).then(|| ScoredCandidate {
                    entry: indexed.entry.clone(),
                    relevance,
                    final_score: self.final_score(relevance, &indexed.entry),
                })
            })
            .collect();

        match self.config.ranking {
            RankingMode::Feedback => candidates.sort_by_key(|c| {
                (
                    Reverse(c.final_score),
                    Reverse(c.relevance),
                    Reverse(c.entry.net_feedback()),
                    Reverse(c.entry.likes),
                )
            }),
            RankingMode::Relevance => candidates.sort_by_key(|c| Reverse(c.relevance)),
        }

        debug!(
            keywords = query_keywords.len(),
            candidates = candidates.len(),
            "ranked query"
        );
        candidates
    }

    fn relevance(&self, query: &Keywords, phrase: &str, indexed: &IndexedEntry) -> usize {
        let mut score = query.overlap(&indexed.keywords);
        if indexed.entry.question.contains(phrase) {
            score = score.saturating_add(self.config.phrase_bonus);
        }
        score
    }

    // Saturates so an extreme weight from the config file cannot overflow.
    fn final_score(&self, relevance: usize, entry: &KnowledgeEntry) -> i64 {
        let weighted = i64::try_from(relevance)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.config.relevance_weight);
        match self.config.ranking {
            RankingMode::Feedback => weighted.saturating_add(entry.net_feedback()),
            RankingMode::Relevance => weighted,
        }
    }

    /// Applies feedback to the entry with `id`. Returns `false` when no such
    /// entry exists.
    pub fn record_feedback(&mut self, id: EntryId, feedback: Feedback) -> bool {
        let Some(indexed) = self.entries.get_mut(id.0) else {
            debug!(%id, "feedback for unknown entry");
            return false;
        };
        let entry = &mut indexed.entry;
        match feedback {
            Feedback::Like => entry.likes = entry.likes.saturating_add(1),
            Feedback::Dislike => entry.dislikes = entry.dislikes.saturating_add(1),
        }
        debug!(%id, ?feedback, likes = entry.likes, dislikes = entry.dislikes, "feedback recorded");
        true
    }

    /// Looks up the first entry whose question is exactly `question`.
    pub fn find_by_question(&self, question: &str) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|indexed| indexed.entry.question == question)
            .map(|indexed| indexed.entry.id)
    }

    pub fn like_entry(&mut self, question: &str) -> bool {
        self.feedback_by_question(question, Feedback::Like)
    }

    pub fn dislike_entry(&mut self, question: &str) -> bool {
        self.feedback_by_question(question, Feedback::Dislike)
    }

    // Duplicate questions resolve to the first one loaded.
    fn feedback_by_question(&mut self, question: &str, feedback: Feedback) -> bool {
        match self.find_by_question(question) {
            Some(id) => self.record_feedback(id, feedback),
            None => {
                debug!(question, "feedback question not in knowledge base");
                false
            }
        }
    }
}
