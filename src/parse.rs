use std::sync::LazyLock;

use regex::{Regex, RegexSet, RegexSetBuilder};

use crate::error::{MatchError, Result};
use crate::model::{EntryId, KnowledgeEntry};

static QUOTED_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.*?)""#).expect("valid quoted field pattern"));

/// Flags answers that link to a known video host.
#[derive(Debug, Clone)]
pub struct VideoDetector {
    hosts: RegexSet,
}

impl VideoDetector {
    pub fn new<S: AsRef<str>>(hosts: &[S]) -> Result<Self> {
        let patterns = hosts.iter().map(|h| regex::escape(h.as_ref()));
        let hosts = RegexSetBuilder::new(patterns)
            .case_insensitive(true)
            .build()
            .map_err(|err| MatchError::InvalidArg(format!("video host pattern: {err}")))?;
        Ok(Self { hosts })
    }

    pub fn has_video(&self, answer: &str) -> bool {
        self.hosts.is_match(answer)
    }
}

#[derive(Debug, Default)]
pub struct ParseReport {
    pub entries: Vec<KnowledgeEntry>,
    /// Non-blank data lines dropped for not holding exactly two quoted fields.
    pub skipped: usize,
}

/// Parses `"question","answer"` lines. The first line is a header and is
/// always dropped.
pub fn parse_knowledge_base(text: &str, videos: &VideoDetector) -> ParseReport {
    let mut report = ParseReport::default();

    for line in text.trim().split('\n').skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match split_fields(line) {
            Some((question, answer)) => {
                let id = EntryId(report.entries.len());
                let has_video = videos.has_video(answer);
                report.entries.push(KnowledgeEntry::new(
                    id,
                    question.to_string(),
                    answer.to_string(),
                    has_video,
                ));
            }
            None => report.skipped += 1,
        }
    }

    report
}

fn split_fields(line: &str) -> Option<(&str, &str)> {
    let mut fields = QUOTED_FIELD
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim());

    let question = fields.next()?;
    let answer = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some((question, answer))
}
