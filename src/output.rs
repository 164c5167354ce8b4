use std::io::Write;

use serde::Serialize;

use crate::error::{MatchError, Result};
use crate::model::{EntryId, ScoredCandidate};
use crate::pager::Pager;

pub const NO_MATCH_MESSAGE: &str =
    "No answer found in the knowledge base. Please try asking in a different way.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(MatchError::InvalidArg(format!(
                "Unknown output format: {other}"
            ))),
        }
    }
}

pub fn render_matches<W: Write>(
    out: &mut W,
    format: OutputFormat,
    query: &str,
    matches: &[ScoredCandidate],
    page: usize,
    pager: &Pager,
) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(out, matches, page, pager),
        OutputFormat::Json => render_json(out, query, matches, page, pager),
    }
}

fn render_text<W: Write>(
    out: &mut W,
    matches: &[ScoredCandidate],
    page: usize,
    pager: &Pager,
) -> Result<()> {
    if matches.is_empty() {
        writeln!(out, "{NO_MATCH_MESSAGE}")?;
        return Ok(());
    }

    if matches.len() == 1 {
        writeln!(out, "Found 1 possible answer:")?;
    } else {
        writeln!(out, "Found {} possible answers:", matches.len())?;
    }

    let items = pager.slice(matches, page)?;
    let offset = pager.page_start(page).unwrap_or_default();
    for (i, candidate) in items.iter().enumerate() {
        let marker = if candidate.entry.has_video { " [video]" } else { "" };
        writeln!(
            out,
            "  {}. {}{}",
            offset + i + 1,
            candidate.entry.question,
            marker
        )?;
    }

    if matches.len() > pager.page_size() {
        writeln!(
            out,
            "Page {} of {}",
            page.saturating_add(1),
            pager.page_count(matches.len())
        )?;
    }
    Ok(())
}

pub fn render_answer<W: Write>(out: &mut W, candidate: &ScoredCandidate) -> Result<()> {
    writeln!(out, "{}", candidate.entry.question)?;
    writeln!(out, "{}", candidate.entry.answer)?;
    if candidate.entry.has_video {
        writeln!(out, "[video]")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonMatch<'a> {
    id: EntryId,
    question: &'a str,
    answer: &'a str,
    has_video: bool,
    relevance: usize,
    final_score: i64,
    likes: u32,
    dislikes: u32,
}

#[derive(Serialize)]
struct JsonPage<'a> {
    query: &'a str,
    total: usize,
    page: usize,
    page_count: usize,
    matches: Vec<JsonMatch<'a>>,
}

fn render_json<W: Write>(
    out: &mut W,
    query: &str,
    matches: &[ScoredCandidate],
    page: usize,
    pager: &Pager,
) -> Result<()> {
    let json_page = JsonPage {
        query,
        total: matches.len(),
        page: page.saturating_add(1),
        page_count: pager.page_count(matches.len()),
        matches: pager
            .slice(matches, page)?
            .iter()
            .map(|c| JsonMatch {
                id: c.entry.id,
                question: &c.entry.question,
                answer: &c.entry.answer,
                has_video: c.entry.has_video,
                relevance: c.relevance,
                final_score: c.final_score,
                likes: c.entry.likes,
                dislikes: c.entry.dislikes,
            })
            .collect(),
    };
    let rendered = serde_json::to_string_pretty(&json_page)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}
