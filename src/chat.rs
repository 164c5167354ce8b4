use std::io::{BufRead, Write};

use tracing::debug;

use crate::engine::MatchEngine;
use crate::error::Result;
use crate::model::{EntryId, Feedback, ScoredCandidate};
use crate::output::{self, OutputFormat};
use crate::pager::Pager;

const HELP: &str = "\
Type a question to search the knowledge base.
  :next / :prev       page through the candidates
  :select N           show the answer of candidate N
  :like [N]           like candidate N, or the last shown answer
  :dislike [N]        dislike candidate N, or the last shown answer
  :help               show this help
  :quit               leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// One user's conversation against a loaded engine. Holds the candidates of
/// the last query and the current page over them.
pub struct ChatSession<'a> {
    engine: &'a mut MatchEngine,
    pager: Pager,
    format: OutputFormat,
    query: String,
    matches: Vec<ScoredCandidate>,
    page: usize,
    answered: Option<EntryId>,
}

impl<'a> ChatSession<'a> {
    pub fn new(engine: &'a mut MatchEngine, pager: Pager, format: OutputFormat) -> Self {
        Self {
            engine,
            pager,
            format,
            query: String::new(),
            matches: Vec::new(),
            page: 0,
            answered: None,
        }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "Knowledge base ready ({} entries). Ask a question, or :help.",
            self.engine.len()
        )?;
        for line in input.lines() {
            if self.handle_line(&line?, out)? == Step::Quit {
                break;
            }
            out.flush()?;
        }
        Ok(())
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Step> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Step::Continue);
        }

        let Some(command) = line.strip_prefix(':') else {
            self.ask(line, out)?;
            return Ok(Step::Continue);
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or("");
        let arg = parts.next();
        match name {
            "quit" | "q" => return Ok(Step::Quit),
            "help" => writeln!(out, "{HELP}")?,
            "next" => self.turn_page(self.page.saturating_add(1), out)?,
            "prev" => match self.page.checked_sub(1) {
                Some(page) => self.turn_page(page, out)?,
                None => writeln!(out, "Already on the first page.")?,
            },
            "select" => {
                if let Some(candidate) = self.pick(arg, out)? {
                    output::render_answer(out, &candidate)?;
                    self.answered = Some(candidate.entry.id);
                    self.matches.clear();
                    self.page = 0;
                }
            }
            "like" => self.feedback(arg, Feedback::Like, out)?,
            "dislike" => self.feedback(arg, Feedback::Dislike, out)?,
            other => writeln!(out, "Unknown command :{other}. Type :help.")?,
        }
        Ok(Step::Continue)
    }

    fn ask<W: Write>(&mut self, question: &str, out: &mut W) -> Result<()> {
        self.query = question.to_string();
        self.matches = self.engine.find_matches(question);
        self.page = 0;
        debug!(candidates = self.matches.len(), "chat query");
        self.show_page(out)
    }

    fn show_page<W: Write>(&self, out: &mut W) -> Result<()> {
        output::render_matches(
            out,
            self.format,
            &self.query,
            &self.matches,
            self.page,
            &self.pager,
        )
    }

    fn turn_page<W: Write>(&mut self, page: usize, out: &mut W) -> Result<()> {
        if self.matches.is_empty() {
            writeln!(out, "No candidates to page through.")?;
            return Ok(());
        }
        if page > self.page && !self.pager.has_next(self.page, self.matches.len()) {
            writeln!(out, "Already on the last page.")?;
            return Ok(());
        }
        self.page = page;
        self.show_page(out)
    }

    /// Resolves a one-based candidate number from the last query.
    fn pick<W: Write>(&self, arg: Option<&str>, out: &mut W) -> Result<Option<ScoredCandidate>> {
        let Some(arg) = arg else {
            writeln!(out, "Which candidate? Give its number.")?;
            return Ok(None);
        };
        let picked = arg
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.matches.get(i));
        match picked {
            Some(candidate) => Ok(Some(candidate.clone())),
            None => {
                writeln!(out, "No candidate numbered {arg}.")?;
                Ok(None)
            }
        }
    }

    fn feedback<W: Write>(
        &mut self,
        arg: Option<&str>,
        feedback: Feedback,
        out: &mut W,
    ) -> Result<()> {
        let target = match (arg, self.answered) {
            (Some(_), _) => self.pick(arg, out)?.map(|c| c.entry.id),
            (None, Some(id)) => Some(id),
            (None, None) => {
                writeln!(out, "Nothing to rate yet. Select an answer first.")?;
                None
            }
        };
        let Some(id) = target else {
            return Ok(());
        };

        if self.engine.record_feedback(id, feedback) {
            let verb = match feedback {
                Feedback::Like => "Liked",
                Feedback::Dislike => "Disliked",
            };
            writeln!(out, "{verb} entry {id}. Thanks for the feedback.")?;
        }
        Ok(())
    }
}
