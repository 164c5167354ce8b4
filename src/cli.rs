use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "faq-match",
    version,
    about = "Answer questions from a quoted question/answer knowledge base"
)]
pub struct Cli {
    /// Knowledge base file path or http(s) URL.
    #[arg(long)]
    pub kb: String,

    /// TOML config file. Defaults to the per-user config when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "text")]
    pub output: String,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Rank by keyword relevance only, ignoring likes and dislikes.
    #[arg(long)]
    pub relevance_only: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Match a single question and print one page of candidates.
    Query {
        question: String,

        /// One-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Read questions and commands from stdin.
    Chat,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == Some(0) {
            return Err("page-size must be > 0".to_string());
        }

        if let Command::Query { page, .. } = &self.command {
            if *page == 0 {
                return Err("page must be >= 1".to_string());
            }
        }

        Ok(())
    }
}
