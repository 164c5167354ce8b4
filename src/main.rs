use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use faq_match::chat::ChatSession;
use faq_match::cli::{Cli, Command};
use faq_match::output::{self, OutputFormat};
use faq_match::pager::Pager;
use faq_match::{EngineConfig, KnowledgeSource, MatchEngine, MatchError, RankingMode};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = real_main().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn real_main() -> Result<(), MatchError> {
    let cli = Cli::parse();
    cli.validate().map_err(MatchError::InvalidArg)?;
    let format = OutputFormat::parse(&cli.output)?;

    let mut config = EngineConfig::load(cli.config.as_deref())?;
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if cli.relevance_only {
        config.ranking = RankingMode::Relevance;
    }
    let pager = Pager::new(config.page_size)?;

    let mut engine = MatchEngine::new(config)?;
    engine.load(&KnowledgeSource::from(cli.kb.as_str())).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Query { question, page } => {
            let matches = engine.find_matches(question);
            output::render_matches(&mut out, format, question, &matches, page - 1, &pager)?;
        }
        Command::Chat => {
            let mut session = ChatSession::new(&mut engine, pager, format);
            session.run(io::stdin().lock(), &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}
