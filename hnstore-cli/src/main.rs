//! hnsearch - Hacker News search in the terminal
//!
//! One-shot: fetch a query (plus extra pages), apply dismissals, print.
//! Interactive (`-i`): a small command loop over a single search session.
//!
//! Run with: cargo run -p hnstore-cli -- rust --pages 2 --sort points

mod algolia;
mod logging;
mod render;
mod repl;

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hnstore::config::SearchConfig;
use hnstore::provider::StaticProvider;
use hnstore::{SearchProvider, SearchSession, SortKey, SortState, SubmitOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncBufReadExt;

use crate::algolia::AlgoliaProvider;
use crate::logging::Verbosity;
use crate::repl::Command;

type Session = SearchSession<Arc<dyn SearchProvider>>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search query (defaults to HNSEARCH_DEFAULT_QUERY, then "Redux")
    query: Option<String>,

    /// Number of result pages to load
    #[arg(short, long, default_value_t = 1)]
    pages: u32,

    /// Sort column: none, title, author, comments or points
    #[arg(short, long, default_value = "none")]
    sort: SortKey,

    /// Reverse the sort order
    #[arg(short, long)]
    reverse: bool,

    /// Hide a result by its object ID (repeatable)
    #[arg(short, long)]
    dismiss: Vec<String>,

    /// Results per page (1-1000)
    #[arg(long)]
    hits_per_page: Option<u32>,

    /// Search API base URL (defaults to HNSEARCH_API_BASE, then the public HN API)
    #[arg(long)]
    api_base: Option<String>,

    /// Serve results from a JSON fixture file instead of the network
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Start an interactive session
    #[arg(short, long)]
    interactive: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,
}

fn build_config(args: &Args) -> Result<SearchConfig> {
    let mut config = SearchConfig::from_env().context("Invalid HNSEARCH_* environment")?;
    if let Some(base) = &args.api_base {
        config.set_api_base(base)?;
    }
    if let Some(hpp) = args.hits_per_page {
        config.set_hits_per_page(&hpp.to_string())?;
    }
    Ok(config)
}

fn build_provider(args: &Args, config: &SearchConfig) -> Result<Arc<dyn SearchProvider>> {
    match &args.fixture {
        Some(path) => {
            let provider = StaticProvider::from_fixture_file(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            tracing::info!(path = %path.display(), "serving results from fixture");
            Ok(Arc::new(provider))
        }
        None => Ok(Arc::new(AlgoliaProvider::new(config.clone())?)),
    }
}

/// Await `fut` behind a spinner on stderr
async fn with_spinner<F: Future>(message: String, fut: F) -> Result<F::Output> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    pb.finish_and_clear();
    Ok(output)
}

fn print_view(session: &Session, json: bool) -> Result<()> {
    let query = session.active_query().unwrap_or_default();
    let hits = session.view();
    if json {
        println!("{}", render::render_json(query, session.page(), &hits)?);
    } else {
        print!(
            "{}",
            render::render_table(query, session.page(), &hits, session.sort_state(), chrono::Utc::now())
        );
    }
    Ok(())
}

async fn run_once(session: &mut Session, args: &Args) -> Result<()> {
    let query = session.search_term().to_string();
    with_spinner(format!("Searching {:?}", query), session.start())
        .await?
        .with_context(|| format!("Search for {:?} failed", query))?;

    for _ in 1..args.pages {
        if !session.has_more() {
            tracing::info!(page = session.page(), "no more results");
            break;
        }
        let next = session.page().saturating_add(1);
        with_spinner(format!("Loading page {}", next), session.more())
            .await?
            .with_context(|| format!("Loading page {} of {:?} failed", next, query))?;
    }

    for id in &args.dismiss {
        if session.dismiss(id)? == 0 {
            tracing::warn!(object_id = %id, "nothing to dismiss");
        }
    }

    print_view(session, args.json)
}

async fn handle_command(session: &mut Session, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Search(term) => {
            session.set_search_term(term.clone());
            let outcome = with_spinner(format!("Searching {:?}", term), session.submit()).await??;
            if outcome == SubmitOutcome::Cached {
                println!("(cached)");
            }
            print_view(session, json)
        }
        Command::More => {
            if !session.has_more() {
                println!("No more results.");
                return Ok(());
            }
            with_spinner("Loading more".to_string(), session.more()).await??;
            print_view(session, json)
        }
        Command::Dismiss(id) => {
            let removed = session.dismiss(&id)?;
            println!("Dismissed {} item(s).", removed);
            Ok(())
        }
        Command::Sort(key) => {
            session.sort_by(key);
            print_view(session, json)
        }
        Command::Show => print_view(session, json),
        Command::Help => {
            println!("{}", repl::HELP);
            Ok(())
        }
        Command::Quit => Ok(()),
    }
}

async fn run_interactive(session: &mut Session, json: bool) -> Result<()> {
    let query = session.search_term().to_string();
    match with_spinner(format!("Searching {:?}", query), session.start()).await? {
        Ok(_) => print_view(session, json)?,
        Err(e) => eprintln!("Something went wrong: {}", e),
    }
    println!("Type `help` for commands.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match repl::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = handle_command(session, command, json).await {
            eprintln!("Something went wrong: {:#}", e);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    let config = build_config(&args)?;
    let provider = build_provider(&args, &config)?;
    let query = args.query.clone().unwrap_or_else(|| config.default_query.clone());

    let mut session: Session = SearchSession::new(provider, query);
    session.set_sort(SortState::new(args.sort, args.reverse));

    if args.interactive {
        run_interactive(&mut session, args.json).await
    } else {
        run_once(&mut session, &args).await
    }
}
