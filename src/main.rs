//! Brave-Research: one-shot research runner
//!
//! Reads a query from the arguments or stdin and prints the research response as JSON.

use anyhow::{bail, Result};
use brave_research::{
    config,
    engines::BraveApi,
    network::HttpClient,
    summarizer::ChatCompletionSummarizer,
    Research, ResearchQuery, RetryPolicy, SearchClient,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }
    if args.iter().any(|a| a == "-V" || a == "--version") {
        println!("brave-research {}", brave_research::VERSION);
        return Ok(());
    }

    // Load configuration
    let path = config::locate();
    let settings = config::load(path.as_deref())?;

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    info!("Starting brave-research v{}", brave_research::VERSION);
    match path {
        Some(ref p) => info!("Loaded settings from: {}", p.display()),
        None => info!("No settings file found, using defaults"),
    }

    settings.validate()?;

    let search_timeout = settings.brave.timeout_duration()?;
    let client = HttpClient::with_settings(&settings.outgoing, search_timeout)?;
    let engine = BraveApi::from_settings(&settings.brave)?;
    let mut research = Research::new(SearchClient::new(client.clone(), Arc::new(engine)))
        .with_retry(RetryPolicy::from_settings(&settings.retry));

    if let Some(summarizer) = ChatCompletionSummarizer::from_settings(client, &settings.llm)? {
        info!("Summaries enabled with model {}", settings.llm.model);
        research = research.with_summarizer(Arc::new(summarizer));
    }

    let raw_query = if args.is_empty() { prompt_query()? } else { args.join(" ") };

    let query = match ResearchQuery::new(
        &raw_query,
        settings.brave.default_max_results as i64,
        research.has_summarizer(),
    ) {
        Ok(query) => query,
        Err(e) => bail!("Please enter a valid research query ({})", e),
    };

    match research.research_with_retry(&query, &settings.brave.api_key).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            warn!("Research failed: {}", e);
            bail!(e)
        }
    }
}

/// Ask for a query on stdin
fn prompt_query() -> Result<String> {
    print!("What would you like to research? ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
Brave-Research v{}
Research any topic with the Brave Search API

USAGE:
    brave-research [QUERY...]

OPTIONS:
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    RESEARCH_SETTINGS_PATH Path to settings.yml
    RESEARCH_DEBUG         Enable debug logging (1/true/yes/on)
    BRAVE_API_KEY          Brave Search subscription token
    BRAVE_BASE_URL         Brave web search endpoint
    BRAVE_TIMEOUT          Request timeout in seconds
    LLM_API_KEY            Enables summaries via an OpenAI-compatible API
    LLM_MODEL              Summary model name
    LLM_BASE_URL           OpenAI-compatible base URL
    LLM_TIMEOUT            Summary request timeout in seconds
"#,
        brave_research::VERSION
    );
}
