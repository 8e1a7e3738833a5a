use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use deepcite_agents::{run_research_session, ScriptedRuntime, SessionOptions};
use deepcite_core::{
    init_telemetry, CitationStyle, Config, DynSearchProvider, RetryPolicy, StubSearchProvider,
    TavilyClient, TelemetryOptions,
};
use tokio::runtime::Runtime;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "deepcite", version, about = "Cited deep-research sessions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a research session from scratch.
    Run(RunArgs),
    /// List the supported citation styles.
    Styles,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Query to research.
    #[arg(
        long,
        default_value = "Economic impact of remote work policies on small businesses"
    )]
    query: String,

    /// Citation style (apa, mla, chicago, web). Unknown names fall back to web.
    #[arg(long, default_value = "apa")]
    style: String,

    /// Maximum results per search query.
    #[arg(long, default_value_t = 5)]
    max_results: usize,

    /// Total attempts per search task.
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Pause between attempts, in seconds.
    #[arg(long, default_value_t = 2)]
    retry_delay: u64,

    /// Overall search deadline, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Use the offline stub provider even when TAVILY_API_KEY is set.
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Optional session ID (generated otherwise).
    #[arg(long)]
    session: Option<String>,
}

fn main() -> Result<()> {
    init_telemetry(TelemetryOptions::default())?;

    let cli = Cli::parse();

    let rt = Runtime::new()?;
    rt.block_on(async move {
        match cli.command {
            Command::Run(args) => run_command(args).await?,
            Command::Styles => styles_command(),
        }
        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}

async fn run_command(args: RunArgs) -> Result<()> {
    let config = Config::from_env();
    let style = CitationStyle::parse(&args.style);

    let provider = select_provider(&args, &config);

    let retry = RetryPolicy::default()
        .with_attempts(args.retries)
        .with_delay(Duration::from_secs(args.retry_delay))
        .with_deadline(Some(Duration::from_secs(args.timeout)));

    let mut options = SessionOptions::new(&args.query)
        .with_style(style)
        .with_max_results(args.max_results)
        .with_retry(retry);
    if let Some(session_id) = args.session {
        options = options.with_session_id(session_id);
    }

    let runtime = Arc::new(ScriptedRuntime::new());

    match run_research_session(options, provider, runtime).await {
        Some(outcome) => {
            println!("{}", outcome.report);
            println!("{}", outcome.bibliography);
            println!("{}", outcome.summary);
            info!(
                session_id = %outcome.session_id,
                total_sources = outcome.total_sources,
                "session finished"
            );
            Ok(())
        }
        None => bail!("research session failed; see diagnostics above"),
    }
}

fn select_provider(args: &RunArgs, config: &Config) -> DynSearchProvider {
    if args.offline {
        return Arc::new(StubSearchProvider::new());
    }
    if config.tavily_api_key.is_empty() {
        warn!("TAVILY_API_KEY not set; using the offline stub provider");
        return Arc::new(StubSearchProvider::new());
    }

    let client = TavilyClient::new(&config.tavily_api_key);
    match &config.search_endpoint {
        Some(endpoint) => Arc::new(client.with_endpoint(endpoint)),
        None => Arc::new(client),
    }
}

fn styles_command() {
    for style in CitationStyle::ALL {
        println!("{style}");
    }
}
