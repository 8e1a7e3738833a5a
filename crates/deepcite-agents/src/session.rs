//! End-to-end research session runner.
//!
//! A session owns a fresh registry, drives plan, fanout search, synthesis,
//! and reflection steps, and renders the bibliography and source summary.
//! Failures never escape [`run_research_session`]: diagnostics are logged
//! (including a quota hint when the collaborator error matches) and the
//! caller detects failure by value.

use std::sync::Arc;

use anyhow::Context as _;
use chrono::Local;
use deepcite_core::{
    detect_quota_exhaustion, run_many, CitationStyle, DynSearchProvider, RetryPolicy,
    SourceRegistry,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::roster;
use crate::runtime::DynAgentRuntime;
use crate::tools::CitationTools;

const MAX_FANOUT_QUERIES: usize = 5;

/// Options for running a research session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub query: String,
    pub style: CitationStyle,
    pub max_results: usize,
    pub retry: RetryPolicy,
    pub session_id: Option<String>,
}

impl SessionOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            style: CitationStyle::Apa,
            max_results: 5,
            retry: RetryPolicy::default(),
            session_id: None,
        }
    }

    pub fn with_style(mut self, style: CitationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Final artefacts of a completed session.
#[derive(Debug, Clone)]
pub struct ResearchOutcome {
    pub session_id: String,
    pub report: String,
    pub bibliography: String,
    pub summary: String,
    pub total_sources: usize,
}

/// Run a research session to completion.
///
/// Returns `None` on failure; this boundary never raises.
pub async fn run_research_session(
    options: SessionOptions,
    provider: DynSearchProvider,
    runtime: DynAgentRuntime,
) -> Option<ResearchOutcome> {
    let session_id = options
        .session_id
        .clone()
        .unwrap_or_else(|| format!("session-{}", Uuid::new_v4()));

    info!(
        %session_id,
        query = %options.query,
        style = %options.style,
        "starting research session"
    );

    match drive_session(&session_id, &options, provider, runtime).await {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            let message = format!("{err:#}");
            if let Some(notice) = detect_quota_exhaustion(&message) {
                warn!(
                    retry_delay = notice.retry_delay.as_deref().unwrap_or("a few seconds"),
                    "LLM quota exhausted; wait for the suggested delay before retrying"
                );
            }
            error!(%session_id, error = %message, "research session failed");
            None
        }
    }
}

async fn drive_session(
    session_id: &str,
    options: &SessionOptions,
    provider: DynSearchProvider,
    runtime: DynAgentRuntime,
) -> anyhow::Result<ResearchOutcome> {
    let registry = Arc::new(SourceRegistry::new());
    let tools = Arc::new(CitationTools::new(registry.clone(), provider));

    let plan = runtime
        .run(&roster::planning_agent(), &options.query)
        .await
        .context("planning step failed")?;
    debug!(%plan, "plan recorded");

    let queries = derive_search_queries(&plan, &options.query);
    info!(count = queries.len(), "fanning out search queries");

    let search_tools = tools.clone();
    let max_results = options.max_results;
    let batches = run_many(
        queries,
        move |query: String| {
            let tools = search_tools.clone();
            async move { Ok(tools.search_with_citations(&query, max_results).await) }
        },
        options.retry.clone(),
    )
    .await
    .context("search fanout failed")?;

    let registered: u64 = batches
        .iter()
        .filter_map(|batch| batch["total_results"].as_u64())
        .sum();
    info!(registered, "search fanout complete");

    let today = Local::now().date_naive();
    let synthesis_input = format!(
        "{}\n\nPlease use {} citation style for this research.",
        options.query,
        options.style.name().to_uppercase()
    );
    let report = runtime
        .run(&roster::orchestrator_agent(today, options.style), &synthesis_input)
        .await
        .context("synthesis step failed")?;

    let reflection = runtime
        .run(&roster::reflection_agent(), &report)
        .await
        .context("reflection step failed")?;
    debug!(%reflection, "reflection recorded");

    let bibliography = tools.generate_bibliography(options.style);
    let summary = tools.citation_summary();
    let total_sources = registry.len();

    info!(%session_id, total_sources, "research session complete");

    Ok(ResearchOutcome {
        session_id: session_id.to_string(),
        report,
        bibliography,
        summary,
        total_sources,
    })
}

/// Pull numbered search questions out of the plan text; a plan with no
/// usable lines degrades to a single search for the original query.
fn derive_search_queries(plan: &str, fallback: &str) -> Vec<String> {
    let queries: Vec<String> = plan
        .lines()
        .filter(|line| line.trim_start().starts_with(|c: char| c.is_ascii_digit()))
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .take(MAX_FANOUT_QUERIES)
        .collect();

    if queries.is_empty() {
        vec![fallback.to_string()]
    } else {
        queries
    }
}
