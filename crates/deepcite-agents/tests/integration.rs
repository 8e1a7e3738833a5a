use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use deepcite_agents::{
    run_research_session, AgentDefinition, AgentRuntime, ScriptedRuntime, SessionOptions,
};
use deepcite_core::{CitationStyle, RetryPolicy, SearchResult, StubSearchProvider};

fn seeded_provider(topic: &str) -> StubSearchProvider {
    let provider = StubSearchProvider::new();
    for (suffix, url) in [
        ("overview", "https://example.com/overview"),
        ("recent developments", "https://news.example.org/latest"),
        ("expert analysis", "https://example.com/analysis"),
    ] {
        provider.seed(
            format!("{topic} {suffix}"),
            vec![SearchResult {
                title: Some(format!("{topic} {suffix}")),
                url: Some(url.to_string()),
                content: Some("snippet".to_string()),
                score: Some(0.8),
                ..SearchResult::default()
            }],
        );
    }
    provider
}

fn quick_options(query: &str) -> SessionOptions {
    SessionOptions::new(query)
        .with_style(CitationStyle::Apa)
        .with_retry(
            RetryPolicy::default()
                .with_delay(Duration::from_millis(5))
                .with_deadline(Some(Duration::from_secs(10))),
        )
}

#[tokio::test]
async fn offline_session_produces_cited_report() {
    let runtime = Arc::new(ScriptedRuntime::new().with_latency(Duration::from_millis(1)));
    let provider = Arc::new(seeded_provider("remote work"));

    let outcome = run_research_session(quick_options("remote work"), provider, runtime)
        .await
        .expect("offline session should succeed");

    assert_eq!(outcome.total_sources, 3);
    assert!(outcome.bibliography.contains("\n## References\n\n"));
    assert!(outcome.bibliography.contains("[1] "));
    assert!(outcome.summary.contains("Total sources: 3"));
    assert!(outcome.summary.contains("Unique domains: 2"));
    assert!(!outcome.report.is_empty());
    assert!(outcome.session_id.starts_with("session-"));
}

#[tokio::test]
async fn unseeded_queries_yield_empty_bibliography_not_failure() {
    let runtime = Arc::new(ScriptedRuntime::new().with_latency(Duration::from_millis(1)));
    let provider = Arc::new(StubSearchProvider::new());

    let outcome = run_research_session(quick_options("unknown topic"), provider, runtime)
        .await
        .expect("empty search results are not a failure");

    assert_eq!(outcome.total_sources, 0);
    assert_eq!(outcome.bibliography, "No sources cited.");
    assert_eq!(outcome.summary, "No sources found.");
}

struct QuotaExhaustedRuntime;

#[async_trait]
impl AgentRuntime for QuotaExhaustedRuntime {
    async fn run(&self, _agent: &AgentDefinition, _input: &str) -> anyhow::Result<String> {
        Err(anyhow!(
            "HTTP 429: quota exceeded {{\"error\":{{\"details\":[{{\"@type\":\
             \"type.googleapis.com/google.rpc.RetryInfo\",\"retryDelay\":\"21s\"}}]}}}}"
        ))
    }
}

#[tokio::test]
async fn runtime_failure_is_absorbed_and_reported_by_value() {
    let provider = Arc::new(StubSearchProvider::new());
    let outcome = run_research_session(
        quick_options("anything").with_session_id("failing-session"),
        provider,
        Arc::new(QuotaExhaustedRuntime),
    )
    .await;

    assert!(outcome.is_none());
}
