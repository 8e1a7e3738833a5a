//! Callable tool surface bridging the agent runtime to the citation registry.
//!
//! Tool calls never propagate errors across the runtime boundary: provider
//! failures come back as an error-shaped value plus a logged line, malformed
//! inputs as a descriptive placeholder string.

use std::sync::Arc;

use deepcite_core::{
    format_inline, parse_source_ids, render_bibliography, source_summary, CitationStyle,
    DynSearchProvider, SearchResult, SourceDraft, SourceRegistry,
};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

pub struct CitationTools {
    registry: Arc<SourceRegistry>,
    provider: DynSearchProvider,
}

impl CitationTools {
    pub fn new(registry: Arc<SourceRegistry>, provider: DynSearchProvider) -> Self {
        Self { registry, provider }
    }

    pub fn registry(&self) -> &Arc<SourceRegistry> {
        &self.registry
    }

    /// Search the web and register a citation for every result.
    ///
    /// Provider errors are recovered here: the caller receives an empty
    /// result set with an `error` field instead of a failure.
    pub async fn search_with_citations(&self, query: &str, max_results: usize) -> Value {
        info!(%query, max_results, "searching web");

        match self.provider.search(query, max_results).await {
            Ok(results) => {
                let cited: Vec<Value> = results
                    .into_iter()
                    .map(|result| self.register_result(result))
                    .collect();
                info!(total = cited.len(), "search complete, citations registered");
                json!({
                    "query": query,
                    "total_results": cited.len(),
                    "results": cited,
                })
            }
            Err(err) => {
                warn!(%query, error = %err, "web search failed, returning empty result set");
                json!({
                    "query": query,
                    "total_results": 0,
                    "results": [],
                    "error": err.to_string(),
                })
            }
        }
    }

    fn register_result(&self, result: SearchResult) -> Value {
        let draft = SourceDraft {
            title: result.title.clone(),
            url: result.url.clone(),
            content: result.content.clone(),
            raw_content: result.raw_content.clone(),
            published_date: result.published_date.clone(),
            score: result.score,
        };
        let citation_id = self.registry.add_source(draft);

        let mut entry = match serde_json::to_value(&result) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        entry.insert("citation_id".to_string(), json!(citation_id));
        Value::Object(entry)
    }

    pub fn add_manual_citation(
        &self,
        title: &str,
        url: &str,
        content: &str,
        published_date: Option<&str>,
    ) -> String {
        let id = self.registry.add_source(SourceDraft {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            content: (!content.is_empty()).then(|| content.to_string()),
            published_date: published_date.map(str::to_string),
            ..SourceDraft::default()
        });
        format!("Added citation [{id}]: {title}")
    }

    /// Inline citation marker for a comma-separated id list. Malformed
    /// input yields a placeholder string, never an error.
    pub fn inline_citation(&self, source_ids: &str) -> String {
        match parse_source_ids(source_ids) {
            Ok(ids) => format_inline(&ids),
            Err(err) => {
                warn!(error = %err, "rejecting malformed inline citation request");
                format!("[Error: invalid source IDs: {source_ids}]")
            }
        }
    }

    pub fn generate_bibliography(&self, style: CitationStyle) -> String {
        render_bibliography(&self.registry.all_sources(), style)
    }

    pub fn citation_summary(&self) -> String {
        source_summary(&self.registry.all_sources())
    }

    pub fn log_status(&self, agent: &str, message: &str) -> String {
        info!(target: "deepcite::status", agent, "{message}");
        format!("Logged: {message}")
    }
}
