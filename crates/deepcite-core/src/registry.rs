//! Session-scoped registry of cited sources.
//!
//! Every source a research session touches is appended here exactly once and
//! receives a dense, monotonically increasing citation id starting at 1.
//! Registries are constructed per session and never shared across runs.

use std::sync::Mutex;

use chrono::Local;
use serde::{Deserialize, Serialize};

const DEFAULT_TITLE: &str = "Unknown Title";

/// Partial source description as delivered by a search provider or a manual
/// citation tool call. Any subset of fields may be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub raw_content: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl SourceDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// A registered source. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: u32,
    pub title: String,
    pub url: String,
    pub domain: String,
    pub content: String,
    pub raw_content: String,
    pub published_date: Option<String>,
    pub accessed_date: String,
    pub score: f64,
}

#[derive(Default)]
struct RegistryState {
    counter: u32,
    sources: Vec<SourceRecord>,
}

/// Append-only citation registry. Cheap to share behind an `Arc`; appends
/// from concurrent tool calls serialize on the inner mutex so ids stay
/// unique and monotonic.
#[derive(Default)]
pub struct SourceRegistry {
    state: Mutex<RegistryState>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source and return its citation id.
    ///
    /// Missing fields fall back to defaults and the accessed date is
    /// stamped from the local clock. Malformed URLs degrade the domain to
    /// an empty string rather than failing.
    pub fn add_source(&self, draft: SourceDraft) -> u32 {
        let url = draft.url.unwrap_or_default();
        let domain = derive_domain(&url);
        let accessed_date = Local::now().format("%Y-%m-%d").to_string();

        let mut state = self.state.lock().expect("registry mutex poisoned");
        state.counter += 1;
        let record = SourceRecord {
            id: state.counter,
            title: draft.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            url,
            domain,
            content: draft.content.unwrap_or_default(),
            raw_content: draft.raw_content.unwrap_or_default(),
            published_date: draft.published_date,
            accessed_date,
            score: draft.score.unwrap_or(0.0),
        };
        state.sources.push(record);
        state.counter
    }

    /// All registered sources in registration order.
    pub fn all_sources(&self) -> Vec<SourceRecord> {
        self.state
            .lock()
            .expect("registry mutex poisoned")
            .sources
            .clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("registry mutex poisoned").sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Network-location component of a URL, matching what a bibliography shows
/// as the publishing site. Unparsable or relative URLs degrade to "".
fn derive_domain(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    match url::Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            match parsed.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            }
        }
        Err(_) => String::new(),
    }
}
