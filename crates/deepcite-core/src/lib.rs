//! DeepCite core primitives.
//!
//! This crate provides the citation registry, bibliography rendering, the
//! retrying search fanout, and the collaborator contracts (web search,
//! quota diagnostics) used by the research session runner.

mod config;
mod error;
mod fanout;
mod quota;
mod registry;
mod report;
mod search;
mod style;
mod telemetry;

pub use config::Config;
pub use error::CiteError;
pub use fanout::{run_many, FanoutError, RetryPolicy};
pub use quota::{detect_quota_exhaustion, QuotaNotice};
pub use registry::{SourceDraft, SourceRecord, SourceRegistry};
pub use report::source_summary;
pub use search::{
    DynSearchProvider, SearchProvider, SearchResult, StubSearchProvider, TavilyClient,
};
pub use style::{
    format_citation, format_inline, parse_source_ids, render_bibliography, CitationStyle,
};
pub use telemetry::{init_telemetry, TelemetryOptions};
