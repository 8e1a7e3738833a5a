//! Best-effort recognition of LLM quota/rate-limit failures.
//!
//! Collaborator errors arrive as free text that sometimes wraps a structured
//! JSON body. This adapter is deliberately narrow: it recognises the
//! 429-plus-quota shape, digs out a retry-delay hint when one is present,
//! and degrades to `None` on anything else.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static QUOTA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b429\b").expect("invalid quota status regex"));

/// Operator guidance extracted from a quota-exhaustion error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaNotice {
    pub retry_delay: Option<String>,
}

/// Inspect a collaborator error message for the quota-exhaustion shape.
///
/// Matches when the text carries a 429 status code and a quota keyword.
/// When the message embeds a JSON error body, the `RetryInfo.retryDelay`
/// detail is surfaced; absence of that structure is not an error.
pub fn detect_quota_exhaustion(message: &str) -> Option<QuotaNotice> {
    if !QUOTA_PATTERN.is_match(message) || !message.to_lowercase().contains("quota") {
        return None;
    }

    Some(QuotaNotice {
        retry_delay: extract_retry_delay(message),
    })
}

fn extract_retry_delay(message: &str) -> Option<String> {
    let start = message.find('{')?;
    let body: Value = serde_json::from_str(message[start..].trim()).ok()?;

    let details = body.get("error")?.get("details")?.as_array()?;
    details.iter().find_map(|detail| {
        let type_tag = detail.get("@type")?.as_str()?;
        if !type_tag.contains("RetryInfo") {
            return None;
        }
        detail
            .get("retryDelay")
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}
