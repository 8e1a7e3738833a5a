//! Aggregate statistics over the citation registry.

use std::fmt::Write as _;

use crate::registry::SourceRecord;

const NO_SOURCES: &str = "No sources found.";

/// Summarise registered sources: totals plus a per-domain distribution
/// sorted by descending count. Ties keep the order in which domains were
/// first encountered.
pub fn source_summary(sources: &[SourceRecord]) -> String {
    if sources.is_empty() {
        return NO_SOURCES.to_string();
    }

    let mut domains: Vec<(String, usize)> = Vec::new();
    for source in sources {
        match domains.iter_mut().find(|(domain, _)| *domain == source.domain) {
            Some((_, count)) => *count += 1,
            None => domains.push((source.domain.clone(), 1)),
        }
    }
    domains.sort_by(|a, b| b.1.cmp(&a.1));

    let mut summary = String::from("\n## Source Summary\n\n");
    let _ = writeln!(summary, "Total sources: {}", sources.len());
    let _ = writeln!(summary, "Unique domains: {}", domains.len());
    summary.push_str("Domain distribution:\n");
    for (domain, count) in &domains {
        let _ = writeln!(summary, "  - {domain}: {count} sources");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{SourceDraft, SourceRegistry};

    fn sources_from(urls: &[&str]) -> Vec<SourceRecord> {
        let registry = SourceRegistry::new();
        for url in urls {
            registry.add_source(SourceDraft::new("t", *url));
        }
        registry.all_sources()
    }

    #[test]
    fn empty_registry_summary() {
        assert_eq!(source_summary(&[]), "No sources found.");
    }

    #[test]
    fn counts_domains_descending_with_stable_ties() {
        let sources = sources_from(&[
            "https://a.dev/1",
            "https://b.dev/1",
            "https://a.dev/2",
            "https://a.dev/3",
        ]);
        let summary = source_summary(&sources);

        assert!(summary.contains("Total sources: 4"));
        assert!(summary.contains("Unique domains: 2"));
        assert!(summary.find("a.dev: 3 sources").unwrap() < summary.find("b.dev: 1 sources").unwrap());
    }

    #[test]
    fn tied_domains_keep_first_encounter_order() {
        let sources = sources_from(&["https://b.dev/1", "https://a.dev/1"]);
        let summary = source_summary(&sources);
        assert!(summary.find("b.dev").unwrap() < summary.find("a.dev").unwrap());
    }
}
