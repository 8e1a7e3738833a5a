use deepcite_core::{
    format_citation, render_bibliography, source_summary, CitationStyle, SourceDraft,
    SourceRegistry,
};

#[test]
fn registered_sources_flow_through_formatting_and_reporting() {
    let registry = SourceRegistry::new();

    let first = registry.add_source(SourceDraft::new(
        "Remote work and productivity",
        "https://example.com/a",
    ));
    let second = registry.add_source(SourceDraft {
        title: Some("Hybrid offices".to_string()),
        url: Some("https://example.com/b".to_string()),
        published_date: Some("2024-01-15".to_string()),
        ..SourceDraft::default()
    });
    let third = registry.add_source(SourceDraft::new("Labour stats", "https://stats.gov/q1"));

    assert_eq!((first, second, third), (1, 2, 3));

    let sources = registry.all_sources();
    assert!(sources.iter().all(|s| !s.accessed_date.is_empty()));
    assert_eq!(sources[0].domain, "example.com");
    assert_eq!(sources[2].domain, "stats.gov");

    let apa = format_citation(&sources[1], CitationStyle::Apa);
    assert!(apa.contains("(2024-01-15)"), "{apa}");

    let bibliography = render_bibliography(&sources, CitationStyle::parse("APA"));
    assert!(bibliography.starts_with("\n## References\n\n"));
    assert!(bibliography.contains("[1] "));
    assert!(bibliography.contains("[3] "));

    let summary = source_summary(&sources);
    assert!(summary.contains("Total sources: 3"));
    assert!(summary.contains("Unique domains: 2"));
    assert!(summary.find("example.com: 2 sources").unwrap() < summary.find("stats.gov: 1 sources").unwrap());
}
