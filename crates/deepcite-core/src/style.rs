//! Citation styles and bibliography rendering.
//!
//! Styles are resolved from user input once, at the API boundary; everything
//! below the [`CitationStyle`] enum is pure string formatting over
//! [`SourceRecord`] values.

use std::fmt;

use chrono::NaiveDate;

use crate::error::CiteError;
use crate::registry::SourceRecord;

const NO_SOURCES: &str = "No sources cited.";

/// A named citation formatting convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationStyle {
    Apa,
    Mla,
    Chicago,
    Web,
}

impl CitationStyle {
    pub const ALL: [CitationStyle; 4] = [Self::Apa, Self::Mla, Self::Chicago, Self::Web];

    /// Case-insensitive lookup. Unrecognised names fall back to the plain
    /// web format rather than erroring.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "apa" => Self::Apa,
            "mla" => Self::Mla,
            "chicago" => Self::Chicago,
            _ => Self::Web,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Apa => "apa",
            Self::Mla => "mla",
            Self::Chicago => "chicago",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render one source in the given style.
pub fn format_citation(source: &SourceRecord, style: CitationStyle) -> String {
    match style {
        CitationStyle::Apa => format_apa(source),
        CitationStyle::Mla => format_mla(source),
        CitationStyle::Chicago => format_chicago(source),
        CitationStyle::Web => format_web(source),
    }
}

fn format_apa(source: &SourceRecord) -> String {
    let title = normalize_whitespace(&source.title);
    let date_part = match source.published_date.as_deref() {
        Some(published) if !published.is_empty() && published != "n.d." => {
            format!("({published})")
        }
        _ => "(n.d.)".to_string(),
    };
    format!(
        "{title}. {date_part}. {}. Retrieved {}, from {}",
        source.domain, source.accessed_date, source.url
    )
}

fn format_mla(source: &SourceRecord) -> String {
    // MLA wants "DD Mon YYYY"; an accessed date that does not parse as
    // YYYY-MM-DD passes through unchanged.
    let accessed = match NaiveDate::parse_from_str(&source.accessed_date, "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %Y").to_string(),
        Err(_) => source.accessed_date.clone(),
    };
    format!(
        "\"{}.\" {}, Web. {accessed}. <{}>.",
        source.title, source.domain, source.url
    )
}

fn format_chicago(source: &SourceRecord) -> String {
    format!(
        "\"{}.\" {}. Accessed {}. {}.",
        source.title, source.domain, source.accessed_date, source.url
    )
}

fn format_web(source: &SourceRecord) -> String {
    format!(
        "{}. {}. Accessed: {}. URL: {}",
        source.title, source.domain, source.accessed_date, source.url
    )
}

/// Render the full bibliography: a References header followed by one entry
/// per source in registration order.
pub fn render_bibliography(sources: &[SourceRecord], style: CitationStyle) -> String {
    if sources.is_empty() {
        return NO_SOURCES.to_string();
    }

    let mut bibliography = String::from("\n## References\n\n");
    for source in sources {
        bibliography.push_str(&format!(
            "[{}] {}\n\n",
            source.id,
            format_citation(source, style)
        ));
    }
    bibliography
}

/// Bracketed inline citation marker, e.g. `[1,4,2]`. Caller order is
/// preserved and ids are not validated against any registry.
pub fn format_inline(ids: &[u32]) -> String {
    if ids.is_empty() {
        return String::new();
    }
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("[{joined}]")
}

/// Parse a comma-delimited id list as supplied by an agent tool call.
pub fn parse_source_ids(input: &str) -> Result<Vec<u32>, CiteError> {
    input
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<u32>()
                .map_err(|_| CiteError::invalid_source_ids(input))
        })
        .collect()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(accessed: &str, published: Option<&str>) -> SourceRecord {
        SourceRecord {
            id: 1,
            title: "Remote Work  and \n Productivity".to_string(),
            url: "https://example.com/a".to_string(),
            domain: "example.com".to_string(),
            content: String::new(),
            raw_content: String::new(),
            published_date: published.map(str::to_string),
            accessed_date: accessed.to_string(),
            score: 0.0,
        }
    }

    #[test]
    fn style_parsing_is_case_insensitive_with_web_fallback() {
        assert_eq!(CitationStyle::parse("APA"), CitationStyle::Apa);
        assert_eq!(CitationStyle::parse(" chicago "), CitationStyle::Chicago);
        assert_eq!(CitationStyle::parse("harvard"), CitationStyle::Web);
        assert_eq!(CitationStyle::parse(""), CitationStyle::Web);
    }

    #[test]
    fn apa_normalizes_title_whitespace_and_defaults_date() {
        let citation = format_citation(&sample("2024-03-05", None), CitationStyle::Apa);
        assert_eq!(
            citation,
            "Remote Work and Productivity. (n.d.). example.com. \
             Retrieved 2024-03-05, from https://example.com/a"
        );

        let dated = format_citation(&sample("2024-03-05", Some("2023-11-01")), CitationStyle::Apa);
        assert!(dated.contains("(2023-11-01)"));
    }

    #[test]
    fn mla_reformats_accessed_date() {
        let citation = format_citation(&sample("2024-03-05", None), CitationStyle::Mla);
        assert!(citation.contains("Web. 05 Mar 2024."), "{citation}");
        assert!(citation.ends_with("<https://example.com/a>."));
    }

    #[test]
    fn mla_passes_unparsable_accessed_date_through() {
        let citation = format_citation(&sample("last Tuesday", None), CitationStyle::Mla);
        assert!(citation.contains("Web. last Tuesday."), "{citation}");
    }

    #[test]
    fn chicago_and_web_formats() {
        let source = sample("2024-03-05", None);
        assert_eq!(
            format_citation(&source, CitationStyle::Chicago),
            "\"Remote Work  and \n Productivity.\" example.com. \
             Accessed 2024-03-05. https://example.com/a."
        );
        assert_eq!(
            format_citation(&source, CitationStyle::Web),
            "Remote Work  and \n Productivity. example.com. \
             Accessed: 2024-03-05. URL: https://example.com/a"
        );
    }

    #[test]
    fn bibliography_empty_and_ordered() {
        assert_eq!(render_bibliography(&[], CitationStyle::Apa), "No sources cited.");

        let mut first = sample("2024-03-05", None);
        first.id = 1;
        let mut second = sample("2024-03-05", None);
        second.id = 2;
        let text = render_bibliography(&[first, second], CitationStyle::Web);
        assert!(text.starts_with("\n## References\n\n"));
        assert!(text.find("[1]").unwrap() < text.find("[2]").unwrap());
    }

    #[test]
    fn unknown_style_matches_web_byte_for_byte() {
        let sources = vec![sample("2024-03-05", None)];
        assert_eq!(
            render_bibliography(&sources, CitationStyle::parse("nonsense")),
            render_bibliography(&sources, CitationStyle::Web)
        );
    }

    #[test]
    fn inline_citation_preserves_order() {
        assert_eq!(format_inline(&[]), "");
        assert_eq!(format_inline(&[3, 1, 2]), "[3,1,2]");
    }

    #[test]
    fn source_id_parsing() {
        assert_eq!(parse_source_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            parse_source_ids("1,two,3"),
            Err(CiteError::InvalidSourceIds { .. })
        ));
    }
}
