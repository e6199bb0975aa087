//! Edition discovery: canonical URL, date, and per-section article links.

use chrono::NaiveDate;
use regex::Regex;

use crate::section::{Section, SectionResult};
use crate::{DispatchError, Result};

/// Path of the well-known current-edition page, relative to the base URL.
pub const WEEKLY_PATH: &str = "/weeklyedition/";

/// Directory slug used when no date can be parsed from the edition URL.
pub const FALLBACK_SLUG: &str = "weekly-edition";

/// One weekly published collection, derived once per run.
#[derive(Debug, Clone)]
pub struct Edition {
    /// Canonical post-redirect edition URL.
    pub url: String,
    /// Publication date, when the URL carries one.
    pub date: Option<NaiveDate>,
    /// Output directory slug: `YYYY-MM-DD` or [`FALLBACK_SLUG`].
    pub directory_slug: String,
    /// Display title, e.g. "Weekly Edition : September 07, 2024".
    pub display_title: String,
}

/// Parse a `YYYY-MM-DD` date out of an edition URL.
pub fn extract_date_from_url(url: &str) -> Result<Option<NaiveDate>> {
    let re = Regex::new(r"/(\d{4}-\d{2}-\d{2})").map_err(|e| DispatchError::HtmlParse(format!("date pattern: {e}")))?;
    let Some(caps) = re.captures(url) else {
        return Ok(None);
    };
    let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Format an edition date for display, e.g. "September 07, 2024".
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Build the [`Edition`] record from its canonical URL.
pub fn edition_from_url(url: &str) -> Result<Edition> {
    let date = extract_date_from_url(url)?;
    let (directory_slug, display_title) = match date {
        Some(d) => (
            d.format("%Y-%m-%d").to_string(),
            format!("Weekly Edition : {}", format_display_date(d)),
        ),
        None => (FALLBACK_SLUG.to_string(), "Weekly Edition".to_string()),
    };

    Ok(Edition { url: url.to_string(), date, directory_slug, display_title })
}

/// Scan the raw edition page text for article links per configured section.
///
/// For each section, `href` attributes whose value is prefixed by the
/// section's slug are collected in first-seen order with duplicates removed.
/// Order matters: feed and navigation ordering must stay deterministic, so
/// a set is not enough. Sections with zero matches are retained with an
/// empty list rather than dropped.
pub fn list_section_article_urls(page_text: &str, sections: &[Section]) -> Result<Vec<SectionResult>> {
    let mut results = Vec::with_capacity(sections.len());

    for section in sections {
        let pattern = format!(r#"href="({}[^"]+)""#, regex::escape(&section.slug));
        let re = Regex::new(&pattern).map_err(|e| DispatchError::HtmlParse(format!("href pattern: {e}")))?;

        let found: Vec<String> = re
            .captures_iter(page_text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect();

        results.push(SectionResult {
            section: section.clone(),
            article_urls: dedup_first_seen(found),
            articles: Vec::new(),
        });
    }

    Ok(results)
}

/// Remove duplicates while preserving first-seen order.
pub fn dedup_first_seen(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_extract_date_from_url() {
        let date = extract_date_from_url("https://www.economist.com/weeklyedition/2024-09-07")
            .unwrap()
            .unwrap();
        assert_eq!(format_display_date(date), "September 07, 2024");
    }

    #[test]
    fn test_extract_date_absent() {
        let date = extract_date_from_url("https://www.economist.com/weeklyedition/").unwrap();
        assert!(date.is_none());
    }

    #[test]
    fn test_edition_with_date() {
        let edition = edition_from_url("https://www.economist.com/weeklyedition/2024-09-07").unwrap();
        assert_eq!(edition.directory_slug, "2024-09-07");
        assert_eq!(edition.display_title, "Weekly Edition : September 07, 2024");
        assert!(edition.date.is_some());
    }

    #[test]
    fn test_edition_fallback() {
        let edition = edition_from_url("https://www.economist.com/weeklyedition/").unwrap();
        assert_eq!(edition.directory_slug, FALLBACK_SLUG);
        assert_eq!(edition.display_title, "Weekly Edition");
        assert!(edition.date.is_none());
    }

    #[rstest]
    #[case(vec!["a", "b", "a", "c", "b"], vec!["a", "b", "c"])]
    #[case(vec![], vec![])]
    #[case(vec!["x", "x", "x"], vec!["x"])]
    fn test_dedup_first_seen(#[case] input: Vec<&str>, #[case] expected: Vec<&str>) {
        let input: Vec<String> = input.into_iter().map(String::from).collect();
        let expected: Vec<String> = expected.into_iter().map(String::from).collect();
        assert_eq!(dedup_first_seen(input), expected);
    }

    #[test]
    fn test_list_section_article_urls() {
        let page = r#"
            <a href="/leaders/2024/09/05/foo">Foo</a>
            <a href="/leaders/2024/09/05/bar">Bar</a>
            <a href="/leaders/2024/09/05/foo">Foo again</a>
            <a href="/business/2024/09/05/baz">Baz</a>
        "#;
        let sections = vec![
            Section::new("Leaders", "/leaders/", true),
            Section::new("Obituary", "/obituary/", true),
        ];

        let results = list_section_article_urls(page, &sections).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].article_urls,
            vec!["/leaders/2024/09/05/foo".to_string(), "/leaders/2024/09/05/bar".to_string()]
        );
        // empty sections are retained, not dropped
        assert_eq!(results[1].section.title, "Obituary");
        assert!(results[1].article_urls.is_empty());
    }
}
