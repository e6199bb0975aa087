//! Static section configuration for the weekly edition.

use crate::article::Article;

/// A named category of the weekly edition with a URL path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Display title, e.g. "Leaders".
    pub title: String,
    /// URL path segment with leading and trailing slashes, e.g. "/leaders/".
    pub slug: String,
    /// Whether articles in this section are sent to the summarizer.
    pub summarize_eligible: bool,
}

impl Section {
    pub fn new(title: &str, slug: &str, summarize_eligible: bool) -> Self {
        Self { title: title.to_string(), slug: slug.to_string(), summarize_eligible }
    }

    /// The on-disk directory name for this section: the slug with leading
    /// and trailing slashes stripped.
    pub fn directory(&self) -> String {
        self.slug.trim_matches('/').to_string()
    }
}

/// A section together with its discovered article URLs and, once loaded,
/// the extracted articles in the same order.
#[derive(Debug, Clone)]
pub struct SectionResult {
    pub section: Section,
    /// Deduplicated URL paths in first-seen order.
    pub article_urls: Vec<String>,
    pub articles: Vec<Article>,
}

/// The full section table of a weekly edition, in publication order.
///
/// The two digest-of-digests sections (the week in brief and the indicator
/// tables) carry no prose worth summarizing and are not summarize-eligible.
pub fn weekly_sections() -> Vec<Section> {
    vec![
        Section::new("The World This Week", "/the-world-this-week/", false),
        Section::new("Leaders", "/leaders/", true),
        Section::new("By Invitation", "/by-invitation/", true),
        Section::new("Briefing", "/briefing/", true),
        Section::new("United States", "/united-states/", true),
        Section::new("The Americas", "/the-americas/", true),
        Section::new("Asia", "/asia/", true),
        Section::new("China", "/china/", true),
        Section::new("Middle East and Africa", "/middle-east-and-africa/", true),
        Section::new("Europe", "/europe/", true),
        Section::new("Britain", "/britain/", true),
        Section::new("International", "/international/", true),
        Section::new("Special Report", "/special-report/", true),
        Section::new("Business", "/business/", true),
        Section::new("Finance and Economics", "/finance-and-economics/", true),
        Section::new("Science and Technology", "/science-and-technology/", true),
        Section::new("Culture", "/culture/", true),
        Section::new("Economic and Financial Indicators", "/economic-and-financial-indicators/", false),
        Section::new("Obituary", "/obituary/", true),
    ]
}
