//! Extracted article record and its content blocks.

/// One semantic unit of article body, in document order.
///
/// Each variant carries a ready-to-render HTML fragment, decoupling the
/// extractor from the renderer's formatting choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Sanitized inner HTML of a body paragraph.
    Paragraph(String),
    /// An `h2` heading wrapped in a section-heading marker span.
    SectionHeading(String),
    /// A rendered `<img>` tag recovered from a figure.
    Image(String),
}

impl ContentBlock {
    /// The raw HTML fragment this block carries.
    pub fn html(&self) -> &str {
        match self {
            ContentBlock::Paragraph(h) | ContentBlock::SectionHeading(h) | ContentBlock::Image(h) => h,
        }
    }
}

/// A normalized article, created once per source URL.
///
/// Never mutated after extraction except to attach summary/relevance and
/// the pagination counters, which the caller fills in once the section's
/// URL list is known.
#[derive(Debug, Clone)]
pub struct Article {
    /// Title as an HTML fragment; may contain inline markup.
    pub title: String,
    /// Subtitle, possibly empty.
    pub subtitle: String,
    /// Ordered content blocks mirroring document order in the source.
    pub content: Vec<ContentBlock>,
    /// Rendered lead `<img>` tag, when the page carried one.
    pub lead_image_html: Option<String>,
    /// Section blurb with its comment-marked prefix stripped.
    pub section_blurb: Option<String>,
    /// Canonical post-redirect URL.
    pub url: String,
    /// Last URL path segment plus `.html`.
    ///
    /// Must be unique within `directory`; collisions are not deduplicated
    /// and the last write wins.
    pub file_name: String,
    /// Owning section slug without leading/trailing slashes.
    pub directory: String,
    /// Embedded audio asset URL, when present.
    pub audio_url: Option<String>,
    /// LLM-derived summary sentences.
    pub summary: Option<Vec<String>>,
    /// LLM-derived relevance sentence.
    pub relevance: Option<String>,
    /// 1-based index within the owning section.
    pub position_in_section: usize,
    /// Article count of the owning section.
    pub total_in_section: usize,
}

impl Article {
    /// Concatenation of all content block fragments, block order preserved.
    pub fn content_html(&self) -> String {
        self.content.iter().map(|b| b.html()).collect::<Vec<_>>().join("\n")
    }
}

/// Derive the output file name from a canonical URL: the last path segment
/// plus a literal `.html` suffix.
pub fn file_name_for_url(url: &str) -> String {
    let segment = url.trim_end_matches('/').rsplit('/').next().unwrap_or(url);
    format!("{}.html", segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_for_url() {
        assert_eq!(
            file_name_for_url("https://www.economist.com/leaders/2024/09/05/some-story"),
            "some-story.html"
        );
        assert_eq!(file_name_for_url("https://example.com/a/b/"), "b.html");
    }

    #[test]
    fn test_content_html_preserves_order() {
        let article = Article {
            title: "T".to_string(),
            subtitle: String::new(),
            content: vec![
                ContentBlock::Image("<img class='parsed_image' src='x.jpg'/>".to_string()),
                ContentBlock::Paragraph("first".to_string()),
                ContentBlock::SectionHeading("<span class='section_heading'>H</span>".to_string()),
                ContentBlock::Paragraph("second".to_string()),
            ],
            lead_image_html: None,
            section_blurb: None,
            url: String::new(),
            file_name: String::new(),
            directory: String::new(),
            audio_url: None,
            summary: None,
            relevance: None,
            position_in_section: 1,
            total_in_section: 1,
        };

        let html = article.content_html();
        let img = html.find("parsed_image").unwrap();
        let first = html.find("first").unwrap();
        let heading = html.find("section_heading").unwrap();
        let second = html.find("second").unwrap();
        assert!(img < first && first < heading && heading < second);
    }
}
