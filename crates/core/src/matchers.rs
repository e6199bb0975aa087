//! Versioned markup-shape heuristics.
//!
//! The site's class names and body identifiers churn across revisions, so
//! every semantic role is located through a table of candidate matchers
//! tried in order. A future markup change is a data change here, not a code
//! change in the extractor.

use scraper::ElementRef;

/// Candidate matchers per semantic role, tried in order.
#[derive(Debug, Clone)]
pub struct RoleMatchers {
    /// Values of the `data-body-id` attribute that mark the article root.
    pub body_ids: Vec<String>,
    /// Class-name fragments identifying the title heading.
    pub title_fragments: Vec<String>,
    /// Class-name fragments identifying the subtitle heading.
    pub subtitle_fragments: Vec<String>,
    /// Class-name fragments identifying lead-image containers. Both shapes
    /// are probed; the site renders lead images differently in at least one
    /// section layout.
    pub lead_image_fragments: Vec<String>,
    /// Class-name fragments identifying the section blurb span.
    pub blurb_fragments: Vec<String>,
    /// Values of the `data-component` attribute that mark body paragraphs.
    pub paragraph_marks: Vec<String>,
}

impl Default for RoleMatchers {
    fn default() -> Self {
        Self {
            body_ids: to_strings(&["cp2", "article-body"]),
            title_fragments: to_strings(&["article__headline", "headline"]),
            subtitle_fragments: to_strings(&["article__subheadline", "rubric"]),
            lead_image_fragments: to_strings(&["article__lead-image", "article__leader"]),
            blurb_fragments: to_strings(&["article__section-blurb", "section-blurb"]),
            paragraph_marks: to_strings(&["paragraph", "article-paragraph"]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Substring match of an element's `class` attribute against candidate
/// fragments, in order.
pub fn class_contains(element: &ElementRef<'_>, fragments: &[String]) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| fragments.iter().any(|f| class.contains(f.as_str())))
        .unwrap_or(false)
}

/// Exact match of an attribute value against candidate values.
pub fn attr_matches(element: &ElementRef<'_>, attr: &str, values: &[String]) -> bool {
    element
        .value()
        .attr(attr)
        .map(|v| values.iter().any(|candidate| candidate == v))
        .unwrap_or(false)
}
