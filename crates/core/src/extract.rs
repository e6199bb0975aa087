//! Article extraction and normalization.
//!
//! Given one article page's raw markup, produce a normalized [`Article`]:
//! locate the body root, pull title/subtitle/lead images/blurb, walk the
//! body in document order collecting paragraph, heading, and image blocks,
//! and detect an embedded audio asset. Required nodes (body root, title)
//! are fatal for the whole run when absent; everything else degrades to
//! empty or optional values.

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::article::{Article, ContentBlock, file_name_for_url};
use crate::matchers::{RoleMatchers, attr_matches, class_contains};
use crate::sanitize::{SanitizeConfig, sanitize_fragment};
use crate::section::Section;
use crate::{DispatchError, Result};

fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| DispatchError::HtmlParse(format!("invalid selector {s}: {e}")))
}

/// Extract a normalized article from one page's raw markup.
///
/// `canonical_url` is the post-redirect URL the page was fetched from; it
/// drives the derived file name. Pagination counters are left at zero for
/// the caller to fill in once the section's URL list is known.
pub fn extract_article(
    html: &str, section: &Section, canonical_url: &str, matchers: &RoleMatchers, sanitize_config: &SanitizeConfig,
) -> Result<Article> {
    let doc = Html::parse_document(html);

    let root = find_article_root(&doc, matchers)?;
    let title = find_title(&doc, matchers)?;
    let subtitle = find_subtitle(&doc, matchers);
    let section_blurb = find_section_blurb(&doc, matchers)?;
    let lead_images = find_lead_images(&doc, matchers)?;
    let audio_url = find_audio_url(&doc)?;

    let mut content: Vec<ContentBlock> = lead_images.iter().cloned().map(ContentBlock::Image).collect();
    content.extend(collect_body_blocks(root, matchers, sanitize_config)?);

    Ok(Article {
        title,
        subtitle,
        content,
        lead_image_html: lead_images.first().cloned(),
        section_blurb,
        url: canonical_url.to_string(),
        file_name: file_name_for_url(canonical_url),
        directory: section.directory(),
        audio_url,
        summary: None,
        relevance: None,
        position_in_section: 0,
        total_in_section: 0,
    })
}

/// Locate the article body root: a `section` whose body identifier matches
/// one of the known candidates. The identifier has changed across site
/// revisions, hence the enumeration.
fn find_article_root<'a>(doc: &'a Html, matchers: &RoleMatchers) -> Result<ElementRef<'a>> {
    let sel = selector("section[data-body-id]")?;
    doc.select(&sel)
        .find(|el| attr_matches(el, "data-body-id", &matchers.body_ids))
        .ok_or(DispatchError::MissingNode { role: "article body" })
}

fn find_title(doc: &Html, matchers: &RoleMatchers) -> Result<String> {
    let sel = selector("h1")?;
    doc.select(&sel)
        .find(|el| class_contains(el, &matchers.title_fragments))
        .map(|el| el.inner_html().trim().to_string())
        .ok_or(DispatchError::MissingNode { role: "title" })
}

fn find_subtitle(doc: &Html, matchers: &RoleMatchers) -> String {
    let Ok(sel) = selector("h2") else { return String::new() };
    doc.select(&sel)
        .find(|el| class_contains(el, &matchers.subtitle_fragments))
        .map(|el| el.inner_html().trim().to_string())
        .unwrap_or_default()
}

/// Pull the section blurb, stripping the HTML-comment-marked prefix the
/// site renders in front of it.
fn find_section_blurb(doc: &Html, matchers: &RoleMatchers) -> Result<Option<String>> {
    let sel = selector("span")?;
    let Some(span) = doc.select(&sel).find(|el| class_contains(el, &matchers.blurb_fragments)) else {
        return Ok(None);
    };

    let inner = span.inner_html();
    let re = Regex::new(r"(?s)<!--\s*-->\s*(.*)")
        .map_err(|e| DispatchError::HtmlParse(format!("blurb pattern: {e}")))?;
    let blurb = match re.captures(&inner) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or("").trim().to_string(),
        None => inner.trim().to_string(),
    };

    Ok(Some(blurb))
}

/// Probe the lead-image container shapes in order and pull each container's
/// first figure image into a rendered `<img>` fragment.
fn find_lead_images(doc: &Html, matchers: &RoleMatchers) -> Result<Vec<String>> {
    let container_sel = selector("[class]")?;
    let img_sel = selector("figure img")?;

    let mut images = Vec::new();
    for fragment in &matchers.lead_image_fragments {
        let candidates = std::slice::from_ref(fragment);
        let Some(container) = doc.select(&container_sel).find(|el| class_contains(el, candidates)) else {
            continue;
        };
        if let Some(src) = container.select(&img_sel).find_map(|img| img.value().attr("src")) {
            images.push(render_image(src));
        }
    }

    Ok(images)
}

fn find_audio_url(doc: &Html) -> Result<Option<String>> {
    let sel = selector("audio")?;
    Ok(doc.select(&sel).find_map(|el| el.value().attr("src")).map(|s| s.to_string()))
}

/// Collect marked paragraphs, `h2` headings, and figures within the body
/// root in document order. `aside` subtrees (sidebars) are excluded
/// entirely.
fn collect_body_blocks(
    root: ElementRef<'_>, matchers: &RoleMatchers, sanitize_config: &SanitizeConfig,
) -> Result<Vec<ContentBlock>> {
    let img_sel = selector("img")?;
    let mut blocks = Vec::new();

    for node in root.descendants().skip(1) {
        if !matches!(node.value(), Node::Element(_)) {
            continue;
        }
        let Some(el) = ElementRef::wrap(node) else { continue };
        if inside_aside(&el) {
            continue;
        }

        match el.value().name() {
            "p" if attr_matches(&el, "data-component", &matchers.paragraph_marks) => {
                blocks.push(ContentBlock::Paragraph(sanitize_fragment(&el.inner_html(), sanitize_config)));
            }
            "h2" => {
                blocks.push(ContentBlock::SectionHeading(format!(
                    "<span class='section_heading'>{}</span>",
                    el.inner_html().trim()
                )));
            }
            "figure" => {
                if let Some(src) = el.select(&img_sel).find_map(|img| img.value().attr("src")) {
                    blocks.push(ContentBlock::Image(render_image(src)));
                }
            }
            _ => {}
        }
    }

    Ok(blocks)
}

fn inside_aside(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|el| el.name() == "aside")
            .unwrap_or(false)
    })
}

fn render_image(src: &str) -> String {
    format!("<img class='parsed_image' src='{}'/>", src)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"
        <!DOCTYPE html>
        <html>
        <body>
            <span class="article__section-blurb-x2"><!-- -->A weekly look at power</span>
            <h1 class="css-4 article__headline-v3">The <i>quiet</i> revolution</h1>
            <h2 class="article__subheadline">How it happened</h2>
            <div class="article__lead-image pad">
                <figure><img src="https://cdn.example.com/lead.jpg" alt=""></figure>
            </div>
            <section data-body-id="cp2">
                <p data-component="paragraph">First <span class="dc">p</span>aragraph.</p>
                <aside class="related"><p data-component="paragraph">Sidebar junk</p></aside>
                <h2>Part two</h2>
                <p data-component="article-paragraph">Second paragraph with <a href="/x">a link</a>.</p>
                <figure><img src="https://cdn.example.com/chart.png"></figure>
                <figure><figcaption>no image here</figcaption></figure>
            </section>
            <audio src="https://cdn.example.com/story.mp3"></audio>
        </body>
        </html>
    "#;

    fn leaders() -> Section {
        Section::new("Leaders", "/leaders/", true)
    }

    fn extract(html: &str) -> Result<Article> {
        extract_article(
            html,
            &leaders(),
            "https://www.economist.com/leaders/2024/09/05/quiet-revolution",
            &RoleMatchers::default(),
            &SanitizeConfig::default(),
        )
    }

    #[test]
    fn test_extract_full_page() {
        let article = extract(SAMPLE_PAGE).unwrap();

        assert_eq!(article.title, "The <i>quiet</i> revolution");
        assert_eq!(article.subtitle, "How it happened");
        assert_eq!(article.section_blurb.as_deref(), Some("A weekly look at power"));
        assert_eq!(article.audio_url.as_deref(), Some("https://cdn.example.com/story.mp3"));
        assert_eq!(article.file_name, "quiet-revolution.html");
        assert_eq!(article.directory, "leaders");
        assert!(article.lead_image_html.as_deref().unwrap().contains("lead.jpg"));
    }

    #[test]
    fn test_block_order_and_shapes() {
        let article = extract(SAMPLE_PAGE).unwrap();

        // lead image first, then paragraphs/heading/figure in document order;
        // the imageless figure emits nothing
        let kinds: Vec<&str> = article
            .content
            .iter()
            .map(|b| match b {
                ContentBlock::Paragraph(_) => "p",
                ContentBlock::SectionHeading(_) => "h",
                ContentBlock::Image(_) => "img",
            })
            .collect();
        assert_eq!(kinds, vec!["img", "p", "h", "p", "img"]);

        assert_eq!(article.content[1].html(), "First paragraph.");
        assert_eq!(
            article.content[2].html(),
            "<span class='section_heading'>Part two</span>"
        );
        assert!(article.content[3].html().contains(r#"<a href="/x">a link</a>"#));
        assert_eq!(
            article.content[4].html(),
            "<img class='parsed_image' src='https://cdn.example.com/chart.png'/>"
        );
    }

    #[test]
    fn test_asides_excluded() {
        let article = extract(SAMPLE_PAGE).unwrap();
        assert!(!article.content_html().contains("Sidebar junk"));
    }

    #[test]
    fn test_missing_article_root_is_fatal() {
        let html = r#"<html><body><h1 class="headline">T</h1><p>no body section</p></body></html>"#;
        let result = extract(html);
        assert!(matches!(result, Err(DispatchError::MissingNode { role: "article body" })));
    }

    #[test]
    fn test_unknown_body_id_is_fatal() {
        let html = r#"
            <html><body>
            <h1 class="headline">T</h1>
            <section data-body-id="something-new"><p data-component="paragraph">x</p></section>
            </body></html>
        "#;
        let result = extract(html);
        assert!(matches!(result, Err(DispatchError::MissingNode { role: "article body" })));
    }

    #[test]
    fn test_alternate_body_id_accepted() {
        let html = r#"
            <html><body>
            <h1 class="headline">T</h1>
            <section data-body-id="article-body"><p data-component="paragraph">x</p></section>
            </body></html>
        "#;
        let article = extract(html).unwrap();
        assert_eq!(article.content.len(), 1);
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let html = r#"
            <html><body>
            <section data-body-id="cp2"><p data-component="paragraph">x</p></section>
            </body></html>
        "#;
        let result = extract(html);
        assert!(matches!(result, Err(DispatchError::MissingNode { role: "title" })));
    }

    #[test]
    fn test_optional_fields_degrade_to_empty() {
        let html = r#"
            <html><body>
            <h1 class="headline">Bare</h1>
            <section data-body-id="cp2"><p data-component="paragraph">only text</p></section>
            </body></html>
        "#;
        let article = extract(html).unwrap();
        assert_eq!(article.subtitle, "");
        assert!(article.section_blurb.is_none());
        assert!(article.lead_image_html.is_none());
        assert!(article.audio_url.is_none());
    }

    #[test]
    fn test_blurb_without_comment_prefix() {
        let html = r#"
            <html><body>
            <span class="section-blurb">No comment marker</span>
            <h1 class="headline">T</h1>
            <section data-body-id="cp2"></section>
            </body></html>
        "#;
        let article = extract(html).unwrap();
        assert_eq!(article.section_blurb.as_deref(), Some("No comment marker"));
    }

    #[test]
    fn test_both_lead_image_shapes_collected_in_order() {
        let html = r#"
            <html><body>
            <h1 class="headline">T</h1>
            <div class="article__leader"><figure><img src="https://cdn.example.com/b.jpg"></figure></div>
            <div class="article__lead-image"><figure><img src="https://cdn.example.com/a.jpg"></figure></div>
            <section data-body-id="cp2"></section>
            </body></html>
        "#;
        let article = extract(html).unwrap();
        let images: Vec<&str> = article.content.iter().map(|b| b.html()).collect();
        assert_eq!(images.len(), 2);
        // probe order follows the matcher table, not document order
        assert!(images[0].contains("a.jpg"));
        assert!(images[1].contains("b.jpg"));
    }

    #[test]
    fn test_paragraphs_are_sanitized() {
        let html = r#"
            <html><body>
            <h1 class="headline">T</h1>
            <section data-body-id="cp2">
                <p data-component="paragraph"><span class="cap">W</span>rapped <b>bold</b> text</p>
            </section>
            </body></html>
        "#;
        let article = extract(html).unwrap();
        assert_eq!(article.content[0].html(), "Wrapped <b>bold</b> text");
    }
}
