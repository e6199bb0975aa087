//! Document assembly: ordering, navigation, read times, and rendered outputs.
//!
//! Flattens all (section, article) pairs into one global ordered sequence,
//! preserving section order and within-section first-seen order, then
//! renders the index page, every article page, and the podcast feed.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Timelike, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::article::{Article, ContentBlock};
use crate::config::RunConfig;
use crate::edition::Edition;
use crate::render::{ARTICLE_TEMPLATE, INDEX_TEMPLATE, PODCAST_ITEM_TEMPLATE, PODCAST_TEMPLATE, render};
use crate::section::SectionResult;

/// A navigation target: display title plus relative URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

impl NavLink {
    /// The boundary placeholder pointing back at the edition index.
    pub fn index() -> Self {
        Self { title: "Index".to_string(), url: "../index.html".to_string() }
    }

    fn to_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            url: format!("../{}/{}", article.directory, article.file_name),
        }
    }
}

/// One podcast feed entry, derived per article with audio.
#[derive(Debug, Clone)]
pub struct PodcastItem {
    pub title: String,
    pub description: String,
    pub mp3_url: String,
    pub pub_date: String,
    pub sequence_index: usize,
    pub article_url: String,
    pub guid: Uuid,
}

/// A rendered article document with its target location.
#[derive(Debug, Clone)]
pub struct RenderedArticle {
    pub directory: String,
    pub file_name: String,
    pub html: String,
}

/// All rendered outputs of one run.
#[derive(Debug, Clone)]
pub struct AssembledDocs {
    pub index: String,
    pub articles: Vec<RenderedArticle>,
    pub feed: String,
}

/// Render index, article pages, and podcast feed for the whole edition.
pub fn assemble(edition: &Edition, sections: &[SectionResult], config: &RunConfig, now: DateTime<Utc>) -> AssembledDocs {
    AssembledDocs {
        index: build_index(edition, sections),
        articles: build_articles(sections, config),
        feed: build_podcast(edition, sections, now),
    }
}

/// Flatten (section, article) pairs preserving section order and
/// within-section order.
pub fn flatten(sections: &[SectionResult]) -> Vec<(&SectionResult, &Article)> {
    sections
        .iter()
        .flat_map(|s| s.articles.iter().map(move |a| (s, a)))
        .collect()
}

/// Previous/next targets for the article at global position `i`.
///
/// Boundaries link to the index placeholder; navigation never wraps around.
pub fn nav_links(items: &[(&SectionResult, &Article)], i: usize) -> (NavLink, NavLink) {
    let prev = if i > 0 { NavLink::to_article(items[i - 1].1) } else { NavLink::index() };
    let next = if i + 1 < items.len() { NavLink::to_article(items[i + 1].1) } else { NavLink::index() };
    (prev, next)
}

/// Estimate reading time of the concatenated content blocks.
///
/// Never reports less than one minute.
pub fn read_time(blocks: &[ContentBlock], words_per_minute: usize) -> String {
    let text: String = blocks.iter().map(|b| strip_tags(b.html())).collect::<Vec<_>>().join(" ");
    let words = count_words(&text);
    let wpm = words_per_minute.max(1);
    let minutes = (words + wpm - 1) / wpm;
    format!("{} min read", minutes.max(1))
}

fn build_articles(sections: &[SectionResult], config: &RunConfig) -> Vec<RenderedArticle> {
    let items = flatten(sections);

    items
        .iter()
        .enumerate()
        .map(|(i, (section_result, article))| {
            let (prev, next) = nav_links(&items, i);
            let html = render(ARTICLE_TEMPLATE, &article_context(section_result, article, &prev, &next, config));
            RenderedArticle {
                directory: article.directory.clone(),
                file_name: article.file_name.clone(),
                html,
            }
        })
        .collect()
}

fn article_context(
    section_result: &SectionResult, article: &Article, prev: &NavLink, next: &NavLink, config: &RunConfig,
) -> HashMap<&'static str, String> {
    let mut context = HashMap::new();
    context.insert("title", article.title.clone());
    context.insert("subtitle", article.subtitle.clone());
    context.insert("content", content_html(article));
    context.insert("section_title", section_result.section.title.clone());
    context.insert("section_blurb", article.section_blurb.clone().unwrap_or_default());
    context.insert("prev_title", prev.title.clone());
    context.insert("prev_url", prev.url.clone());
    context.insert("next_title", next.title.clone());
    context.insert("next_url", next.url.clone());
    context.insert("source_url", article.url.clone());
    context.insert("read_time", read_time(&article.content, config.reading_rate));
    context.insert("summary", summary_html(article));
    context.insert("position", article.position_in_section.to_string());
    context.insert("total", article.total_in_section.to_string());
    context
}

/// Render content blocks to the article body HTML. Paragraph fragments gain
/// their `<p>` wrapper here; heading and image blocks are ready to emit.
fn content_html(article: &Article) -> String {
    article
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::Paragraph(html) => format!("<p>{}</p>", html),
            ContentBlock::SectionHeading(html) | ContentBlock::Image(html) => html.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_html(article: &Article) -> String {
    let Some(summary) = &article.summary else {
        return String::new();
    };

    let mut out = String::from("<div class='summary'>");
    if let Some(relevance) = &article.relevance {
        out.push_str(&format!("<p class='relevance'>{}</p>", relevance));
    }
    out.push_str("<ul>");
    for point in summary {
        out.push_str(&format!("<li>{}</li>", point));
    }
    out.push_str("</ul></div>");
    out
}

/// Build the index document: one heading and one link list per section,
/// empty sections included.
pub fn build_index(edition: &Edition, sections: &[SectionResult]) -> String {
    let mut content = String::new();
    for section_result in sections {
        content.push_str(&format!("<h2>{}</h2>\n", section_result.section.title));
        content.push_str("<div><ul class='section-list'>");
        for article in &section_result.articles {
            content.push_str(&format!(
                "<li><a href='{}/{}'>{}</a></li>\n",
                article.directory, article.file_name, article.title
            ));
        }
        content.push_str("</ul></div>\n");
    }

    let mut context = HashMap::new();
    context.insert("content", content);
    context.insert("title", edition.display_title.clone());
    context.insert("weekly_url", edition.url.clone());
    render(INDEX_TEMPLATE, &context)
}

/// Synthetic feed timestamps: the run's current UTC time truncated to whole
/// seconds, decreasing by exactly one second per item. Feed readers sort by
/// date; the strictly decreasing sequence forces publication order.
pub fn synthetic_timestamps(now: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    let start = now.with_nanosecond(0).unwrap_or(now);
    (0..count).map(|i| start - Duration::seconds(i as i64)).collect()
}

/// Derive podcast items from the flattened article order, skipping articles
/// without audio. GUIDs are random per item and per feed build.
pub fn podcast_items(sections: &[SectionResult], now: DateTime<Utc>) -> Vec<PodcastItem> {
    let with_audio: Vec<(&SectionResult, &Article, &str)> = flatten(sections)
        .into_iter()
        .filter_map(|(s, a)| a.audio_url.as_deref().map(|mp3| (s, a, mp3)))
        .collect();

    let timestamps = synthetic_timestamps(now, with_audio.len());

    with_audio
        .into_iter()
        .zip(timestamps)
        .enumerate()
        .map(|(i, ((section_result, article, mp3), ts))| PodcastItem {
            title: xml_escape(&format!(
                "{} : {}",
                section_result.section.title,
                strip_tags(&article.title)
            )),
            description: xml_escape(&strip_tags(&article.subtitle)),
            mp3_url: mp3.to_string(),
            pub_date: ts.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
            sequence_index: i + 1,
            article_url: article.url.clone(),
            guid: Uuid::new_v4(),
        })
        .collect()
}

/// Build the podcast feed document.
pub fn build_podcast(edition: &Edition, sections: &[SectionResult], now: DateTime<Utc>) -> String {
    let items = podcast_items(sections, now);
    let build_date = items
        .first()
        .map(|item| item.pub_date.clone())
        .unwrap_or_else(|| now.format("%a, %d %b %Y %H:%M:%S GMT").to_string());

    let rendered_items: Vec<String> = items
        .iter()
        .map(|item| {
            let mut context = HashMap::new();
            context.insert("title", item.title.clone());
            context.insert("description", item.description.clone());
            context.insert("mp3", item.mp3_url.clone());
            context.insert("pub_date", item.pub_date.clone());
            context.insert("index", item.sequence_index.to_string());
            context.insert("url", item.article_url.clone());
            context.insert("guid", item.guid.to_string());
            render(PODCAST_ITEM_TEMPLATE, &context)
        })
        .collect();

    let mut context = HashMap::new();
    context.insert("edition_date", xml_escape(&edition.display_title));
    context.insert("build_date", build_date);
    context.insert("uuid", Uuid::new_v4().to_string());
    context.insert("items", rendered_items.join("\n"));
    render(PODCAST_TEMPLATE, &context)
}

/// Strip HTML tags, keeping only text content.
fn strip_tags(html: &str) -> String {
    match Regex::new(r"<[^>]*>") {
        Ok(re) => re.replace_all(html, "").to_string(),
        Err(_) => html.to_string(),
    }
}

fn count_words(text: &str) -> usize {
    match Regex::new(r"\b[\w'-]+\b") {
        Ok(re) => re.find_iter(text).count(),
        Err(_) => text.split_whitespace().count(),
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
