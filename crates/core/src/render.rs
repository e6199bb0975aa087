//! Minimal placeholder template rendering.
//!
//! Rendering is a pure function from a context mapping to a text blob:
//! `{key}` placeholders are substituted with their context values. The
//! templates and the stylesheet ship embedded in the binary.

use std::collections::HashMap;

/// Index page template.
pub const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Article page template.
pub const ARTICLE_TEMPLATE: &str = include_str!("../templates/article.html");

/// Podcast feed envelope template.
pub const PODCAST_TEMPLATE: &str = include_str!("../templates/podcast.xml");

/// Podcast item template.
pub const PODCAST_ITEM_TEMPLATE: &str = include_str!("../templates/item.xml");

/// Stylesheet copied to the edition root.
pub const STYLE_SHEET: &str = include_str!("../templates/style.css");

/// Output file name of the copied stylesheet.
pub const STYLE_FILE: &str = "style.css";

/// Substitute `{key}` placeholders in `template` with context values.
///
/// Keys absent from the context are left in place, which makes a missed
/// placeholder visible in the output instead of silently vanishing.
pub fn render(template: &str, context: &HashMap<&str, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in context {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}
