//! Allow-list HTML fragment sanitizer.
//!
//! Strips disallowed markup from a content fragment while preserving an
//! allow-listed subset of inline tags (with their full subtrees and
//! attributes) and all raw text. Used on body paragraphs before they become
//! [`ContentBlock::Paragraph`](crate::article::ContentBlock) fragments.

use scraper::{ElementRef, Html, Node};

/// Configuration for fragment sanitization.
#[derive(Debug, Clone)]
pub struct SanitizeConfig {
    /// Tags preserved verbatim, subtree included. The set evolves with the
    /// site's inline markup; keep it data, not code.
    pub allowed_tags: Vec<String>,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self { allowed_tags: ["a", "i", "b", "small"].iter().map(|t| t.to_string()).collect() }
    }
}

/// Sanitize an HTML fragment, returning the cleaned fragment.
///
/// Direct children are visited one level at a time: allow-listed elements
/// are emitted untouched (attributes and subtree verbatim), text nodes are
/// kept, and any other element is recursed into first and then unwrapped so
/// that only its wrapper tag is dropped. Text content is never lost, and
/// the operation is idempotent.
pub fn sanitize_fragment(html: &str, config: &SanitizeConfig) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    sanitize_children(fragment.root_element(), config, &mut out);
    out
}

fn sanitize_children(element: ElementRef<'_>, config: &SanitizeConfig, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(el) => {
                let Some(child_ref) = ElementRef::wrap(child) else { continue };
                if config.allowed_tags.iter().any(|t| t == el.name()) {
                    out.push_str(&child_ref.html());
                } else {
                    sanitize_children(child_ref, config, out);
                }
            }
            _ => {}
        }
    }
}

/// Entity-escape a text node for re-serialization.
///
/// Parsing the escaped output yields the original text again, which is what
/// makes the sanitizer idempotent.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
