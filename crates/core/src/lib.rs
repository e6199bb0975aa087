pub mod article;
pub mod assemble;
pub mod config;
pub mod edition;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod matchers;
pub mod output;
pub mod render;
pub mod sanitize;
pub mod section;
pub mod summarize;

pub use article::{Article, ContentBlock};
pub use assemble::{AssembledDocs, NavLink, PodcastItem, RenderedArticle, assemble};
pub use config::{BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_OLLAMA_BASE_URL, DEFAULT_READING_RATE, RunConfig};
pub use edition::{Edition, WEEKLY_PATH, edition_from_url, list_section_article_urls};
pub use error::{DispatchError, Result};
pub use extract::extract_article;
pub use fetch::{CookieSource, FetchedPage, Session, SessionConfig, SessionCookie, browser_cookies};
#[doc(hidden)]
pub use matchers::RoleMatchers;
pub use output::{copy_stylesheet, ensure_dir, recreate_dir, write_page};
#[doc(hidden)]
pub use render::render;
pub use sanitize::{SanitizeConfig, sanitize_fragment};
pub use section::{Section, SectionResult, weekly_sections};
pub use summarize::{ArticleSummary, SummarizeConfig, Summarizer};
