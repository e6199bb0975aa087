//! Error types for digest-building operations.
//!
//! This module defines the main error type [`DispatchError`] which represents
//! all possible failures during edition discovery, article extraction,
//! summarization, and output rendering. Every variant is fatal for the whole
//! run except [`DispatchError::Summarize`], which the caller may suppress
//! with the ignore-LLM-error flag.

use thiserror::Error;

/// Main error type for dispatch operations.
///
/// # Example
///
/// ```rust
/// use dispatch_core::{DispatchError, Result};
///
/// fn require_markup(html: &str) -> Result<()> {
///     if html.is_empty() {
///         return Err(DispatchError::MissingNode { role: "article root" });
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum DispatchError {
    /// HTTP transport errors from reqwest (network failures, DNS, timeouts).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A fetch returned something other than HTTP 200.
    ///
    /// Every fetch in the pipeline expects a 200; anything else aborts the
    /// run with no retry.
    #[error("Non 200 status code returned ({status}) : {url}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL provided or resolved.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// A required structural element was absent from fetched markup.
    ///
    /// The site's markup shifts across revisions; a miss here typically
    /// indicates a transient variant rather than a code bug, so the message
    /// carries a remediation hint.
    #[error(
        "could not locate {role} in article markup. This is a known issue with shifting site markup, try running again"
    )]
    MissingNode { role: &'static str },

    /// Bad CLI combination or unsupported named option.
    ///
    /// Reported before any network or disk activity.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or schema-mismatched completion-service response.
    ///
    /// Fatal unless the run was started with the ignore-LLM-error flag.
    #[error("Summarization failed: {0}")]
    Summarize(String),

    /// The completion service reported an explicit error of its own.
    ///
    /// Always fatal, regardless of the ignore-LLM-error flag.
    #[error("LLM service returned an error: {0}")]
    LlmService(String),

    /// File and directory I/O errors.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for DispatchError.
pub type Result<T> = std::result::Result<T, DispatchError>;
