//! Run-level configuration.
//!
//! Every run parameter is fixed once at startup and passed by reference to
//! the components that need it; there is no mutable ambient state.

use std::path::PathBuf;

use crate::fetch::CookieSource;

/// Base URL of the publication.
pub const BASE_URL: &str = "https://www.economist.com";

/// Default words-per-minute constant for read-time estimates.
pub const DEFAULT_READING_RATE: usize = 250;

/// Default chat-completion endpoint base URL.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default completion model name.
pub const DEFAULT_LLM_MODEL: &str = "llama3.1";

/// Immutable configuration for one digest run.
///
/// Constructed once from the CLI surface and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root output directory; the edition directory is created beneath it.
    pub output_dir: PathBuf,
    /// Words per minute used for the read-time estimate.
    pub reading_rate: usize,
    /// Emit progress information while the run executes.
    pub verbose: bool,
    /// User-Agent header sent with every fetch.
    pub user_agent: String,
    /// Browser whose cookie store authenticates the session.
    pub cookie_source: CookieSource,
    /// Whether to request LLM summaries for eligible sections.
    pub create_summary: bool,
    /// Continue with null summary fields when the LLM response is malformed.
    pub ignore_llm_error: bool,
    /// Completion model name.
    pub llm_model: String,
    /// Completion service base URL.
    pub ollama_base_url: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            reading_rate: DEFAULT_READING_RATE,
            verbose: false,
            user_agent: default_user_agent(),
            cookie_source: CookieSource::Firefox,
            create_summary: false,
            ignore_llm_error: false,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
        }
    }
}

/// Default User-Agent string, derived from the crate version.
pub fn default_user_agent() -> String {
    format!("Dispatch/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_default() {
        let config = RunConfig::default();
        assert_eq!(config.reading_rate, 250);
        assert!(!config.create_summary);
        assert!(!config.ignore_llm_error);
        assert_eq!(config.llm_model, "llama3.1");
        assert_eq!(config.ollama_base_url, "http://localhost:11434");
        assert!(config.user_agent.starts_with("Dispatch/"));
    }
}
