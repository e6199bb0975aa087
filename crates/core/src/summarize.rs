//! Summarizer adapter for a local chat-completion service.
//!
//! Optional capability invoked after extraction: article content is packed
//! into a fixed instruction prompt and sent to an Ollama-style `/api/chat`
//! endpoint, which is asked for a strict JSON object holding one relevance
//! sentence and three summary sentences. The call is synchronous and
//! blocking with no retry; the rest of the pipeline never depends on it.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::article::ContentBlock;
use crate::{DispatchError, Result};

/// Fixed request timeout for completion calls, in seconds. Local models
/// can be slow on long articles.
pub const SUMMARIZE_TIMEOUT: u64 = 300;

/// Default context window requested from the model.
pub const DEFAULT_NUM_CTX: u32 = 16384;

/// Configuration for the summarizer.
#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    /// Completion service base URL, e.g. `http://localhost:11434`.
    pub base_url: String,
    /// Model name passed through to the service.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Context window size sent in the request options.
    pub num_ctx: u32,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: crate::config::DEFAULT_LLM_MODEL.to_string(),
            timeout: SUMMARIZE_TIMEOUT,
            num_ctx: DEFAULT_NUM_CTX,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    num_ctx: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    format: &'static str,
    temperature: f32,
    options: ChatOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatResponseMessage>,
    error: Option<String>,
}

/// Parsed summarization result.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSummary {
    /// Summary sentences, expected to be three.
    pub summary: Vec<String>,
    /// One sentence on why the article matters.
    pub relevance: String,
}

/// Blocking client for the chat-completion endpoint.
pub struct Summarizer {
    client: Client,
    config: SummarizeConfig,
}

impl Summarizer {
    pub fn new(config: SummarizeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(DispatchError::Http)?;
        Ok(Self { client, config })
    }

    /// Summarize extracted content blocks.
    ///
    /// An explicit `error` field in the service response is always fatal
    /// ([`DispatchError::LlmService`]); an unparseable or schema-mismatched
    /// payload yields [`DispatchError::Summarize`], which the caller may
    /// suppress.
    pub fn summarize(&self, blocks: &[ContentBlock]) -> Result<ArticleSummary> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage { role: "user", content: build_prompt(blocks) }],
            stream: false,
            format: "json",
            temperature: 0.0,
            options: ChatOptions { num_ctx: self.config.num_ctx },
        };

        let endpoint = format!("{}/api/chat", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&endpoint)
            .json(&request)
            .send()
            .map_err(DispatchError::Http)?;

        let body: ChatResponse = response
            .json()
            .map_err(|e| DispatchError::Summarize(format!("response was not valid JSON: {e}")))?;

        parse_chat_response(body)
    }
}

fn parse_chat_response(body: ChatResponse) -> Result<ArticleSummary> {
    if let Some(error) = body.error {
        return Err(DispatchError::LlmService(error));
    }

    let content = body
        .message
        .ok_or_else(|| DispatchError::Summarize("response carried no message".to_string()))?
        .content;

    serde_json::from_str(&content).map_err(|e| DispatchError::Summarize(format!("unexpected summary payload: {e}")))
}

/// Embed the article content into the fixed instruction template.
///
/// Block fragments are joined and their quotes/newlines escaped so the
/// content can sit inside the prompt's quoted string.
pub fn build_prompt(blocks: &[ContentBlock]) -> String {
    let joined = blocks.iter().map(|b| b.html()).collect::<Vec<_>>().join("\n\n");
    let escaped = joined.replace('"', "\\\"").replace('\n', "\\n");

    format!(
        "You are summarizing one article from a weekly news edition. \
         Respond with a strict JSON object holding exactly two keys: \
         \"relevance\", a single sentence explaining why the article matters right now, \
         and \"summary\", an array of exactly three sentences summarizing the article. \
         Do not include any other keys, markup, or commentary. \
         The article content is: \"{escaped}\""
    )
}
