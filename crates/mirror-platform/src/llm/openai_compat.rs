//! OpenAI-compatible summarizer adapter.
//!
//! Works with Groq, OpenAI, DeepSeek, and any provider using the OpenAI
//! chat completions API format.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use mirror_core::ports::{SummarizerPort, SummaryRequest, SummaryResponse, TokenUsage};
use mirror_types::{config::LlmConfig, MirrorError, Result};

/// Substitute the transcript into the analysis prompt template.
/// `{history}` is the placeholder carried over from the original prompt.
pub fn compose_prompt(template: &str, transcript: &str) -> String {
    template.replace("{history}", transcript)
}

/// Summarizer that speaks the OpenAI chat completions protocol.
/// Compatible with: Groq, OpenAI, DeepSeek, Together, Mistral, etc.
pub struct OpenAiCompatSummarizer {
    config: LlmConfig,
    base_url: String,
}

impl OpenAiCompatSummarizer {
    pub fn new(config: LlmConfig) -> Self {
        let base_url = config
            .api_base
            .clone()
            .unwrap_or_else(|| config.provider.default_base_url().to_string());
        Self { config, base_url }
    }

    fn build_request_body(&self, req: &SummaryRequest) -> Value {
        let prompt = compose_prompt(&self.config.analysis_prompt, &req.transcript);
        json!({
            "model": req.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": req.max_tokens,
            "temperature": req.temperature,
        })
    }
}

#[async_trait(?Send)]
impl SummarizerPort for OpenAiCompatSummarizer {
    async fn summarize(&self, req: SummaryRequest) -> Result<SummaryResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&req);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(&body)
            .map_err(|e| MirrorError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| MirrorError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(MirrorError::Summarizer(format!("HTTP {}: {}", status, text)));
        }

        let data: ApiResponse = response
            .json()
            .await
            .map_err(|e| MirrorError::Summarizer(e.to_string()))?;

        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| MirrorError::Summarizer("No choices in response".to_string()))?;

        let usage = data.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(SummaryResponse {
            text: choice.message.content.unwrap_or_default(),
            usage,
        })
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
