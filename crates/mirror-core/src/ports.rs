//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `mirror-core` (pure Rust).
//! Implementations live in `mirror-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use mirror_types::Result;

// ─── Summarizer Port ─────────────────────────────────────────

/// Request for one profile summary.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// The exact `"Q: …\nA: …\n"` transcript of a completed session
    pub transcript: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Provider response: free-text profile plus token accounting if reported.
#[derive(Debug, Clone)]
pub struct SummaryResponse {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The external summarization collaborator. One blocking (awaited) call,
/// no retries, no streaming; failures propagate to the caller.
#[async_trait(?Send)]
pub trait SummarizerPort {
    async fn summarize(&self, req: SummaryRequest) -> Result<SummaryResponse>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Key/value storage for small JSON blobs (config only — session state is
/// deliberately never persisted).
#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
