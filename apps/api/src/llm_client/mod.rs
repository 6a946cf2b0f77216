/// Generation client — the single point of entry for all LLM calls.
///
/// ARCHITECTURAL RULE: no other module may call a provider API directly.
/// The ranking pipeline depends only on `GenerationProvider`, never on a
/// concrete vendor, so the two bindings stay interchangeable.
///
/// One outbound HTTP call per `generate` invocation, no internal retry:
/// extraction and validation failures are stochastic-provider failures,
/// and retry policy belongs to the caller.
use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;
pub mod openai;
pub mod prompts;

/// Fixed decoding configuration, shared by both bindings. Low-moderate
/// temperature favors determinism over creativity; the token ceiling is
/// sized for ten verbose entries.
pub const TEMPERATURE: f32 = 0.4;
pub const TOP_P: f32 = 0.9;
pub const TOP_K: u32 = 32;
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("provider returned an empty reply")]
    EmptyReply,
}

/// A provider that can turn a prompt into text containing a JSON payload.
/// Held in `AppState` as `Arc<dyn GenerationProvider>` and injected into the
/// orchestrator, so tests can substitute a canned implementation.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Performs exactly one generation call and returns the raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Short binding name for logs.
    fn name(&self) -> &'static str;
}

/// Shared HTTP client construction for both bindings.
pub(crate) fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to build HTTP client")
}
