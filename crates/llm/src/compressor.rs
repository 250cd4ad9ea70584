//! Abstractive compression of one text chunk, and the process-wide handle to it.

use std::sync::Arc;

use async_trait::async_trait;
use studykit_core::config::{LlmConfig, OllamaConfig};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message};
use crate::providers::create_provider;

const SYSTEM_PROMPT: &str = "You condense study material. Rewrite the passage as a short, \
faithful summary in plain prose. Keep key terms, definitions and figures. Do not add facts, \
opinions, headings or bullet points.";

/// Condenses one chunk of text into a shorter narrative.
#[async_trait]
pub trait Compressor: Send + Sync {
    async fn compress(&self, chunk: &str) -> Result<String, LlmError>;
}

/// Compressor backed by a chat-completion provider.
pub struct LlmCompressor {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmCompressor {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    /// Build from config, creating the appropriate provider.
    pub fn from_config(llm_config: &LlmConfig, ollama_config: &OllamaConfig) -> Result<Self, LlmError> {
        let provider = create_provider(llm_config, ollama_config)?;
        Ok(Self::new(provider, llm_config.temperature, llm_config.max_tokens))
    }
}

#[async_trait]
impl Compressor for LlmCompressor {
    async fn compress(&self, chunk: &str) -> Result<String, LlmError> {
        let messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(format!("Summarize this passage:\n\n{chunk}")),
        ];
        debug!(provider = self.provider.name(), chars = chunk.len(), "compressing chunk");

        let response = self
            .provider
            .complete(messages, self.temperature, self.max_tokens)
            .await?;

        let summary = response.trim();
        if summary.is_empty() {
            return Err(LlmError::EmptyCompletion);
        }
        Ok(summary.to_string())
    }
}

static SHARED: OnceCell<Option<Arc<dyn Compressor>>> = OnceCell::const_new();

/// Process-wide compressor, built on first use and reused afterwards.
///
/// Concurrent first callers await the same initialization. `None` means
/// abstractive compression is unavailable and callers go extractive.
pub async fn shared_compressor(
    llm_config: &LlmConfig,
    ollama_config: &OllamaConfig,
) -> Option<Arc<dyn Compressor>> {
    SHARED
        .get_or_init(|| async move {
            match LlmCompressor::from_config(llm_config, ollama_config) {
                Ok(c) => {
                    info!(provider = %llm_config.provider, "abstractive summarizer ready");
                    Some(Arc::new(c) as Arc<dyn Compressor>)
                }
                Err(e) => {
                    info!("abstractive summarizer unavailable: {e}");
                    None
                }
            }
        })
        .await
        .clone()
}
