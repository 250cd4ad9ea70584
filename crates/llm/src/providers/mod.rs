pub mod ollama;
pub mod openai;

use std::time::Duration;

use studykit_core::config::{LlmConfig, OllamaConfig};
use tracing::debug;

use crate::provider::{LlmError, LlmProvider};

/// Upper bound for one completion; a stalled backend must not hold a chunk forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn http_client() -> Result<reqwest::Client, LlmError> {
    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?)
}

/// Send a JSON request and decode the JSON reply; non-2xx becomes `LlmError::Api`.
pub(crate) async fn post_json(
    request: reqwest::RequestBuilder,
    provider: &str,
    model: &str,
) -> Result<serde_json::Value, LlmError> {
    debug!(provider, model, "completion request");
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LlmError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

/// Create the configured completion backend. `none` disables abstractive
/// summarization and is reported as `NotConfigured`.
pub fn create_provider(
    llm_config: &LlmConfig,
    ollama_config: &OllamaConfig,
) -> Result<Box<dyn LlmProvider>, LlmError> {
    match llm_config.provider.as_str() {
        "openai" => {
            let api_key = llm_config
                .openai_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".into()))?;
            let base_url = llm_config
                .openai_base_url
                .as_deref()
                .unwrap_or("https://api.openai.com");
            Ok(Box::new(openai::OpenAiProvider::new(
                api_key.clone(),
                llm_config.openai_model.clone(),
                base_url,
            )?))
        }
        "ollama" => Ok(Box::new(ollama::OllamaProvider::new(
            &ollama_config.url,
            ollama_config.model.clone(),
        )?)),
        "none" | "" => Err(LlmError::NotConfigured(
            "abstractive summarization disabled (LLM_PROVIDER=none)".into(),
        )),
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}
