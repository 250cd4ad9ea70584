use async_trait::async_trait;
use serde_json::json;

use super::{http_client, post_json};
use crate::provider::{LlmError, LlmProvider, Message};

/// OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            model,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let body = json!({
            "model": self.model,
            "messages": messages.iter().map(Message::to_json).collect::<Vec<_>>(),
            "temperature": temperature,
            "max_tokens": max_tokens,
        });
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);
        let resp = post_json(request, self.name(), &self.model).await?;
        parse_content(&resp)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

fn parse_content(resp: &serde_json::Value) -> Result<String, LlmError> {
    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LlmError::Parse("missing choices[0].message.content".into()))
}
