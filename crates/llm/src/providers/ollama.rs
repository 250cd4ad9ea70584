use async_trait::async_trait;
use serde_json::json;

use super::{http_client, post_json};
use crate::provider::{LlmError, LlmProvider, Message};

/// Local models served by Ollama's `/api/chat`.
pub struct OllamaProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(url: &str, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client()?,
            endpoint: format!("{}/api/chat", url.trim_end_matches('/')),
            model,
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        // Non-streaming; num_predict caps the summary length.
        let body = json!({
            "model": self.model,
            "messages": messages.iter().map(Message::to_json).collect::<Vec<_>>(),
            "stream": false,
            "options": {
                "temperature": temperature,
                "num_predict": max_tokens,
            },
        });
        let request = self.client.post(&self.endpoint).json(&body);
        let resp = post_json(request, self.name(), &self.model).await?;
        parse_content(&resp)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

fn parse_content(resp: &serde_json::Value) -> Result<String, LlmError> {
    resp["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LlmError::Parse("missing message.content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_response() {
        let resp = json!({ "message": { "role": "assistant", "content": "short summary" } });
        assert_eq!(parse_content(&resp).unwrap(), "short summary");
    }

    #[test]
    fn missing_content_is_parse_error() {
        let err = parse_content(&json!({ "error": "model not found" })).unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let p = OllamaProvider::new("http://localhost:11434/", "llama3.2".into()).unwrap();
        assert_eq!(p.endpoint, "http://localhost:11434/api/chat");
    }
}
