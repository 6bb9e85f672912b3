use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::CompletionGateway;
use crate::domain::{DomainError, Message};

/// Alibaba Cloud Model Studio (DashScope) OpenAI-compatible endpoint, Beijing region.
pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
pub const DEFAULT_MODEL: &str = "qwen-plus";
const COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// HTTP client for OpenAI-compatible chat-completion endpoints.
///
/// Targets DashScope compatible mode by default. The API key is optional at
/// construction; a missing key surfaces as a [`DomainError::Configuration`]
/// on every call instead of blocking startup.
///
/// | Variable             | Default                                            |
/// |----------------------|----------------------------------------------------|
/// | `DASHSCOPE_API_KEY`  | none                                               |
/// | `DASHSCOPE_BASE_URL` | `https://dashscope.aliyuncs.com/compatible-mode/v1` |
/// | `CHAT_MODEL`         | `qwen-plus`                                        |
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    url: String,
}

impl OpenAiCompatibleClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.into(),
            url,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        self
    }

    pub fn from_env() -> Self {
        let key = std::env::var("DASHSCOPE_API_KEY").ok();
        let base = std::env::var("DASHSCOPE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(key, model, base)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompatibleClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::configuration("DASHSCOPE_API_KEY is not set")
        })?;

        let request = ApiRequest {
            model: &self.model,
            messages,
        };

        debug!(
            "OpenAiCompatibleClient: sending {} message(s) to {}",
            messages.len(),
            self.model
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::completion(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiCompatibleClient: API returned {status}: {body}");
            return Err(DomainError::completion(format!(
                "model '{}' returned HTTP {status}",
                self.model
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::completion(format!("failed to parse response: {e}")))?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| {
                DomainError::completion(format!("model '{}' returned no choices", self.model))
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_openai_shape() {
        let messages = vec![Message::system("s"), Message::user("u")];
        let request = ApiRequest {
            model: "qwen-plus",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "qwen-plus");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
    }

    #[test]
    fn empty_key_is_treated_as_missing() {
        let client = OpenAiCompatibleClient::new(Some(String::new()), DEFAULT_MODEL, DEFAULT_BASE_URL);
        assert!(!client.has_api_key());
    }

    #[test]
    fn url_appends_completions_path() {
        let client = OpenAiCompatibleClient::new(None, DEFAULT_MODEL, "http://127.0.0.1:1/v1/");
        assert_eq!(client.url(), "http://127.0.0.1:1/v1/chat/completions");
    }

    #[tokio::test]
    async fn missing_key_fails_at_call_time() {
        let client = OpenAiCompatibleClient::new(None, DEFAULT_MODEL, "http://127.0.0.1:1");
        let err = client.complete(&[Message::user("hi")]).await.unwrap_err();
        assert!(err.is_configuration());
    }
}
