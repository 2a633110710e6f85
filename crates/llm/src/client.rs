use coach_core::LlmSettings;

use crate::ai_types::{ChatRequest, ChatResponse};
use crate::error::LlmError;

/// Client for LLM API calls.
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) temperature: f32,
    pub(crate) max_tokens: u32,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl LlmClient {
    /// Creates a client from the configured settings and an API key.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, settings: &LlmSettings) -> Result<Self, LlmError> {
        let base_url = settings.base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    /// Build a client only when an API key is configured.
    ///
    /// # Errors
    /// Returns an error if a key is set but the HTTP client cannot be built.
    pub fn from_settings(settings: &LlmSettings) -> Result<Option<Self>, LlmError> {
        settings.api_key.clone().map(|key| Self::new(key, settings)).transpose()
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat completion request and return the extracted content string.
    ///
    /// Single attempt: the caller surfaces failures, nothing is retried.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, the response body cannot be parsed, or the choices
    /// array is empty.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            tracing::warn!(status = status.as_u16(), "LLM API returned error status");
            return Err(LlmError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                context: format!("chat completion response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        let first_choice = chat_response.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
        Ok(first_choice.message.content)
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_unicode_boundary() {
        let s = "příliš žluťoučký kůň";
        let result = truncate(s, 2);
        assert_eq!(result, "p");
        assert_eq!(truncate(s, 100), s);
        assert_eq!(truncate("", 10), "");
    }

    #[test]
    fn test_from_settings_requires_key() {
        let settings = LlmSettings::default();
        assert!(LlmClient::from_settings(&settings).unwrap().is_none());

        let settings = LlmSettings {
            api_key: Some("sk-test".to_owned()),
            base_url: "http://localhost:9999/".to_owned(),
            ..LlmSettings::default()
        };
        let client = LlmClient::from_settings(&settings).unwrap().unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999");
        assert!(!format!("{client:?}").contains("sk-test"));
    }
}
