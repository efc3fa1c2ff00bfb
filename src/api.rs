use crate::error::GenerationError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are Usra, the in-app AI companion. You answer briefly, \
warmly, and in the language the user writes in.";

/// One transcript turn in the backend's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPayload {
    pub role: String,
    pub content: String,
}

/// Seam between conversation state and the generation backend, so the
/// conversation can be exercised without a network.
#[async_trait]
pub trait Generator: Clone + Send + Sync + 'static {
    async fn generate_reply(
        &self,
        prompt: &str,
        history: Vec<ChatPayload>,
    ) -> Result<String, GenerationError>;

    async fn generate_image(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// HTTP client for an OpenAI-compatible backend: `chat/completions`
/// for text, `images/generations` for image prompts.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    image_model: String,
}

impl GenerationClient {
    pub fn new(endpoint: String, api_key: String, model: String, image_model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent("usra/1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            model,
            image_model,
        }
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value, GenerationError> {
        let mut request = self
            .client
            .post(format!("{}/{}", self.endpoint, path))
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Generator for GenerationClient {
    async fn generate_reply(
        &self,
        prompt: &str,
        history: Vec<ChatPayload>,
    ) -> Result<String, GenerationError> {
        let mut messages = vec![ChatPayload {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        }];
        messages.extend(history.into_iter().filter(|m| m.role != "system"));
        messages.push(ChatPayload {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        debug!("chat request: {} turns", messages.len());
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0.7,
            "max_tokens": 1024,
        });

        let value = self.post_json("chat/completions", body).await?;
        value["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| GenerationError::Malformed("no choices in chat response".to_string()))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!("image request: {} chars", prompt.len());
        let body = json!({
            "model": self.image_model,
            "prompt": prompt,
            "n": 1,
            "size": "1024x1024",
        });

        let value = self.post_json("images/generations", body).await?;
        let entry = &value["data"][0];
        if let Some(url) = entry["url"].as_str() {
            return Ok(url.to_string());
        }
        // Some backends only return inline image data.
        if let Some(b64) = entry["b64_json"].as_str() {
            return Ok(format!("data:image/png;base64,{b64}"));
        }
        Err(GenerationError::Malformed(
            "no image reference in response".to_string(),
        ))
    }
}
