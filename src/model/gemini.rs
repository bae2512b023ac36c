use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use super::{CompletionModel, GenerationParams, ModelError};
use crate::config::Config;

// Non-JSON error bodies (proxy HTML pages and the like) are cut to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 300;

// A wrapper for the Gemini generateContent REST API
pub struct GeminiModel {
    api_base: String,
    api_key: Option<String>,
    timeout: Duration,
    client: Client,
}

impl GeminiModel {
    pub fn new(config: &Config) -> Result<Self> {
        info!("Initializing Gemini client against {}", config.api_base);

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout,
            client,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Generation(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            ModelError::Generation(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionModel for GeminiModel {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, ModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ModelError::Unavailable("Gemini API key not configured".to_string()))?;

        let payload = request_payload(prompt, params);

        info!(
            "Sending request to Gemini model {} with max_output_tokens: {}",
            params.model, params.max_output_tokens
        );
        debug!("Payload: {}", payload);

        let response = self
            .client
            .post(self.endpoint(&params.model))
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(ModelError::Generation(upstream_error_message(status, &body)));
        }

        let response_json: Value = serde_json::from_str(&body)
            .map_err(|e| ModelError::Generation(format!("invalid response body: {}", e)))?;
        debug!("Response JSON: {}", response_json);

        let content = extract_text(&response_json)?;
        info!("Response length: {} characters", content.chars().count());
        Ok(content)
    }
}

fn request_payload(prompt: &str, params: &GenerationParams) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": params.temperature,
            "maxOutputTokens": params.max_output_tokens
        }
    })
}

fn upstream_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| truncate(body.trim(), MAX_ERROR_BODY_CHARS));
    format!("API request failed ({}): {}", status, message)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

// Concatenates the text parts of the first candidate.
fn extract_text(response_json: &Value) -> Result<String, ModelError> {
    let parts = response_json
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array());

    let Some(parts) = parts else {
        let reason = response_json
            .get("promptFeedback")
            .and_then(|feedback| feedback.get("blockReason"))
            .and_then(|reason| reason.as_str());
        return Err(ModelError::Generation(match reason {
            Some(reason) => format!("prompt was blocked: {}", reason),
            None => "Failed to extract content from response".to_string(),
        }));
    };

    Ok(parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
        .collect())
}
