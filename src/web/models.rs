use serde::{Deserialize, Serialize};

use crate::web::error::ChatError;

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;
const MAX_TEMPERATURE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Content of the most recent user turn. Earlier turns are not forwarded.
    pub fn last_user_message(&self) -> Result<&str, ChatError> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.role == Role::User)
            .map(|msg| msg.content.as_str())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ChatError::Validation("No user message found".to_string()))
    }

    pub fn temperature(&self) -> Result<f32, ChatError> {
        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(ChatError::Validation(format!(
                "temperature must be between 0 and {}",
                MAX_TEMPERATURE
            )));
        }
        Ok(temperature)
    }

    pub fn max_tokens(&self) -> Result<u32, ChatError> {
        match self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS) {
            0 => Err(ChatError::Validation(
                "max_tokens must be a positive integer".to_string(),
            )),
            n => Ok(n),
        }
    }
}

/// Character counts standing in for token counts.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
}

impl Usage {
    pub fn estimate(prompt: &str, completion: &str) -> Self {
        Self {
            prompt_tokens: prompt.chars().count(),
            completion_tokens: completion.chars().count(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}
