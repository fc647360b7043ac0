//! Minimal client for the OpenAI chat completions endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BotError, Result};

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Persona the bot answers `/chat` with.
pub const SYSTEM_SETTINGS: &str = "Your name is Maya. You are a female person with lavender hair \
    and golden eyes. You like to wear pastel clothing.";

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Asks the model to answer `message`, given the channel `history`.
    pub async fn complete(&self, history: &str, message: &str) -> Result<String> {
        let request = self.build_request(history, message);
        debug!(model = %self.model, history_len = history.len(), "Sending chat completion");

        let response = self.client
            .post(BASE_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(BotError::OpenAiError {
                status: status.as_u16(),
                body: error_message(body),
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        extract_text_response(parsed)
    }

    fn build_request(&self, history: &str, message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::new("system", SYSTEM_SETTINGS),
                ChatMessage::new("system", format!("Past messages:\n{history}")),
                ChatMessage::new("user", message),
            ],
        }
    }
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Debug, PartialEq)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn new(role: &'static str, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
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

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| BotError::Other("OpenAI returned no content in the response".to_string()))
}

/// Pulls the human readable message out of an OpenAI error body.
fn error_message(body: String) -> String {
    serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body)
}
