use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Direction, ProviderKind, Translator};
use crate::error::{BilinError, Result};

/// HTTP completion style backend against the Zhipu GLM chat API.
pub struct ZhipuTranslator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ZhipuTranslator {
    pub fn new(client: Client, endpoint: &str, model: &str, api_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn build_prompt(text: &str, direction: Direction) -> String {
        match direction {
            Direction::EnglishToChinese => format!(
                "Translate this English text to Chinese, keep it accurate and natural: {}",
                text
            ),
            Direction::ChineseToEnglish => format!(
                "Translate this Chinese text to English, keep it accurate and professional: {}",
                text
            ),
        }
    }
}

/// Pull the first choice's message content out of a chat completion body.
fn extract_content(response: ChatCompletionResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| BilinError::Provider("Zhipu response contained no choices".to_string()))?;

    Ok(content.trim().to_string())
}

#[async_trait]
impl Translator for ZhipuTranslator {
    async fn translate(&self, text: &str, direction: Direction) -> Result<String> {
        if text.trim().is_empty() {
            return Err(BilinError::Provider("Empty input text".to_string()));
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::build_prompt(text, direction),
            }],
            stream: false,
        };

        let url = format!("{}/api/paas/v4/chat/completions", self.endpoint);

        debug!("Sending Zhipu translation request ({})", direction);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| BilinError::Provider(format!("HTTP request failed: {}", e)))?;

        // Status check must happen before any attempt to parse the body.
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BilinError::Provider(format!(
                "Zhipu API error {}: {}",
                status, error_text
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BilinError::Provider(format!("Failed to parse response: {}", e)))?;

        extract_content(body)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Zhipu
    }
}
