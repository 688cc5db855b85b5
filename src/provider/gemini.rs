use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Direction, ProviderKind, Translator};
use crate::error::{BilinError, Result};

/// Chat-model style backend against the Google generative language API.
///
/// Every call starts a fresh single-turn conversation with empty history;
/// nothing is carried over between requests.
pub struct GeminiTranslator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

impl GeminiTranslator {
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
                "Translate the following English text to Chinese. Requirements:\n\
                 1. Keep technical terms accurate\n\
                 2. Make the translation natural and fluent\n\
                 3. Only return the translated text without any explanation\n\
                 \n\
                 Text to translate:\n\
                 {}",
                text
            ),
            Direction::ChineseToEnglish => format!(
                "Translate the following Chinese text to English. Requirements:\n\
                 1. Keep technical terms accurate\n\
                 2. Make the translation professional and natural\n\
                 3. Only return the translated text without any explanation\n\
                 \n\
                 Text to translate:\n\
                 {}",
                text
            ),
        }
    }
}

/// Pull the reply text out of a generateContent response body.
fn extract_reply(response: GenerateContentResponse) -> Result<String> {
    let reply = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| {
            BilinError::Provider("Gemini response contained no candidate text".to_string())
        })?;

    Ok(reply.trim().to_string())
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(&self, text: &str, direction: Direction) -> Result<String> {
        if text.trim().is_empty() {
            return Err(BilinError::Provider("Empty input text".to_string()));
        }

        let prompt = Self::build_prompt(text, direction);
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        debug!("Sending Gemini translation request ({})", direction);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BilinError::Provider(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BilinError::Provider(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BilinError::Provider(format!("Failed to parse response: {}", e)))?;

        extract_reply(body)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }
}
