//! OpenAI binding — JSON-object response mode.
//!
//! The reply payload arrives as `choices[0].message.content`; with
//! `response_format: json_object` that content is a JSON object carrying the
//! careers array under a `careers` key, the extractor's second accepted shape.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::prompts::JSON_ONLY_SYSTEM;
use super::{build_http_client, GenerationProvider, LlmError, MAX_OUTPUT_TOKENS, TEMPERATURE, TOP_P};
use async_trait::async_trait;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    response_format: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: build_http_client(),
            api_key,
        }
    }
}

#[async_trait]
impl GenerationProvider for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: JSON_ONLY_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_OUTPUT_TOKENS,
            response_format: json!({"type": "json_object"}),
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatResponse = response.json().await?;

        let text = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyReply)?;

        debug!("OpenAI reply received ({} chars)", text.len());
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_envelope_deserializes_choice_content() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "{\"careers\": []}"}}
            ]
        }"#;
        let reply: ChatResponse = serde_json::from_str(json).unwrap();
        let content = reply.choices[0].message.content.as_deref();
        assert_eq!(content, Some("{\"careers\": []}"));
    }

    #[test]
    fn test_openai_envelope_tolerates_missing_choices() {
        let reply: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(reply.choices.is_empty());
    }

    #[test]
    fn test_chat_request_carries_json_object_response_format() {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![],
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_OUTPUT_TOKENS,
            response_format: json!({"type": "json_object"}),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["max_tokens"], 8192);
    }
}
