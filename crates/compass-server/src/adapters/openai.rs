//! OpenAI implementation of CompletionProvider
//!
//! Wraps the chat-completions endpoint. One attempt per call, no retries;
//! the returned text is handed back uninterpreted. JSON-object response
//! format is requested so the model is held to the structured-output
//! contract on the provider side as well as in the prompt.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use compass::ports::{ChatMessage, Completion, CompletionOptions, CompletionProvider};
use compass::GenerationError;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            api_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Point the provider at a different endpoint (tests, proxies).
    #[allow(dead_code)]
    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<Completion, GenerationError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Service(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Service(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Service(format!("invalid provider envelope: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GenerationError::Service("no choices returned".to_string()))?;

        Ok(Completion {
            content,
            model: parsed.model,
        })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_openai_wire_shape() {
        let messages = vec![
            ChatMessage::system("Always reply with JSON."),
            ChatMessage::user("Generate tasks."),
        ];
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 2000,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "Generate tasks.");
        assert_eq!(value["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_response_envelope_decodes() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"tasks\": []}"}}
            ]
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "{\"tasks\": []}");
        assert_eq!(parsed.model, "gpt-4o-mini");
    }
}
