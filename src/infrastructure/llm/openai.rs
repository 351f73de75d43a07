use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::llm::LlmResponseFormat;
use crate::domain::{DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, Usage};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI-compatible chat completions provider
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<OpenAiMessage> = request
            .messages
            .iter()
            .map(OpenAiMessage::from_domain)
            .collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(format) = request.response_format {
            let kind = match format {
                LlmResponseFormat::Text => "text",
                LlmResponseFormat::JsonObject => "json_object",
            };
            body["response_format"] = serde_json::json!({ "type": kind });
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut llm_response = LlmResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            llm_response = llm_response.with_finish_reason(FinishReason::parse(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response =
                llm_response.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> OpenAiMessage<'a> {
    fn from_domain(message: &'a Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content_text(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn completion(content: &str, finish_reason: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini",
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": finish_reason
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 40}
        })
    }

    #[tokio::test]
    async fn test_openai_chat() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("{\"riskLevel\":\"高\"}", "stop"));
        let provider = OpenAiProvider::new(client, "test-key");

        let request = LlmRequest::builder()
            .system("你是合同审查助手")
            .user("请分析合同")
            .temperature(0.2)
            .json_output()
            .build();
        let response = provider.chat("gpt-4o-mini", request).await.unwrap();

        assert_eq!(response.content(), "{\"riskLevel\":\"高\"}");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.unwrap().total_tokens, 160);
    }

    #[tokio::test]
    async fn test_request_body() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("ok", "stop"));
        let provider = OpenAiProvider::new(client, "test-key");

        let request = LlmRequest::builder()
            .system("system prompt")
            .user("user prompt")
            .max_tokens(2000)
            .json_output()
            .build();
        provider.chat("gpt-4o-mini", request).await.unwrap();

        let (url, body) = provider.client.requests().remove(0);
        assert_eq!(url, TEST_URL);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "user prompt");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["response_format"]["type"], "json_object");
        assert!(body.get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_truncated_response() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("{\"riskLev", "length"));
        let provider = OpenAiProvider::new(client, "test-key");

        let response = provider
            .chat("gpt-4o-mini", LlmRequest::builder().user("hi").build())
            .await
            .unwrap();

        assert!(response.is_truncated());
    }

    #[tokio::test]
    async fn test_no_choices() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({"id": "x", "model": "m", "choices": []}),
        );
        let provider = OpenAiProvider::new(client, "test-key");

        let result = provider
            .chat("gpt-4o-mini", LlmRequest::builder().user("hi").build())
            .await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let client = MockHttpClient::new()
            .with_response("http://localhost:11434/v1/chat/completions", completion("ok", "stop"));
        let provider = OpenAiProvider::with_base_url(client, "unused", "http://localhost:11434/");

        let response = provider
            .chat("qwen2.5", LlmRequest::builder().user("hi").build())
            .await
            .unwrap();

        assert_eq!(response.content(), "ok");
    }
}
