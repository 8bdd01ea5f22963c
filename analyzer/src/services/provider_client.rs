//! HTTP provider client with per-provider request shaping
//!
//! Each provider gets its own request builder and envelope parser; the
//! rest of the pipeline only ever sees the extracted text. Exactly one
//! outbound call per invocation — retries live in the backoff
//! controller, not here.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::services::credentials::ProviderCredentials;
use crate::traits::ProviderClient;
use shared::{ProviderFailure, ProviderId, ProviderModel};

/// Base URLs per provider, overridable for tests
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub openai: String,
    pub anthropic: String,
    pub gemini: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openai: "https://api.openai.com".to_string(),
            anthropic: "https://api.anthropic.com".to_string(),
            gemini: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

/// Real provider client speaking each provider's HTTP contract
pub struct HttpProviderClient {
    client: reqwest::Client,
    credentials: ProviderCredentials,
    endpoints: ProviderEndpoints,
}

impl HttpProviderClient {
    pub fn new(credentials: ProviderCredentials, timeout: Duration) -> AnalyzerResult<Self> {
        Self::with_endpoints(credentials, timeout, ProviderEndpoints::default())
    }

    pub fn with_endpoints(
        credentials: ProviderCredentials,
        timeout: Duration,
        endpoints: ProviderEndpoints,
    ) -> AnalyzerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalyzerError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            endpoints,
        })
    }

    async fn openai_request(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure> {
        let api_key = self
            .credentials
            .key_for(ProviderId::OpenAI)
            .ok_or(ProviderFailure::AuthenticationFailed)?;

        let request_body = serde_json::json!({
            "model": model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "max_tokens": 600,
            "temperature": 0.2
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoints.openai))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderFailure::from_status(status.as_u16()));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderFailure::InvalidRequest(format!("Failed to parse response: {e}")))?;

        response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|content| content.to_string())
            .ok_or_else(|| ProviderFailure::InvalidRequest("No content in response".to_string()))
    }

    async fn anthropic_request(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure> {
        let api_key = self
            .credentials
            .key_for(ProviderId::Anthropic)
            .ok_or(ProviderFailure::AuthenticationFailed)?;

        let request_body = serde_json::json!({
            "model": model,
            "max_tokens": 600,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.endpoints.anthropic))
            .header("x-api-key", api_key)
            .header("Content-Type", "application/json")
            .header("anthropic-version", "2023-06-01")
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderFailure::from_status(status.as_u16()));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderFailure::InvalidRequest(format!("Failed to parse response: {e}")))?;

        response_json
            .get("content")
            .and_then(|content| content.get(0))
            .and_then(|item| item.get("text"))
            .and_then(|text| text.as_str())
            .map(|text| text.to_string())
            .ok_or_else(|| ProviderFailure::InvalidRequest("No content in response".to_string()))
    }

    async fn gemini_request(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure> {
        let api_key = self
            .credentials
            .key_for(ProviderId::Gemini)
            .ok_or(ProviderFailure::AuthenticationFailed)?;

        let request_body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        {
                            "text": prompt
                        }
                    ]
                }
            ],
            "generationConfig": {
                "maxOutputTokens": 600,
                "temperature": 0.2
            }
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoints.gemini, model, api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderFailure::from_status(status.as_u16()));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderFailure::InvalidRequest(format!("Failed to parse response: {e}")))?;

        response_json
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .map(|text| text.to_string())
            .ok_or_else(|| ProviderFailure::InvalidRequest("No content in response".to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> ProviderFailure {
    if e.is_timeout() {
        ProviderFailure::Timeout
    } else {
        ProviderFailure::Network(e.to_string())
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn complete(&self, model: &ProviderModel, prompt: &str) -> Result<String, ProviderFailure> {
        match model.provider {
            ProviderId::OpenAI => self.openai_request(&model.model, prompt).await,
            ProviderId::Anthropic => self.anthropic_request(&model.model, prompt).await,
            ProviderId::Gemini => self.gemini_request(&model.model, prompt).await,
        }
    }
}
