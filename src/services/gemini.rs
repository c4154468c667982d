use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::{Credential, InferenceSettings};
use crate::services::inference::{InferenceClient, InvocationError};

/// Google Generative Language API client
///
/// Sends one `generateContent` request per call with JSON output enforced
/// through `responseSchema`.
pub struct GeminiClient {
    base_url: String,
    model: String,
    credential: Credential,
    client: Client,
}

impl GeminiClient {
    /// Create a new client
    ///
    /// `timeout` bounds every request; `None` leaves requests unbounded.
    pub fn new(
        base_url: String,
        model: String,
        credential: Credential,
        timeout: Option<Duration>,
    ) -> Result<Self, InvocationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            model,
            credential,
            client: builder.build()?,
        })
    }

    /// Build a client from settings, falling back to the placeholder
    /// credential when none is configured
    pub fn from_settings(settings: &InferenceSettings) -> Result<Self, InvocationError> {
        Self::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            settings.credential(),
            settings.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn request_body(prompt: &str, output_schema: &Value) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": output_schema,
            },
        })
    }
}

/// Pull the structured value out of a `generateContent` response body
fn extract_output(body: &Value) -> Result<Value, InvocationError> {
    let text = match body["candidates"][0]["content"]["parts"][0]["text"].as_str() {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
                tracing::warn!("Prompt blocked by inference endpoint: {}", reason);
            }
            return Err(InvocationError::EmptyResult);
        }
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Null) => Err(InvocationError::EmptyResult),
        Ok(value) => Ok(value),
        Err(e) => Err(InvocationError::MalformedOutput(format!(
            "model text is not JSON: {}",
            e
        ))),
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn generate(&self, prompt: &str, output_schema: &Value) -> Result<Value, InvocationError> {
        tracing::debug!("Submitting prompt to model {} ({} chars)", self.model, prompt.len());

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.credential.as_str())
            .json(&Self::request_body(prompt, output_schema))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(InvocationError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(InvocationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            InvocationError::MalformedOutput(format!("response body is not JSON: {}", e))
        })?;

        extract_output(&body)
    }
}
