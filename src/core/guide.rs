use std::sync::Arc;

use crate::core::invoker::invoke_structured;
use crate::core::prompts::{guidance_output_schema, render_guidance_prompt};
use crate::core::validation::{FromRawInput, ValidationError};
use crate::models::{GuidanceRequest, GuidanceResponse};
use crate::services::{InferenceClient, InvocationError};

/// Answer returned whenever the model cannot be used
pub const FALLBACK_RESPONSE: &str = "I apologize, but I'm currently experiencing technical difficulties. Please try again later or contact support for immediate assistance.";

/// Guidance operation: the platform chatbot
///
/// Answers every valid message. Invocation failures are logged and replaced
/// with [`FALLBACK_RESPONSE`]; only an invalid request is reported back.
#[derive(Clone)]
pub struct Guide {
    client: Arc<dyn InferenceClient>,
}

impl Guide {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    pub async fn respond(&self, request: &GuidanceRequest) -> Result<GuidanceResponse, ValidationError> {
        request.check()?;

        match self.ask(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::error!("Guidance invocation failed, answering with fallback: {}", e);
                Ok(GuidanceResponse {
                    response: FALLBACK_RESPONSE.to_string(),
                })
            }
        }
    }

    async fn ask(&self, request: &GuidanceRequest) -> Result<GuidanceResponse, InvocationError> {
        let prompt = render_guidance_prompt(request);

        tracing::info!("Answering guidance message ({} chars)", request.message.len());

        let answer: GuidanceResponse =
            invoke_structured(self.client.as_ref(), &prompt, &guidance_output_schema()).await?;

        if answer.response.trim().is_empty() {
            return Err(InvocationError::EmptyResult);
        }

        Ok(answer)
    }
}
