use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when invoking the inference endpoint
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unauthorized: inference endpoint rejected the credential")]
    Unauthorized,

    #[error("API returned error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Model returned no usable result")]
    EmptyResult,
}

/// Hosted language model, seen as a single capability.
///
/// Implementations submit `prompt` together with `output_schema` (an OpenAPI
/// style schema the model is asked to conform to) and return the structured
/// value the model produced. One call to `generate` is one external request.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, prompt: &str, output_schema: &Value) -> Result<Value, InvocationError>;
}
