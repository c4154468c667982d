use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::services::{InferenceClient, InvocationError};

/// Submit a rendered prompt and decode the structured result.
///
/// Performs exactly one call to `client`. A null payload is an empty result;
/// a payload that does not fit `T` is malformed output.
pub async fn invoke_structured<T: DeserializeOwned>(
    client: &dyn InferenceClient,
    prompt: &str,
    output_schema: &Value,
) -> Result<T, InvocationError> {
    let value = client.generate(prompt, output_schema).await?;

    if value.is_null() {
        return Err(InvocationError::EmptyResult);
    }

    serde_json::from_value(value).map_err(|e| InvocationError::MalformedOutput(e.to_string()))
}
