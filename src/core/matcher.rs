use std::sync::Arc;
use thiserror::Error;

use crate::core::invoker::invoke_structured;
use crate::core::prompts::{match_output_schema, render_match_prompt};
use crate::core::validation::{FromRawInput, ValidationError};
use crate::models::{MatchOutput, MatchRequest, MatchResult};
use crate::services::{InferenceClient, InvocationError};

/// Errors surfaced by the matching operation
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid match request: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

/// Matching operation: pairs a donation with a recipient through the model
///
/// The proximity judgment ("prioritize within 5km") is left to the model;
/// nothing here computes distances. Failures are never recovered locally:
/// every `InvocationError` reaches the caller, who decides how to present
/// the absence of a match.
#[derive(Clone)]
pub struct Matcher {
    client: Arc<dyn InferenceClient>,
}

impl Matcher {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// Find the best recipient for a request
    ///
    /// # Returns
    /// A fully populated `MatchResult`, the first constraint the request
    /// violates (checked before the model is called), or the invocation
    /// failure. A result with any blank field counts as an empty result.
    pub async fn find_match(&self, request: &MatchRequest) -> Result<MatchResult, MatchError> {
        request.check()?;

        let prompt = render_match_prompt(request);

        tracing::info!(
            "Matching {} x {} against need '{}'",
            request.quantity,
            request.food_type,
            request.recipient_need
        );

        let output: MatchOutput =
            invoke_structured(self.client.as_ref(), &prompt, &match_output_schema()).await?;

        if !output.matched.is_complete() {
            return Err(InvocationError::EmptyResult.into());
        }

        tracing::info!(
            "Matched with {} ({})",
            output.matched.recipient_name,
            output.matched.distance_label
        );

        Ok(output.matched)
    }
}
