use serde::{Deserialize, Serialize};

/// Recipient proposed by the model for a donation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Name of the matched recipient
    #[serde(rename = "recipient")]
    pub recipient_name: String,
    /// Free-form distance label, e.g. "5km"
    #[serde(rename = "distance")]
    pub distance_label: String,
    pub notes: String,
}

impl MatchResult {
    /// A result is usable only when every field carries text
    pub fn is_complete(&self) -> bool {
        !self.recipient_name.trim().is_empty()
            && !self.distance_label.trim().is_empty()
            && !self.notes.trim().is_empty()
    }
}

/// Structured output requested from the model for matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutput {
    #[serde(rename = "match")]
    pub matched: MatchResult,
}

/// Chatbot answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceResponse {
    pub response: String,
}

/// Presentation contract for a match attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched { data: MatchResult },
    NoMatch { message: String },
}

impl MatchOutcome {
    pub const NO_MATCH_MESSAGE: &'static str =
        "Unable to find a match at this time. Please try again later.";

    /// Wording shown on the recipient-side form
    pub const NO_MATCH_REQUEST_MESSAGE: &'static str = "No match found. Please try again later.";

    pub fn no_match() -> Self {
        Self::no_match_with(Self::NO_MATCH_MESSAGE)
    }

    pub fn no_match_with(message: &str) -> Self {
        MatchOutcome::NoMatch {
            message: message.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    #[serde(rename = "credentialConfigured")]
    pub credential_configured: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<String>,
    pub status_code: u16,
}
