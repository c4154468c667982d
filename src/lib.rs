//! AI-FEED - food donation matching and guidance service
//!
//! Two operations sit on top of a hosted language model: matching a donation
//! with a recipient need, and answering free-text questions about the
//! platform. Matching surfaces every model failure to its caller; guidance
//! always answers, substituting a fixed fallback when the model cannot be used.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{FromRawInput, Guide, MatchError, Matcher, ValidationError, FALLBACK_RESPONSE};
pub use models::{GuidanceRequest, GuidanceResponse, MatchOutcome, MatchRequest, MatchResult};
pub use services::{GeminiClient, InferenceClient, InvocationError};
