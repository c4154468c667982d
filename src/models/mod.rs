// Model exports
pub mod requests;
pub mod responses;

pub use requests::{DonationForm, GuidanceRequest, MatchRequest, RecipientRequestForm};
pub use responses::{
    ErrorResponse, GuidanceResponse, HealthResponse, MatchOutcome, MatchOutput, MatchResult,
};
