use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;

use crate::config::MatchingSettings;
use crate::core::{FromRawInput, Guide, MatchError, Matcher, ValidationError};
use crate::models::{
    DonationForm, ErrorResponse, HealthResponse, MatchOutcome, MatchRequest, RecipientRequestForm,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub guide: Guide,
    pub matching: MatchingSettings,
    pub model: String,
    pub credential_configured: bool,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::post().to(find_match))
        .route("/donations", web::post().to(submit_donation))
        .route("/requests", web::post().to(submit_request));
}

/// 400 response naming the offending field
pub fn validation_failed(err: &ValidationError) -> HttpResponse {
    tracing::info!("Validation failed: {}", err);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_failed".to_string(),
        message: err.to_string(),
        field: Some(err.field.clone()),
        status_code: 400,
    })
}

/// Health check endpoint
///
/// Reports "degraded" while running on the placeholder credential.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.credential_configured { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.model.clone(),
        credential_configured: state.credential_configured,
        timestamp: chrono::Utc::now(),
    })
}

/// Run a match and translate its result into the presentation outcome
async fn respond_with_match(
    state: &AppState,
    request: MatchRequest,
    no_match_message: &str,
) -> HttpResponse {
    let request_id = uuid::Uuid::new_v4();

    match state.matcher.find_match(&request).await {
        Ok(result) => {
            tracing::info!("[{}] Match found: {}", request_id, result.recipient_name);
            HttpResponse::Ok().json(MatchOutcome::Matched { data: result })
        }
        Err(MatchError::Validation(e)) => validation_failed(&e),
        Err(MatchError::Invocation(e)) => {
            tracing::error!("[{}] Donation matching error: {}", request_id, e);
            HttpResponse::Ok().json(MatchOutcome::no_match_with(no_match_message))
        }
    }
}

/// Match a donation against a recipient need
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "foodType": "Cooked Meals",
///   "quantity": 50,
///   "donorLatitude": 19.076,
///   "donorLongitude": 72.8777,
///   "recipientNeed": "meals for 60 people",
///   "recipientLatitude": 19.075,
///   "recipientLongitude": 72.87
/// }
/// ```
async fn find_match(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    match MatchRequest::parse(&body) {
        Ok(request) => respond_with_match(&state, request, MatchOutcome::NO_MATCH_MESSAGE).await,
        Err(e) => validation_failed(&e),
    }
}

/// Donor-side form, matched against the default recipient
///
/// POST /api/v1/donations
async fn submit_donation(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    match DonationForm::parse(&body) {
        Ok(form) => {
            tracing::info!("Donation of {} from {}", form.food_type, form.location);
            let request = form.into_match_request(&state.matching.default_recipient);
            respond_with_match(&state, request, MatchOutcome::NO_MATCH_MESSAGE).await
        }
        Err(e) => validation_failed(&e),
    }
}

/// Recipient-side form, matched against the default donor
///
/// POST /api/v1/requests
async fn submit_request(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    match RecipientRequestForm::parse(&body) {
        Ok(form) => {
            tracing::info!("Request for {} at {}", form.need, form.location);
            let request = form.into_match_request(&state.matching.default_donor);
            respond_with_match(&state, request, MatchOutcome::NO_MATCH_REQUEST_MESSAGE).await
        }
        Err(e) => validation_failed(&e),
    }
}
