use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;

use crate::core::FromRawInput;
use crate::models::GuidanceRequest;
use crate::routes::matches::{validation_failed, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/guidance", web::post().to(provide_guidance));
}

/// Chatbot endpoint
///
/// POST /api/v1/guidance
///
/// Request body:
/// ```json
/// { "message": "How do I donate food?" }
/// ```
///
/// Answers 200 for every valid message, using the fallback text when the
/// model is unavailable.
async fn provide_guidance(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    match GuidanceRequest::parse(&body) {
        Ok(request) => match state.guide.respond(&request).await {
            Ok(response) => HttpResponse::Ok().json(response),
            Err(e) => validation_failed(&e),
        },
        Err(e) => validation_failed(&e),
    }
}
