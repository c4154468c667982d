// HTTP-level tests for the /api/v1 routes

use actix_web::{test, web, App};
use ai_feed::config::MatchingSettings;
use ai_feed::routes::{configure_routes, AppState};
use ai_feed::{Guide, InferenceClient, InvocationError, Matcher, FALLBACK_RESPONSE};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Answers by operation: match prompts get `match_answer`, others `guidance_answer`
struct RoutedStub {
    match_answer: Option<Value>,
    guidance_answer: Option<Value>,
    calls: AtomicUsize,
}

#[async_trait]
impl InferenceClient for RoutedStub {
    async fn generate(&self, prompt: &str, _schema: &Value) -> Result<Value, InvocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let answer = if prompt.contains("Food Donation:") {
            &self.match_answer
        } else {
            &self.guidance_answer
        };

        answer.clone().ok_or(InvocationError::Unauthorized)
    }
}

fn stub(match_answer: Option<Value>, guidance_answer: Option<Value>) -> Arc<RoutedStub> {
    Arc::new(RoutedStub {
        match_answer,
        guidance_answer,
        calls: AtomicUsize::new(0),
    })
}

fn state(client: Arc<RoutedStub>) -> AppState {
    AppState {
        matcher: Matcher::new(client.clone()),
        guide: Guide::new(client),
        matching: MatchingSettings::default(),
        model: "gemini-2.0-flash".to_string(),
        credential_configured: false,
    }
}

fn hope_shelter() -> Value {
    json!({"match": {"recipient": "Hope Shelter", "distance": "0.5km", "notes": "Within radius"}})
}

#[actix_web::test]
async fn test_health_reports_degraded_without_credential() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(stub(None, None))))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "degraded");
    assert_eq!(body["credentialConfigured"], false);
    assert_eq!(body["model"], "gemini-2.0-flash");
}

#[actix_web::test]
async fn test_match_success_outcome() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(stub(Some(hope_shelter()), None))))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({
            "foodType": "Cooked Meals",
            "quantity": "50",
            "donorLatitude": 19.076,
            "donorLongitude": 72.8777,
            "recipientNeed": "meals for 60 people",
            "recipientLatitude": 19.075,
            "recipientLongitude": 72.87,
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({
            "status": "matched",
            "data": {"recipient": "Hope Shelter", "distance": "0.5km", "notes": "Within radius"}
        })
    );
}

#[actix_web::test]
async fn test_match_failure_renders_no_match() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(stub(None, None))))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/donations")
        .set_json(json!({
            "foodType": "Bread loaves",
            "quantity": 20,
            "location": "Bandra West",
            "donorLatitude": 19.06,
            "donorLongitude": 72.83,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "no_match");
    assert_eq!(
        body["message"],
        "Unable to find a match at this time. Please try again later."
    );
}

#[actix_web::test]
async fn test_recipient_request_is_matched() {
    let client = stub(Some(hope_shelter()), None);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(client.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/requests")
        .set_json(json!({
            "need": "rice for 30 families",
            "quantity": 30,
            "location": "Dharavi",
            "latitude": 19.04,
            "longitude": 72.85,
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "matched");
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_recipient_request_no_match_uses_request_wording() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(stub(None, None))))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/requests")
        .set_json(json!({
            "need": "rice for 30 families",
            "quantity": 30,
            "location": "Dharavi",
            "latitude": 19.04,
            "longitude": 72.85,
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({"status": "no_match", "message": "No match found. Please try again later."})
    );
}

#[actix_web::test]
async fn test_validation_error_names_field_and_skips_model() {
    let client = stub(Some(hope_shelter()), None);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(client.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .set_json(json!({
            "foodType": "Cooked Meals",
            "quantity": 50,
            "donorLatitude": 123.0,
            "donorLongitude": 72.8777,
            "recipientNeed": "meals for 60 people",
            "recipientLatitude": 19.075,
            "recipientLongitude": 72.87,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["field"], "donorLatitude");
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_guidance_answers_even_when_model_fails() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(stub(None, None))))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/guidance")
        .set_json(json!({"message": "How do I donate?"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "response": FALLBACK_RESPONSE }));
}

#[actix_web::test]
async fn test_guidance_rejects_empty_message() {
    let client = stub(None, Some(json!({"response": "unused"})));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(client.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/guidance")
        .set_json(json!({"message": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_guidance_rejects_blank_message() {
    let client = stub(None, Some(json!({"response": "unused"})));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(client.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/guidance")
        .set_json(json!({"message": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "message");
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}
