use serde_json::{Map, Value};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Input rejected before any call to the inference endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire name of the first offending field
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Untyped request body as received on the wire
pub struct RawInput<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawInput<'a> {
    pub fn new(value: &'a Value) -> Result<Self, ValidationError> {
        value
            .as_object()
            .map(|fields| Self { fields })
            .ok_or_else(|| ValidationError::new("body", "must be a JSON object"))
    }

    /// Required text field. Length constraints are left to the typed schema.
    pub fn text(&self, field: &str) -> Result<String, ValidationError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Err(ValidationError::new(field, "is required")),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ValidationError::new(field, "must be text")),
        }
    }

    /// Required numeric field, coercing numeric-looking text
    pub fn number(&self, field: &str) -> Result<f64, ValidationError> {
        let value = match self.fields.get(field) {
            None | Some(Value::Null) => return Err(ValidationError::new(field, "is required")),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        value
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValidationError::new(field, "must be a number"))
    }
}

/// Typed request that can be built from a raw body and checked against its schema
pub trait FromRawInput: Validate + Sized {
    /// (struct field, wire name) pairs in declaration order
    const FIELDS: &'static [(&'static str, &'static str)];

    /// Presence and type coercion, field by field in declaration order
    fn from_raw(raw: &RawInput<'_>) -> Result<Self, ValidationError>;

    /// Check the declared constraints, failing on the first offending field
    fn check(&self) -> Result<(), ValidationError> {
        self.validate()
            .map_err(|errors| first_error(Self::FIELDS, &errors))
    }

    /// Coerce and validate
    fn parse(value: &Value) -> Result<Self, ValidationError> {
        let raw = RawInput::new(value)?;
        let request = Self::from_raw(&raw)?;
        request.check()?;
        Ok(request)
    }
}

/// Pick the earliest declared field out of the validator's unordered report
fn first_error(fields: &[(&str, &str)], errors: &ValidationErrors) -> ValidationError {
    let field_errors = errors.field_errors();

    fields
        .iter()
        .find_map(|(name, wire)| {
            field_errors.iter().find_map(|(key, errs)| {
                let key = key.to_string();
                if key == *name || key == *wire {
                    errs.first().map(|err| ValidationError::new(*wire, describe(err)))
                } else {
                    None
                }
            })
        })
        .unwrap_or_else(|| ValidationError::new("body", errors.to_string()))
}

/// Rejects text made only of whitespace. Empty text is left to `length`.
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if !value.is_empty() && value.trim().is_empty() {
        let mut err = validator::ValidationError::new("not_blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn describe(err: &validator::ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => format!("failed {} check", err.code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GuidanceRequest, MatchRequest};
    use serde_json::json;

    fn valid_match_body() -> Value {
        json!({
            "foodType": "Cooked Meals",
            "quantity": 50,
            "donorLatitude": 19.076,
            "donorLongitude": 72.8777,
            "recipientNeed": "meals for 60 people",
            "recipientLatitude": 19.075,
            "recipientLongitude": 72.87,
        })
    }

    fn reject(field: &str, value: Value) -> ValidationError {
        let mut body = valid_match_body();
        body[field] = value;
        MatchRequest::parse(&body).unwrap_err()
    }

    #[test]
    fn test_valid_match_request() {
        let request = MatchRequest::parse(&valid_match_body()).unwrap();
        assert_eq!(request.food_type, "Cooked Meals");
        assert_eq!(request.quantity, 50.0);
        assert_eq!(request.recipient_longitude, 72.87);
    }

    #[test]
    fn test_numeric_text_is_coerced() {
        let mut body = valid_match_body();
        body["quantity"] = json!(" 12.5 ");
        body["donorLatitude"] = json!("-33.86");

        let request = MatchRequest::parse(&body).unwrap();
        assert_eq!(request.quantity, 12.5);
        assert_eq!(request.donor_latitude, -33.86);
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        assert_eq!(reject("quantity", json!(0)).field, "quantity");
        assert_eq!(reject("quantity", json!(-3)).field, "quantity");
        assert_eq!(reject("quantity", json!("0")).field, "quantity");
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        assert_eq!(reject("donorLatitude", json!(90.5)).field, "donorLatitude");
        assert_eq!(reject("recipientLatitude", json!(-91)).field, "recipientLatitude");
        assert_eq!(reject("donorLongitude", json!(180.01)).field, "donorLongitude");
        assert_eq!(reject("recipientLongitude", json!("-200")).field, "recipientLongitude");
    }

    #[test]
    fn test_accepts_boundary_coordinates() {
        let mut body = valid_match_body();
        body["donorLatitude"] = json!(-90);
        body["donorLongitude"] = json!(180);
        body["recipientLatitude"] = json!(90);
        body["recipientLongitude"] = json!(-180);
        assert!(MatchRequest::parse(&body).is_ok());
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        let err = reject("quantity", json!("fifty"));
        assert_eq!(err, ValidationError::new("quantity", "must be a number"));

        assert_eq!(reject("donorLatitude", json!("NaN")).field, "donorLatitude");
        assert_eq!(reject("donorLongitude", json!(true)).field, "donorLongitude");
    }

    #[test]
    fn test_rejects_empty_text() {
        let err = reject("foodType", json!(""));
        assert_eq!(err, ValidationError::new("foodType", "must not be empty"));
        assert_eq!(reject("recipientNeed", json!("")).field, "recipientNeed");
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut body = valid_match_body();
        body.as_object_mut().unwrap().remove("recipientNeed");

        let err = MatchRequest::parse(&body).unwrap_err();
        assert_eq!(err, ValidationError::new("recipientNeed", "is required"));
    }

    #[test]
    fn test_reports_first_offending_field() {
        let mut body = valid_match_body();
        body["foodType"] = json!("");
        body["quantity"] = json!(-1);
        body["recipientLongitude"] = json!(500);

        assert_eq!(MatchRequest::parse(&body).unwrap_err().field, "foodType");
    }

    #[test]
    fn test_guidance_request() {
        let request = GuidanceRequest::parse(&json!({"message": "How do I donate?"})).unwrap();
        assert_eq!(request.message, "How do I donate?");

        let err = GuidanceRequest::parse(&json!({"message": ""})).unwrap_err();
        assert_eq!(err.field, "message");
    }

    #[test]
    fn test_blank_message_is_rejected() {
        let err = GuidanceRequest::parse(&json!({"message": "  \n\t "})).unwrap_err();
        assert_eq!(err, ValidationError::new("message", "must not be blank"));
    }

    #[test]
    fn test_check_on_constructed_request() {
        let mut request = MatchRequest::parse(&valid_match_body()).unwrap();
        assert!(request.check().is_ok());

        request.recipient_latitude = 123.0;
        assert_eq!(request.check().unwrap_err().field, "recipientLatitude");
    }

    #[test]
    fn test_body_must_be_object() {
        let err = GuidanceRequest::parse(&json!(["How do I donate?"])).unwrap_err();
        assert_eq!(err.field, "body");
    }
}
