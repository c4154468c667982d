use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::{DefaultDonor, DefaultRecipient};
use crate::core::validation::{FromRawInput, RawInput, ValidationError};

/// A donation paired with a recipient need, submitted for matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub food_type: String,
    #[validate(range(exclusive_min = 0.0, message = "must be a positive number"))]
    pub quantity: f64,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub donor_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub donor_longitude: f64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub recipient_need: String,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub recipient_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub recipient_longitude: f64,
}

impl FromRawInput for MatchRequest {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("food_type", "foodType"),
        ("quantity", "quantity"),
        ("donor_latitude", "donorLatitude"),
        ("donor_longitude", "donorLongitude"),
        ("recipient_need", "recipientNeed"),
        ("recipient_latitude", "recipientLatitude"),
        ("recipient_longitude", "recipientLongitude"),
    ];

    fn from_raw(raw: &RawInput<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            food_type: raw.text("foodType")?,
            quantity: raw.number("quantity")?,
            donor_latitude: raw.number("donorLatitude")?,
            donor_longitude: raw.number("donorLongitude")?,
            recipient_need: raw.text("recipientNeed")?,
            recipient_latitude: raw.number("recipientLatitude")?,
            recipient_longitude: raw.number("recipientLongitude")?,
        })
    }
}

/// A free-text question for the chatbot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GuidanceRequest {
    #[validate(
        length(min = 1, message = "must not be empty"),
        custom(function = "crate::core::validation::validate_not_blank")
    )]
    pub message: String,
}

impl FromRawInput for GuidanceRequest {
    const FIELDS: &'static [(&'static str, &'static str)] = &[("message", "message")];

    fn from_raw(raw: &RawInput<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            message: raw.text("message")?,
        })
    }
}

/// Donor-side form: what is offered and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DonationForm {
    #[validate(length(min = 3, message = "Food type must be at least 3 characters"))]
    pub food_type: String,
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be a positive number"))]
    pub quantity: f64,
    #[validate(length(min = 3, message = "Location must be at least 3 characters"))]
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub donor_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub donor_longitude: f64,
}

impl DonationForm {
    /// Pair the donation with the recipient the platform currently routes to
    pub fn into_match_request(self, recipient: &DefaultRecipient) -> MatchRequest {
        MatchRequest {
            food_type: self.food_type,
            quantity: self.quantity,
            donor_latitude: self.donor_latitude,
            donor_longitude: self.donor_longitude,
            recipient_need: recipient.need.clone(),
            recipient_latitude: recipient.latitude,
            recipient_longitude: recipient.longitude,
        }
    }
}

impl FromRawInput for DonationForm {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("food_type", "foodType"),
        ("quantity", "quantity"),
        ("location", "location"),
        ("donor_latitude", "donorLatitude"),
        ("donor_longitude", "donorLongitude"),
    ];

    fn from_raw(raw: &RawInput<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            food_type: raw.text("foodType")?,
            quantity: raw.number("quantity")?,
            location: raw.text("location")?,
            donor_latitude: raw.number("donorLatitude")?,
            donor_longitude: raw.number("donorLongitude")?,
        })
    }
}

/// Recipient-side form: what is needed and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecipientRequestForm {
    #[validate(length(min = 3, message = "Need must be at least 3 characters"))]
    pub need: String,
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be a positive number"))]
    pub quantity: f64,
    #[validate(length(min = 3, message = "Location must be at least 3 characters"))]
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
}

impl RecipientRequestForm {
    /// Pair the need with the donor the platform currently routes from
    pub fn into_match_request(self, donor: &DefaultDonor) -> MatchRequest {
        MatchRequest {
            food_type: donor.food_type.clone(),
            quantity: donor.quantity,
            donor_latitude: donor.latitude,
            donor_longitude: donor.longitude,
            recipient_need: self.need,
            recipient_latitude: self.latitude,
            recipient_longitude: self.longitude,
        }
    }
}

impl FromRawInput for RecipientRequestForm {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("need", "need"),
        ("quantity", "quantity"),
        ("location", "location"),
        ("latitude", "latitude"),
        ("longitude", "longitude"),
    ];

    fn from_raw(raw: &RawInput<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            need: raw.text("need")?,
            quantity: raw.number("quantity")?,
            location: raw.text("location")?,
            latitude: raw.number("latitude")?,
            longitude: raw.number("longitude")?,
        })
    }
}
