//! Prompt templates and output schemas for the two operations.
//!
//! Rendering is plain substitution: the same request always yields the same
//! prompt text.

use serde_json::{json, Value};

use crate::models::{GuidanceRequest, MatchRequest};

/// Render the matching instruction for a validated request
pub fn render_match_prompt(request: &MatchRequest) -> String {
    format!(
        "You are an AI assistant designed to match food donations with recipient needs, leveraging semantic similarity and proximity.

Analyze the following food donation and recipient request details to find the best match. Consider the type of food, quantity, and location of both the donor and recipient.

Food Donation:
- Type: {food_type}
- Quantity: {quantity}
- Location (Latitude, Longitude): ({donor_lat}, {donor_lon})

Recipient Request:
- Need: {need}
- Location (Latitude, Longitude): ({recipient_lat}, {recipient_lon})

Determine the most suitable recipient for the food donation based on the provided information. Prioritize matches within a 5km radius. Return the recipient name, distance between donor and recipient and any notes or considerations for the match.

Ensure the output matches the specified JSON schema.",
        food_type = request.food_type,
        quantity = request.quantity,
        donor_lat = request.donor_latitude,
        donor_lon = request.donor_longitude,
        need = request.recipient_need,
        recipient_lat = request.recipient_latitude,
        recipient_lon = request.recipient_longitude,
    )
}

/// Render the chatbot instruction for a validated request
pub fn render_guidance_prompt(request: &GuidanceRequest) -> String {
    format!(
        "You are a chatbot designed to provide guidance to users on the AI-FEED platform, offering information on donating or receiving food, answering common questions, and providing helpful tips to facilitate engagement and effective platform usage.

User Message: {message}

Chatbot Response: ",
        message = request.message,
    )
}

/// Output schema for matching: `{"match": {recipient, distance, notes}}`
pub fn match_output_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "match": {
                "type": "OBJECT",
                "properties": {
                    "recipient": {
                        "type": "STRING",
                        "description": "The name of the recipient matched with the donation."
                    },
                    "distance": {
                        "type": "STRING",
                        "description": "The distance between the donor and recipient locations (e.g., 5km)."
                    },
                    "notes": {
                        "type": "STRING",
                        "description": "Additional notes or considerations for the match."
                    }
                },
                "required": ["recipient", "distance", "notes"]
            }
        },
        "required": ["match"]
    })
}

/// Output schema for guidance: `{"response": text}`
pub fn guidance_output_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "response": {
                "type": "STRING",
                "description": "The chatbot response to the user message."
            }
        },
        "required": ["response"]
    })
}
