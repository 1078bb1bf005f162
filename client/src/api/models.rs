//! Wire models for the marketplace REST API.
//!
//! These mirror the server's camelCase JSON. Identifiers stay as opaque
//! strings; the client never interprets them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The authenticated user's profile as served by `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// A cat available for adoption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatListing {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub age_months: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    pub shelter_id: String,
    #[serde(default)]
    pub adopted: bool,
}

/// Payload for submitting an adoption application.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[validate(length(min = 1, message = "Cat id is required"))]
    pub cat_id: String,

    #[validate(length(min = 1, message = "A short message to the shelter is required"))]
    pub message: String,
}

/// An adoption application as echoed back by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionApplication {
    pub id: String,
    pub cat_id: String,
    pub adopter_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for starting a donation.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    #[validate(range(min = 1, message = "Donation amount must be positive"))]
    pub amount_cents: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_id: Option<String>,
}

/// A donation checkout session created by the server. The gateway redirect
/// is handled by the host; the client only carries the URL through.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSession {
    pub id: String,
    pub checkout_url: String,
}
