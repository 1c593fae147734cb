//! Typed backend records.
//!
//! Every JSON body the dashboards consume is decoded into one of these types
//! at the boundary. Field names follow the backend's JSON. Status and role
//! strings the client does not know decode to an `Unknown` variant so a single
//! odd value never rejects a whole list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a backend entity whose full representation is not loaded yet.
pub type ResourceRef = i64;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Owner,
    Sitter,
    Admin,
    #[serde(other)]
    Unknown,
}

/// Moderation state of a sitter account.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SitterStatus {
    Pending,
    Approved,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Lifecycle state of a booking.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: ResourceRef,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub pet_id: ResourceRef,
    pub owner_id: ResourceRef,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub notes: String,
}

/// Sitter profile row as returned by `/api/admin/sitters/pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sitter {
    pub sitter_id: ResourceRef,
    #[serde(default)]
    pub experience_years: i64,
    #[serde(default)]
    pub certificates: String,
    #[serde(default)]
    pub preferences: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: SitterStatus,
}

/// Full sitter record from `/api/admin/sitters/{id}`: the profile plus the account fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitterDetails {
    #[serde(flatten)]
    pub sitter: Sitter,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub service_id: ResourceRef,
    pub sitter_id: ResourceRef,
    #[serde(rename = "type")]
    pub kind: String,
    pub price_per_hour: f64,
    #[serde(default)]
    pub description: String,
}

/// Search hit from `/api/services/search`, a service joined with its sitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceWithSitter {
    #[serde(flatten)]
    pub service: Service,
    #[serde(default)]
    pub sitter_name: Option<String>,
    #[serde(default)]
    pub sitter_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: ResourceRef,
    pub owner_id: ResourceRef,
    pub sitter_id: ResourceRef,
    pub pet_id: ResourceRef,
    #[serde(default)]
    pub service_id: ResourceRef,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: ResourceRef,
    pub booking_id: ResourceRef,
    #[serde(default)]
    pub owner_id: ResourceRef,
    #[serde(default)]
    pub sitter_id: ResourceRef,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate rating from `/api/sitters/{id}/rating`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: ResourceRef,
    pub role: Role,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub booking_id: ResourceRef,
    pub sitter_id: ResourceRef,
    pub rating: i64,
    pub comment: String,
}

/// Body of `PUT /api/reviews/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewUpdate {
    pub rating: i64,
    pub comment: String,
}
