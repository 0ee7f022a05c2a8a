//! Backend wire schema: the snake_case records returned by `/search` and
//! `/providers/{id}`.
//!
//! # Design
//! Defined independently from the mock-server crate; the integration tests in
//! `core/tests/` catch schema drift between the two. Images and time slots
//! share their shape with the frontend model and reuse those types.

use serde::{Deserialize, Serialize};

use crate::types::{ProviderImage, ProviderType, TimeSlot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcReview {
    pub id: String,
    pub patient_name: String,
    pub rating: f64,
    pub date: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,
}

/// Provider record as the backend sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcProvider {
    pub id: String,
    pub name: String,
    pub facility_type: ProviderType,
    pub rating: f64,
    pub review_count: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub distance_miles: f64,
    pub address: AcAddress,
    pub neighborhood: String,
    pub availability_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<String>>,
    pub accepts_insurance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_partners: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_insurance: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProviderImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<AcReview>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_time_slots: Option<Vec<TimeSlot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheelchair_accessible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_referral: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_patient_accepted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiated_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mario_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mario_pick: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcSearchFilters {
    pub price_range: (f64, f64),
    pub locations: Vec<String>,
    pub insurance_providers: Vec<String>,
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcSearchResponse {
    pub providers: Vec<AcProvider>,
    pub total_count: usize,
    pub filters: AcSearchFilters,
}

/// Error body shape; every field is optional because backends disagree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
