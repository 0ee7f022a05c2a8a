//! Frontend model: the camelCase shapes handed to UI callers.
//!
//! # Design
//! These types are what every adapter operation returns, whichever backend is
//! active. The backend's snake_case records live in `wire` and are converted
//! by `transform`; bookings, time slots, insurance and procedure payloads are
//! already in this shape on the wire and deserialize directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of facility a provider operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Hospital,
    Clinic,
    ImagingCenter,
    Lab,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Hospital => "hospital",
            ProviderType::Clinic => "clinic",
            ProviderType::ImagingCenter => "imaging_center",
            ProviderType::Lab => "lab",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Providers carry either a structured postal address or a single street line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Structured(PostalAddress),
    Line(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Facility,
    Staff,
    Equipment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderImage {
    pub id: String,
    pub url: String,
    pub alt: String,
    #[serde(rename = "type")]
    pub kind: ImageKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub patient_name: String,
    pub rating: f64,
    pub date: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,
}

/// A bookable slot. `date` is `YYYY-MM-DD`, `time` a 12-hour clock string
/// such as `09:30 AM`; there is no timezone model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub date: String,
    pub time: String,
    pub available: bool,
}

/// A provider as the UI consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub rating: f64,
    pub review_count: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Human-readable distance, e.g. `2.3 miles`.
    pub distance: String,
    pub address: Address,
    pub neighborhood: String,
    pub availability: String,
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
    pub reviews: Option<Vec<Review>>,
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
    /// Alias of `accepted_insurance` kept for older components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Vec<String>>,

    /// Loyalty points shown next to the provider. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mario_points: Option<u32>,
    /// Recommended-option flag. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mario_pick: Option<bool>,
}

/// Filter bag for a provider search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub procedure: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<ProviderType>,
}

impl SearchParams {
    pub fn new(procedure: impl Into<String>) -> Self {
        Self {
            procedure: procedure.into(),
            ..Self::default()
        }
    }
}

/// Facets the UI can offer as further filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub price_range: (f64, f64),
    pub locations: Vec<String>,
    pub insurance_providers: Vec<String>,
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub providers: Vec<Provider>,
    pub total_count: usize,
    pub filters: SearchFilters,
}

/// Patient and appointment details submitted when booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub provider_id: String,
    pub patient_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub member_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_visit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: String,
    pub confirmation_number: String,
    pub status: BookingStatus,
    pub appointment_date: String,
    pub appointment_time: String,
    pub provider: Provider,
    pub patient: PatientContact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyInsuranceRequest {
    pub member_id: String,
    pub provider_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductible: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinsurance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceVerification {
    pub verified: bool,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub average_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureList {
    pub procedures: Vec<Procedure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceProvider {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceProviderList {
    pub providers: Vec<InsuranceProvider>,
}
