//! In-memory stand-in for the backend.
//!
//! # Design
//! Every call sleeps for the configured latency, then answers from the
//! fixture dataset in the same frontend shape the real client produces.
//! Insurance verification and slot availability are random on purpose so the
//! UI can exercise its failure paths; both probabilities and the RNG seed come
//! from `MockConfig`.

use std::fmt::Debug;
use std::sync::Mutex;
use std::time::Instant;

use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MockConfig;
use crate::error::ApiError;
use crate::fixtures::{self, SLOT_TIMES};
use crate::types::{
    BookingData, BookingResponse, BookingStatus, CancelResponse, Coverage, InsuranceProviderList,
    InsuranceVerification, PatientContact, ProcedureList, Provider, ProviderType, SearchParams,
    SearchResponse, TimeSlot,
};

/// Query fragments treated as imaging searches.
const IMAGING_KEYWORDS: [&str; 7] = ["mri", "ct", "scan", "xray", "x-ray", "ultrasound", "imaging"];

pub struct MockApiClient {
    config: MockConfig,
    providers: Vec<Provider>,
    rng: Mutex<StdRng>,
}

impl MockApiClient {
    pub fn new(mut config: MockConfig) -> Self {
        let defaults = MockConfig::default();
        config.verify_failure_rate =
            probability(config.verify_failure_rate, defaults.verify_failure_rate);
        config.slot_availability = probability(config.slot_availability, defaults.slot_availability);

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut providers = fixtures::providers();
        let today = Utc::now().date_naive();
        if let Some(flagship) = providers.first_mut() {
            flagship.available_time_slots = Some(weekday_slots(today, config.slot_availability, &mut rng));
        }
        Self {
            config,
            providers,
            rng: Mutex::new(rng),
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Log the request, wait out the simulated latency, then log the answer.
    async fn respond<T, R>(
        &self,
        operation: &'static str,
        request: R,
        answer: impl FnOnce() -> Result<T, ApiError>,
    ) -> Result<T, ApiError>
    where
        T: Debug,
        R: Debug,
    {
        tracing::debug!(operation, ?request, "mock request");
        tokio::time::sleep(self.config.latency).await;
        let started = Instant::now();
        let result = answer();
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(response) => tracing::debug!(operation, duration_ms, ?response, "mock response"),
            Err(e) => tracing::debug!(operation, duration_ms, error = %e, "mock error"),
        }
        result
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    fn find_provider(&self, id: &str) -> Result<&Provider, ApiError> {
        self.providers
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound {
                resource: "Provider",
                id: id.to_string(),
            })
    }

    pub async fn search_providers(&self, params: &SearchParams) -> Result<SearchResponse, ApiError> {
        self.respond("searchProviders", params, || {
            let providers: Vec<Provider> = filter_providers(&self.providers, params)
                .into_iter()
                .cloned()
                .collect();
            Ok(SearchResponse {
                total_count: providers.len(),
                providers,
                filters: fixtures::search_filters(),
            })
        })
        .await
    }

    pub async fn get_provider_details(&self, id: &str) -> Result<Provider, ApiError> {
        self.respond("getProviderDetails", id, || self.find_provider(id).cloned())
            .await
    }

    pub async fn create_booking(&self, data: &BookingData) -> Result<BookingResponse, ApiError> {
        self.respond("createBooking", data, || {
            let provider = self.find_provider(&data.provider_id)?.clone();
            Ok(BookingResponse {
                booking_id: format!("booking_{}", Utc::now().timestamp_millis()),
                confirmation_number: self.with_rng(confirmation_number),
                status: BookingStatus::Confirmed,
                appointment_date: data.preferred_date.clone(),
                appointment_time: "10:00 AM".to_string(),
                provider,
                patient: PatientContact {
                    name: data.patient_name.clone(),
                    email: data.email.clone(),
                    phone: data.phone.clone(),
                },
            })
        })
        .await
    }

    /// Returns a canned confirmed booking for provider `1` under the given id.
    pub async fn get_booking_details(&self, booking_id: &str) -> Result<BookingResponse, ApiError> {
        self.respond("getBookingDetails", booking_id, || {
            let provider = self.find_provider("1")?.clone();
            Ok(BookingResponse {
                booking_id: booking_id.to_string(),
                confirmation_number: self.with_rng(confirmation_number),
                status: BookingStatus::Confirmed,
                appointment_date: "2025-10-26".to_string(),
                appointment_time: "10:00 AM".to_string(),
                provider,
                patient: PatientContact {
                    name: "John Doe".to_string(),
                    email: "john@example.com".to_string(),
                    phone: "(555) 123-4567".to_string(),
                },
            })
        })
        .await
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> Result<CancelResponse, ApiError> {
        self.respond("cancelBooking", booking_id, || Ok(CancelResponse { success: true }))
            .await
    }

    pub async fn get_available_time_slots(
        &self,
        provider_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<TimeSlot>, ApiError> {
        self.respond("getAvailableTimeSlots", (provider_id, date), || {
            let today = Utc::now().date_naive();
            let availability = self.config.slot_availability;
            Ok(self.with_rng(|rng| week_slots(today, date, availability, rng)))
        })
        .await
    }

    pub async fn verify_insurance(
        &self,
        member_id: &str,
        provider_id: &str,
    ) -> Result<InsuranceVerification, ApiError> {
        self.respond("verifyInsurance", (member_id, provider_id), || {
            let failure_rate = self.config.verify_failure_rate;
            let verified = !self.with_rng(|rng| rng.gen_bool(failure_rate));
            Ok(InsuranceVerification {
                verified,
                coverage: Coverage {
                    copay: Some(25.0),
                    deductible: Some(500.0),
                    coinsurance: Some(0.2),
                },
            })
        })
        .await
    }

    pub async fn get_procedures(&self, query: Option<&str>) -> Result<ProcedureList, ApiError> {
        self.respond("getProcedures", query, || {
            let procedures = fixtures::procedures();
            let procedures = match query.filter(|q| !q.is_empty()) {
                Some(q) => {
                    let needle = q.to_lowercase();
                    procedures
                        .into_iter()
                        .filter(|p| p.name.to_lowercase().contains(&needle))
                        .collect()
                }
                None => procedures,
            };
            Ok(ProcedureList { procedures })
        })
        .await
    }

    pub async fn get_insurance_providers(&self) -> Result<InsuranceProviderList, ApiError> {
        self.respond("getInsuranceProviders", (), || {
            Ok(InsuranceProviderList {
                providers: fixtures::insurance_providers(),
            })
        })
        .await
    }
}

/// A usable `gen_bool` probability: NaN falls back, anything else is clamped.
fn probability(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Apply every supplied filter. A query matches on name, neighborhood or
/// facility type (underscores read as spaces); imaging queries additionally
/// match every imaging center and hospital.
pub fn filter_providers<'a>(providers: &'a [Provider], params: &SearchParams) -> Vec<&'a Provider> {
    providers
        .iter()
        .filter(|p| matches_query(p, &params.procedure))
        .filter(|p| match params.price_range {
            Some((min, max)) => p.price >= min && p.price <= max,
            None => true,
        })
        .filter(|p| params.types.is_empty() || params.types.contains(&p.provider_type))
        .filter(|p| match params.min_rating {
            Some(floor) => p.rating >= floor,
            None => true,
        })
        .collect()
}

fn matches_query(provider: &Provider, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let imaging_search = IMAGING_KEYWORDS.iter().any(|k| query.contains(k));
    if imaging_search
        && matches!(
            provider.provider_type,
            ProviderType::ImagingCenter | ProviderType::Hospital
        )
    {
        return true;
    }

    provider.name.to_lowercase().contains(&query)
        || provider.neighborhood.to_lowercase().contains(&query)
        || provider.provider_type.as_str().replace('_', " ").contains(&query)
}

/// `CONF` followed by nine characters from `[0-9A-Z]`.
fn confirmation_number(rng: &mut StdRng) -> String {
    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| char::from(c).to_ascii_uppercase())
        .collect();
    format!("CONF{suffix}")
}

/// Slots for the seven days after `today`, optionally narrowed to one date.
fn week_slots(today: NaiveDate, date: Option<&str>, availability: f64, rng: &mut StdRng) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    for offset in 1..=7u64 {
        let Some(day) = today.checked_add_days(Days::new(offset)) else {
            continue;
        };
        let day_str = day.format("%Y-%m-%d").to_string();
        if date.is_some_and(|d| !d.is_empty() && d != day_str) {
            continue;
        }
        push_day(&mut slots, offset, &day_str, availability, rng);
    }
    slots
}

/// Week of slots for a provider's detail page, closed on Sundays.
fn weekday_slots(today: NaiveDate, availability: f64, rng: &mut StdRng) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    for offset in 1..=7u64 {
        let Some(day) = today.checked_add_days(Days::new(offset)) else {
            continue;
        };
        if day.weekday() == Weekday::Sun {
            continue;
        }
        let day_str = day.format("%Y-%m-%d").to_string();
        push_day(&mut slots, offset, &day_str, availability, rng);
    }
    slots
}

fn push_day(slots: &mut Vec<TimeSlot>, offset: u64, day: &str, availability: f64, rng: &mut StdRng) {
    for (index, time) in SLOT_TIMES.iter().enumerate() {
        slots.push(TimeSlot {
            id: format!("slot-{offset}-{index}"),
            date: day.to_string(),
            time: time.to_string(),
            available: rng.gen_bool(availability),
        });
    }
}
