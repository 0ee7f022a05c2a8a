//! In-memory stand-in for the Mario Health backend.
//!
//! Serves the snake_case provider contract plus the camelCase booking,
//! time-slot, insurance and procedure payloads from a small fixture set.
//! A `Backend` handle can inject faults (error statuses, hangs, a required
//! bearer token) and reports how often each path was hit, so clients can be
//! tested against retries and timeouts over real HTTP.

mod fixtures;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub url: String,
    pub alt: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub patient_name: String,
    pub rating: f64,
    pub date: String,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,
}

/// Provider record in the backend's snake_case schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub facility_type: String,
    pub rating: f64,
    pub review_count: u32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub distance_miles: f64,
    pub address: Address,
    pub neighborhood: String,
    pub availability_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<String>>,
    pub accepts_insurance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_partners: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_insurance: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheelchair_accessible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_referral: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_patient_accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiated_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchFilters {
    pub price_range: (f64, f64),
    pub locations: Vec<String>,
    pub insurance_providers: Vec<String>,
    pub specialties: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub providers: Vec<Provider>,
    pub total_count: usize,
    pub filters: SearchFilters,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub procedure: String,
    pub location: Option<String>,
    pub insurance_provider: Option<String>,
    pub max_distance: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub types: Option<String>,
}

/// The provider as embedded in booking payloads, already in the frontend's
/// camelCase shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedProvider {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub rating: f64,
    pub review_count: u32,
    pub price: f64,
    pub distance: String,
    pub address: Address,
    pub neighborhood: String,
    pub availability: String,
    pub accepts_insurance: bool,
}

impl From<&Provider> for BookedProvider {
    fn from(p: &Provider) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            provider_type: p.facility_type.clone(),
            rating: p.rating,
            review_count: p.review_count,
            price: p.price,
            distance: format!("{} miles", p.distance_miles),
            address: p.address.clone(),
            neighborhood: p.neighborhood.clone(),
            availability: p.availability_text.clone(),
            accepts_insurance: p.accepts_insurance,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub provider_id: String,
    pub patient_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub confirmation_number: String,
    pub status: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub provider: BookedProvider,
    pub patient: Patient,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub date: String,
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub member_id: String,
    pub provider_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub average_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct ProcedureQuery {
    pub q: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsuranceProvider {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Clone, Debug)]
enum FaultKind {
    Status { status: u16, body: String },
    Hang,
}

#[derive(Clone, Debug)]
struct Fault {
    path: String,
    kind: FaultKind,
    /// `None` keeps the fault active forever.
    remaining: Option<usize>,
}

#[derive(Default)]
struct Traffic {
    hits: HashMap<String, usize>,
    last_authorization: Option<String>,
}

/// Shared server state plus test controls. Cloning shares the same state.
#[derive(Clone)]
pub struct Backend {
    providers: Arc<Vec<Provider>>,
    bookings: Arc<RwLock<HashMap<String, Booking>>>,
    faults: Arc<Mutex<Vec<Fault>>>,
    traffic: Arc<Mutex<Traffic>>,
    required_token: Option<String>,
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend {
    pub fn new() -> Self {
        Self {
            providers: Arc::new(fixtures::providers()),
            bookings: Arc::new(RwLock::new(HashMap::new())),
            faults: Arc::new(Mutex::new(Vec::new())),
            traffic: Arc::new(Mutex::new(Traffic::default())),
            required_token: None,
        }
    }

    /// Reject requests whose `Authorization` is not `Bearer <token>` with
    /// 401 `{"message":"invalid token"}`.
    pub fn require_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Answer `path` with `status` and `body` for the next `times` requests,
    /// or forever when `times` is `None`.
    pub fn fail(&self, path: &str, status: u16, body: &str, times: Option<usize>) {
        self.push_fault(Fault {
            path: path.to_string(),
            kind: FaultKind::Status {
                status,
                body: body.to_string(),
            },
            remaining: times,
        });
    }

    /// Never answer requests to `path`.
    pub fn hang(&self, path: &str) {
        self.push_fault(Fault {
            path: path.to_string(),
            kind: FaultKind::Hang,
            remaining: None,
        });
    }

    /// Requests received for `path`, faults included.
    pub fn hits(&self, path: &str) -> usize {
        lock(&self.traffic).hits.get(path).copied().unwrap_or(0)
    }

    pub fn last_authorization(&self) -> Option<String> {
        lock(&self.traffic).last_authorization.clone()
    }

    fn push_fault(&self, fault: Fault) {
        lock(&self.faults).push(fault);
    }

    fn take_fault(&self, path: &str) -> Option<FaultKind> {
        let mut faults = lock(&self.faults);
        let index = faults.iter().position(|f| f.path == path)?;
        let kind = faults[index].kind.clone();
        let exhausted = match faults[index].remaining.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        };
        if exhausted {
            faults.remove(index);
        }
        Some(kind)
    }

    fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(serde_json::json!({ "message": text }))).into_response()
}

pub fn app() -> Router {
    app_with(Backend::new())
}

pub fn app_with(backend: Backend) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/providers/{id}", get(get_provider))
        .route("/providers/{id}/time-slots", get(time_slots))
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/cancel", delete(cancel_booking))
        .route("/insurance/verify", post(verify_insurance))
        .route("/procedures", get(procedures))
        .route("/insurance/providers", get(insurance_providers))
        .layer(middleware::from_fn_with_state(backend.clone(), gate))
        .with_state(backend)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Backend::new()).await
}

pub async fn run_with(listener: TcpListener, backend: Backend) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(backend)).await
}

/// Counts traffic, then applies the token check and any injected fault.
async fn gate(State(backend): State<Backend>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    {
        let mut traffic = lock(&backend.traffic);
        *traffic.hits.entry(path.clone()).or_insert(0) += 1;
        traffic.last_authorization = authorization.clone();
    }

    if let Some(token) = &backend.required_token {
        if authorization.as_deref() != Some(format!("Bearer {token}").as_str()) {
            return message(StatusCode::UNAUTHORIZED, "invalid token");
        }
    }

    match backend.take_fault(&path) {
        Some(FaultKind::Status { status, body }) => {
            tracing::debug!(%path, status, "injected failure");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body).into_response()
        }
        Some(FaultKind::Hang) => {
            tracing::debug!(%path, "injected hang");
            tokio::time::sleep(Duration::from_secs(3600)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
        None => next.run(request).await,
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_procedure(p: &Provider, procedure: &str) -> bool {
    let words: Vec<&str> = procedure.split_whitespace().filter(|w| w.len() > 1).collect();
    if words.is_empty() {
        return true;
    }
    let specialties = p.specialties.as_deref().unwrap_or_default();
    words.iter().any(|w| {
        contains(&p.name, w)
            || contains(&p.facility_type.replace('_', " "), w)
            || specialties.iter().any(|s| contains(s, w))
    })
}

fn matches_query(p: &Provider, q: &SearchQuery) -> bool {
    let accepted = p.accepted_insurance.as_deref().unwrap_or_default();
    matches_procedure(p, &q.procedure)
        && q
            .location
            .as_deref()
            .is_none_or(|l| contains(&p.neighborhood, l) || contains(&p.address.city, l))
        && q
            .insurance_provider
            .as_deref()
            .is_none_or(|i| accepted.iter().any(|a| contains(a, i)))
        && q.max_distance.is_none_or(|d| p.distance_miles <= d)
        && q.min_price.is_none_or(|m| p.price >= m)
        && q.max_price.is_none_or(|m| p.price <= m)
        && q.min_rating.is_none_or(|r| p.rating >= r)
        && q
            .types
            .as_deref()
            .is_none_or(|t| t.split(',').any(|t| t.trim() == p.facility_type))
}

fn facets(providers: &[Provider]) -> SearchFilters {
    fn distinct(items: impl Iterator<Item = String>) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        out
    }
    let min = providers.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max = providers.iter().map(|p| p.price).fold(0.0, f64::max);
    SearchFilters {
        price_range: (if min.is_finite() { min } else { 0.0 }, max),
        locations: distinct(providers.iter().map(|p| p.neighborhood.clone())),
        insurance_providers: distinct(
            providers
                .iter()
                .flat_map(|p| p.accepted_insurance.clone().unwrap_or_default()),
        ),
        specialties: distinct(
            providers
                .iter()
                .flat_map(|p| p.specialties.clone().unwrap_or_default()),
        ),
    }
}

async fn search(State(backend): State<Backend>, Query(q): Query<SearchQuery>) -> Json<SearchResponse> {
    let providers: Vec<Provider> = backend
        .providers
        .iter()
        .filter(|p| matches_query(p, &q))
        .cloned()
        .collect();
    Json(SearchResponse {
        total_count: providers.len(),
        filters: facets(&backend.providers),
        providers,
    })
}

async fn get_provider(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    match backend.provider(&id) {
        Some(p) => Json(p.clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, "Provider not found"),
    }
}

async fn time_slots(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Query(q): Query<SlotQuery>,
) -> Response {
    if backend.provider(&id).is_none() {
        return message(StatusCode::NOT_FOUND, "Provider not found");
    }
    let dates: Vec<String> = match q.date {
        Some(date) if !date.is_empty() => vec![date],
        _ => fixtures::SLOT_DATES.iter().map(|d| d.to_string()).collect(),
    };
    let slots: Vec<TimeSlot> = dates
        .iter()
        .enumerate()
        .flat_map(|(day, date)| {
            fixtures::SLOT_TIMES
                .iter()
                .enumerate()
                .map(move |(i, time)| TimeSlot {
                    id: format!("slot-{}-{i}", day + 1),
                    date: date.clone(),
                    time: time.to_string(),
                    available: i % 3 != 2,
                })
        })
        .collect();
    Json(slots).into_response()
}

async fn create_booking(State(backend): State<Backend>, Json(input): Json<BookingRequest>) -> Response {
    let Some(provider) = backend.provider(&input.provider_id) else {
        return message(StatusCode::NOT_FOUND, "Provider not found");
    };
    let id = Uuid::new_v4();
    let code: String = id.simple().to_string().chars().take(9).collect();
    let booking = Booking {
        booking_id: id.to_string(),
        confirmation_number: format!("CONF{}", code.to_uppercase()),
        status: "confirmed".to_string(),
        appointment_date: input.preferred_date,
        appointment_time: "10:00 AM".to_string(),
        provider: BookedProvider::from(provider),
        patient: Patient {
            name: input.patient_name,
            email: input.email,
            phone: input.phone,
        },
    };
    backend
        .bookings
        .write()
        .await
        .insert(booking.booking_id.clone(), booking.clone());
    (StatusCode::CREATED, Json(booking)).into_response()
}

async fn get_booking(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    match backend.bookings.read().await.get(&id) {
        Some(b) => Json(b.clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, "Booking not found"),
    }
}

async fn cancel_booking(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    let mut bookings = backend.bookings.write().await;
    match bookings.get_mut(&id) {
        Some(b) => {
            b.status = "cancelled".to_string();
            Json(serde_json::json!({ "success": true })).into_response()
        }
        None => message(StatusCode::NOT_FOUND, "Booking not found"),
    }
}

async fn verify_insurance(State(backend): State<Backend>, Json(input): Json<VerifyRequest>) -> Response {
    let Some(provider) = backend.provider(&input.provider_id) else {
        return message(StatusCode::NOT_FOUND, "Provider not found");
    };
    let verified = !input.member_id.trim().is_empty() && provider.accepts_insurance;
    Json(serde_json::json!({
        "verified": verified,
        "coverage": { "copay": 25, "deductible": 500, "coinsurance": 0.2 }
    }))
    .into_response()
}

async fn procedures(Query(q): Query<ProcedureQuery>) -> Json<serde_json::Value> {
    let procedures: Vec<Procedure> = fixtures::procedures()
        .into_iter()
        .filter(|p| q.q.as_deref().is_none_or(|needle| contains(&p.name, needle)))
        .collect();
    Json(serde_json::json!({ "procedures": procedures }))
}

async fn insurance_providers() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "providers": fixtures::insurance_providers() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_serializes_snake_case() {
        let p = &fixtures::providers()[0];
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["facility_type"], "hospital");
        assert_eq!(json["review_count"], 1247);
        assert_eq!(json["distance_miles"], 2.3);
        assert_eq!(json["address"]["zip"], "10065");
        assert_eq!(json["reviews"][0]["patient_name"], "Sarah M.");
        assert!(json.get("reviewCount").is_none());
    }

    #[test]
    fn booked_provider_is_camel_case() {
        let booked = BookedProvider::from(&fixtures::providers()[1]);
        let json = serde_json::to_value(&booked).unwrap();
        assert_eq!(json["type"], "imaging_center");
        assert_eq!(json["reviewCount"], 856);
        assert_eq!(json["distance"], "1.8 miles");
    }

    #[test]
    fn procedure_words_match_specialties() {
        let providers = fixtures::providers();
        let ids = |procedure: &str| -> Vec<&str> {
            providers
                .iter()
                .filter(|p| matches_procedure(p, procedure))
                .map(|p| p.id.as_str())
                .collect()
        };
        assert_eq!(ids("MRI Scan"), vec!["2", "5"]);
        assert_eq!(ids("blood work"), vec!["4"]);
        assert_eq!(ids("").len(), 5);
    }

    #[test]
    fn faults_expire_after_their_count() {
        let backend = Backend::new();
        backend.fail("/search", 500, "boom", Some(2));
        assert!(backend.take_fault("/search").is_some());
        assert!(backend.take_fault("/search").is_some());
        assert!(backend.take_fault("/search").is_none());
        assert!(backend.take_fault("/procedures").is_none());
    }

    #[test]
    fn facets_span_fixture_prices() {
        let f = facets(&fixtures::providers());
        assert_eq!(f.price_range, (95.0, 650.0));
        assert!(f.locations.contains(&"Chelsea".to_string()));
        assert!(f.specialties.contains(&"MRI".to_string()));
    }
}
