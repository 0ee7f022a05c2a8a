//! Stateless HTTP request builder and response parser for the Mario Health API.
//!
//! # Design
//! `MarioClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `RealApiClient` executes the round-trip in between; everything here is
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    BookingData, BookingResponse, CancelResponse, InsuranceProviderList, InsuranceVerification,
    ProcedureList, Provider, SearchParams, SearchResponse, TimeSlot, VerifyInsuranceRequest,
};
use crate::wire::{AcErrorBody, AcProvider, AcSearchResponse};

/// Synchronous, stateless client for the Mario Health API.
#[derive(Debug, Clone)]
pub struct MarioClient {
    base_url: String,
}

impl MarioClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn build_search(&self, params: &SearchParams) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, "/search");
        req.query = search_query(params);
        req
    }

    pub fn build_provider_details(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/providers/{id}"))
    }

    pub fn build_create_booking(&self, data: &BookingData) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(data).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut req = self.request(HttpMethod::Post, "/bookings");
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_booking_details(&self, booking_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/bookings/{booking_id}"))
    }

    pub fn build_cancel_booking(&self, booking_id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/bookings/{booking_id}/cancel"))
    }

    pub fn build_time_slots(&self, provider_id: &str, date: Option<&str>) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, &format!("/providers/{provider_id}/time-slots"));
        if let Some(date) = date.filter(|d| !d.is_empty()) {
            req.query.push(("date".to_string(), date.to_string()));
        }
        req
    }

    pub fn build_verify_insurance(
        &self,
        member_id: &str,
        provider_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = VerifyInsuranceRequest {
            member_id: member_id.to_string(),
            provider_id: provider_id.to_string(),
        };
        let body =
            serde_json::to_string(&payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut req = self.request(HttpMethod::Post, "/insurance/verify");
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_procedures(&self, query: Option<&str>) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, "/procedures");
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            req.query.push(("q".to_string(), q.to_string()));
        }
        req
    }

    pub fn build_insurance_providers(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/insurance/providers")
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<SearchResponse, ApiError> {
        let ac: AcSearchResponse = parse_json(response)?;
        Ok(ac.into())
    }

    pub fn parse_provider_details(&self, response: HttpResponse) -> Result<Provider, ApiError> {
        let ac: AcProvider = parse_json(response)?;
        Ok(ac.into())
    }

    pub fn parse_booking(&self, response: HttpResponse) -> Result<BookingResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_cancel_booking(&self, response: HttpResponse) -> Result<CancelResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_time_slots(&self, response: HttpResponse) -> Result<Vec<TimeSlot>, ApiError> {
        parse_json(response)
    }

    pub fn parse_verify_insurance(
        &self,
        response: HttpResponse,
    ) -> Result<InsuranceVerification, ApiError> {
        parse_json(response)
    }

    pub fn parse_procedures(&self, response: HttpResponse) -> Result<ProcedureList, ApiError> {
        parse_json(response)
    }

    pub fn parse_insurance_providers(
        &self,
        response: HttpResponse,
    ) -> Result<InsuranceProviderList, ApiError> {
        parse_json(response)
    }
}

/// Query pairs for `/search`. Absent and zero-valued optional filters are
/// left out so the backend applies its own defaults.
fn search_query(params: &SearchParams) -> Vec<(String, String)> {
    let mut query = vec![("procedure".to_string(), params.procedure.clone())];
    if let Some(location) = params.location.as_ref().filter(|l| !l.is_empty()) {
        query.push(("location".to_string(), location.clone()));
    }
    if let Some(insurer) = params.insurance_provider.as_ref().filter(|i| !i.is_empty()) {
        query.push(("insuranceProvider".to_string(), insurer.clone()));
    }
    if let Some(distance) = params.max_distance.filter(|d| *d != 0.0) {
        query.push(("maxDistance".to_string(), distance.to_string()));
    }
    if let Some((min, max)) = params.price_range {
        query.push(("minPrice".to_string(), min.to_string()));
        query.push(("maxPrice".to_string(), max.to_string()));
    }
    if let Some(rating) = params.min_rating.filter(|r| *r != 0.0) {
        query.push(("minRating".to_string(), rating.to_string()));
    }
    if !params.types.is_empty() {
        let types: Vec<&str> = params.types.iter().map(|t| t.as_str()).collect();
        query.push(("types".to_string(), types.join(",")));
    }
    query
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map a non-2xx response to `ApiError::Http`, preferring the backend's own
/// `message` and falling back to `HTTP <status>: <reason>`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let body: AcErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
    let message = body.message.filter(|m| !m.is_empty()).unwrap_or_else(|| {
        let reason = reqwest::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        format!("HTTP {}: {reason}", response.status)
    });
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}
