//! API adapter core for the Mario Health marketplace.
//!
//! # Overview
//! `ApiAdapter` exposes one async interface (search, provider detail, booking
//! CRUD, time slots, insurance verification, procedure and insurer lookup)
//! backed either by an in-memory mock or by the real HTTP backend, chosen once
//! from `ApiConfig`.
//!
//! # Design
//! - `MarioClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. Only `RealApiClient` does I/O.
//! - The backend speaks snake_case (`wire`); callers get camelCase (`types`).
//!   `transform` converts between them field by field.
//! - `RealApiClient` adds bearer auth, a per-attempt timeout, retry with
//!   exponential backoff and request logging around each round-trip.
//! - Mock and real failures share one `ApiError` taxonomy.

pub mod adapter;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod mock;
pub mod real;
pub mod retry;
pub mod timeout;
pub mod transform;
pub mod types;
pub mod wire;

pub use adapter::ApiAdapter;
pub use auth::{CachedTokenProvider, HttpTokenSource, NoToken, StaticToken, TokenProvider};
pub use client::MarioClient;
pub use config::{ApiConfig, MockConfig};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mock::MockApiClient;
pub use real::RealApiClient;
pub use retry::{with_retry, RetryPolicy};
pub use timeout::with_timeout;
pub use types::{
    Address, BookingData, BookingResponse, BookingStatus, CancelResponse, Coverage,
    InsuranceProvider, InsuranceProviderList, InsuranceVerification, PatientContact,
    PostalAddress, Procedure, ProcedureList, Provider, ProviderType, Review, SearchFilters,
    SearchParams, SearchResponse, TimeSlot,
};
