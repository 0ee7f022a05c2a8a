//! Mode-selecting facade over the mock and real clients.
//!
//! # Design
//! The backend is chosen once, in `ApiAdapter::new`, from `ApiConfig::use_mock`
//! and never swapped. Callers construct one adapter at startup and pass it
//! (or an `Arc` of it) to whoever needs it; there is no global instance.
//! The facade adds no error handling of its own.

use std::sync::Arc;

use crate::auth::{NoToken, TokenProvider};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::mock::MockApiClient;
use crate::real::RealApiClient;
use crate::types::{
    BookingData, BookingResponse, CancelResponse, InsuranceProviderList, InsuranceVerification,
    ProcedureList, Provider, SearchParams, SearchResponse, TimeSlot,
};

enum Backend {
    Mock(MockApiClient),
    Real(RealApiClient),
}

pub struct ApiAdapter {
    backend: Backend,
    config: ApiConfig,
}

impl ApiAdapter {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_token_provider(config, Arc::new(NoToken))
    }

    /// Like `new`, with a bearer-token source for the real client. Ignored in
    /// mock mode.
    pub fn with_token_provider(config: ApiConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        let backend = if config.use_mock {
            Backend::Mock(MockApiClient::new(config.mock.clone()))
        } else {
            Backend::Real(RealApiClient::new(&config, tokens))
        };

        tracing::info!(
            mode = if config.use_mock { "mock" } else { "real" },
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            max_retries = config.retry.max_retries,
            "API adapter initialized"
        );

        Self { backend, config }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    pub fn is_mock_mode(&self) -> bool {
        matches!(self.backend, Backend::Mock(_))
    }

    pub fn api_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn search_providers(&self, params: &SearchParams) -> Result<SearchResponse, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.search_providers(params).await,
            Backend::Real(c) => c.search_providers(params).await,
        }
    }

    pub async fn get_provider_details(&self, id: &str) -> Result<Provider, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.get_provider_details(id).await,
            Backend::Real(c) => c.get_provider_details(id).await,
        }
    }

    pub async fn create_booking(&self, data: &BookingData) -> Result<BookingResponse, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.create_booking(data).await,
            Backend::Real(c) => c.create_booking(data).await,
        }
    }

    pub async fn get_booking_details(&self, booking_id: &str) -> Result<BookingResponse, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.get_booking_details(booking_id).await,
            Backend::Real(c) => c.get_booking_details(booking_id).await,
        }
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> Result<CancelResponse, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.cancel_booking(booking_id).await,
            Backend::Real(c) => c.cancel_booking(booking_id).await,
        }
    }

    pub async fn get_available_time_slots(
        &self,
        provider_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<TimeSlot>, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.get_available_time_slots(provider_id, date).await,
            Backend::Real(c) => c.get_available_time_slots(provider_id, date).await,
        }
    }

    pub async fn verify_insurance(
        &self,
        member_id: &str,
        provider_id: &str,
    ) -> Result<InsuranceVerification, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.verify_insurance(member_id, provider_id).await,
            Backend::Real(c) => c.verify_insurance(member_id, provider_id).await,
        }
    }

    pub async fn get_procedures(&self, query: Option<&str>) -> Result<ProcedureList, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.get_procedures(query).await,
            Backend::Real(c) => c.get_procedures(query).await,
        }
    }

    pub async fn get_insurance_providers(&self) -> Result<InsuranceProviderList, ApiError> {
        match &self.backend {
            Backend::Mock(c) => c.get_insurance_providers().await,
            Backend::Real(c) => c.get_insurance_providers().await,
        }
    }
}
