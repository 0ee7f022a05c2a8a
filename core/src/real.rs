//! HTTP-backed client for the Mario Health API.
//!
//! # Design
//! Every operation goes through `call`, which wires the stateless
//! `MarioClient` build/parse pair into one attempt (token, send under
//! timeout, parse, log) and hands that attempt to `with_retry`. Attempts share
//! nothing; two identical concurrent calls issue two requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::auth::{NoToken, TokenProvider};
use crate::client::MarioClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::retry::{with_retry, RetryPolicy};
use crate::timeout::with_timeout;
use crate::types::{
    BookingData, BookingResponse, CancelResponse, InsuranceProviderList, InsuranceVerification,
    ProcedureList, Provider, SearchParams, SearchResponse, TimeSlot,
};

/// Authorization values are cut to this many characters in log lines.
const LOGGED_TOKEN_CHARS: usize = 20;

pub struct RealApiClient {
    client: MarioClient,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    timeout: Duration,
    retry: RetryPolicy,
    log_requests: bool,
}

impl RealApiClient {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: MarioClient::new(&config.base_url),
            http: reqwest::Client::new(),
            tokens,
            timeout: config.timeout,
            retry: config.retry,
            log_requests: config.log_requests,
        }
    }

    /// Real client without an auth token source.
    pub fn anonymous(config: &ApiConfig) -> Self {
        Self::new(config, Arc::new(NoToken))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub async fn search_providers(&self, params: &SearchParams) -> Result<SearchResponse, ApiError> {
        self.call(|c| Ok(c.build_search(params)), |c, r| c.parse_search(r))
            .await
    }

    pub async fn get_provider_details(&self, id: &str) -> Result<Provider, ApiError> {
        self.call(
            |c| Ok(c.build_provider_details(id)),
            |c, r| c.parse_provider_details(r),
        )
        .await
    }

    pub async fn create_booking(&self, data: &BookingData) -> Result<BookingResponse, ApiError> {
        self.call(|c| c.build_create_booking(data), |c, r| c.parse_booking(r))
            .await
    }

    pub async fn get_booking_details(&self, booking_id: &str) -> Result<BookingResponse, ApiError> {
        self.call(
            |c| Ok(c.build_booking_details(booking_id)),
            |c, r| c.parse_booking(r),
        )
        .await
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> Result<CancelResponse, ApiError> {
        self.call(
            |c| Ok(c.build_cancel_booking(booking_id)),
            |c, r| c.parse_cancel_booking(r),
        )
        .await
    }

    pub async fn get_available_time_slots(
        &self,
        provider_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<TimeSlot>, ApiError> {
        self.call(
            |c| Ok(c.build_time_slots(provider_id, date)),
            |c, r| c.parse_time_slots(r),
        )
        .await
    }

    pub async fn verify_insurance(
        &self,
        member_id: &str,
        provider_id: &str,
    ) -> Result<InsuranceVerification, ApiError> {
        self.call(
            |c| c.build_verify_insurance(member_id, provider_id),
            |c, r| c.parse_verify_insurance(r),
        )
        .await
    }

    pub async fn get_procedures(&self, query: Option<&str>) -> Result<ProcedureList, ApiError> {
        self.call(|c| Ok(c.build_procedures(query)), |c, r| c.parse_procedures(r))
            .await
    }

    pub async fn get_insurance_providers(&self) -> Result<InsuranceProviderList, ApiError> {
        self.call(
            |c| Ok(c.build_insurance_providers()),
            |c, r| c.parse_insurance_providers(r),
        )
        .await
    }

    async fn call<T, B, P>(&self, build: B, parse: P) -> Result<T, ApiError>
    where
        T: Serialize,
        B: Fn(&MarioClient) -> Result<HttpRequest, ApiError>,
        P: Fn(&MarioClient, HttpResponse) -> Result<T, ApiError>,
    {
        let build = &build;
        let parse = &parse;
        with_retry(&self.retry, move || async move {
            let request = build(&self.client)?;
            let method = request.method;
            let url = request.url.clone();
            let started = Instant::now();

            let result = match self.send(request).await {
                Ok(response) => parse(&self.client, response),
                Err(e) => Err(e),
            };

            if self.log_requests {
                let elapsed = started.elapsed();
                match &result {
                    Ok(value) => log_response(method, &url, value, elapsed),
                    Err(e) => log_error(method, &url, e, elapsed),
                }
            }
            result
        })
        .await
    }

    /// One round-trip: attach the bearer token, then execute under the timeout.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = match self.tokens.token().await? {
            Some(token) if !token.is_empty() => request.with_bearer(&token),
            _ => request,
        };
        if self.log_requests {
            log_request(&request);
        }
        with_timeout(self.execute(&request), self.timeout).await
    }

    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.http.request(request.method.into(), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn redact(value: &str) -> String {
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    let shown: String = token.chars().take(LOGGED_TOKEN_CHARS).collect();
    format!("Bearer {shown}...")
}

fn log_request(request: &HttpRequest) {
    let authorization = request
        .header("authorization")
        .map(redact)
        .unwrap_or_else(|| "None".to_string());
    tracing::debug!(
        method = request.method.as_str(),
        url = %request.url,
        query = ?request.query,
        payload = request.body.as_deref().unwrap_or(""),
        authorization = %authorization,
        "api request"
    );
}

fn log_response<T: Serialize>(method: HttpMethod, url: &str, value: &T, elapsed: Duration) {
    let payload = serde_json::to_string(value).unwrap_or_default();
    tracing::debug!(
        method = method.as_str(),
        url = %url,
        payload = %payload,
        duration_ms = elapsed.as_millis() as u64,
        "api response"
    );
}

fn log_error(method: HttpMethod, url: &str, error: &ApiError, elapsed: Duration) {
    tracing::warn!(
        method = method.as_str(),
        url = %url,
        status = ?error.status(),
        error = %error,
        duration_ms = elapsed.as_millis() as u64,
        "api error"
    );
}
