//! End-to-end tests of the real client against the live mock backend.
//!
//! # Design
//! Each test starts its own mock server on a random port with a shared
//! `Backend` handle, so faults can be injected and traffic counted while
//! `ApiAdapter` talks to it over real HTTP through reqwest.

use std::sync::Arc;
use std::time::Duration;

use mario_core::{
    Address, ApiAdapter, ApiConfig, ApiError, BookingData, BookingStatus, ProviderType,
    RetryPolicy, SearchParams, StaticToken,
};
use mock_server::Backend;

async fn serve(backend: Backend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, backend));
    format!("http://{addr}")
}

fn config(base_url: &str) -> ApiConfig {
    ApiConfig {
        timeout: Duration::from_secs(5),
        retry: RetryPolicy::new(3, Duration::from_millis(10)),
        ..ApiConfig::real(base_url)
    }
}

fn booking(provider_id: &str) -> BookingData {
    BookingData {
        provider_id: provider_id.to_string(),
        patient_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "(555) 010-0100".to_string(),
        preferred_date: "2025-10-27".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        date_of_birth: "1990-04-02".to_string(),
        member_id: "M-1".to_string(),
        ..BookingData::default()
    }
}

#[tokio::test]
async fn full_flow_over_http() {
    let url = serve(Backend::new()).await;
    let adapter = ApiAdapter::new(config(&url));
    assert!(!adapter.is_mock_mode());

    // Search results arrive transformed into the frontend shape.
    let search = adapter
        .search_providers(&SearchParams::new("MRI Scan"))
        .await
        .unwrap();
    assert_eq!(search.total_count, 2);
    let first = &search.providers[0];
    assert_eq!(first.id, "2");
    assert_eq!(first.provider_type, ProviderType::ImagingCenter);
    assert_eq!(first.distance, "1.8 miles");
    assert_eq!(first.availability, "Next available: Today 2:30 PM");
    assert_eq!(first.insurance, first.accepted_insurance);
    assert_eq!(search.filters.price_range, (95.0, 650.0));

    let provider = adapter.get_provider_details("1").await.unwrap();
    assert_eq!(provider.provider_type, ProviderType::Hospital);
    assert_eq!(provider.review_count, 1247);
    assert!(matches!(provider.address, Address::Structured(ref a) if a.zip == "10065"));
    let reviews = provider.reviews.unwrap();
    assert_eq!(reviews[0].patient_name, "Sarah M.");

    let created = adapter.create_booking(&booking("2")).await.unwrap();
    assert_eq!(created.status, BookingStatus::Confirmed);
    assert_eq!(created.provider.name, "Lenox Hill Radiology");
    assert!(created.confirmation_number.starts_with("CONF"));

    let fetched = adapter.get_booking_details(&created.booking_id).await.unwrap();
    assert_eq!(fetched.confirmation_number, created.confirmation_number);

    assert!(adapter.cancel_booking(&created.booking_id).await.unwrap().success);
    let cancelled = adapter.get_booking_details(&created.booking_id).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let slots = adapter
        .get_available_time_slots("2", Some("2025-11-03"))
        .await
        .unwrap();
    assert_eq!(slots.len(), 4);
    assert!(slots.iter().all(|s| s.date == "2025-11-03"));

    let verification = adapter.verify_insurance("M-1", "1").await.unwrap();
    assert!(verification.verified);
    assert_eq!(verification.coverage.copay, Some(25.0));

    let procedures = adapter.get_procedures(Some("scan")).await.unwrap();
    assert_eq!(procedures.procedures.len(), 2);

    let insurers = adapter.get_insurance_providers().await.unwrap();
    assert_eq!(insurers.providers.len(), 4);
}

#[tokio::test]
async fn backend_not_found_is_an_http_error() {
    let backend = Backend::new();
    let url = serve(backend.clone()).await;
    let adapter = ApiAdapter::new(config(&url));

    let err = adapter.get_provider_details("999").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Http {
            status: 404,
            message: "Provider not found".to_string()
        }
    );
    assert_eq!(backend.hits("/providers/999"), 1);
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let backend = Backend::new().require_token("secret-token");
    let url = serve(backend.clone()).await;
    let adapter =
        ApiAdapter::with_token_provider(config(&url), Arc::new(StaticToken("secret-token".into())));

    adapter.get_insurance_providers().await.unwrap();
    assert_eq!(
        backend.last_authorization().as_deref(),
        Some("Bearer secret-token")
    );
}

#[tokio::test]
async fn invalid_token_is_not_retried() {
    let backend = Backend::new().require_token("secret-token");
    let url = serve(backend.clone()).await;
    let adapter =
        ApiAdapter::with_token_provider(config(&url), Arc::new(StaticToken("stale".into())));

    let err = adapter.get_procedures(None).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Http {
            status: 401,
            message: "invalid token".to_string()
        }
    );
    assert_eq!(backend.hits("/procedures"), 1);
}

#[tokio::test]
async fn server_errors_exhaust_retries() {
    let backend = Backend::new();
    backend.fail("/procedures", 500, "", None);
    let url = serve(backend.clone()).await;
    let adapter = ApiAdapter::new(config(&url));

    let err = adapter.get_procedures(None).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    assert_eq!(backend.hits("/procedures"), 4);
}

#[tokio::test]
async fn unexpected_success_body_is_not_resent() {
    let backend = Backend::new();
    backend.fail(
        "/bookings",
        201,
        r#"{"id":"booking_stub_001","status":"pending"}"#,
        None,
    );
    let url = serve(backend.clone()).await;
    let adapter = ApiAdapter::new(config(&url));

    let err = adapter.create_booking(&booking("2")).await.unwrap_err();
    assert!(matches!(err, ApiError::Deserialization(_)), "got {err:?}");
    assert_eq!(backend.hits("/bookings"), 1);
}

#[tokio::test]
async fn transient_failure_recovers_on_retry() {
    let backend = Backend::new();
    backend.fail("/insurance/providers", 503, r#"{"message":"warming up"}"#, Some(2));
    let url = serve(backend.clone()).await;
    let adapter = ApiAdapter::new(config(&url));

    let insurers = adapter.get_insurance_providers().await.unwrap();
    assert_eq!(insurers.providers.len(), 4);
    assert_eq!(backend.hits("/insurance/providers"), 3);
}

#[tokio::test]
async fn hung_backend_times_out() {
    let backend = Backend::new();
    backend.hang("/procedures");
    let url = serve(backend.clone()).await;
    let adapter = ApiAdapter::new(ApiConfig {
        timeout: Duration::from_millis(100),
        retry: RetryPolicy::none(),
        ..ApiConfig::real(&url)
    });

    let err = adapter.get_procedures(None).await.unwrap_err();
    assert_eq!(err, ApiError::Timeout { ms: 100 });
    assert_eq!(backend.hits("/procedures"), 1);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Bind then drop so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let adapter = ApiAdapter::new(ApiConfig {
        retry: RetryPolicy::new(1, Duration::from_millis(5)),
        ..config(&format!("http://{addr}"))
    });
    let err = adapter.get_insurance_providers().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}
