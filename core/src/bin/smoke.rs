//! Exercise every adapter operation once against the configured backend and
//! print a pass/fail line per operation.

use std::fmt::Debug;
use std::process::ExitCode;

use mario_core::{ApiAdapter, ApiConfig, ApiError, BookingData, SearchParams};
use tracing_subscriber::EnvFilter;

struct Report {
    passed: usize,
    failed: usize,
}

impl Report {
    fn record<T: Debug>(&mut self, name: &str, result: Result<T, ApiError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.passed += 1;
                let preview: String = format!("{value:?}").chars().take(80).collect();
                println!("ok    {name:<24} {preview}");
                Some(value)
            }
            Err(e) => {
                self.failed += 1;
                println!("FAIL  {name:<24} {e}");
                None
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mario_core=info")),
        )
        .init();

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let adapter = ApiAdapter::new(config);
    println!(
        "mode: {}  url: {}",
        if adapter.is_mock_mode() { "mock" } else { "real" },
        adapter.api_url()
    );

    let mut report = Report { passed: 0, failed: 0 };

    let search = report.record(
        "searchProviders",
        adapter.search_providers(&SearchParams::new("MRI Scan")).await,
    );
    let provider_id = search
        .and_then(|s| s.providers.into_iter().next())
        .map(|p| p.id)
        .unwrap_or_else(|| "1".to_string());

    report.record(
        "getProviderDetails",
        adapter.get_provider_details(&provider_id).await,
    );

    let booking = report.record(
        "createBooking",
        adapter
            .create_booking(&BookingData {
                provider_id: provider_id.clone(),
                patient_name: "Smoke Test".to_string(),
                email: "smoke@example.com".to_string(),
                phone: "(555) 000-0000".to_string(),
                preferred_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
                first_name: "Smoke".to_string(),
                last_name: "Test".to_string(),
                date_of_birth: "1990-01-01".to_string(),
                member_id: "SMOKE-1".to_string(),
                ..BookingData::default()
            })
            .await,
    );
    let booking_id = booking
        .map(|b| b.booking_id)
        .unwrap_or_else(|| "booking_0".to_string());

    report.record(
        "getBookingDetails",
        adapter.get_booking_details(&booking_id).await,
    );
    report.record(
        "getAvailableTimeSlots",
        adapter.get_available_time_slots(&provider_id, None).await,
    );
    report.record(
        "verifyInsurance",
        adapter.verify_insurance("SMOKE-1", &provider_id).await,
    );
    report.record("getProcedures", adapter.get_procedures(Some("scan")).await);
    report.record(
        "getInsuranceProviders",
        adapter.get_insurance_providers().await,
    );
    report.record("cancelBooking", adapter.cancel_booking(&booking_id).await);

    println!("\n{} passed, {} failed", report.passed, report.failed);
    if report.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
