//! Integration tests for appointment scheduling.

use carelink_core::PersonRole;
use carelink_integration_tests::{national_id, sample_address, sample_person, service};
use carelink_registry::RegistryError;
use carelink_registry::models::AddressSource;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn appointments_list_in_chronological_order() {
    let service = service().await;
    let patient = national_id("11122233344");

    service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("registration succeeds");

    // Insert out of order; the listing must still come back ascending.
    for scheduled in [date(2026, 11, 5), date(2026, 9, 3), date(2026, 10, 20)] {
        service
            .schedule_appointment(&patient, scheduled)
            .await
            .expect("scheduling succeeds");
    }

    let dates = service
        .appointments_for(&patient)
        .await
        .expect("listing succeeds");

    assert_eq!(
        dates,
        [date(2026, 9, 3), date(2026, 10, 20), date(2026, 11, 5)]
    );
}

#[tokio::test]
async fn scheduling_for_unknown_patient_is_not_found() {
    let service = service().await;

    let result = service
        .schedule_appointment(&national_id("99988877766"), date(2026, 9, 3))
        .await;

    assert!(matches!(result, Err(RegistryError::NotFound(_))));
}

#[tokio::test]
async fn listing_for_unknown_patient_is_not_found() {
    let service = service().await;

    let result = service.appointments_for(&national_id("99988877766")).await;

    assert!(matches!(result, Err(RegistryError::NotFound(_))));
}

#[tokio::test]
async fn patient_without_appointments_lists_empty() {
    let service = service().await;

    service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("registration succeeds");

    let dates = service
        .appointments_for(&national_id("11122233344"))
        .await
        .expect("listing succeeds");

    assert!(dates.is_empty());
}

#[tokio::test]
async fn duplicate_dates_are_kept_as_separate_appointments() {
    let service = service().await;
    let patient = national_id("11122233344");

    service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("registration succeeds");

    for _ in 0..2 {
        service
            .schedule_appointment(&patient, date(2026, 9, 3))
            .await
            .expect("scheduling succeeds");
    }

    let dates = service
        .appointments_for(&patient)
        .await
        .expect("listing succeeds");
    assert_eq!(dates.len(), 2);
}
