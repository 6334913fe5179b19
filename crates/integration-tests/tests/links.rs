//! Integration tests for patient-caregiver links.

use carelink_core::PersonRole;
use carelink_integration_tests::{national_id, sample_address, sample_person, service};
use carelink_registry::RegistryError;
use carelink_registry::models::{AddressSource, LinkOutcome};
use carelink_registry::services::RegistryService;

async fn register_pair(service: &RegistryService) {
    service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("patient registration succeeds");
    service
        .register_person(
            PersonRole::Caregiver,
            sample_person("55566677788", "Maria Souza", 41),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("caregiver registration succeeds");
}

#[tokio::test]
async fn linking_twice_is_idempotent() {
    let service = service().await;
    register_pair(&service).await;

    let patient = national_id("11122233344");
    let caregiver = national_id("55566677788");

    let first = service
        .link_caregiver(&patient, &caregiver)
        .await
        .expect("link succeeds");
    assert_eq!(first, LinkOutcome::Created);

    let second = service
        .link_caregiver(&patient, &caregiver)
        .await
        .expect("repeat link succeeds");
    assert_eq!(second, LinkOutcome::AlreadyLinked);

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM care_links")
        .fetch_one(service.pool())
        .await
        .expect("count query");
    assert_eq!(links, 1);
}

#[tokio::test]
async fn linking_unknown_patient_names_the_patient() {
    let service = service().await;
    register_pair(&service).await;

    let result = service
        .link_caregiver(&national_id("99988877766"), &national_id("55566677788"))
        .await;

    match result {
        Err(RegistryError::NotFound(what)) => assert!(what.contains("patient")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn linking_unknown_caregiver_names_the_caregiver() {
    let service = service().await;
    register_pair(&service).await;

    let result = service
        .link_caregiver(&national_id("11122233344"), &national_id("99988877766"))
        .await;

    match result {
        Err(RegistryError::NotFound(what)) => assert!(what.contains("caregiver")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn one_caregiver_can_serve_many_patients() {
    let service = service().await;
    register_pair(&service).await;
    service
        .register_person(
            PersonRole::Patient,
            sample_person("22233344455", "Bruno Dias", 68),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("second patient registration succeeds");

    let caregiver = national_id("55566677788");
    for patient in ["11122233344", "22233344455"] {
        let outcome = service
            .link_caregiver(&national_id(patient), &caregiver)
            .await
            .expect("link succeeds");
        assert_eq!(outcome, LinkOutcome::Created);
    }

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM care_links")
        .fetch_one(service.pool())
        .await
        .expect("count query");
    assert_eq!(links, 2);
}
