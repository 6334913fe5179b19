//! Integration tests for patient and caregiver records.

use carelink_core::PersonRole;
use carelink_integration_tests::{national_id, sample_address, sample_person, service};
use carelink_registry::RegistryError;
use carelink_registry::models::{AddressPatch, AddressSource, PersonPatch};
use chrono::NaiveDate;

#[tokio::test]
async fn registered_patient_can_be_read_back() {
    let service = service().await;

    let stored = service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("registration succeeds");

    assert_eq!(stored.name, "João da Silva");
    assert_eq!(stored.age, 72);

    let found = service
        .find_person(PersonRole::Patient, &national_id("11122233344"))
        .await
        .expect("patient exists");

    assert_eq!(found.national_id, stored.national_id);
    assert_eq!(found.email.as_str(), "11122233344@example.com");

    let line = found.address_line();
    assert!(line.contains("Av. Paulista, 100"));
    assert!(line.contains("Bela Vista (São Paulo/SP)"));
    assert!(line.contains("CEP: 01310-930"));
}

#[tokio::test]
async fn duplicate_national_id_is_rejected() {
    let service = service().await;

    service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("first registration succeeds");

    let result = service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "Outro Nome", 50),
            AddressSource::Manual(sample_address()),
        )
        .await;

    assert!(matches!(result, Err(RegistryError::AlreadyExists(_))));

    // The failed attempt must not leave an extra address row behind.
    let addresses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
        .fetch_one(service.pool())
        .await
        .expect("count query");
    assert_eq!(addresses, 1);
}

#[tokio::test]
async fn roles_are_kept_apart() {
    let service = service().await;

    service
        .register_person(
            PersonRole::Caregiver,
            sample_person("55566677788", "Maria Souza", 41),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("registration succeeds");

    let as_patient = service
        .find_person(PersonRole::Patient, &national_id("55566677788"))
        .await;
    assert!(matches!(as_patient, Err(RegistryError::NotFound(_))));

    service
        .find_person(PersonRole::Caregiver, &national_id("55566677788"))
        .await
        .expect("caregiver exists");
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let service = service().await;
    let id = national_id("11122233344");

    service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("registration succeeds");

    let patch = PersonPatch {
        name: Some("João P. da Silva".to_owned()),
        ..PersonPatch::default()
    };
    service
        .update_person(PersonRole::Patient, &id, &patch, &AddressPatch::default())
        .await
        .expect("update succeeds");

    let updated = service
        .find_person(PersonRole::Patient, &id)
        .await
        .expect("patient exists");

    assert_eq!(updated.name, "João P. da Silva");
    assert_eq!(updated.age, 72);
    assert_eq!(updated.phone, "11 99999-0000");
    assert_eq!(updated.address.street, "Av. Paulista");
}

#[tokio::test]
async fn address_patch_reaches_the_address_row() {
    let service = service().await;
    let id = national_id("11122233344");

    service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("registration succeeds");

    let patch = AddressPatch {
        number: Some("200".to_owned()),
        complement: Some("ap 12".to_owned()),
        ..AddressPatch::default()
    };
    service
        .update_person(PersonRole::Patient, &id, &PersonPatch::default(), &patch)
        .await
        .expect("update succeeds");

    let updated = service
        .find_person(PersonRole::Patient, &id)
        .await
        .expect("patient exists");

    assert_eq!(updated.address.number, "200");
    assert_eq!(updated.address.complement.as_deref(), Some("ap 12"));
    assert_eq!(updated.address.street, "Av. Paulista");
}

#[tokio::test]
async fn updating_unknown_person_is_not_found() {
    let service = service().await;

    let result = service
        .update_person(
            PersonRole::Patient,
            &national_id("99988877766"),
            &PersonPatch {
                name: Some("Ninguém".to_owned()),
                ..PersonPatch::default()
            },
            &AddressPatch::default(),
        )
        .await;

    assert!(matches!(result, Err(RegistryError::NotFound(_))));
}

#[tokio::test]
async fn delete_removes_person_and_address() {
    let service = service().await;
    let id = national_id("11122233344");

    service
        .register_person(
            PersonRole::Patient,
            sample_person("11122233344", "João da Silva", 72),
            AddressSource::Manual(sample_address()),
        )
        .await
        .expect("registration succeeds");

    service
        .delete_person(PersonRole::Patient, &id)
        .await
        .expect("delete succeeds");

    let found = service.find_person(PersonRole::Patient, &id).await;
    assert!(matches!(found, Err(RegistryError::NotFound(_))));

    let addresses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
        .fetch_one(service.pool())
        .await
        .expect("count query");
    assert_eq!(addresses, 0);
}

#[tokio::test]
async fn delete_with_dependents_changes_nothing() {
    let service = service().await;
    let patient = national_id("11122233344");
    let caregiver = national_id("55566677788");

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
    service
        .link_caregiver(&patient, &caregiver)
        .await
        .expect("link succeeds");

    let result = service.delete_person(PersonRole::Patient, &patient).await;
    assert!(matches!(result, Err(RegistryError::Integrity(_))));

    // Person, address, and link all survive the refused delete.
    service
        .find_person(PersonRole::Patient, &patient)
        .await
        .expect("patient still present");
    let addresses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
        .fetch_one(service.pool())
        .await
        .expect("count query");
    assert_eq!(addresses, 2);
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM care_links")
        .fetch_one(service.pool())
        .await
        .expect("count query");
    assert_eq!(links, 1);
}

#[tokio::test]
async fn delete_with_appointments_changes_nothing() {
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
    service
        .schedule_appointment(
            &patient,
            NaiveDate::from_ymd_opt(2026, 9, 3).expect("valid date"),
        )
        .await
        .expect("scheduling succeeds");

    let result = service.delete_person(PersonRole::Patient, &patient).await;
    assert!(matches!(result, Err(RegistryError::Integrity(_))));

    // Person, address, and appointment all survive the refused delete.
    service
        .find_person(PersonRole::Patient, &patient)
        .await
        .expect("patient still present");
    let addresses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
        .fetch_one(service.pool())
        .await
        .expect("count query");
    assert_eq!(addresses, 1);
    let appointments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
        .fetch_one(service.pool())
        .await
        .expect("count query");
    assert_eq!(appointments, 1);
}

#[tokio::test]
async fn deleting_unknown_person_is_not_found() {
    let service = service().await;

    let result = service
        .delete_person(PersonRole::Caregiver, &national_id("99988877766"))
        .await;

    assert!(matches!(result, Err(RegistryError::NotFound(_))));
}

#[tokio::test]
async fn list_orders_by_name() {
    let service = service().await;

    for (id, name) in [
        ("33344455566", "Carlos Lima"),
        ("11122233344", "Ana Costa"),
        ("22233344455", "Bruno Dias"),
    ] {
        service
            .register_person(
                PersonRole::Patient,
                sample_person(id, name, 60),
                AddressSource::Manual(sample_address()),
            )
            .await
            .expect("registration succeeds");
    }

    let names: Vec<String> = service
        .list_persons(PersonRole::Patient)
        .await
        .expect("list succeeds")
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(names, ["Ana Costa", "Bruno Dias", "Carlos Lima"]);
}

#[tokio::test]
async fn min_age_filter_returns_oldest_first() {
    let service = service().await;

    for (id, name, age) in [
        ("11122233344", "Ana Costa", 45),
        ("22233344455", "Bruno Dias", 72),
        ("33344455566", "Carlos Lima", 60),
    ] {
        service
            .register_person(
                PersonRole::Patient,
                sample_person(id, name, age),
                AddressSource::Manual(sample_address()),
            )
            .await
            .expect("registration succeeds");
    }

    let ages: Vec<u32> = service
        .patients_with_min_age(60)
        .await
        .expect("filter succeeds")
        .into_iter()
        .map(|p| p.age)
        .collect();

    assert_eq!(ages, [72, 60]);
}

#[tokio::test]
async fn blank_required_fields_fail_validation() {
    let service = service().await;

    let mut person = sample_person("11122233344", "João da Silva", 72);
    person.name = "   ".to_owned();

    let result = service
        .register_person(
            PersonRole::Patient,
            person,
            AddressSource::Manual(sample_address()),
        )
        .await;

    assert!(matches!(result, Err(RegistryError::Validation(_))));
}
