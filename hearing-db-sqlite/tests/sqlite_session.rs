//! A form session saved to a SQLite file and reopened.

use std::path::PathBuf;

use hearing_core::store::MemoryStoreFactory;
use hearing_core::{FieldId, FormSession, STATE_KEY, StoreConfig, StoreRegistry, TrialField};
use hearing_db_sqlite::SqliteStoreFactory;
use pretty_assertions::assert_eq;

fn registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(MemoryStoreFactory));
    registry
}

fn scratch_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hearing-{name}-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn sqlite_config(path: &PathBuf) -> StoreConfig {
    StoreConfig {
        backend: "sqlite".to_string(),
        connection_string: path.display().to_string(),
    }
}

async fn open_form(registry: &StoreRegistry, path: &PathBuf, key: &str) -> FormSession {
    let store = registry.create(&sqlite_config(path)).await.unwrap();
    FormSession::open(store, key).await.unwrap()
}

#[tokio::test]
async fn form_survives_reopening_the_database() {
    let path = scratch_db("reopen");
    let registry = registry();

    let mut session = open_form(&registry, &path, STATE_KEY).await;
    session.set_field(FieldId::PatientName, "Naik Suresh").await.unwrap();
    session.set_field(FieldId::ServiceType, "Serving").await.unwrap();
    session.set_trial_field(1, TrialField::Satisfaction, "6").await.unwrap();
    session.set_trial_field(1, TrialField::Model, "ReSound Omnia").await.unwrap();
    drop(session);

    let reopened = open_form(&registry, &path, STATE_KEY).await;

    assert_eq!(reopened.snapshot().patient.name, "Naik Suresh");
    assert_eq!(reopened.snapshot().selected_model, "ReSound Omnia");
    assert_eq!(reopened.preview().identification.label, "Service Number");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn forms_under_different_keys_are_independent() {
    let path = scratch_db("keys");
    let registry = registry();

    let mut first = open_form(&registry, &path, "first").await;
    first.set_field(FieldId::Station, "Jalandhar").await.unwrap();

    let second = open_form(&registry, &path, "second").await;

    assert_eq!(second.snapshot().consent.station, "");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn unknown_backend_is_rejected() {
    let config = StoreConfig {
        backend: "postgres".to_string(),
        connection_string: String::new(),
    };

    let result = registry().create(&config).await;

    assert!(result.is_err());
}
