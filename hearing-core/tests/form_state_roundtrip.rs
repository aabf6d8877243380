//! Persist-and-restore behaviour of the whole form through a session.

use hearing_core::{
    Conduction, Ear, FieldId, FormSession, FormSnapshot, FormStateStore, Frequency, MemoryStore,
    ReportPreview, STATE_KEY, SnapshotStore, TrialField,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal_macros::dec;

fn filled_snapshot() -> FormSnapshot {
    let mut snapshot = FormSnapshot::default();
    for (field, value) in [
        (FieldId::PatientName, "Kamla Devi"),
        (FieldId::Age, "68"),
        (FieldId::Sex, "Female"),
        (FieldId::Relation, "Spouse"),
        (FieldId::RelatedName, "Sub Maj K Singh"),
        (FieldId::CardNo, "ECHS/22/991"),
        (FieldId::RelatedCardNo, "ECHS/22/990"),
        (FieldId::ServiceType, "Ex-Serviceman"),
        (FieldId::IssueType, "Subsequent"),
        (FieldId::PrevModelName, "Siemens Intuis"),
        (FieldId::EarAffected, "Bilateral"),
        (FieldId::Recommendation, "SEMO"),
        (FieldId::Mrp, "98500.00"),
        (FieldId::DiscountPrice, "72000"),
        (FieldId::Warranty, "3"),
        (FieldId::ProcurementPreference, "unwilling"),
        (FieldId::Doctor2Rank, "Lt Col"),
    ] {
        snapshot.set_field_value(field, value).unwrap();
    }
    for (frequency, db) in [
        (Frequency::Hz500, 55.0),
        (Frequency::Hz1000, 60.5),
        (Frequency::Hz4000, 75.0),
    ] {
        let field = FieldId::Threshold(Ear::Left, Conduction::Air, frequency);
        snapshot.set_field_value(field, &db.to_string()).unwrap();
    }

    let second = snapshot.trials.add();
    second.set_field_value(TrialField::Model, "Oticon Zircon").unwrap();
    second.set_field_value(TrialField::Satisfaction, "9").unwrap();
    second.set_field_value(TrialField::Fitting, "Binaural").unwrap();
    snapshot
}

#[test]
fn serialize_then_deserialize_is_identity() {
    let snapshot = filled_snapshot();

    let restored = FormStateStore::deserialize(Some(&FormStateStore::serialize(&snapshot)));

    assert_eq!(restored, snapshot);
}

#[test]
fn round_trip_after_removing_newest_trial() {
    let mut snapshot = filled_snapshot();
    let third = snapshot.trials.add().id;
    assert!(snapshot.trials.remove(third));

    let restored = FormStateStore::deserialize(Some(&FormStateStore::serialize(&snapshot)));

    assert_eq!(restored, snapshot);
}

#[test]
fn restored_preview_matches_preview_before_save() {
    let snapshot = filled_snapshot();

    let restored = FormStateStore::deserialize(Some(&FormStateStore::serialize(&snapshot)));

    assert_eq!(ReportPreview::reconcile(&restored), ReportPreview::reconcile(&snapshot));
}

#[test]
fn older_blob_without_new_fields_still_loads() {
    let blob = r#"{"patientName": "A", "hospitalName": "Base Hospital", "trials": []}"#;

    let snapshot = FormStateStore::deserialize(Some(blob));

    assert_eq!(snapshot.patient.name, "A");
    assert_eq!(snapshot.trials.len(), 1);
    assert_eq!(snapshot.pricing.mrp, None);
}

#[tokio::test]
async fn session_edits_survive_reopen() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let mut session = FormSession::open(Box::new(SharedStore(store.clone())), STATE_KEY)
        .await
        .unwrap();
    session.set_field(FieldId::Mrp, "50000").await.unwrap();
    let id = session
        .add_trial(|trial| {
            trial.set_field_value(TrialField::Model, "Widex Moment")?;
            trial.set_field_value(TrialField::Satisfaction, "7")
        })
        .await
        .unwrap();
    assert_eq!(id, 2);

    let reopened = FormSession::open(Box::new(SharedStore(store)), STATE_KEY)
        .await
        .unwrap();

    assert_eq!(reopened.snapshot().pricing.mrp, Some(dec!(50000)));
    assert_eq!(reopened.snapshot().selected_model, "Widex Moment");
    assert_eq!(reopened.preview().ranked_trials[0].trial.model, "Widex Moment");
}

#[tokio::test]
async fn clear_resets_and_forgets_saved_state() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let mut session = FormSession::open(Box::new(SharedStore(store.clone())), STATE_KEY)
        .await
        .unwrap();
    session.set_field(FieldId::PatientName, "Someone").await.unwrap();

    session.clear().await.unwrap();

    assert_eq!(session.snapshot(), &FormSnapshot::default());
    assert!(store.load(STATE_KEY).await.is_err());
}

/// Model, device type, satisfaction and supplier of one generated trial.
type TrialInput = (String, &'static str, Option<u32>, String);

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ./-]{0,16}"
}

fn trial_input() -> impl Strategy<Value = TrialInput> {
    (
        text(),
        prop::sample::select(vec!["BTE", "RIC", "CIC", "ITC", "ITE"]),
        prop::option::of(1u32..=10),
        text(),
    )
}

/// Builds a snapshot with positional trial ids, optionally adding and then
/// removing one more trial so the id counter runs ahead of the entries.
fn generated_snapshot(
    fields: &[(FieldId, String)],
    trials: &[TrialInput],
    drop_newest: bool,
) -> FormSnapshot {
    let mut snapshot = FormSnapshot::default();
    for (field, value) in fields {
        snapshot.set_field_value(*field, value).unwrap();
    }
    for (index, (model, device_type, satisfaction, supplier)) in trials.iter().enumerate() {
        if index > 0 {
            snapshot.trials.add();
        }
        let trial = snapshot.trials.get_mut(index as u32 + 1).unwrap();
        trial.set_field_value(TrialField::Model, model).unwrap();
        trial.set_field_value(TrialField::DeviceType, device_type).unwrap();
        trial.satisfaction = *satisfaction;
        trial.set_field_value(TrialField::Supplier, supplier).unwrap();
    }
    if drop_newest {
        let id = snapshot.trials.add().id;
        snapshot.trials.remove(id);
    }
    snapshot
}

proptest! {
    #[test]
    fn generated_forms_round_trip(
        name in text(),
        station in text(),
        selected_model in text(),
        relation in prop::sample::select(vec!["Self", "Spouse", "Father", "Mother", "Child"]),
        ear in prop::sample::select(vec!["Left", "Right", "Bilateral"]),
        mrp in prop::option::of(0u32..500_000),
        right_500 in prop::option::of(-10i32..=120),
        trials in prop::collection::vec(trial_input(), 1..5),
        drop_newest in any::<bool>(),
    ) {
        let fields = vec![
            (FieldId::PatientName, name),
            (FieldId::Station, station),
            (FieldId::SelectedModel, selected_model),
            (FieldId::Relation, relation.to_string()),
            (FieldId::EarAffected, ear.to_string()),
            (FieldId::Mrp, mrp.map(|v| v.to_string()).unwrap_or_default()),
            (
                FieldId::Threshold(Ear::Right, Conduction::Air, Frequency::Hz500),
                right_500.map(|v| v.to_string()).unwrap_or_default(),
            ),
        ];
        let snapshot = generated_snapshot(&fields, &trials, drop_newest);

        let restored = FormStateStore::deserialize(Some(&FormStateStore::serialize(&snapshot)));

        prop_assert_eq!(restored, snapshot);
    }
}

/// Lets two sessions share one in-memory store.
struct SharedStore(std::sync::Arc<MemoryStore>);

#[async_trait::async_trait]
impl SnapshotStore for SharedStore {
    async fn load(&self, key: &str) -> Result<String, hearing_core::StoreError> {
        self.0.load(key).await
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), hearing_core::StoreError> {
        self.0.save(key, blob).await
    }

    async fn clear(&self, key: &str) -> Result<(), hearing_core::StoreError> {
        self.0.clear(key).await
    }
}
