//! One form being edited, bound to the store it is saved in.

use thiserror::Error;
use tracing::{debug, info};

use crate::calculations::select_best;
use crate::models::{Fitting, FormSnapshot, TrialRecord};
use crate::preview::ReportPreview;
use crate::state::{FieldError, FieldId, FormStateStore, TrialField};
use crate::store::{SnapshotStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("no trial with id {0}")]
    UnknownTrial(u32),

    #[error("form state is not valid JSON: {0}")]
    InvalidBlob(#[from] serde_json::Error),

    #[error("form state must be a JSON object")]
    NotAnObject,
}

/// Owner of the snapshot, its trial ids and its storage key.
///
/// Every edit applies the form's cross-field rules and then saves the whole
/// snapshot. Restoring never saves.
pub struct FormSession {
    store: Box<dyn SnapshotStore>,
    key: String,
    snapshot: FormSnapshot,
}

impl FormSession {
    /// Restores the form saved under `key`, or starts a blank one.
    pub async fn open(
        store: Box<dyn SnapshotStore>,
        key: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let key = key.into();
        let blob = match store.load(&key).await {
            Ok(blob) => Some(blob),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };
        debug!(key = %key, found = blob.is_some(), "Opening form session");

        let mut snapshot = FormStateStore::deserialize(blob.as_deref());
        normalize(&mut snapshot);
        reselect(&mut snapshot);
        Ok(Self {
            store,
            key,
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn preview(&self) -> ReportPreview {
        ReportPreview::reconcile(&self.snapshot)
    }

    /// The blob that [`FormSession::save`] writes.
    pub fn blob(&self) -> String {
        FormStateStore::serialize(&self.snapshot)
    }

    /// Sets one field and saves.
    ///
    /// Changing the affected ear refits every trial (binaural for bilateral
    /// loss, monaural otherwise) and reselects the best one. Other edits keep
    /// the selected model and supplier as they are.
    pub async fn set_field(&mut self, field: FieldId, value: &str) -> Result<(), SessionError> {
        self.snapshot.set_field_value(field, value)?;

        if field == FieldId::EarAffected {
            let fitting = Fitting::for_ear(self.snapshot.clinical.ear_affected);
            self.snapshot.trials.set_all_fittings(fitting);
            reselect(&mut self.snapshot);
        }
        normalize(&mut self.snapshot);
        self.save().await
    }

    /// Appends a blank trial, fills it through `fill` and saves.
    ///
    /// The trial is only kept if `fill` succeeds.
    pub async fn add_trial<F>(&mut self, fill: F) -> Result<u32, SessionError>
    where
        F: FnOnce(&mut TrialRecord) -> Result<(), FieldError>,
    {
        let mut trials = self.snapshot.trials.clone();
        let trial = trials.add();
        trial.fitting = Fitting::for_ear(self.snapshot.clinical.ear_affected);
        fill(trial)?;
        let id = trial.id;

        self.snapshot.trials = trials;
        reselect(&mut self.snapshot);
        self.save().await?;
        Ok(id)
    }

    pub async fn set_trial_field(
        &mut self,
        id: u32,
        field: TrialField,
        value: &str,
    ) -> Result<(), SessionError> {
        self.snapshot
            .trials
            .get_mut(id)
            .ok_or(SessionError::UnknownTrial(id))?
            .set_field_value(field, value)?;
        reselect(&mut self.snapshot);
        self.save().await
    }

    /// Removes a trial. Removing the last one leaves the list empty until the
    /// next restore.
    pub async fn remove_trial(&mut self, id: u32) -> Result<(), SessionError> {
        if !self.snapshot.trials.remove(id) {
            return Err(SessionError::UnknownTrial(id));
        }
        reselect(&mut self.snapshot);
        self.save().await
    }

    /// Replaces the whole form with the one in `blob` and saves it.
    pub async fn replace_from_blob(&mut self, blob: &str) -> Result<(), SessionError> {
        if !serde_json::from_str::<serde_json::Value>(blob)?.is_object() {
            return Err(SessionError::NotAnObject);
        }
        let mut snapshot = FormStateStore::deserialize(Some(blob));
        normalize(&mut snapshot);
        reselect(&mut snapshot);
        self.snapshot = snapshot;
        self.save().await
    }

    pub async fn save(&self) -> Result<(), SessionError> {
        self.store.save(&self.key, &self.blob()).await?;
        debug!(key = %self.key, "Saved form state");
        Ok(())
    }

    /// Deletes the saved form and resets to a blank one.
    pub async fn clear(&mut self) -> Result<(), SessionError> {
        self.store.clear(&self.key).await?;
        self.snapshot = FormSnapshot::default();
        info!(key = %self.key, "Cleared form state");
        Ok(())
    }
}

/// Applies the rules that tie the identification fields together.
///
/// Idempotent: normalizing twice gives the same snapshot as normalizing once.
fn normalize(snapshot: &mut FormSnapshot) {
    snapshot.patient.clear_related_if_self();
    if snapshot.service.service_type.is_serving() {
        snapshot.patient.related_card_no.clear();
    }
}

/// Copies the best-rated trial into the selected model and supplier.
fn reselect(snapshot: &mut FormSnapshot) {
    let best = select_best(snapshot.trials.as_slice());
    snapshot.selected_model = best.model;
    snapshot.selected_supplier = best.supplier;
}
