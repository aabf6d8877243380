//! The persisted form blob.
//!
//! The whole form is stored as one flat JSON object: every field under its
//! [`FieldId`] key with the text its control holds, plus a `trials` array of
//! objects keyed by [`TrialField`]. Trial ids are not stored; they are
//! reassigned by position on restore.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::fields::{FieldId, TrialField};
use crate::models::{FormSnapshot, TrialList, TrialRecord};

/// Storage key the form blob lives under.
pub const STATE_KEY: &str = "hearingReportFormData";

const TRIALS_KEY: &str = "trials";

/// Converts between [`FormSnapshot`] and its persisted JSON blob.
pub struct FormStateStore;

impl FormStateStore {
    pub fn serialize(snapshot: &FormSnapshot) -> String {
        let mut object: Map<String, Value> = FieldId::all()
            .map(|field| (field.key(), Value::String(snapshot.field_value(field))))
            .collect();

        let trials = snapshot
            .trials
            .iter()
            .map(|trial| {
                let entry: Map<String, Value> = TrialField::ALL
                    .into_iter()
                    .map(|field| (field.key().to_string(), Value::String(trial.field_value(field))))
                    .collect();
                Value::Object(entry)
            })
            .collect();
        object.insert(TRIALS_KEY.to_string(), Value::Array(trials));

        Value::Object(object).to_string()
    }

    /// Restores a snapshot from `blob`.
    ///
    /// A missing or unreadable blob yields a fresh form. The result always
    /// holds at least one trial.
    ///
    /// # Examples
    ///
    /// ```
    /// use hearing_core::{FormSnapshot, FormStateStore};
    ///
    /// let snapshot = FormStateStore::deserialize(None);
    /// assert_eq!(snapshot, FormSnapshot::default());
    /// ```
    pub fn deserialize(blob: Option<&str>) -> FormSnapshot {
        let mut snapshot = FormSnapshot::default();
        if let Some(blob) = blob {
            Self::restore_into(&mut snapshot, blob);
        }
        snapshot
    }

    /// Overlays the values in `blob` onto `snapshot`.
    ///
    /// Unknown keys are ignored and absent keys leave their field as it is.
    /// A value a field would not accept is skipped and logged. A blob that
    /// is not a JSON object changes nothing.
    pub fn restore_into(snapshot: &mut FormSnapshot, blob: &str) {
        let object = match serde_json::from_str::<Value>(blob) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                warn!(kind = json_kind(&other), "Form state is not an object, ignoring it");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Form state is not valid JSON, ignoring it");
                return;
            }
        };

        for (key, value) in &object {
            if key == TRIALS_KEY {
                continue;
            }
            let Ok(field) = key.parse::<FieldId>() else {
                debug!(key = %key, "Ignoring unknown form state key");
                continue;
            };
            let Some(text) = as_text(value) else {
                warn!(key = %key, kind = json_kind(value), "Skipping non-scalar form value");
                continue;
            };
            if let Err(e) = snapshot.set_field_value(field, &text) {
                warn!(error = %e, "Skipping unreadable form value");
            }
        }

        match object.get(TRIALS_KEY) {
            Some(Value::Array(entries)) => {
                snapshot.trials = TrialList::restored(entries.iter().map(restore_trial).collect());
            }
            Some(other) => warn!(kind = json_kind(other), "Skipping trials that are not a list"),
            None => {}
        }
        snapshot.trials.ensure_one();

        debug!(trials = snapshot.trials.len(), "Restored form state");
    }
}

fn restore_trial(entry: &Value) -> TrialRecord {
    let mut trial = TrialRecord::default();
    let Value::Object(entry) = entry else {
        warn!(kind = json_kind(entry), "Trial entry is not an object, using a blank trial");
        return trial;
    };
    for field in TrialField::ALL {
        let Some(text) = entry.get(field.key()).and_then(as_text) else {
            continue;
        };
        if let Err(e) = trial.set_field_value(field, &text) {
            warn!(error = %e, "Skipping unreadable trial value");
        }
    }
    trial
}

/// Text a form control would hold for a JSON scalar.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
