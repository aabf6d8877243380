use serde::Serialize;

use super::{
    AudiogramReading, ClinicalInfo, ConsentInfo, PatientRecord, PricingInfo, ServiceContext,
    TrialList,
};

/// Every editable value of the report form.
///
/// This is the unit of persistence: it is saved and restored whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub patient: PatientRecord,
    pub service: ServiceContext,
    pub clinical: ClinicalInfo,
    pub audiogram: AudiogramReading,
    #[serde(serialize_with = "serialize_trials")]
    pub trials: TrialList,
    pub selected_model: String,
    pub selected_supplier: String,
    pub pricing: PricingInfo,
    pub consent: ConsentInfo,
}

impl Default for FormSnapshot {
    /// A blank form with its single starting trial.
    fn default() -> Self {
        let mut trials = TrialList::default();
        trials.ensure_one();
        Self {
            patient: PatientRecord::default(),
            service: ServiceContext::default(),
            clinical: ClinicalInfo::default(),
            audiogram: AudiogramReading::default(),
            trials,
            selected_model: String::new(),
            selected_supplier: String::new(),
            pricing: PricingInfo::default(),
            consent: ConsentInfo::default(),
        }
    }
}

fn serialize_trials<S: serde::Serializer>(
    trials: &TrialList,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(trials.iter())
}
