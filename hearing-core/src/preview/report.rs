use serde::Serialize;
use tracing::debug;

use crate::calculations::{
    EarDiagnosis, PlotSeries, RankedTrial, SelectedDevice, amount_to_words, classify_ear,
    discount_percent, plot_series, rank_trials,
};
use crate::models::{Ear, FormSnapshot, IssueType};

use super::certificates::{
    ExServicemanCertificate, ServingCertificate, ex_serviceman_certificate, serving_certificate,
};
use super::consent::consent_statement;
use super::export::export_filename;
use super::identification::{
    IdentificationDisplay, age_sex_label, recommendation_sentence, relation_prefix,
};

/// Which optional blocks of the form and report are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    /// Rank, issue type and the serving certificate.
    pub serving_sections: bool,
    pub ex_serviceman_certificates: bool,
    /// Related person's name and identification in the preview.
    pub related_person: bool,
    /// Related person's identification input.
    pub related_identification: bool,
    /// Previous issue date and model.
    pub subsequent_issue_details: bool,
}

/// Every derived value of the report, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPreview {
    pub identification: IdentificationDisplay,
    pub age_sex: String,
    pub relation_prefix: Option<&'static str>,
    pub recommendation: String,
    /// Right ear first.
    pub diagnoses: Vec<EarDiagnosis>,
    pub plot: Vec<PlotSeries>,
    pub ranked_trials: Vec<RankedTrial>,
    pub selected: SelectedDevice,
    pub mrp_words: String,
    pub discount_price_words: String,
    pub warranty_words: String,
    pub discount_percent: String,
    pub consent: String,
    pub serving_certificate: ServingCertificate,
    pub ex_serviceman_certificate: ExServicemanCertificate,
    pub visibility: Visibility,
    pub export_filename: String,
}

impl ReportPreview {
    pub fn reconcile(snapshot: &FormSnapshot) -> Self {
        let serving = snapshot.service.service_type.is_serving();
        let pricing = &snapshot.pricing;

        let preview = Self {
            identification: IdentificationDisplay::for_snapshot(snapshot),
            age_sex: age_sex_label(&snapshot.patient),
            relation_prefix: relation_prefix(snapshot.patient.relation),
            recommendation: recommendation_sentence(&snapshot.clinical),
            diagnoses: Ear::ALL
                .into_iter()
                .map(|ear| classify_ear(ear, snapshot.audiogram.ear(ear)))
                .collect(),
            plot: plot_series(&snapshot.audiogram),
            ranked_trials: rank_trials(snapshot.trials.as_slice()),
            selected: SelectedDevice {
                model: snapshot.selected_model.clone(),
                supplier: snapshot.selected_supplier.clone(),
            },
            mrp_words: amount_to_words(pricing.mrp),
            discount_price_words: amount_to_words(pricing.discount_price),
            warranty_words: amount_to_words(pricing.warranty_years),
            discount_percent: discount_percent(pricing.mrp, pricing.discount_price),
            consent: consent_statement(snapshot),
            serving_certificate: serving_certificate(snapshot),
            ex_serviceman_certificate: ex_serviceman_certificate(snapshot),
            visibility: Visibility {
                serving_sections: serving,
                ex_serviceman_certificates: !serving,
                related_person: !snapshot.patient.relation.is_self(),
                related_identification: !serving,
                subsequent_issue_details: serving
                    && snapshot.service.issue_type == IssueType::Subsequent,
            },
            export_filename: export_filename(&snapshot.patient.card_no),
        };

        debug!(
            trials = preview.ranked_trials.len(),
            serving, "Reconciled report preview"
        );
        preview
    }
}
