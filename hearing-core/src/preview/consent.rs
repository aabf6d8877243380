use crate::calculations::{amount_to_words, number_words::without_suffix};
use crate::models::{FormSnapshot, ProcurementPreference};

use super::identification::{identification_label, relation_prefix};

const NAME_PLACEHOLDER: &str = "Patient Name";
const CARD_PLACEHOLDER: &str = "Card No";
const RELATED_PLACEHOLDER: &str = "Related Person";
const WARRANTY_PLACEHOLDER: &str = "Yrs";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// The patient's declaration for the chosen procurement route.
///
/// Blank values are replaced by their placeholder text. For anyone but the
/// patient themself a relation clause names the related person.
pub fn consent_statement(snapshot: &FormSnapshot) -> String {
    let patient = &snapshot.patient;
    let label = identification_label(snapshot.service.service_type);
    let name = or_placeholder(&patient.name, NAME_PLACEHOLDER);
    let card = or_placeholder(&patient.card_no, CARD_PLACEHOLDER);

    let relation = relation_prefix(patient.relation)
        .map(|prefix| {
            format!(
                " {prefix} {} {label} {}",
                or_placeholder(&patient.related_name, RELATED_PLACEHOLDER),
                or_placeholder(&patient.related_card_no, CARD_PLACEHOLDER),
            )
        })
        .unwrap_or_default();

    match snapshot.consent.preference {
        ProcurementPreference::Willing => {
            let words = amount_to_words(snapshot.pricing.warranty_years);
            let warranty = or_placeholder(without_suffix(&words), WARRANTY_PLACEHOLDER);
            format!(
                "\u{201c}I, {name} ({label} {card}{relation}), hereby acknowledge that I have been \
                 provided with hearing aid trial and have selected the hearing aid based on my \
                 selection preference. I understand the terms of purchase, warranty ({warranty} \
                 years), annual retuning schedule and home care as explained by the supplier.\u{201d}"
            )
        }
        ProcurementPreference::Unwilling => format!(
            "\u{201c}I, {name} ({label} {card}){relation}, hereby affirm that I have been provided \
             with hearing aid trial and have selected the hearing aid based on my requirements, \
             but I am unwilling to buy hearing aids on my own and not willing to choose for \
             reimbursement later. You are therefore requested to procure it from your end as per \
             ECHS procurement guidelines and issue me the same from the polyclinic.\u{201d}"
        ),
    }
}
