use serde::Serialize;

use crate::models::{ClinicalInfo, FormSnapshot, PatientRecord, Relation, ServiceType};

/// Fixed opening of the recommendation line; the clinician's text follows it.
pub const RECOMMENDATION_PREFIX: &str =
    "Recommended technically for purchase of equipment for the patient after the final approval by ";

const AGE_PLACEHOLDER: &str = "Age";

/// Name of the identification number for this kind of service.
///
/// # Examples
///
/// ```
/// use hearing_core::ServiceType;
/// use hearing_core::preview::identification_label;
///
/// assert_eq!(identification_label(ServiceType::Serving), "Service Number");
/// assert_eq!(identification_label(ServiceType::ExServiceman), "ECHS Card No");
/// ```
pub fn identification_label(service_type: ServiceType) -> &'static str {
    match service_type {
        ServiceType::Serving => "Service Number",
        ServiceType::ExServiceman => "ECHS Card No",
    }
}

/// Short relation marker shown before the related person's name.
///
/// `None` for [`Relation::Oneself`], where there is no related person.
pub fn relation_prefix(relation: Relation) -> Option<&'static str> {
    match relation {
        Relation::Oneself => None,
        Relation::Spouse => Some("w/o"),
        Relation::Father => Some("s/o"),
        Relation::Mother => Some("d/o"),
        Relation::Child => Some("c/o"),
    }
}

/// `"67 Yrs / Male"`, with an `Age` placeholder while age is blank.
pub fn age_sex_label(patient: &PatientRecord) -> String {
    let age = patient
        .age
        .map_or_else(|| AGE_PLACEHOLDER.to_string(), |age| age.to_string());
    format!("{age} Yrs / {}", patient.sex.as_str())
}

pub fn recommendation_sentence(clinical: &ClinicalInfo) -> String {
    format!("{RECOMMENDATION_PREFIX}{}", clinical.recommendation)
}

/// Labels and values of the identification fields, as shown in the form and
/// the preview. Blank values show their label as placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentificationDisplay {
    pub label: &'static str,
    pub related_label: String,
    pub related_preview_label: String,
    pub card_no: String,
    pub related_card_no: String,
}

impl IdentificationDisplay {
    pub fn for_snapshot(snapshot: &FormSnapshot) -> Self {
        let label = identification_label(snapshot.service.service_type);
        let or_label = |value: &str| {
            if value.is_empty() {
                label.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            label,
            related_label: format!("Related Person {label}"),
            related_preview_label: format!("{label} -"),
            card_no: or_label(&snapshot.patient.card_no),
            related_card_no: or_label(&snapshot.patient.related_card_no),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Sex;

    #[test]
    fn every_relation_but_self_has_a_prefix() {
        let prefixes: Vec<_> = [
            Relation::Oneself,
            Relation::Spouse,
            Relation::Father,
            Relation::Mother,
            Relation::Child,
        ]
        .into_iter()
        .map(relation_prefix)
        .collect();

        assert_eq!(
            prefixes,
            vec![None, Some("w/o"), Some("s/o"), Some("d/o"), Some("c/o")]
        );
    }

    #[test]
    fn age_sex_label_uses_placeholder_for_blank_age() {
        let mut patient = PatientRecord {
            sex: Sex::Female,
            ..Default::default()
        };

        assert_eq!(age_sex_label(&patient), "Age Yrs / Female");

        patient.age = Some(71);
        assert_eq!(age_sex_label(&patient), "71 Yrs / Female");
    }

    #[test]
    fn recommendation_keeps_fixed_prefix_when_blank() {
        let clinical = ClinicalInfo::default();

        assert_eq!(recommendation_sentence(&clinical), RECOMMENDATION_PREFIX);
    }

    #[test]
    fn identification_display_follows_service_type() {
        let mut snapshot = FormSnapshot::default();
        snapshot.service.service_type = ServiceType::Serving;
        snapshot.patient.card_no = "JC-4411".to_string();

        let display = IdentificationDisplay::for_snapshot(&snapshot);

        assert_eq!(display.label, "Service Number");
        assert_eq!(display.related_label, "Related Person Service Number");
        assert_eq!(display.related_preview_label, "Service Number -");
        assert_eq!(display.card_no, "JC-4411");
        assert_eq!(display.related_card_no, "Service Number");
    }
}
