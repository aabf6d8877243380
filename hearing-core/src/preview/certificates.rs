//! Certificates printed at the end of the report.
//!
//! Serving personnel get one certificate in a first-time or a subsequent
//! issue variant. Ex-servicemen get a pair of certificates that share the
//! values in [`ExServicemanCertificate`].

use serde::Serialize;

use crate::models::{FormSnapshot, IssueType, Relation};

use super::identification::identification_label;

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// How the certificate names the dependent's relation to the service member.
pub fn relation_noun(relation: Relation) -> &'static str {
    match relation {
        Relation::Oneself => "Self",
        Relation::Spouse => "Wife",
        Relation::Father => "Father",
        Relation::Mother => "Mother",
        Relation::Child => "Son/Daughter",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant")]
pub enum IssueVariant {
    FirstTime,
    Subsequent {
        prev_issue_date: String,
        prev_model_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServingCertificate {
    pub service_no: String,
    pub rank: String,
    pub name: String,
    pub relation: &'static str,
    pub dependent_name: String,
    pub dependent_age: String,
    pub ear_affected: &'static str,
    pub issue: IssueVariant,
}

pub fn serving_certificate(snapshot: &FormSnapshot) -> ServingCertificate {
    let patient = &snapshot.patient;
    let service = &snapshot.service;
    let name = or_placeholder(&patient.name, "Patient Name");
    let dependent_name = if patient.relation.is_self() {
        name.clone()
    } else {
        or_placeholder(&patient.related_name, "Dependent Name")
    };

    ServingCertificate {
        service_no: or_placeholder(&patient.card_no, "Service No"),
        rank: or_placeholder(&service.rank, "Rank"),
        name,
        relation: relation_noun(patient.relation),
        dependent_name,
        dependent_age: patient
            .age
            .map_or_else(|| "Age".to_string(), |age| age.to_string()),
        ear_affected: snapshot.clinical.ear_affected.as_str(),
        issue: match service.issue_type {
            IssueType::FirstTime => IssueVariant::FirstTime,
            IssueType::Subsequent => IssueVariant::Subsequent {
                prev_issue_date: service.prev_issue_date.clone(),
                prev_model_name: service.prev_model_name.clone(),
            },
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExServicemanCertificate {
    pub name: String,
    /// `"<label> <number>"`.
    pub identification: String,
    /// Who the card belongs to, e.g. `"Spouse Ajit Kumar ECHS Card No 77"`.
    pub relation_info: String,
}

pub fn ex_serviceman_certificate(snapshot: &FormSnapshot) -> ExServicemanCertificate {
    let patient = &snapshot.patient;
    let label = identification_label(snapshot.service.service_type);
    let name = or_placeholder(&patient.name, "Patient Name");
    let card = or_placeholder(&patient.card_no, "Card No");

    let relation_info = if patient.relation.is_self() {
        format!("self {name} {label} {card}")
    } else {
        format!(
            "{} {} {label} {}",
            patient.relation.as_str(),
            or_placeholder(&patient.related_name, "Related Person"),
            or_placeholder(&patient.related_card_no, "Card No"),
        )
    };

    ExServicemanCertificate {
        identification: format!("{label} {card}"),
        name,
        relation_info,
    }
}
