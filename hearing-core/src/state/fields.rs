//! Form field identifiers and string-level access to the snapshot.
//!
//! Every editable control of the form has an identifier (the key it is
//! persisted under) and a string value, the same text the control would
//! hold. Setting a value parses it into the typed snapshot; values a control
//! would not accept are rejected with a [`FieldError`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::parse_decimal;
use crate::models::{
    Conduction, DeviceType, Ear, EarAffected, Fitting, FormSnapshot, Frequency, IssueType,
    ProcurementPreference, Relation, ServiceType, Sex, TrialRecord,
};

/// Satisfaction scores outside this range are rejected.
const SATISFACTION_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("'{value}' is not an option for {field}")]
    InvalidChoice { field: String, value: String },

    #[error("{field} expects a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("{field} cannot be negative, got '{value}'")]
    Negative { field: String, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Identifier of a single-valued form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    PatientName,
    Age,
    Sex,
    Relation,
    RelatedName,
    CardNo,
    RelatedCardNo,
    ContactNo,
    Polyclinic,
    ServiceType,
    Rank,
    IssueType,
    PrevIssueDate,
    PrevModelName,
    HearingTestDate,
    AudiologistName,
    Complaint1,
    Complaint2,
    Complaint3,
    EarAffected,
    Recommendation,
    SelectedModel,
    SelectedSupplier,
    Mrp,
    DiscountPrice,
    Warranty,
    Station,
    ConsentDate,
    ProcurementPreference,
    Doctor1Name,
    Doctor1Rank,
    Doctor2Name,
    Doctor2Rank,
    /// One audiogram cell, keyed like `acRight500`.
    Threshold(Ear, Conduction, Frequency),
}

impl FieldId {
    const NAMED: [FieldId; 33] = [
        FieldId::PatientName,
        FieldId::Age,
        FieldId::Sex,
        FieldId::Relation,
        FieldId::RelatedName,
        FieldId::CardNo,
        FieldId::RelatedCardNo,
        FieldId::ContactNo,
        FieldId::Polyclinic,
        FieldId::ServiceType,
        FieldId::Rank,
        FieldId::IssueType,
        FieldId::PrevIssueDate,
        FieldId::PrevModelName,
        FieldId::HearingTestDate,
        FieldId::AudiologistName,
        FieldId::Complaint1,
        FieldId::Complaint2,
        FieldId::Complaint3,
        FieldId::EarAffected,
        FieldId::Recommendation,
        FieldId::SelectedModel,
        FieldId::SelectedSupplier,
        FieldId::Mrp,
        FieldId::DiscountPrice,
        FieldId::Warranty,
        FieldId::Station,
        FieldId::ConsentDate,
        FieldId::ProcurementPreference,
        FieldId::Doctor1Name,
        FieldId::Doctor1Rank,
        FieldId::Doctor2Name,
        FieldId::Doctor2Rank,
    ];

    /// Every field of the form, in form order, audiogram cells last.
    pub fn all() -> impl Iterator<Item = FieldId> {
        let thresholds = Ear::ALL.into_iter().flat_map(|ear| {
            Conduction::ALL.into_iter().flat_map(move |conduction| {
                Frequency::ALL
                    .into_iter()
                    .map(move |frequency| FieldId::Threshold(ear, conduction, frequency))
            })
        });
        Self::NAMED.into_iter().chain(thresholds)
    }

    fn name(&self) -> Option<&'static str> {
        let name = match self {
            Self::PatientName => "patientName",
            Self::Age => "age",
            Self::Sex => "sex",
            Self::Relation => "relation",
            Self::RelatedName => "relatedName",
            Self::CardNo => "echsCardNo",
            Self::RelatedCardNo => "relatedCardNo",
            Self::ContactNo => "contactNo",
            Self::Polyclinic => "echsPolyclinic",
            Self::ServiceType => "serviceType",
            Self::Rank => "rank",
            Self::IssueType => "issueType",
            Self::PrevIssueDate => "prevIssueDate",
            Self::PrevModelName => "prevModelName",
            Self::HearingTestDate => "hearingTestDate",
            Self::AudiologistName => "audiologistName",
            Self::Complaint1 => "complaint1",
            Self::Complaint2 => "complaint2",
            Self::Complaint3 => "complaint3",
            Self::EarAffected => "earAffected",
            Self::Recommendation => "recommendation",
            Self::SelectedModel => "selectedModel",
            Self::SelectedSupplier => "selectedSupplier",
            Self::Mrp => "mrp",
            Self::DiscountPrice => "discountPrice",
            Self::Warranty => "warranty",
            Self::Station => "station",
            Self::ConsentDate => "consentDate",
            Self::ProcurementPreference => "procurementPreference",
            Self::Doctor1Name => "doctor1Name",
            Self::Doctor1Rank => "doctor1Rank",
            Self::Doctor2Name => "doctor2Name",
            Self::Doctor2Rank => "doctor2Rank",
            Self::Threshold(..) => return None,
        };
        Some(name)
    }

    /// Identifier the field is persisted under.
    pub fn key(&self) -> String {
        self.to_string()
    }

    fn parse_threshold(key: &str) -> Option<Self> {
        let conduction = Conduction::parse(key.get(..2)?)?;
        let rest = &key[2..];
        let (ear, hz) = Ear::ALL
            .into_iter()
            .find_map(|ear| rest.strip_prefix(ear.as_str()).map(|hz| (ear, hz)))?;
        let frequency = Frequency::from_hz(hz.parse().ok()?)?;
        Some(Self::Threshold(ear, conduction, frequency))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold(ear, conduction, frequency) => write!(
                f,
                "{}{}{}",
                conduction.code(),
                ear.as_str(),
                frequency.hz()
            ),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

impl FromStr for FieldId {
    type Err = FieldError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::NAMED
            .into_iter()
            .find(|field| field.name() == Some(key))
            .or_else(|| Self::parse_threshold(key))
            .ok_or_else(|| FieldError::UnknownField(key.to_string()))
    }
}

/// Identifier of a value inside one trial entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrialField {
    Model,
    DeviceType,
    Fitting,
    Sds,
    Satisfaction,
    Supplier,
}

impl TrialField {
    pub const ALL: [TrialField; 6] = [
        TrialField::Model,
        TrialField::DeviceType,
        TrialField::Fitting,
        TrialField::Sds,
        TrialField::Satisfaction,
        TrialField::Supplier,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::DeviceType => "type",
            Self::Fitting => "fitting",
            Self::Sds => "sds",
            Self::Satisfaction => "satisfaction",
            Self::Supplier => "supplier",
        }
    }
}

impl FromStr for TrialField {
    type Err = FieldError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| FieldError::UnknownField(key.to_string()))
    }
}

// =========================================================================
// Value parsing
// =========================================================================

fn choice<T>(
    field: impl fmt::Display,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, FieldError> {
    parse(value).ok_or_else(|| FieldError::InvalidChoice {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn invalid_number(field: impl fmt::Display, value: &str) -> FieldError {
    FieldError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn whole_number(field: impl fmt::Display, value: &str) -> Result<Option<u32>, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| invalid_number(field, value))
}

fn amount(field: impl fmt::Display, value: &str) -> Result<Option<Decimal>, FieldError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let parsed = parse_decimal(value).ok_or_else(|| invalid_number(&field, value))?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(FieldError::Negative {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(Some(parsed))
}

fn hearing_level(field: impl fmt::Display, value: &str) -> Result<Option<f64>, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(db) if db.is_finite() => Ok(Some(db)),
        _ => Err(invalid_number(field, value)),
    }
}

fn satisfaction(field: impl fmt::Display, value: &str) -> Result<Option<u32>, FieldError> {
    let score = whole_number(&field, value)?;
    match score {
        Some(score) if !SATISFACTION_RANGE.contains(&score) => Err(FieldError::OutOfRange {
            field: field.to_string(),
            value: score,
            min: *SATISFACTION_RANGE.start(),
            max: *SATISFACTION_RANGE.end(),
        }),
        _ => Ok(score),
    }
}

fn optional_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// =========================================================================
// Snapshot access
// =========================================================================

impl FormSnapshot {
    /// The text the field's control currently holds.
    pub fn field_value(&self, field: FieldId) -> String {
        let patient = &self.patient;
        let service = &self.service;
        let clinical = &self.clinical;
        let consent = &self.consent;
        match field {
            FieldId::PatientName => patient.name.clone(),
            FieldId::Age => optional_text(patient.age),
            FieldId::Sex => patient.sex.as_str().to_string(),
            FieldId::Relation => patient.relation.as_str().to_string(),
            FieldId::RelatedName => patient.related_name.clone(),
            FieldId::CardNo => patient.card_no.clone(),
            FieldId::RelatedCardNo => patient.related_card_no.clone(),
            FieldId::ContactNo => patient.contact_no.clone(),
            FieldId::Polyclinic => patient.polyclinic.clone(),
            FieldId::ServiceType => service.service_type.as_str().to_string(),
            FieldId::Rank => service.rank.clone(),
            FieldId::IssueType => service.issue_type.as_str().to_string(),
            FieldId::PrevIssueDate => service.prev_issue_date.clone(),
            FieldId::PrevModelName => service.prev_model_name.clone(),
            FieldId::HearingTestDate => clinical.hearing_test_date.clone(),
            FieldId::AudiologistName => clinical.audiologist_name.clone(),
            FieldId::Complaint1 => clinical.complaints[0].clone(),
            FieldId::Complaint2 => clinical.complaints[1].clone(),
            FieldId::Complaint3 => clinical.complaints[2].clone(),
            FieldId::EarAffected => clinical.ear_affected.as_str().to_string(),
            FieldId::Recommendation => clinical.recommendation.clone(),
            FieldId::SelectedModel => self.selected_model.clone(),
            FieldId::SelectedSupplier => self.selected_supplier.clone(),
            FieldId::Mrp => optional_text(self.pricing.mrp),
            FieldId::DiscountPrice => optional_text(self.pricing.discount_price),
            FieldId::Warranty => optional_text(self.pricing.warranty_years),
            FieldId::Station => consent.station.clone(),
            FieldId::ConsentDate => consent.consent_date.clone(),
            FieldId::ProcurementPreference => consent.preference.as_str().to_string(),
            FieldId::Doctor1Name => consent.doctors[0].name.clone(),
            FieldId::Doctor1Rank => consent.doctors[0].rank.clone(),
            FieldId::Doctor2Name => consent.doctors[1].name.clone(),
            FieldId::Doctor2Rank => consent.doctors[1].rank.clone(),
            FieldId::Threshold(ear, conduction, frequency) => optional_text(
                self.audiogram
                    .ear(ear)
                    .conduction(conduction)
                    .get(frequency),
            ),
        }
    }

    /// Parses `value` into the field.
    ///
    /// Only the field itself changes; cross-field rules are applied by
    /// [`crate::FormSession`]. On error the snapshot is left unchanged.
    pub fn set_field_value(&mut self, field: FieldId, value: &str) -> Result<(), FieldError> {
        let text = value.to_string();
        match field {
            FieldId::PatientName => self.patient.name = text,
            FieldId::Age => self.patient.age = whole_number(field, value)?,
            FieldId::Sex => self.patient.sex = choice(field, value, Sex::parse)?,
            FieldId::Relation => self.patient.relation = choice(field, value, Relation::parse)?,
            FieldId::RelatedName => self.patient.related_name = text,
            FieldId::CardNo => self.patient.card_no = text,
            FieldId::RelatedCardNo => self.patient.related_card_no = text,
            FieldId::ContactNo => self.patient.contact_no = text,
            FieldId::Polyclinic => self.patient.polyclinic = text,
            FieldId::ServiceType => {
                self.service.service_type = choice(field, value, ServiceType::parse)?
            }
            FieldId::Rank => self.service.rank = text,
            FieldId::IssueType => self.service.issue_type = choice(field, value, IssueType::parse)?,
            FieldId::PrevIssueDate => self.service.prev_issue_date = text,
            FieldId::PrevModelName => self.service.prev_model_name = text,
            FieldId::HearingTestDate => self.clinical.hearing_test_date = text,
            FieldId::AudiologistName => self.clinical.audiologist_name = text,
            FieldId::Complaint1 => self.clinical.complaints[0] = text,
            FieldId::Complaint2 => self.clinical.complaints[1] = text,
            FieldId::Complaint3 => self.clinical.complaints[2] = text,
            FieldId::EarAffected => {
                self.clinical.ear_affected = choice(field, value, EarAffected::parse)?
            }
            FieldId::Recommendation => self.clinical.recommendation = text,
            FieldId::SelectedModel => self.selected_model = text,
            FieldId::SelectedSupplier => self.selected_supplier = text,
            FieldId::Mrp => self.pricing.mrp = amount(field, value)?,
            FieldId::DiscountPrice => self.pricing.discount_price = amount(field, value)?,
            FieldId::Warranty => self.pricing.warranty_years = amount(field, value)?,
            FieldId::Station => self.consent.station = text,
            FieldId::ConsentDate => self.consent.consent_date = text,
            FieldId::ProcurementPreference => {
                self.consent.preference = choice(field, value, ProcurementPreference::parse)?
            }
            FieldId::Doctor1Name => self.consent.doctors[0].name = text,
            FieldId::Doctor1Rank => self.consent.doctors[0].rank = text,
            FieldId::Doctor2Name => self.consent.doctors[1].name = text,
            FieldId::Doctor2Rank => self.consent.doctors[1].rank = text,
            FieldId::Threshold(ear, conduction, frequency) => {
                let db = hearing_level(field, value)?;
                self.audiogram
                    .ear_mut(ear)
                    .conduction_mut(conduction)
                    .set(frequency, db);
            }
        }
        Ok(())
    }
}

impl TrialRecord {
    pub fn field_value(&self, field: TrialField) -> String {
        match field {
            TrialField::Model => self.model.clone(),
            TrialField::DeviceType => self.device_type.as_str().to_string(),
            TrialField::Fitting => self.fitting.as_str().to_string(),
            TrialField::Sds => self.sds.clone(),
            TrialField::Satisfaction => optional_text(self.satisfaction),
            TrialField::Supplier => self.supplier.clone(),
        }
    }

    pub fn set_field_value(&mut self, field: TrialField, value: &str) -> Result<(), FieldError> {
        let key = field.key();
        match field {
            TrialField::Model => self.model = value.to_string(),
            TrialField::DeviceType => self.device_type = choice(key, value, DeviceType::parse)?,
            TrialField::Fitting => self.fitting = choice(key, value, Fitting::parse)?,
            TrialField::Sds => self.sds = value.to_string(),
            TrialField::Satisfaction => self.satisfaction = satisfaction(key, value)?,
            TrialField::Supplier => self.supplier = value.to_string(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn every_field_key_parses_back() {
        for field in FieldId::all() {
            assert_eq!(field.key().parse::<FieldId>(), Ok(field), "{field}");
        }
    }

    #[test]
    fn form_has_named_fields_and_audiogram_cells() {
        assert_eq!(FieldId::all().count(), 33 + 24);
    }

    #[test]
    fn threshold_key_format() {
        let field = FieldId::Threshold(Ear::Right, Conduction::Bone, Frequency::Hz4000);

        assert_eq!(field.key(), "bcRight4000");
        let expected = FieldId::Threshold(Ear::Left, Conduction::Air, Frequency::Hz250);
        assert_eq!("acLeft250".parse(), Ok(expected));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(
            "hospitalName".parse::<FieldId>(),
            Err(FieldError::UnknownField("hospitalName".to_string()))
        );
        assert!("acRight3000".parse::<FieldId>().is_err());
        assert!("ac".parse::<FieldId>().is_err());
    }

    #[test]
    fn set_and_read_back_select_field() {
        let mut snapshot = FormSnapshot::default();

        snapshot.set_field_value(FieldId::Relation, "Mother").unwrap();

        assert_eq!(snapshot.patient.relation, Relation::Mother);
        assert_eq!(snapshot.field_value(FieldId::Relation), "Mother");
    }

    #[test]
    fn invalid_choice_leaves_field_unchanged() {
        let mut snapshot = FormSnapshot::default();

        let result = snapshot.set_field_value(FieldId::ServiceType, "Reservist");

        assert_eq!(
            result,
            Err(FieldError::InvalidChoice {
                field: "serviceType".to_string(),
                value: "Reservist".to_string(),
            })
        );
        assert_eq!(snapshot.service.service_type, ServiceType::ExServiceman);
    }

    #[test]
    fn amounts_parse_and_blank_clears() {
        let mut snapshot = FormSnapshot::default();

        snapshot.set_field_value(FieldId::Mrp, "85000.50").unwrap();
        assert_eq!(snapshot.pricing.mrp, Some(dec!(85000.50)));
        assert_eq!(snapshot.field_value(FieldId::Mrp), "85000.50");

        snapshot.set_field_value(FieldId::Mrp, "").unwrap();
        assert_eq!(snapshot.pricing.mrp, None);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut snapshot = FormSnapshot::default();

        let result = snapshot.set_field_value(FieldId::Warranty, "-2");

        assert!(matches!(result, Err(FieldError::Negative { .. })));
    }

    #[test]
    fn age_rejects_text() {
        let mut snapshot = FormSnapshot::default();

        let result = snapshot.set_field_value(FieldId::Age, "sixty");

        assert!(matches!(result, Err(FieldError::InvalidNumber { .. })));
        assert_eq!(snapshot.patient.age, None);
    }

    #[test]
    fn threshold_accepts_negative_levels() {
        let mut snapshot = FormSnapshot::default();
        let field = FieldId::Threshold(Ear::Left, Conduction::Air, Frequency::Hz500);

        snapshot.set_field_value(field, "-10").unwrap();

        assert_eq!(snapshot.audiogram.left.air.get(Frequency::Hz500), Some(-10.0));
        assert_eq!(snapshot.field_value(field), "-10");
    }

    #[test]
    fn satisfaction_outside_scale_is_rejected() {
        let mut trial = TrialRecord::new(1);

        let result = trial.set_field_value(TrialField::Satisfaction, "11");

        assert_eq!(
            result,
            Err(FieldError::OutOfRange {
                field: "satisfaction".to_string(),
                value: 11,
                min: 1,
                max: 10,
            })
        );
    }

    #[test]
    fn trial_fields_round_trip_through_text() {
        let mut trial = TrialRecord::new(1);

        trial.set_field_value(TrialField::DeviceType, "RIC").unwrap();
        trial.set_field_value(TrialField::Satisfaction, "9").unwrap();

        assert_eq!(trial.field_value(TrialField::DeviceType), "RIC");
        assert_eq!(trial.field_value(TrialField::Satisfaction), "9");
        assert_eq!("type".parse(), Ok(TrialField::DeviceType));
    }
}
