use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            _ => None,
        }
    }
}

/// How the patient relates to the card holder.
///
/// `Oneself` is the card holder themself (form value `"Self"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    #[default]
    Oneself,
    Spouse,
    Father,
    Mother,
    Child,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oneself => "Self",
            Self::Spouse => "Spouse",
            Self::Father => "Father",
            Self::Mother => "Mother",
            Self::Child => "Child",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Self" => Some(Self::Oneself),
            "Spouse" => Some(Self::Spouse),
            "Father" => Some(Self::Father),
            "Mother" => Some(Self::Mother),
            "Child" => Some(Self::Child),
            _ => None,
        }
    }

    pub fn is_self(&self) -> bool {
        matches!(self, Self::Oneself)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub age: Option<u32>,
    pub sex: Sex,
    pub relation: Relation,

    // Card holder details, empty while relation is Self
    pub related_name: String,
    pub related_card_no: String,

    /// ECHS card number or service number, depending on the service type.
    pub card_no: String,
    pub contact_no: String,
    pub polyclinic: String,
}

impl PatientRecord {
    /// Clears the related-person fields when the relation is Self.
    ///
    /// Returns `true` if anything was cleared.
    pub fn clear_related_if_self(&mut self) -> bool {
        if !self.relation.is_self() {
            return false;
        }
        let changed = !self.related_name.is_empty() || !self.related_card_no.is_empty();
        self.related_name.clear();
        self.related_card_no.clear();
        changed
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn relation_self_uses_form_value() {
        assert_eq!(Relation::Oneself.as_str(), "Self");
        assert_eq!(Relation::parse("Self"), Some(Relation::Oneself));
        assert_eq!(Relation::parse("Cousin"), None);
    }

    #[test]
    fn clear_related_if_self_empties_card_holder_fields() {
        let mut patient = PatientRecord {
            related_name: "R. Singh".to_string(),
            related_card_no: "ECHS-9".to_string(),
            ..Default::default()
        };

        assert!(patient.clear_related_if_self());
        assert_eq!(patient.related_name, "");
        assert_eq!(patient.related_card_no, "");
        assert!(!patient.clear_related_if_self());
    }

    #[test]
    fn clear_related_if_self_keeps_fields_for_dependants() {
        let mut patient = PatientRecord {
            relation: Relation::Spouse,
            related_name: "R. Singh".to_string(),
            ..Default::default()
        };

        assert!(!patient.clear_related_if_self());
        assert_eq!(patient.related_name, "R. Singh");
    }
}
