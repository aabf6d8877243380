use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarAffected {
    #[default]
    Right,
    Left,
    Bilateral,
}

impl EarAffected {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Bilateral => "Bilateral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Right" => Some(Self::Right),
            "Left" => Some(Self::Left),
            "Bilateral" => Some(Self::Bilateral),
            _ => None,
        }
    }
}

/// Findings recorded during the hearing assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalInfo {
    pub hearing_test_date: String,
    pub audiologist_name: String,
    pub complaints: [String; 3],
    pub ear_affected: EarAffected,
    /// Approving authority appended to the fixed recommendation sentence.
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcurementPreference {
    #[default]
    Willing,
    Unwilling,
}

impl ProcurementPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Willing => "willing",
            Self::Unwilling => "unwilling",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "willing" => Some(Self::Willing),
            "unwilling" => Some(Self::Unwilling),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub rank: String,
}

/// Consent and sign-off section of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentInfo {
    pub station: String,
    pub consent_date: String,
    pub preference: ProcurementPreference,
    pub doctors: [Doctor; 2],
}
