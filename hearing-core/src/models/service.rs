use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    Serving,
    #[default]
    ExServiceman,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Serving => "Serving",
            Self::ExServiceman => "Ex-Serviceman",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Serving" => Some(Self::Serving),
            "Ex-Serviceman" => Some(Self::ExServiceman),
            _ => None,
        }
    }

    pub fn is_serving(&self) -> bool {
        matches!(self, Self::Serving)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    #[default]
    FirstTime,
    Subsequent,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTime => "First Time",
            Self::Subsequent => "Subsequent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "First Time" => Some(Self::FirstTime),
            "Subsequent" => Some(Self::Subsequent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContext {
    pub service_type: ServiceType,
    /// Only shown for serving personnel.
    pub rank: String,
    pub issue_type: IssueType,

    // Subsequent-issue details
    pub prev_issue_date: String,
    pub prev_model_name: String,
}
