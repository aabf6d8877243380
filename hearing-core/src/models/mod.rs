mod audiogram;
mod clinical;
mod patient;
mod pricing;
mod service;
mod snapshot;
mod trial;

pub use audiogram::{AudiogramReading, Conduction, Ear, EarReading, Frequency, Thresholds};
pub use clinical::{ClinicalInfo, ConsentInfo, Doctor, EarAffected, ProcurementPreference};
pub use patient::{PatientRecord, Relation, Sex};
pub use pricing::PricingInfo;
pub use service::{IssueType, ServiceContext, ServiceType};
pub use snapshot::FormSnapshot;
pub use trial::{DeviceType, Fitting, TrialList, TrialRecord};
