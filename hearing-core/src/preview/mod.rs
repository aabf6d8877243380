//! Display strings derived from the form.
//!
//! Nothing here is stored: every value is recomputed from a
//! [`FormSnapshot`](crate::FormSnapshot) each time a preview is requested.

mod certificates;
mod consent;
mod export;
mod identification;
mod report;

pub use certificates::{
    ExServicemanCertificate, IssueVariant, ServingCertificate, ex_serviceman_certificate,
    relation_noun, serving_certificate,
};
pub use consent::consent_statement;
pub use export::export_filename;
pub use identification::{
    IdentificationDisplay, RECOMMENDATION_PREFIX, age_sex_label, identification_label,
    recommendation_sentence, relation_prefix,
};
pub use report::{ReportPreview, Visibility};
