//! Field-level access to the form and its persisted JSON shape.

mod fields;
mod form_state;

pub use fields::{FieldError, FieldId, TrialField};
pub use form_state::{FormStateStore, STATE_KEY};
