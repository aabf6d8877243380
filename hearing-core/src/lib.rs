//! Core logic for the hearing-aid procurement report.
//!
//! Everything here takes plain data in and returns plain data out; the
//! rendering layer only paints what [`preview::ReportPreview`] hands it.
//!
//! # Modules
//!
//! - [`models`]: the editable form ([`FormSnapshot`]) and its parts
//! - [`calculations`]: number words, audiometry, discount and trial ranking
//! - [`preview`]: display strings derived from cross-field rules
//! - [`state`]: field identifiers and the JSON blob format
//! - [`store`]: persistence trait, backend registry and an in-memory backend
//! - [`session`]: [`FormSession`], the owner of one form being edited

pub mod calculations;
pub mod models;
pub mod preview;
pub mod session;
pub mod state;
pub mod store;

pub use models::*;
pub use preview::ReportPreview;
pub use session::{FormSession, SessionError};
pub use state::{FieldError, FieldId, FormStateStore, STATE_KEY, TrialField};
pub use store::{MemoryStore, SnapshotStore, StoreConfig, StoreError, StoreRegistry};
