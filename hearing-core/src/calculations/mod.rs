//! Deterministic calculators behind the report preview.
//!
//! None of these fail: invalid or missing input yields an empty string or
//! zero, which the rendering layer shows as a placeholder.

pub mod audiometry;
pub mod common;
pub mod discount;
pub mod number_words;
pub mod trials;

pub use audiometry::{
    EarDiagnosis, HearingLossType, Marker, PlotPoint, PlotSeries, Severity, classify_ear,
    compute_average, diagnose, plot_series,
};
pub use discount::discount_percent;
pub use number_words::{amount_to_words, integer_to_words, number_to_words};
pub use trials::{RankedTrial, SelectedDevice, rank_trials, select_best};
