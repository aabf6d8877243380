//! Pure-tone averages and hearing-loss classification.
//!
//! The average of an ear is taken over 500, 1000, 2000 and 4000 Hz. Severity
//! comes from the air-conduction average; the type of loss comes from the
//! air-bone gap.
//!
//! | AC average (dB) | Severity             |
//! |-----------------|----------------------|
//! | ≤ 20            | Within Normal Limits |
//! | ≤ 40            | Mild                 |
//! | ≤ 60            | Moderate             |
//! | ≤ 80            | Severe               |
//! | ≤ 100           | Severely Profound    |
//! | > 100           | Profound             |

use serde::Serialize;

use crate::models::{AudiogramReading, Conduction, Ear, EarReading, Frequency, Thresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    WithinNormalLimits,
    Mild,
    Moderate,
    Severe,
    SeverelyProfound,
    Profound,
}

impl Severity {
    pub fn from_average(ac_average: i32) -> Self {
        match ac_average {
            ..=20 => Self::WithinNormalLimits,
            21..=40 => Self::Mild,
            41..=60 => Self::Moderate,
            61..=80 => Self::Severe,
            81..=100 => Self::SeverelyProfound,
            _ => Self::Profound,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WithinNormalLimits => "Within Normal Limits",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::SeverelyProfound => "Severely Profound",
            Self::Profound => "Profound",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HearingLossType {
    Sensorineural,
    Mixed,
    Conductive,
}

impl HearingLossType {
    /// Gap under 10 dB is sensorineural; a wider gap with bone conduction
    /// above 20 dB is mixed; everything else is conductive.
    pub fn from_averages(ac_average: i32, bc_average: i32) -> Self {
        let gap = (ac_average - bc_average).abs();
        if gap < 10 {
            Self::Sensorineural
        } else if bc_average > 20 && gap > 10 {
            Self::Mixed
        } else {
            Self::Conductive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sensorineural => "Sensorineural Hearing Loss (SNHL)",
            Self::Mixed => "Mixed Hearing Loss",
            Self::Conductive => "Conductive Hearing Loss (CHL)",
        }
    }
}

/// Pure-tone average of the tested frequencies among 500–4000 Hz.
///
/// Untested frequencies are left out rather than counted as zero. Returns 0
/// when none of the four is tested. Halves round away from zero.
pub fn compute_average(thresholds: &Thresholds) -> i32 {
    let values: Vec<f64> = Frequency::PURE_TONE_AVERAGE
        .into_iter()
        .filter_map(|frequency| thresholds.get(frequency))
        .collect();

    if values.is_empty() {
        return 0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    mean.round() as i32
}

/// Diagnosis label from an ear's AC and BC averages.
///
/// # Examples
///
/// ```
/// use hearing_core::calculations::diagnose;
///
/// assert_eq!(diagnose(15, 10), "Within Normal Limits");
/// assert_eq!(diagnose(70, 25), "Severe Mixed Hearing Loss");
/// ```
pub fn diagnose(ac_average: i32, bc_average: i32) -> String {
    let severity = Severity::from_average(ac_average);
    if severity == Severity::WithinNormalLimits {
        return severity.label().to_string();
    }
    let loss = HearingLossType::from_averages(ac_average, bc_average);
    format!("{} {}", severity.label(), loss.label())
}

/// Averages and diagnosis of a single ear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarDiagnosis {
    pub ear: Ear,
    pub ac_average: i32,
    pub bc_average: i32,
    pub diagnosis: String,
}

pub fn classify_ear(ear: Ear, reading: &EarReading) -> EarDiagnosis {
    let ac_average = compute_average(&reading.air);
    let bc_average = compute_average(&reading.bone);
    EarDiagnosis {
        ear,
        ac_average,
        bc_average,
        diagnosis: diagnose(ac_average, bc_average),
    }
}

// =========================================================================
// Chart geometry
// =========================================================================

/// Top of the y axis and its span, in dB HL.
const CHART_TOP_DB: f64 = -10.0;
const CHART_SPAN_DB: f64 = 130.0;

/// Audiogram symbol for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Marker {
    /// Right air conduction.
    Circle,
    /// Left air conduction.
    Cross,
    /// Right bone conduction.
    LessThan,
    /// Left bone conduction.
    GreaterThan,
}

impl Marker {
    pub fn for_series(ear: Ear, conduction: Conduction) -> Self {
        match (ear, conduction) {
            (Ear::Right, Conduction::Air) => Self::Circle,
            (Ear::Left, Conduction::Air) => Self::Cross,
            (Ear::Right, Conduction::Bone) => Self::LessThan,
            (Ear::Left, Conduction::Bone) => Self::GreaterThan,
        }
    }
}

/// A tested threshold placed on the chart, both coordinates in `0.0..=1.0`
/// of the plot area (y grows downward, toward worse hearing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub frequency: Frequency,
    pub db: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub ear: Ear,
    pub conduction: Conduction,
    pub marker: Marker,
    /// Right ear red, left ear blue.
    pub colour: &'static str,
    /// Points in frequency order; consecutive points are joined by a line.
    pub points: Vec<PlotPoint>,
}

/// Everything a chart collaborator needs to draw the audiogram.
///
/// Series come in drawing order: right AC, left AC, right BC, left BC.
pub fn plot_series(reading: &AudiogramReading) -> Vec<PlotSeries> {
    let last_index = (Frequency::ALL.len() - 1) as f64;
    let mut series = Vec::with_capacity(4);

    for conduction in Conduction::ALL {
        for ear in Ear::ALL {
            let points = reading
                .ear(ear)
                .conduction(conduction)
                .tested()
                .map(|(frequency, db)| PlotPoint {
                    frequency,
                    db,
                    x: frequency.index() as f64 / last_index,
                    y: (db - CHART_TOP_DB) / CHART_SPAN_DB,
                })
                .collect();

            series.push(PlotSeries {
                ear,
                conduction,
                marker: Marker::for_series(ear, conduction),
                colour: match ear {
                    Ear::Right => "#ff0000",
                    Ear::Left => "#0000ff",
                },
                points,
            });
        }
    }
    series
}
