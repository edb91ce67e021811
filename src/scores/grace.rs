//! GRACE admission score (in-hospital mortality).
//!
//! Points are read from banded tables (lower bound inclusive, first matching band
//! wins), summed, clamped to `[0, 363]`, then mapped to mortality through the
//! in-hospital nomogram.

use crate::domain::{GraceInput, GracePoints, GraceResult, KillipClass, RiskLabel};
use crate::error::CalcIssue;
use crate::math::{Nomogram, creatinine_mgdl};

/// Upper bound of the GRACE in-hospital score.
pub const MAX_SCORE: u32 = 363;

pub const ARREST_POINTS: u32 = 39;
pub const ST_DEVIATION_POINTS: u32 = 28;
pub const ENZYMES_POINTS: u32 = 14;

/// In-hospital mortality (%) by GRACE score.
const IN_HOSPITAL_MORTALITY: [(f64, f64); 20] = [
    (60.0, 0.2),
    (70.0, 0.3),
    (80.0, 0.4),
    (90.0, 0.6),
    (100.0, 0.8),
    (110.0, 1.1),
    (120.0, 1.6),
    (130.0, 2.1),
    (140.0, 2.9),
    (150.0, 3.9),
    (160.0, 5.4),
    (170.0, 7.3),
    (180.0, 9.8),
    (190.0, 13.0),
    (200.0, 18.0),
    (210.0, 23.0),
    (220.0, 29.0),
    (230.0, 36.0),
    (240.0, 44.0),
    (250.0, 52.0),
];

/// The in-hospital mortality nomogram.
pub const NOMOGRAM: Nomogram<'static> = Nomogram::from_static(&IN_HOSPITAL_MORTALITY);

pub fn points_age(age: f64) -> u32 {
    match age {
        a if a < 30.0 => 0,
        a if a < 40.0 => 8,
        a if a < 50.0 => 25,
        a if a < 60.0 => 41,
        a if a < 70.0 => 58,
        a if a < 80.0 => 75,
        a if a < 90.0 => 91,
        _ => 100,
    }
}

pub fn points_heart_rate(hr: f64) -> u32 {
    match hr {
        h if h < 50.0 => 0,
        h if h < 70.0 => 3,
        h if h < 90.0 => 9,
        h if h < 110.0 => 15,
        h if h < 150.0 => 24,
        h if h < 200.0 => 38,
        _ => 46,
    }
}

pub fn points_systolic_bp(sbp: f64) -> u32 {
    match sbp {
        s if s < 80.0 => 58,
        s if s < 100.0 => 53,
        s if s < 120.0 => 43,
        s if s < 140.0 => 34,
        s if s < 160.0 => 24,
        s if s < 200.0 => 10,
        _ => 0,
    }
}

/// Creatinine points; `mgdl` must already be in mg/dL.
pub fn points_creatinine(mgdl: f64) -> u32 {
    match mgdl {
        c if c < 0.4 => 1,
        c if c < 0.8 => 4,
        c if c < 1.2 => 7,
        c if c < 1.6 => 10,
        c if c < 2.0 => 13,
        c if c < 4.0 => 21,
        _ => 28,
    }
}

pub fn points_killip(killip: KillipClass) -> u32 {
    match killip {
        KillipClass::I => 0,
        KillipClass::II => 20,
        KillipClass::III => 39,
        KillipClass::IV => 59,
    }
}

fn points_flag(flag: bool, yes_points: u32) -> u32 {
    if flag { yes_points } else { 0 }
}

/// Mortality (%) for a score, interpolated on the nomogram.
pub fn mortality(score: u32) -> f64 {
    NOMOGRAM.interpolate(f64::from(score))
}

pub fn risk_label(score: u32) -> RiskLabel {
    if score <= 108 {
        RiskLabel::Low
    } else if score <= 140 {
        RiskLabel::Intermediate
    } else {
        RiskLabel::High
    }
}

/// Compute the GRACE result, or report which required field is missing.
///
/// Age, heart rate, systolic BP, and creatinine must be present and non-negative.
pub fn score(input: &GraceInput) -> Result<GraceResult, CalcIssue> {
    let age = required(input.age, "age")?;
    let heart_rate = required(input.heart_rate, "heart rate")?;
    let systolic_bp = required(input.systolic_bp, "systolic BP")?;
    let creatinine = required(input.creatinine, "creatinine")?;

    let creatinine_mg_dl = creatinine_mgdl(creatinine, input.creatinine_unit);

    let points = GracePoints {
        age: points_age(age),
        heart_rate: points_heart_rate(heart_rate),
        systolic_bp: points_systolic_bp(systolic_bp),
        creatinine: points_creatinine(creatinine_mg_dl),
        killip: points_killip(input.killip),
        cardiac_arrest: points_flag(input.cardiac_arrest, ARREST_POINTS),
        st_deviation: points_flag(input.st_deviation, ST_DEVIATION_POINTS),
        elevated_enzymes: points_flag(input.elevated_enzymes, ENZYMES_POINTS),
    };

    let score = points.sum().min(MAX_SCORE);

    Ok(GraceResult {
        score,
        mortality_pct: mortality(score),
        risk: risk_label(score),
        points,
        creatinine_mg_dl,
    })
}

fn required(value: Option<f64>, field: &'static str) -> Result<f64, CalcIssue> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => {
            log::debug!("GRACE not computed: missing or negative {field}");
            Err(CalcIssue::IncompleteInput { field })
        }
    }
}
