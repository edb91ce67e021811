//! Acute pericarditis risk stratification.
//!
//! Any major criterion, or two or more minor ones, marks a high-risk presentation
//! that should be admitted.

use serde::{Deserialize, Serialize};

/// Age above which the patient meets the age minor criterion.
pub const AGE_THRESHOLD: f64 = 65.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PericarditisInput {
    pub age: Option<f64>,
    /// Fever above 38 °C.
    pub fever: bool,
    /// Tamponade or haemodynamic instability.
    pub tamponade: bool,
    /// Subacute course (more than one week).
    pub subacute: bool,
    /// Large effusion on echocardiography.
    pub large_effusion: bool,
    pub troponin: bool,
    pub immunosuppressed: bool,
    pub anticoagulated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PericarditisRisk {
    LowIntermediate,
    High,
}

impl PericarditisRisk {
    pub fn display_name(self) -> &'static str {
        match self {
            PericarditisRisk::LowIntermediate => "Low-intermediate risk",
            PericarditisRisk::High => "HIGH RISK",
        }
    }

    pub fn plan(self) -> &'static str {
        match self {
            PericarditisRisk::High => {
                "Admit; serial echocardiography; NSAIDs ± colchicine; corticosteroids only if refractory or for a specific etiology."
            }
            PericarditisRisk::LowIntermediate => {
                "Outpatient management with NSAID + colchicine; avoid sport; review in 1–2 weeks."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PericarditisResult {
    pub major: u8,
    pub minor: u8,
    pub risk: PericarditisRisk,
    pub plan: &'static str,
}

fn count(flags: &[bool]) -> u8 {
    flags.iter().filter(|&&f| f).count() as u8
}

pub fn assess(input: &PericarditisInput) -> PericarditisResult {
    let older = input.age.is_some_and(|a| a.is_finite() && a > AGE_THRESHOLD);
    let major = count(&[input.tamponade, input.large_effusion, input.subacute]);
    let minor = count(&[
        input.fever,
        older,
        input.troponin,
        input.immunosuppressed,
        input.anticoagulated,
    ]);

    let risk = if major > 0 || minor >= 2 {
        PericarditisRisk::High
    } else {
        PericarditisRisk::LowIntermediate
    };
    log::debug!("Pericarditis: {major} major, {minor} minor -> {risk:?}");

    PericarditisResult {
        major,
        minor,
        risk,
        plan: risk.plan(),
    }
}
