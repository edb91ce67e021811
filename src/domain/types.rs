//! Shared domain types.
//!
//! Inputs are records of optional numbers plus closed enums for every selector
//! (units, Killip class, pressor, drug). Results are plain values recomputed from the
//! current input on every call; nothing here carries history.
//!
//! All types are serializable so inputs can be persisted as snapshots and results can
//! be printed as JSON.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit a creatinine or bilirubin value is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LabUnit {
    #[default]
    #[serde(rename = "mg/dL")]
    #[value(name = "mg-dl")]
    MgDl,
    #[serde(rename = "umol/L")]
    #[value(name = "umol-l")]
    UmolL,
}

impl LabUnit {
    pub fn label(self) -> &'static str {
        match self {
            LabUnit::MgDl => "mg/dL",
            LabUnit::UmolL => "µmol/L",
        }
    }
}

/// Killip heart-failure class at presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
pub enum KillipClass {
    #[default]
    #[value(name = "1", alias = "i")]
    I,
    #[value(name = "2", alias = "ii")]
    II,
    #[value(name = "3", alias = "iii")]
    III,
    #[value(name = "4", alias = "iv")]
    IV,
}

impl KillipClass {
    pub const ALL: [KillipClass; 4] = [KillipClass::I, KillipClass::II, KillipClass::III, KillipClass::IV];
}

/// Vasoactive support used by the SOFA cardiovascular domain.
///
/// Doses for dopamine/epinephrine/norepinephrine are in mcg/kg/min.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Pressor {
    #[default]
    None,
    Dobutamine,
    Dopamine,
    Epinephrine,
    Norepinephrine,
}

/// Unit of the drug amount diluted in an infusion bag or syringe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AmountUnit {
    Mg,
    Mcg,
    /// International units.
    Ui,
}

impl AmountUnit {
    pub fn label(self) -> &'static str {
        match self {
            AmountUnit::Mg => "mg",
            AmountUnit::Mcg => "mcg",
            AmountUnit::Ui => "UI",
        }
    }
}

/// Dose units supported by the infusion converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DoseUnit {
    #[serde(rename = "mcg/kg/min")]
    #[value(name = "mcg-kg-min")]
    McgKgMin,
    #[serde(rename = "mcg/min")]
    #[value(name = "mcg-min")]
    McgMin,
    #[serde(rename = "UI/kg/h")]
    #[value(name = "ui-kg-h")]
    UiKgH,
    #[serde(rename = "mg/h")]
    #[value(name = "mg-h")]
    MgH,
    #[serde(rename = "mcg/kg/h")]
    #[value(name = "mcg-kg-h")]
    McgKgH,
    #[serde(rename = "mcg/h")]
    #[value(name = "mcg-h")]
    McgH,
}

impl DoseUnit {
    pub const ALL: [DoseUnit; 6] = [
        DoseUnit::McgKgMin,
        DoseUnit::McgMin,
        DoseUnit::UiKgH,
        DoseUnit::MgH,
        DoseUnit::McgKgH,
        DoseUnit::McgH,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DoseUnit::McgKgMin => "mcg/kg/min",
            DoseUnit::McgMin => "mcg/min",
            DoseUnit::UiKgH => "UI/kg/h",
            DoseUnit::MgH => "mg/h",
            DoseUnit::McgKgH => "mcg/kg/h",
            DoseUnit::McgH => "mcg/h",
        }
    }

    /// Whether the dose is normalized by body weight.
    pub fn per_kg(self) -> bool {
        matches!(self, DoseUnit::McgKgMin | DoseUnit::UiKgH | DoseUnit::McgKgH)
    }

    /// Whether the dose is an activity (UI) rather than a mass.
    pub fn is_activity(self) -> bool {
        matches!(self, DoseUnit::UiKgH)
    }
}

/// Drugs in the infusion catalog.
///
/// Drugs stocked in more than one standard dilution get one entry per dilution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Drug {
    Norepinephrine,
    Epinephrine,
    /// Dopamine 400 mg/250 mL.
    Dopamine,
    /// Dopamine 200 mg/100 mL.
    #[serde(rename = "dopamine-200")]
    #[value(name = "dopamine-200")]
    Dopamine200,
    Isoproterenol,
    Vasopressin,
    Nitroglycerin,
    Nitroprusside,
    Dobutamine,
    /// Milrinone 10 mg/250 mL.
    #[serde(rename = "milrinone-10")]
    #[value(name = "milrinone-10")]
    Milrinone10,
    /// Milrinone 20 mg/250 mL.
    #[serde(rename = "milrinone-20")]
    #[value(name = "milrinone-20")]
    Milrinone20,
    Levosimendan,
    Remifentanil,
    Morphine,
    Cisatracurium,
}

impl Drug {
    /// Catalog order: vasoactives, inotropes, analgesia/sedation and neuromuscular block.
    pub const ALL: [Drug; 15] = [
        Drug::Norepinephrine,
        Drug::Epinephrine,
        Drug::Dopamine,
        Drug::Dopamine200,
        Drug::Isoproterenol,
        Drug::Vasopressin,
        Drug::Nitroglycerin,
        Drug::Nitroprusside,
        Drug::Dobutamine,
        Drug::Milrinone10,
        Drug::Milrinone20,
        Drug::Levosimendan,
        Drug::Remifentanil,
        Drug::Morphine,
        Drug::Cisatracurium,
    ];

    /// Stable identifier used for persistence keys.
    pub fn id(self) -> &'static str {
        match self {
            Drug::Norepinephrine => "norepinephrine",
            Drug::Epinephrine => "epinephrine",
            Drug::Dopamine => "dopamine",
            Drug::Dopamine200 => "dopamine-200",
            Drug::Isoproterenol => "isoproterenol",
            Drug::Vasopressin => "vasopressin",
            Drug::Nitroglycerin => "nitroglycerin",
            Drug::Nitroprusside => "nitroprusside",
            Drug::Dobutamine => "dobutamine",
            Drug::Milrinone10 => "milrinone-10",
            Drug::Milrinone20 => "milrinone-20",
            Drug::Levosimendan => "levosimendan",
            Drug::Remifentanil => "remifentanil",
            Drug::Morphine => "morphine",
            Drug::Cisatracurium => "cisatracurium",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Drug::Norepinephrine => "Norepinephrine",
            Drug::Epinephrine => "Epinephrine",
            Drug::Dopamine => "Dopamine 400/250",
            Drug::Dopamine200 => "Dopamine 200/100",
            Drug::Isoproterenol => "Isoproterenol",
            Drug::Vasopressin => "Vasopressin",
            Drug::Nitroglycerin => "Nitroglycerin",
            Drug::Nitroprusside => "Nitroprusside",
            Drug::Dobutamine => "Dobutamine",
            Drug::Milrinone10 => "Milrinone 10/250",
            Drug::Milrinone20 => "Milrinone 20/250",
            Drug::Levosimendan => "Levosimendan",
            Drug::Remifentanil => "Remifentanil",
            Drug::Morphine => "Morphine",
            Drug::Cisatracurium => "Cisatracurium",
        }
    }
}

// ---------------------------------------------------------------------------
// GRACE
// ---------------------------------------------------------------------------

/// Admission data for the GRACE in-hospital score.
///
/// The four numeric fields are required; the categorical fields always have a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraceInput {
    pub age: Option<f64>,
    pub heart_rate: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub creatinine: Option<f64>,
    pub creatinine_unit: LabUnit,
    pub killip: KillipClass,
    pub cardiac_arrest: bool,
    pub st_deviation: bool,
    pub elevated_enzymes: bool,
}

impl Default for GraceInput {
    fn default() -> Self {
        Self {
            age: None,
            heart_rate: None,
            systolic_bp: None,
            creatinine: None,
            creatinine_unit: LabUnit::MgDl,
            killip: KillipClass::I,
            cardiac_arrest: false,
            st_deviation: false,
            elevated_enzymes: true,
        }
    }
}

/// Per-variable GRACE points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GracePoints {
    pub age: u32,
    pub heart_rate: u32,
    pub systolic_bp: u32,
    pub creatinine: u32,
    pub killip: u32,
    pub cardiac_arrest: u32,
    pub st_deviation: u32,
    pub elevated_enzymes: u32,
}

impl GracePoints {
    pub fn sum(&self) -> u32 {
        self.age
            + self.heart_rate
            + self.systolic_bp
            + self.creatinine
            + self.killip
            + self.cardiac_arrest
            + self.st_deviation
            + self.elevated_enzymes
    }
}

/// GRACE risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    Intermediate,
    High,
}

impl RiskLabel {
    pub fn display_name(self) -> &'static str {
        match self {
            RiskLabel::Low => "Low",
            RiskLabel::Intermediate => "Intermediate",
            RiskLabel::High => "High",
        }
    }

    /// Display colour tag for front-ends.
    pub fn color(self) -> &'static str {
        match self {
            RiskLabel::Low => "green",
            RiskLabel::Intermediate => "amber",
            RiskLabel::High => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraceResult {
    /// Total points, clamped to `[0, 363]`.
    pub score: u32,
    /// Estimated in-hospital mortality in percent.
    pub mortality_pct: f64,
    pub risk: RiskLabel,
    pub points: GracePoints,
    /// Creatinine used for scoring, after conversion to mg/dL.
    pub creatinine_mg_dl: f64,
}

// ---------------------------------------------------------------------------
// SOFA
// ---------------------------------------------------------------------------

/// Inputs for the six SOFA domains. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SofaInput {
    /// Arterial PaO2 (mmHg).
    pub pao2: Option<f64>,
    /// Inspired oxygen fraction in percent (21–100).
    pub fio2: Option<f64>,
    /// Invasive or non-invasive ventilatory support.
    pub respiratory_support: bool,
    /// Platelets (×10³/µL).
    pub platelets: Option<f64>,
    pub bilirubin: Option<f64>,
    pub bilirubin_unit: LabUnit,
    /// Mean arterial pressure (mmHg).
    pub map: Option<f64>,
    pub pressor: Pressor,
    /// Pressor dose in mcg/kg/min (ignored for dobutamine).
    pub pressor_dose: Option<f64>,
    pub gcs: Option<f64>,
    pub creatinine: Option<f64>,
    pub creatinine_unit: LabUnit,
    /// Urine output (mL/24h).
    pub urine_output: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SofaResult {
    pub respiratory: u8,
    pub coagulation: u8,
    pub liver: u8,
    pub cardiovascular: u8,
    pub cns: u8,
    pub renal: u8,
    pub total: u8,
}

// ---------------------------------------------------------------------------
// Hemodynamics
// ---------------------------------------------------------------------------

/// Bedside vitals and pulmonary-artery-catheter measurements.
///
/// Pressures are mmHg, cardiac output L/min, hemoglobin g/dL, saturations percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemoInput {
    /// Patient initials kept with a saved case; not used in any calculation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub heart_rate: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    /// Right atrial pressure.
    pub rap: Option<f64>,
    /// Systolic pulmonary artery pressure.
    pub spap: Option<f64>,
    /// Diastolic pulmonary artery pressure.
    pub dpap: Option<f64>,
    /// Mean pulmonary artery pressure.
    pub mpap: Option<f64>,
    /// Pulmonary capillary wedge pressure.
    pub pcwp: Option<f64>,
    /// Thermodilution cardiac output.
    pub cardiac_output: Option<f64>,
    pub hemoglobin: Option<f64>,
    pub sao2: Option<f64>,
    pub svo2: Option<f64>,
}

/// Derived PAC parameters; each is `None` when it cannot be computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HemoResult {
    /// kg/m².
    pub bmi: Option<f64>,
    /// m² (DuBois).
    pub bsa: Option<f64>,
    /// mmHg.
    pub map: Option<f64>,
    /// Transpulmonary gradient (mmHg).
    pub tpg: Option<f64>,
    /// Diastolic pulmonary gradient (mmHg).
    pub dpg: Option<f64>,
    /// Cardiac index (L/min/m²).
    pub ci: Option<f64>,
    /// Stroke volume (mL).
    pub sv: Option<f64>,
    /// Stroke volume index (mL/m²).
    pub svi: Option<f64>,
    /// dyn·s·cm⁻⁵.
    pub svr: Option<f64>,
    pub svr_wu: Option<f64>,
    /// dyn·s·cm⁻⁵.
    pub pvr: Option<f64>,
    pub pvr_wu: Option<f64>,
    pub papi: Option<f64>,
    /// RAP/PCWP ratio.
    pub rap_pcwp: Option<f64>,
    /// Cardiac power output (W).
    pub cpo: Option<f64>,
    /// Estimated oxygen consumption (mL/min).
    pub vo2: Option<f64>,
    /// Arterial O2 content (mL O2/dL).
    pub cao2: Option<f64>,
    /// Venous O2 content (mL O2/dL).
    pub cvo2: Option<f64>,
    pub av_diff: Option<f64>,
    /// Cardiac output by the Fick principle (L/min).
    pub co_fick: Option<f64>,
}

// ---------------------------------------------------------------------------
// Infusions
// ---------------------------------------------------------------------------

/// Catalog defaults for one drug.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrugPreset {
    pub drug: Drug,
    pub amount_value: f64,
    pub amount_unit: AmountUnit,
    pub volume_ml: f64,
    pub dose_unit: DoseUnit,
    pub min_dose: f64,
    pub max_dose: f64,
}

/// Current state of the infusion form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfusionInput {
    pub drug: Drug,
    pub amount: Option<f64>,
    pub amount_unit: AmountUnit,
    pub volume_ml: Option<f64>,
    pub dose: Option<f64>,
    pub dose_unit: DoseUnit,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

/// Concentration of a prepared infusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Concentration {
    /// mcg/mL.
    Mass { mcg_per_ml: f64 },
    /// UI/mL.
    Activity { ui_per_ml: f64 },
}

impl Concentration {
    pub fn value(self) -> f64 {
        match self {
            Concentration::Mass { mcg_per_ml } => mcg_per_ml,
            Concentration::Activity { ui_per_ml } => ui_per_ml,
        }
    }

    pub fn unit_label(self) -> &'static str {
        match self {
            Concentration::Mass { .. } => "mcg/mL",
            Concentration::Activity { .. } => "UI/mL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseResult {
    pub concentration: Option<Concentration>,
    /// Pump rate (mL/h).
    pub rate_ml_h: Option<f64>,
    /// The raw dose lies outside the preset's `[min_dose, max_dose]`.
    pub out_of_range: bool,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Output of any calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "lowercase")]
pub enum ScoreResult {
    Grace(GraceResult),
    Sofa(SofaResult),
    Hemo(HemoResult),
    Dose(DoseResult),
}
