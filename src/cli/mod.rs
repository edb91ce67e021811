//! Command-line parsing for the cardiac ICU calculators.
//!
//! Parsing lives here; turning arguments into calculator inputs and running them is
//! done in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{AmountUnit, DoseUnit, Drug, KillipClass, LabUnit, Pressor};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cicu", version, about = "Cardiac ICU bedside calculators")]
pub struct Cli {
    /// Directory for saved cases and presets (overrides CICU_DATA_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON instead of a text report.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// GRACE in-hospital risk score.
    Grace(GraceArgs),
    /// SOFA organ-failure score.
    Sofa(SofaArgs),
    /// Derived pulmonary-artery-catheter parameters.
    Hemo(HemoArgs),
    /// Convert an infusion dose to a pump rate.
    ///
    /// Starts from the saved preset for the drug when one exists, otherwise from the
    /// catalog defaults; any flag given overrides that starting point.
    Infusion(InfusionArgs),
    /// Acute pericarditis risk stratification and suggested plan.
    Pericarditis(PericarditisArgs),
    /// Clinical Frailty Scale lookup.
    Frailty {
        /// CFS level (1-9).
        level: u8,
    },
    /// List the infusion drug catalog.
    Drugs,
    /// Saved hemodynamic cases.
    #[command(subcommand)]
    Case(CaseCommand),
    /// Saved infusion presets.
    #[command(subcommand)]
    Preset(PresetCommand),
}

#[derive(Debug, Subcommand)]
pub enum CaseCommand {
    /// Save hemodynamic inputs under a case id (replaces any previous save).
    Save {
        id: String,
        #[command(flatten)]
        fields: HemoFields,
    },
    /// Load a case and print its derived parameters.
    Load { id: String },
    /// Print the stored inputs of a case.
    Show { id: String },
}

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    /// Save a drug's dilution and dose, starting from catalog defaults.
    Save {
        #[arg(value_enum)]
        drug: Drug,
        #[command(flatten)]
        fields: InfusionFields,
    },
    /// Load a saved preset and print the resulting rate.
    Load {
        #[arg(value_enum)]
        drug: Drug,
    },
}

#[derive(Debug, Args, Clone)]
pub struct GraceArgs {
    /// Age (years).
    #[arg(long)]
    pub age: Option<f64>,

    /// Heart rate (bpm).
    #[arg(long)]
    pub heart_rate: Option<f64>,

    /// Systolic blood pressure (mmHg).
    #[arg(long = "sbp")]
    pub systolic_bp: Option<f64>,

    /// Serum creatinine.
    #[arg(long)]
    pub creatinine: Option<f64>,

    #[arg(long, value_enum, default_value_t = LabUnit::MgDl)]
    pub creatinine_unit: LabUnit,

    /// Killip class (1-4).
    #[arg(long, value_enum, default_value_t = KillipClass::I)]
    pub killip: KillipClass,

    /// Cardiac arrest at admission.
    #[arg(long)]
    pub cardiac_arrest: bool,

    /// ST-segment deviation.
    #[arg(long)]
    pub st_deviation: bool,

    /// Cardiac enzymes NOT elevated (they count as elevated by default).
    #[arg(long)]
    pub no_enzymes: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SofaArgs {
    /// PaO2 (mmHg).
    #[arg(long)]
    pub pao2: Option<f64>,

    /// FiO2 in percent (21-100).
    #[arg(long)]
    pub fio2: Option<f64>,

    /// On invasive or non-invasive ventilatory support.
    #[arg(long)]
    pub ventilated: bool,

    /// Platelets (x10^3/uL).
    #[arg(long)]
    pub platelets: Option<f64>,

    #[arg(long)]
    pub bilirubin: Option<f64>,

    #[arg(long, value_enum, default_value_t = LabUnit::MgDl)]
    pub bilirubin_unit: LabUnit,

    /// Mean arterial pressure (mmHg).
    #[arg(long)]
    pub map: Option<f64>,

    #[arg(long, value_enum, default_value_t = Pressor::None)]
    pub pressor: Pressor,

    /// Pressor dose (mcg/kg/min).
    #[arg(long)]
    pub pressor_dose: Option<f64>,

    /// Glasgow Coma Scale (3-15).
    #[arg(long)]
    pub gcs: Option<f64>,

    #[arg(long)]
    pub creatinine: Option<f64>,

    #[arg(long, value_enum, default_value_t = LabUnit::MgDl)]
    pub creatinine_unit: LabUnit,

    /// Urine output (mL/24h).
    #[arg(long)]
    pub urine_output: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct PericarditisArgs {
    /// Age (years); counts as a minor criterion above 65.
    #[arg(long)]
    pub age: Option<f64>,

    /// Fever above 38 °C.
    #[arg(long)]
    pub fever: bool,

    /// Tamponade or haemodynamic instability.
    #[arg(long)]
    pub tamponade: bool,

    /// Subacute course (more than one week).
    #[arg(long)]
    pub subacute: bool,

    /// Large effusion on echocardiography.
    #[arg(long)]
    pub large_effusion: bool,

    /// Elevated troponin.
    #[arg(long)]
    pub troponin: bool,

    #[arg(long)]
    pub immunosuppressed: bool,

    /// On anticoagulation.
    #[arg(long)]
    pub anticoagulated: bool,
}

/// Hemodynamic measurements. Every field is optional.
#[derive(Debug, Args, Clone, Default)]
pub struct HemoFields {
    /// Patient initials stored with a saved case.
    #[arg(long)]
    pub initials: Option<String>,

    /// Weight (kg).
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height (cm).
    #[arg(long)]
    pub height: Option<f64>,

    /// Heart rate (bpm).
    #[arg(long)]
    pub heart_rate: Option<f64>,

    /// Systolic blood pressure (mmHg).
    #[arg(long)]
    pub sbp: Option<f64>,

    /// Diastolic blood pressure (mmHg).
    #[arg(long)]
    pub dbp: Option<f64>,

    /// Right atrial pressure (mmHg).
    #[arg(long)]
    pub rap: Option<f64>,

    /// Systolic pulmonary artery pressure (mmHg).
    #[arg(long)]
    pub spap: Option<f64>,

    /// Diastolic pulmonary artery pressure (mmHg).
    #[arg(long)]
    pub dpap: Option<f64>,

    /// Mean pulmonary artery pressure (mmHg).
    #[arg(long)]
    pub mpap: Option<f64>,

    /// Pulmonary capillary wedge pressure (mmHg).
    #[arg(long)]
    pub pcwp: Option<f64>,

    /// Thermodilution cardiac output (L/min).
    #[arg(long = "co")]
    pub cardiac_output: Option<f64>,

    /// Hemoglobin (g/dL).
    #[arg(long = "hb")]
    pub hemoglobin: Option<f64>,

    /// Arterial saturation (%).
    #[arg(long)]
    pub sao2: Option<f64>,

    /// Mixed venous saturation (%).
    #[arg(long)]
    pub svo2: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct HemoArgs {
    #[command(flatten)]
    pub fields: HemoFields,

    /// Start from a saved case; flags override its values.
    #[arg(long, value_name = "ID")]
    pub case: Option<String>,

    /// Write the resulting inputs back to the case given with --case.
    #[arg(long, requires = "case")]
    pub save: bool,
}

/// Infusion form fields. Unset fields keep the preset's value.
#[derive(Debug, Args, Clone, Default)]
pub struct InfusionFields {
    /// Drug amount in the bag or syringe.
    #[arg(long)]
    pub amount: Option<f64>,

    #[arg(long, value_enum)]
    pub amount_unit: Option<AmountUnit>,

    /// Diluent volume (mL).
    #[arg(long)]
    pub volume: Option<f64>,

    #[arg(long)]
    pub dose: Option<f64>,

    #[arg(long, value_enum)]
    pub dose_unit: Option<DoseUnit>,

    /// Patient weight (kg); required for per-kg doses.
    #[arg(long)]
    pub weight: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct InfusionArgs {
    #[arg(long, value_enum)]
    pub drug: Drug,

    #[command(flatten)]
    pub fields: InfusionFields,
}
