//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings and starts logging
//! - parses CLI arguments
//! - turns them into calculator inputs (merging saved snapshots where asked)
//! - prints text or JSON reports

use clap::Parser;

use crate::calc::{self, CalculatorInput};
use crate::cli::{
    CaseCommand, Cli, Command, GraceArgs, HemoArgs, HemoFields, InfusionArgs, InfusionFields, PericarditisArgs, PresetCommand,
    SofaArgs,
};
use crate::config::Settings;
use crate::domain::{Drug, GraceInput, HemoInput, InfusionInput, ScoreResult, SofaInput};
use crate::error::{AppError, EXIT_STORAGE, EXIT_USAGE};
use crate::infusion::{catalog, preset_for};
use crate::report;
use crate::scores::pericarditis::{self, PericarditisInput};
use crate::store::{JsonDirStore, Snapshot, SnapshotStore, StoreError, StoreKey};

/// Entry point for the `cicu` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::from_env().with_data_dir(cli.data_dir.clone());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.log_filter.as_str())).init();
    log::debug!("Data directory: {}", settings.data_dir.display());

    let mut store = JsonDirStore::new(&settings.data_dir);
    let output = execute(cli.command, cli.json, &mut store)?;
    println!("{output}");
    Ok(())
}

/// Run one command against `store` and return what should be printed.
pub fn execute(command: Command, json: bool, store: &mut impl SnapshotStore) -> Result<String, AppError> {
    match command {
        Command::Grace(args) => render(&CalculatorInput::Grace(grace_input(&args)), json),
        Command::Sofa(args) => render(&CalculatorInput::Sofa(sofa_input(&args)), json),
        Command::Hemo(args) => handle_hemo(args, json, store),
        Command::Infusion(args) => handle_infusion(args, json, store),
        Command::Pericarditis(args) => {
            let r = pericarditis::assess(&pericarditis_input(&args));
            if json { report::to_json(&r) } else { Ok(report::format_pericarditis(&r)) }
        }
        Command::Frailty { level } => {
            let r = crate::scores::frailty::assess(level)
                .ok_or_else(|| AppError::new(EXIT_USAGE, format!("CFS level must be 1-9 (got {level}).")))?;
            if json { report::to_json(&r) } else { Ok(report::format_frailty(&r)) }
        }
        Command::Drugs => {
            let presets = catalog();
            if json { report::to_json(&presets) } else { Ok(report::format_catalog(&presets)) }
        }
        Command::Case(cmd) => handle_case(cmd, json, store),
        Command::Preset(cmd) => handle_preset(cmd, json, store),
    }
}

fn render(input: &CalculatorInput, json: bool) -> Result<String, AppError> {
    let result = calc::derive(input).map_err(|issue| AppError::new(EXIT_USAGE, format!("No result: {issue}.")))?;
    if json {
        return report::to_json(&result);
    }

    let text = match (input, &result) {
        (_, ScoreResult::Grace(r)) => report::format_grace(r),
        (_, ScoreResult::Sofa(r)) => report::format_sofa(r),
        (CalculatorInput::Hemo(i), ScoreResult::Hemo(r)) => report::format_hemo(i, r),
        (CalculatorInput::Infusion(i), ScoreResult::Dose(r)) => report::format_dose(i, &preset_for(i.drug), r),
        _ => return Err(AppError::new(EXIT_USAGE, "Calculator returned a mismatched result.")),
    };
    Ok(text)
}

fn handle_hemo(args: HemoArgs, json: bool, store: &mut impl SnapshotStore) -> Result<String, AppError> {
    let key = args.case.as_deref().map(StoreKey::case).transpose()?;

    let mut input = match &key {
        Some(key) => load_case(&*store, key)?.unwrap_or_default(),
        None => HemoInput::default(),
    };
    apply_hemo(&args.fields, &mut input);

    if args.save {
        let key = key.ok_or_else(|| AppError::new(EXIT_USAGE, "--save needs --case."))?;
        store.save(&key, &Snapshot::HemoCase(input.clone()))?;
    }

    render(&CalculatorInput::Hemo(input), json)
}

fn handle_infusion(args: InfusionArgs, json: bool, store: &mut impl SnapshotStore) -> Result<String, AppError> {
    let mut input = match load_preset(&*store, args.drug)? {
        Some(saved) => {
            log::info!("Using saved preset for {}", args.drug.id());
            saved
        }
        None => InfusionInput::from_preset(&preset_for(args.drug), None),
    };
    apply_infusion(&args.fields, &mut input);
    render(&CalculatorInput::Infusion(input), json)
}

fn handle_case(cmd: CaseCommand, json: bool, store: &mut impl SnapshotStore) -> Result<String, AppError> {
    match cmd {
        CaseCommand::Save { id, fields } => {
            let key = StoreKey::case(&id)?;
            let mut input = HemoInput::default();
            apply_hemo(&fields, &mut input);
            store.save(&key, &Snapshot::HemoCase(input))?;
            Ok(format!("Saved {key}."))
        }
        CaseCommand::Load { id } => {
            let key = StoreKey::case(&id)?;
            let input = load_case(&*store, &key)?.ok_or_else(|| StoreError::NotFound(key.slug()))?;
            render(&CalculatorInput::Hemo(input), json)
        }
        CaseCommand::Show { id } => {
            let key = StoreKey::case(&id)?;
            report::to_json(&store.load(&key)?)
        }
    }
}

fn handle_preset(cmd: PresetCommand, json: bool, store: &mut impl SnapshotStore) -> Result<String, AppError> {
    match cmd {
        PresetCommand::Save { drug, fields } => {
            let mut input = InfusionInput::from_preset(&preset_for(drug), None);
            apply_infusion(&fields, &mut input);
            let key = StoreKey::Drug(drug);
            store.save(&key, &Snapshot::DosePreset(input))?;
            Ok(format!("Saved {key}."))
        }
        PresetCommand::Load { drug } => {
            let input = load_preset(&*store, drug)?.ok_or_else(|| StoreError::NotFound(StoreKey::Drug(drug).slug()))?;
            render(&CalculatorInput::Infusion(input), json)
        }
    }
}

/// Saved case inputs, or `None` when nothing is stored under `key`.
fn load_case(store: &impl SnapshotStore, key: &StoreKey) -> Result<Option<HemoInput>, AppError> {
    match store.load(key) {
        Ok(Snapshot::HemoCase(input)) => Ok(Some(input)),
        Ok(_) => Err(AppError::new(EXIT_STORAGE, format!("{key} does not hold a hemodynamic case."))),
        Err(StoreError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn load_preset(store: &impl SnapshotStore, drug: Drug) -> Result<Option<InfusionInput>, AppError> {
    let key = StoreKey::Drug(drug);
    match store.load(&key) {
        Ok(Snapshot::DosePreset(input)) => Ok(Some(input)),
        Ok(_) => Err(AppError::new(EXIT_STORAGE, format!("{key} does not hold an infusion preset."))),
        Err(StoreError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn grace_input(args: &GraceArgs) -> GraceInput {
    GraceInput {
        age: args.age,
        heart_rate: args.heart_rate,
        systolic_bp: args.systolic_bp,
        creatinine: args.creatinine,
        creatinine_unit: args.creatinine_unit,
        killip: args.killip,
        cardiac_arrest: args.cardiac_arrest,
        st_deviation: args.st_deviation,
        elevated_enzymes: !args.no_enzymes,
    }
}

pub fn sofa_input(args: &SofaArgs) -> SofaInput {
    SofaInput {
        pao2: args.pao2,
        fio2: args.fio2,
        respiratory_support: args.ventilated,
        platelets: args.platelets,
        bilirubin: args.bilirubin,
        bilirubin_unit: args.bilirubin_unit,
        map: args.map,
        pressor: args.pressor,
        pressor_dose: args.pressor_dose,
        gcs: args.gcs,
        creatinine: args.creatinine,
        creatinine_unit: args.creatinine_unit,
        urine_output: args.urine_output,
    }
}

pub fn pericarditis_input(args: &PericarditisArgs) -> PericarditisInput {
    PericarditisInput {
        age: args.age,
        fever: args.fever,
        tamponade: args.tamponade,
        subacute: args.subacute,
        large_effusion: args.large_effusion,
        troponin: args.troponin,
        immunosuppressed: args.immunosuppressed,
        anticoagulated: args.anticoagulated,
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Copy every flag that was given onto `input`.
pub fn apply_hemo(fields: &HemoFields, input: &mut HemoInput) {
    overlay(&mut input.initials, fields.initials.clone());
    overlay(&mut input.weight_kg, fields.weight);
    overlay(&mut input.height_cm, fields.height);
    overlay(&mut input.heart_rate, fields.heart_rate);
    overlay(&mut input.systolic_bp, fields.sbp);
    overlay(&mut input.diastolic_bp, fields.dbp);
    overlay(&mut input.rap, fields.rap);
    overlay(&mut input.spap, fields.spap);
    overlay(&mut input.dpap, fields.dpap);
    overlay(&mut input.mpap, fields.mpap);
    overlay(&mut input.pcwp, fields.pcwp);
    overlay(&mut input.cardiac_output, fields.cardiac_output);
    overlay(&mut input.hemoglobin, fields.hemoglobin);
    overlay(&mut input.sao2, fields.sao2);
    overlay(&mut input.svo2, fields.svo2);
}

pub fn apply_infusion(fields: &InfusionFields, input: &mut InfusionInput) {
    overlay(&mut input.amount, fields.amount);
    overlay(&mut input.volume_ml, fields.volume);
    overlay(&mut input.dose, fields.dose);
    overlay(&mut input.weight_kg, fields.weight);
    if let Some(unit) = fields.amount_unit {
        input.amount_unit = unit;
    }
    if let Some(unit) = fields.dose_unit {
        input.dose_unit = unit;
    }
}
