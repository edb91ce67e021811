//! Formatted terminal output.
//!
//! Calculators return raw numbers; decimal precision and labels are decided here so
//! the computation code stays free of presentation concerns.

use crate::domain::{DoseResult, DrugPreset, GraceResult, HemoInput, HemoResult, InfusionInput, SofaResult};
use crate::hemo::reference::{self, Metric, RangeStatus};
use crate::scores::frailty::FrailtyResult;
use crate::scores::pericarditis::PericarditisResult;

pub fn format_grace(r: &GraceResult) -> String {
    let mut out = String::new();

    out.push_str("=== GRACE (in-hospital) ===\n");
    out.push_str(&format!("Score: {}\n", r.score));
    out.push_str(&format!("Risk: {} ({})\n", r.risk.display_name(), r.risk.color()));
    out.push_str(&format!("Estimated in-hospital mortality: {:.1}%\n", r.mortality_pct));

    out.push_str("\nPoints:\n");
    let p = &r.points;
    for (label, pts) in [
        ("age", p.age),
        ("heart rate", p.heart_rate),
        ("systolic BP", p.systolic_bp),
        ("creatinine", p.creatinine),
        ("Killip", p.killip),
        ("cardiac arrest", p.cardiac_arrest),
        ("ST deviation", p.st_deviation),
        ("elevated enzymes", p.elevated_enzymes),
    ] {
        out.push_str(&format!("  {label:<18} {pts:>4}\n"));
    }
    out.push_str(&format!("\n* Creatinine used: {:.2} mg/dL\n", r.creatinine_mg_dl));

    out
}

pub fn format_sofa(r: &SofaResult) -> String {
    let mut out = String::new();

    out.push_str("=== SOFA ===\n");
    for (label, s) in [
        ("respiratory", r.respiratory),
        ("coagulation", r.coagulation),
        ("liver", r.liver),
        ("cardiovascular", r.cardiovascular),
        ("CNS", r.cns),
        ("renal", r.renal),
    ] {
        out.push_str(&format!("  {label:<16} {s}\n"));
    }
    out.push_str(&format!("Total: {}/24\n", r.total));

    out
}

pub fn format_hemo(input: &HemoInput, r: &HemoResult) -> String {
    let mut out = String::new();

    out.push_str("=== PAC hemodynamics ===\n");
    if let Some(initials) = &input.initials {
        out.push_str(&format!("Patient: {initials}\n"));
    }
    let rows: [(&str, Option<f64>, usize, &str, Option<Metric>); 20] = [
        ("BMI", r.bmi, 1, "kg/m²", None),
        ("BSA", r.bsa, 2, "m²", None),
        ("MAP", r.map, 0, "mmHg", None),
        ("TPG", r.tpg, 0, "mmHg", Some(Metric::Tpg)),
        ("DPG", r.dpg, 0, "mmHg", None),
        ("CI", r.ci, 2, "L/min/m²", Some(Metric::Ci)),
        ("SV", r.sv, 0, "mL", None),
        ("SVI", r.svi, 0, "mL/m²", None),
        ("SVR", r.svr, 0, "dyn·s·cm⁻⁵", Some(Metric::Svr)),
        ("SVR", r.svr_wu, 1, "WU", Some(Metric::SvrWu)),
        ("PVR", r.pvr, 0, "dyn·s·cm⁻⁵", Some(Metric::Pvr)),
        ("PVR", r.pvr_wu, 2, "WU", Some(Metric::PvrWu)),
        ("PAPi", r.papi, 2, "", Some(Metric::Papi)),
        ("RAP/PCWP", r.rap_pcwp, 2, "", Some(Metric::RapPcwp)),
        ("CPO", r.cpo, 2, "W", Some(Metric::Cpo)),
        ("VO2 (est.)", r.vo2, 0, "mL/min", None),
        ("CaO2", r.cao2, 1, "mL/dL", None),
        ("CvO2", r.cvo2, 1, "mL/dL", None),
        ("a-v O2 diff", r.av_diff, 2, "mL/dL", None),
        ("CO (Fick)", r.co_fick, 3, "L/min", None),
    ];

    for (label, value, decimals, unit, metric) in rows {
        let range = metric.map(|m| m.range().describe()).unwrap_or_default();
        let status = match (value, metric) {
            (Some(v), Some(m)) => status_mark(m.range().classify(v)),
            _ => "",
        };
        out.push_str(
            format!(
                "  {label:<12} {:>9} {unit:<11} {range:<10} {status}\n",
                fmt_opt(value, decimals)
            )
            .trim_end(),
        );
        out.push('\n');
    }

    let measured: Vec<_> = reference::classify(input, r)
        .into_iter()
        .filter(|f| matches!(f.metric, Metric::Rap | Metric::Mpap | Metric::Pcwp | Metric::Svo2))
        .collect();
    if !measured.is_empty() {
        out.push_str("\nMeasured vs reference:\n");
        for f in measured {
            let range = f.metric.range();
            out.push_str(&format!(
                "  {:<12} {:>9.0} {:<11} {:<10} {}\n",
                range.label,
                f.value,
                range.unit,
                range.describe(),
                status_mark(f.status)
            ));
        }
    }

    out
}

pub fn format_dose(input: &InfusionInput, preset: &DrugPreset, r: &DoseResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} infusion ===\n", input.drug.display_name()));
    out.push_str(&format!(
        "Dilution: {} {} in {} mL\n",
        fmt_opt(input.amount, 2),
        input.amount_unit.label(),
        fmt_opt(input.volume_ml, 0)
    ));
    match r.concentration {
        Some(c) => out.push_str(&format!("Concentration: {:.2} {}\n", c.value(), c.unit_label())),
        None => out.push_str("Concentration: -\n"),
    }
    out.push_str(&format!(
        "Dose: {} {}\n",
        fmt_opt(input.dose, 4),
        input.dose_unit.label()
    ));
    out.push_str(&format!("Rate: {} mL/h\n", fmt_opt(r.rate_ml_h, 2)));
    if r.out_of_range {
        out.push_str(&format!(
            "WARNING: dose outside usual range {}–{} {}\n",
            preset.min_dose,
            preset.max_dose,
            preset.dose_unit.label()
        ));
    }

    out
}

pub fn format_frailty(r: &FrailtyResult) -> String {
    let mut out = String::new();
    out.push_str("=== Clinical Frailty Scale ===\n");
    out.push_str(&format!("CFS {}: {}\n", r.level.value, r.level.title));
    out.push_str(&format!("  {}\n", r.level.description));
    out.push_str(&format!("{}: {}\n", r.band.display_name(), r.band.note()));
    out
}

pub fn format_pericarditis(r: &PericarditisResult) -> String {
    let mut out = String::new();
    out.push_str("=== Pericarditis risk ===\n");
    out.push_str(&format!("{}\n", r.risk.display_name()));
    out.push_str(&format!("Major: {}  Minor: {}\n", r.major, r.minor));
    out.push_str(&format!("Plan: {}\n", r.plan));
    out
}

/// Table of catalog presets.
pub fn format_catalog(presets: &[DrugPreset]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<18} {:>14} {:>8} {:<11} {:>14}\n",
        "drug", "amount", "volume", "dose unit", "usual range"
    ));
    out.push_str(&format!(
        "{:-<18} {:-<14} {:-<8} {:-<11} {:-<14}\n",
        "", "", "", "", ""
    ));
    for p in presets {
        out.push_str(&format!(
            "{:<18} {:>10} {:<3} {:>5} mL {:<11} {:>14}\n",
            p.drug.id(),
            p.amount_value,
            p.amount_unit.label(),
            p.volume_ml,
            p.dose_unit.label(),
            format!("{}–{}", p.min_dose, p.max_dose)
        ));
    }
    out
}

fn status_mark(status: RangeStatus) -> &'static str {
    match status {
        RangeStatus::Low => "LOW",
        RangeStatus::Normal => "ok",
        RangeStatus::High => "HIGH",
    }
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => "-".to_string(),
    }
}
