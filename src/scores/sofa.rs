//! SOFA organ-dysfunction score.
//!
//! Six independent domains, each scored 0–4. A domain whose inputs are missing
//! scores 0, so the total is always computable (range 0–24).

use crate::domain::{LabUnit, Pressor, SofaInput, SofaResult};
use crate::error::CalcIssue;
use crate::math::{bilirubin_mgdl, creatinine_mgdl};

/// PaO2/FiO2 ratio with FiO2 given in percent.
pub fn pf_ratio(pao2: f64, fio2_pct: f64) -> Result<f64, CalcIssue> {
    let fraction = fio2_pct / 100.0;
    if !(fraction.is_finite() && fraction > 0.0) {
        return Err(CalcIssue::DivisionGuard { quantity: "PaO2/FiO2" });
    }
    Ok(pao2 / fraction)
}

/// PaO2/FiO2 subscore.
///
/// Band order matters: a ratio in `[300, 400)` scores 1, and a ratio below 200
/// without ventilatory support falls through to the `< 300` band and scores 2.
pub fn respiratory(pao2: Option<f64>, fio2_pct: Option<f64>, on_support: bool) -> u8 {
    let (Some(pao2), Some(fio2)) = (pao2, fio2_pct) else {
        return 0;
    };
    let ratio = match pf_ratio(pao2, fio2) {
        Ok(ratio) => ratio,
        Err(issue) => {
            log::debug!("SOFA respiratory scored 0: {issue}");
            return 0;
        }
    };

    if ratio >= 400.0 {
        0
    } else if ratio < 100.0 && on_support {
        4
    } else if ratio < 200.0 && on_support {
        3
    } else if ratio < 300.0 {
        2
    } else {
        1
    }
}

/// Platelet subscore (×10³/µL).
pub fn coagulation(platelets: Option<f64>) -> u8 {
    match platelets {
        None => 0,
        Some(p) if p < 20.0 => 4,
        Some(p) if p < 50.0 => 3,
        Some(p) if p < 100.0 => 2,
        Some(p) if p < 150.0 => 1,
        Some(_) => 0,
    }
}

/// Bilirubin subscore.
pub fn liver(bilirubin: Option<f64>, unit: LabUnit) -> u8 {
    let Some(value) = bilirubin else {
        return 0;
    };
    match bilirubin_mgdl(value, unit) {
        b if b >= 12.0 => 4,
        b if b >= 6.0 => 3,
        b if b >= 2.0 => 2,
        b if b >= 1.2 => 1,
        _ => 0,
    }
}

/// Cardiovascular subscore from MAP and vasoactive support.
///
/// A missing pressor dose counts as 0 mcg/kg/min.
pub fn cardiovascular(map: Option<f64>, pressor: Pressor, dose: Option<f64>) -> u8 {
    let dose = dose.unwrap_or(0.0);
    match pressor {
        Pressor::None => match map {
            Some(m) if m < 70.0 => 1,
            _ => 0,
        },
        Pressor::Dobutamine => 2,
        Pressor::Dopamine => {
            if dose <= 5.0 {
                2
            } else if dose <= 15.0 {
                3
            } else {
                4
            }
        }
        Pressor::Epinephrine | Pressor::Norepinephrine => {
            if dose <= 0.1 {
                3
            } else {
                4
            }
        }
    }
}

/// Glasgow Coma Scale subscore; GCS is clamped to `[3, 15]` first.
pub fn cns(gcs: Option<f64>) -> u8 {
    let Some(gcs) = gcs else {
        return 0;
    };
    match gcs.clamp(3.0, 15.0) {
        g if g < 6.0 => 4,
        g if g < 9.0 => 3,
        g if g < 12.0 => 2,
        g if g < 15.0 => 1,
        _ => 0,
    }
}

pub fn renal_by_creatinine(creatinine: Option<f64>, unit: LabUnit) -> u8 {
    let Some(value) = creatinine else {
        return 0;
    };
    match creatinine_mgdl(value, unit) {
        c if c >= 5.0 => 4,
        c if c >= 3.5 => 3,
        c if c >= 2.0 => 2,
        c if c >= 1.2 => 1,
        _ => 0,
    }
}

/// Urine output subscore (mL/24h).
pub fn renal_by_urine(urine_ml_day: Option<f64>) -> u8 {
    match urine_ml_day {
        None => 0,
        Some(u) if u < 200.0 => 4,
        Some(u) if u < 500.0 => 3,
        Some(_) => 0,
    }
}

/// Renal subscore: the worse of the creatinine and urine-output branches.
pub fn renal(creatinine: Option<f64>, unit: LabUnit, urine_ml_day: Option<f64>) -> u8 {
    renal_by_creatinine(creatinine, unit).max(renal_by_urine(urine_ml_day))
}

pub fn score(input: &SofaInput) -> SofaResult {
    let respiratory = respiratory(input.pao2, input.fio2, input.respiratory_support);
    let coagulation = coagulation(input.platelets);
    let liver = liver(input.bilirubin, input.bilirubin_unit);
    let cardiovascular = cardiovascular(input.map, input.pressor, input.pressor_dose);
    let cns = cns(input.gcs);
    let renal = renal(input.creatinine, input.creatinine_unit, input.urine_output);

    SofaResult {
        respiratory,
        coagulation,
        liver,
        cardiovascular,
        cns,
        renal,
        total: respiratory + coagulation + liver + cardiovascular + cns + renal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_scores_zero() {
        let r = score(&SofaInput::default());
        assert_eq!(r.total, 0);
    }

    #[test]
    fn respiratory_band_order_is_preserved() {
        // 350 / 1.0 = 350 -> 1
        assert_eq!(respiratory(Some(350.0), Some(100.0), false), 1);
        assert_eq!(respiratory(Some(400.0), Some(100.0), false), 0);
        // ratio 80 without support falls through to 2
        assert_eq!(respiratory(Some(80.0), Some(100.0), false), 2);
        assert_eq!(respiratory(Some(80.0), Some(100.0), true), 4);
        assert_eq!(respiratory(Some(150.0), Some(100.0), true), 3);
        assert_eq!(respiratory(Some(150.0), Some(100.0), false), 2);
        // 60 mmHg on 21% -> ~286
        assert_eq!(respiratory(Some(60.0), Some(21.0), false), 2);
    }

    #[test]
    fn respiratory_guards_zero_fio2() {
        assert_eq!(respiratory(Some(80.0), Some(0.0), true), 0);
        assert_eq!(respiratory(Some(80.0), None, true), 0);
    }

    #[test]
    fn pf_ratio_reports_division_guard() {
        assert_eq!(pf_ratio(200.0, 50.0), Ok(400.0));
        assert_eq!(pf_ratio(80.0, 0.0), Err(CalcIssue::DivisionGuard { quantity: "PaO2/FiO2" }));
        assert!(pf_ratio(80.0, f64::NAN).is_err());
    }

    #[test]
    fn coagulation_and_liver_bands() {
        assert_eq!(coagulation(Some(19.0)), 4);
        assert_eq!(coagulation(Some(20.0)), 3);
        assert_eq!(coagulation(Some(149.0)), 1);
        assert_eq!(coagulation(Some(150.0)), 0);

        assert_eq!(liver(Some(12.0), LabUnit::MgDl), 4);
        assert_eq!(liver(Some(1.19), LabUnit::MgDl), 0);
        // 40 µmol/L = 2.34 mg/dL
        assert_eq!(liver(Some(40.0), LabUnit::UmolL), 2);
    }

    #[test]
    fn cardiovascular_by_agent() {
        assert_eq!(cardiovascular(None, Pressor::None, None), 0);
        assert_eq!(cardiovascular(Some(65.0), Pressor::None, None), 1);
        assert_eq!(cardiovascular(Some(70.0), Pressor::None, None), 0);
        assert_eq!(cardiovascular(Some(90.0), Pressor::Dobutamine, Some(20.0)), 2);
        assert_eq!(cardiovascular(None, Pressor::Dopamine, Some(5.0)), 2);
        assert_eq!(cardiovascular(None, Pressor::Dopamine, Some(15.0)), 3);
        assert_eq!(cardiovascular(None, Pressor::Dopamine, Some(15.1)), 4);
        assert_eq!(cardiovascular(None, Pressor::Norepinephrine, Some(0.1)), 3);
        assert_eq!(cardiovascular(None, Pressor::Epinephrine, Some(0.2)), 4);
        assert_eq!(cardiovascular(None, Pressor::Norepinephrine, None), 3);
    }

    #[test]
    fn cns_clamps_gcs() {
        assert_eq!(cns(Some(1.0)), 4);
        assert_eq!(cns(Some(8.0)), 3);
        assert_eq!(cns(Some(11.0)), 2);
        assert_eq!(cns(Some(14.0)), 1);
        assert_eq!(cns(Some(15.0)), 0);
        assert_eq!(cns(Some(40.0)), 0);
    }

    #[test]
    fn renal_takes_worse_branch() {
        // creatinine dominates
        assert_eq!(renal(Some(4.0), LabUnit::MgDl, Some(1500.0)), 3);
        // urine dominates
        assert_eq!(renal(Some(1.0), LabUnit::MgDl, Some(150.0)), 4);
        // each branch alone
        assert_eq!(renal(None, LabUnit::MgDl, Some(300.0)), 3);
        assert_eq!(renal(Some(450.0), LabUnit::UmolL, None), 4);
    }

    #[test]
    fn worst_case_total_is_24() {
        let input = SofaInput {
            pao2: Some(50.0),
            fio2: Some(100.0),
            respiratory_support: true,
            platelets: Some(10.0),
            bilirubin: Some(15.0),
            bilirubin_unit: LabUnit::MgDl,
            map: Some(50.0),
            pressor: Pressor::Norepinephrine,
            pressor_dose: Some(0.5),
            gcs: Some(3.0),
            creatinine: Some(6.0),
            creatinine_unit: LabUnit::MgDl,
            urine_output: Some(100.0),
        };
        assert_eq!(score(&input).total, 24);
    }

    fn opt(v: f64, present: bool) -> Option<f64> {
        present.then_some(v)
    }

    proptest! {
        #[test]
        fn subscores_and_total_are_bounded(
            pao2 in -50.0f64..700.0,
            fio2 in -10.0f64..110.0,
            support in any::<bool>(),
            platelets in -10.0f64..500.0,
            bili in -1.0f64..40.0,
            map in 0.0f64..150.0,
            p in 0usize..5,
            dose in -1.0f64..30.0,
            gcs in -5.0f64..30.0,
            cr in -1.0f64..12.0,
            urine in -100.0f64..4000.0,
            present in proptest::array::uniform8(any::<bool>()),
        ) {
            let pressors = [
                Pressor::None,
                Pressor::Dobutamine,
                Pressor::Dopamine,
                Pressor::Epinephrine,
                Pressor::Norepinephrine,
            ];
            let input = SofaInput {
                pao2: opt(pao2, present[0]),
                fio2: opt(fio2, present[1]),
                respiratory_support: support,
                platelets: opt(platelets, present[2]),
                bilirubin: opt(bili, present[3]),
                bilirubin_unit: LabUnit::MgDl,
                map: opt(map, present[4]),
                pressor: pressors[p],
                pressor_dose: Some(dose),
                gcs: opt(gcs, present[5]),
                creatinine: opt(cr, present[6]),
                creatinine_unit: LabUnit::MgDl,
                urine_output: opt(urine, present[7]),
            };
            let r = score(&input);
            for s in [r.respiratory, r.coagulation, r.liver, r.cardiovascular, r.cns, r.renal] {
                prop_assert!(s <= 4);
            }
            prop_assert!(r.total <= 24);
            prop_assert_eq!(
                r.renal,
                renal_by_creatinine(input.creatinine, LabUnit::MgDl).max(renal_by_urine(input.urine_output))
            );
        }
    }
}
