//! Dose ↔ pump-rate conversion.
//!
//! Concentration comes from the prepared dilution:
//!
//! - mg  → mcg/mL = amount · 1000 / volume
//! - mcg → mcg/mL = amount / volume
//! - UI  → UI/mL  = amount / volume
//!
//! Rates are mL/h. Mass dose units need a mass concentration and `UI/kg/h` needs an
//! activity concentration; a mismatch, a zero concentration, or a missing weight for a
//! per-kg unit leaves the rate undefined.

use crate::domain::{
    AmountUnit, Concentration, DoseResult, DoseUnit, Drug, DrugPreset, InfusionInput,
};
use crate::infusion::presets::preset_for;

/// Concentrations at or below this are treated as zero.
const CONC_EPS: f64 = 1e-9;

pub fn concentration(amount: f64, unit: AmountUnit, volume_ml: f64) -> Option<Concentration> {
    if !(amount.is_finite() && volume_ml.is_finite() && volume_ml > 0.0) {
        return None;
    }
    let conc = match unit {
        AmountUnit::Mg => Concentration::Mass {
            mcg_per_ml: amount * 1000.0 / volume_ml,
        },
        AmountUnit::Mcg => Concentration::Mass {
            mcg_per_ml: amount / volume_ml,
        },
        AmountUnit::Ui => Concentration::Activity {
            ui_per_ml: amount / volume_ml,
        },
    };
    Some(conc)
}

/// Concentration in the kind `unit` requires, if usable as a divisor.
fn matching_conc(unit: DoseUnit, conc: Concentration) -> Option<f64> {
    let value = match (unit.is_activity(), conc) {
        (true, Concentration::Activity { ui_per_ml }) => ui_per_ml,
        (false, Concentration::Mass { mcg_per_ml }) => mcg_per_ml,
        _ => {
            log::debug!("{} dose cannot use a {} concentration", unit.label(), conc.unit_label());
            return None;
        }
    };
    (value.is_finite() && value > CONC_EPS).then_some(value)
}

/// Weight to apply: the patient weight for per-kg units, 1 otherwise.
fn weight_factor(unit: DoseUnit, weight_kg: Option<f64>) -> Option<f64> {
    if unit.per_kg() {
        weight_kg.filter(|w| w.is_finite() && *w > 0.0)
    } else {
        Some(1.0)
    }
}

/// Pump rate (mL/h) delivering `dose`.
pub fn rate_ml_h(dose: f64, unit: DoseUnit, weight_kg: Option<f64>, conc: Concentration) -> Option<f64> {
    let c = matching_conc(unit, conc)?;
    let w = weight_factor(unit, weight_kg)?;

    let rate = match unit {
        DoseUnit::McgKgMin => (dose * w / c) * 60.0,
        DoseUnit::McgMin => (dose / c) * 60.0,
        DoseUnit::UiKgH => (dose * w) / c,
        DoseUnit::MgH => (dose * 1000.0) / c,
        DoseUnit::McgKgH => (dose * w) / c,
        DoseUnit::McgH => dose / c,
    };
    rate.is_finite().then_some(rate)
}

/// Dose delivered by a pump running at `rate_ml_h`; the inverse of [`rate_ml_h`].
pub fn dose_from_rate(rate_ml_h: f64, unit: DoseUnit, weight_kg: Option<f64>, conc: Concentration) -> Option<f64> {
    let c = matching_conc(unit, conc)?;
    let w = weight_factor(unit, weight_kg)?;

    let dose = match unit {
        DoseUnit::McgKgMin => rate_ml_h / 60.0 * c / w,
        DoseUnit::McgMin => rate_ml_h / 60.0 * c,
        DoseUnit::UiKgH => rate_ml_h * c / w,
        DoseUnit::MgH => rate_ml_h * c / 1000.0,
        DoseUnit::McgKgH => rate_ml_h * c / w,
        DoseUnit::McgH => rate_ml_h * c,
    };
    dose.is_finite().then_some(dose)
}

/// Raw dose outside the preset range.
///
/// The comparison ignores which dose unit is selected: the number is compared against
/// the preset's limits as-is.
pub fn out_of_range(dose: f64, preset: &DrugPreset) -> bool {
    dose < preset.min_dose || dose > preset.max_dose
}

/// Starting dose after selecting a preset.
pub fn default_dose(preset: &DrugPreset) -> f64 {
    match preset.dose_unit {
        DoseUnit::UiKgH => 0.0005,
        DoseUnit::McgMin | DoseUnit::MgH => preset.min_dose,
        DoseUnit::McgKgMin | DoseUnit::McgKgH | DoseUnit::McgH => 0.1,
    }
}

impl InfusionInput {
    /// Form state right after choosing `preset`.
    pub fn from_preset(preset: &DrugPreset, weight_kg: Option<f64>) -> Self {
        Self {
            drug: preset.drug,
            amount: Some(preset.amount_value),
            amount_unit: preset.amount_unit,
            volume_ml: Some(preset.volume_ml),
            dose: Some(default_dose(preset)),
            dose_unit: preset.dose_unit,
            weight_kg,
        }
    }

    /// Switch to another drug: dilution, dose unit and dose reset; weight is kept.
    pub fn switch_drug(&mut self, drug: Drug) {
        *self = Self::from_preset(&preset_for(drug), self.weight_kg);
    }
}

/// Concentration, pump rate and range flag for the current form state.
pub fn convert(input: &InfusionInput) -> DoseResult {
    let preset = preset_for(input.drug);

    let concentration = input
        .amount
        .zip(input.volume_ml)
        .and_then(|(amount, volume)| concentration(amount, input.amount_unit, volume));

    let rate = match (input.dose, concentration) {
        (Some(dose), Some(conc)) => rate_ml_h(dose, input.dose_unit, input.weight_kg, conc),
        _ => None,
    };

    let out_of_range = input.dose.is_some_and(|d| out_of_range(d, &preset));
    if out_of_range {
        log::warn!(
            "{} dose {} outside {}–{} {}",
            input.drug.display_name(),
            input.dose.unwrap_or_default(),
            preset.min_dose,
            preset.max_dose,
            preset.dose_unit.label()
        );
    }

    DoseResult {
        concentration,
        rate_ml_h: rate,
        out_of_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mass(mcg_per_ml: f64) -> Concentration {
        Concentration::Mass { mcg_per_ml }
    }

    #[test]
    fn norepinephrine_reference_rate() {
        let input = InfusionInput {
            drug: Drug::Norepinephrine,
            amount: Some(25.0),
            amount_unit: AmountUnit::Mg,
            volume_ml: Some(250.0),
            dose: Some(0.1),
            dose_unit: DoseUnit::McgKgMin,
            weight_kg: Some(70.0),
        };
        let r = convert(&input);
        assert_eq!(r.concentration, Some(mass(100.0)));
        assert!((r.rate_ml_h.unwrap() - 4.2).abs() < 1e-9);
        assert!(!r.out_of_range);
    }

    #[test]
    fn concentration_by_amount_unit() {
        assert_eq!(concentration(400.0, AmountUnit::Mcg, 100.0), Some(mass(4.0)));
        assert_eq!(
            concentration(20.0, AmountUnit::Ui, 100.0),
            Some(Concentration::Activity { ui_per_ml: 0.2 })
        );
        assert_eq!(concentration(20.0, AmountUnit::Mg, 0.0), None);
    }

    #[test]
    fn rate_formulas() {
        let c = mass(200.0);
        assert!((rate_ml_h(50.0, DoseUnit::McgMin, None, c).unwrap() - 15.0).abs() < 1e-12);
        assert!((rate_ml_h(10.0, DoseUnit::MgH, None, mass(1000.0)).unwrap() - 10.0).abs() < 1e-12);
        assert!((rate_ml_h(0.5, DoseUnit::McgKgH, Some(80.0), mass(4.0)).unwrap() - 10.0).abs() < 1e-12);
        assert!((rate_ml_h(100.0, DoseUnit::McgH, None, mass(10.0)).unwrap() - 10.0).abs() < 1e-12);
        let act = Concentration::Activity { ui_per_ml: 1.0 };
        assert!((rate_ml_h(0.1, DoseUnit::UiKgH, Some(80.0), act).unwrap() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn guarded_rates_are_absent() {
        // zero concentration
        assert_eq!(rate_ml_h(0.1, DoseUnit::McgKgMin, Some(70.0), mass(0.0)), None);
        // per-kg unit without weight
        assert_eq!(rate_ml_h(0.1, DoseUnit::McgKgMin, None, mass(100.0)), None);
        // activity dose with a mass concentration
        assert_eq!(rate_ml_h(0.1, DoseUnit::UiKgH, Some(70.0), mass(100.0)), None);
    }

    #[test]
    fn range_check_ignores_selected_unit() {
        let mut input = InfusionInput::from_preset(&preset_for(Drug::Norepinephrine), Some(70.0));
        input.dose_unit = DoseUnit::McgMin;
        input.dose = Some(7.0);
        // 7 mcg/min is an ordinary dose but exceeds the preset's 1.0 (mcg/kg/min) limit.
        assert!(convert(&input).out_of_range);
    }

    #[test]
    fn switching_drug_resets_to_preset_defaults() {
        let mut input = InfusionInput::from_preset(&preset_for(Drug::Norepinephrine), Some(82.0));
        input.amount = Some(8.0);
        input.dose = Some(0.4);

        input.switch_drug(Drug::Vasopressin);
        assert_eq!(input.amount, Some(40.0));
        assert_eq!(input.volume_ml, Some(100.0));
        assert_eq!(input.dose_unit, DoseUnit::UiKgH);
        assert_eq!(input.dose, Some(0.0005));
        assert_eq!(input.weight_kg, Some(82.0));

        input.switch_drug(Drug::Nitroglycerin);
        assert_eq!(input.dose, Some(5.0));
        input.switch_drug(Drug::Isoproterenol);
        assert_eq!(input.dose, Some(1.0));
        input.switch_drug(Drug::Morphine);
        assert_eq!(input.dose, Some(1.0));
        input.switch_drug(Drug::Remifentanil);
        assert_eq!(input.dose, Some(0.1));
    }

    #[test]
    fn vasopressin_default_rate() {
        let input = InfusionInput::from_preset(&preset_for(Drug::Vasopressin), Some(70.0));
        let r = convert(&input);
        assert_eq!(r.concentration, Some(Concentration::Activity { ui_per_ml: 0.4 }));
        // 0.0005 UI/kg/h * 70 kg / 0.4 UI/mL
        assert!((r.rate_ml_h.unwrap() - 0.0875).abs() < 1e-12);
        assert!(!r.out_of_range);
    }

    #[test]
    fn low_norepinephrine_dose_is_flagged() {
        let mut input = InfusionInput::from_preset(&preset_for(Drug::Norepinephrine), Some(70.0));
        input.dose = Some(0.015);
        assert!(convert(&input).out_of_range);
        input.dose = Some(0.02);
        assert!(!convert(&input).out_of_range);
    }

    #[test]
    fn units_without_a_catalog_preset_still_convert() {
        // remifentanil 5 mg/100 mL = 50 mcg/mL
        let mut input = InfusionInput::from_preset(&preset_for(Drug::Remifentanil), Some(70.0));

        input.dose_unit = DoseUnit::McgKgH;
        input.dose = Some(0.5);
        assert!((convert(&input).rate_ml_h.unwrap() - 0.7).abs() < 1e-12);

        input.dose_unit = DoseUnit::McgH;
        input.dose = Some(100.0);
        assert!((convert(&input).rate_ml_h.unwrap() - 2.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn rate_round_trips_to_dose(
            dose in 0.0001f64..500.0,
            weight in 1.0f64..250.0,
            conc in 0.01f64..5000.0,
            u in 0usize..6,
        ) {
            let unit = DoseUnit::ALL[u];
            let c = if unit.is_activity() {
                Concentration::Activity { ui_per_ml: conc }
            } else {
                mass(conc)
            };
            let rate = rate_ml_h(dose, unit, Some(weight), c).unwrap();
            let back = dose_from_rate(rate, unit, Some(weight), c).unwrap();
            prop_assert!((back - dose).abs() <= 1e-9 * dose.max(1.0));
        }
    }
}
