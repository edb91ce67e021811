//! Drug catalog: standard dilutions, dose units and usual dose ranges for the unit.

use crate::domain::{AmountUnit, DoseUnit, Drug, DrugPreset};

const fn preset(
    drug: Drug,
    amount_value: f64,
    amount_unit: AmountUnit,
    volume_ml: f64,
    dose_unit: DoseUnit,
    min_dose: f64,
    max_dose: f64,
) -> DrugPreset {
    DrugPreset {
        drug,
        amount_value,
        amount_unit,
        volume_ml,
        dose_unit,
        min_dose,
        max_dose,
    }
}

/// Catalog defaults for `drug`.
pub fn preset_for(drug: Drug) -> DrugPreset {
    use AmountUnit::{Mcg, Mg, Ui};
    use DoseUnit::*;

    match drug {
        Drug::Norepinephrine => preset(drug, 25.0, Mg, 250.0, McgKgMin, 0.02, 1.0),
        Drug::Epinephrine => preset(drug, 1.6, Mg, 100.0, McgKgMin, 0.02, 1.0),
        Drug::Dopamine => preset(drug, 400.0, Mg, 250.0, McgKgMin, 2.0, 20.0),
        Drug::Dopamine200 => preset(drug, 200.0, Mg, 100.0, McgKgMin, 2.0, 20.0),
        Drug::Isoproterenol => preset(drug, 200.0, Mcg, 100.0, McgMin, 1.0, 10.0),
        Drug::Vasopressin => preset(drug, 40.0, Ui, 100.0, UiKgH, 0.0001, 0.003),
        Drug::Nitroglycerin => preset(drug, 50.0, Mg, 250.0, McgMin, 5.0, 200.0),
        Drug::Nitroprusside => preset(drug, 50.0, Mg, 250.0, McgKgMin, 0.3, 10.0),
        Drug::Dobutamine => preset(drug, 500.0, Mg, 250.0, McgKgMin, 2.0, 20.0),
        Drug::Milrinone10 => preset(drug, 10.0, Mg, 250.0, McgKgMin, 0.125, 0.75),
        Drug::Milrinone20 => preset(drug, 20.0, Mg, 250.0, McgKgMin, 0.125, 0.75),
        Drug::Levosimendan => preset(drug, 22.5, Mg, 250.0, McgKgMin, 0.05, 0.2),
        Drug::Remifentanil => preset(drug, 5.0, Mg, 100.0, McgKgMin, 0.025, 0.3),
        Drug::Morphine => preset(drug, 50.0, Mg, 50.0, MgH, 1.0, 10.0),
        Drug::Cisatracurium => preset(drug, 200.0, Mg, 100.0, McgKgMin, 0.5, 5.0),
    }
}

/// The whole catalog, in display order.
pub fn catalog() -> Vec<DrugPreset> {
    Drug::ALL.iter().map(|&d| preset_for(d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_well_formed() {
        for p in catalog() {
            assert!(p.min_dose <= p.max_dose, "{:?}", p.drug);
            assert!(p.amount_value > 0.0 && p.volume_ml > 0.0, "{:?}", p.drug);
            assert_eq!(
                p.amount_unit == AmountUnit::Ui,
                p.dose_unit.is_activity(),
                "{:?}: amount and dose units disagree",
                p.drug
            );
        }
    }

    #[test]
    fn catalog_matches_unit_dilutions() {
        let vaso = preset_for(Drug::Vasopressin);
        assert_eq!((vaso.amount_value, vaso.amount_unit, vaso.volume_ml), (40.0, AmountUnit::Ui, 100.0));
        assert_eq!((vaso.min_dose, vaso.max_dose), (0.0001, 0.003));

        let epi = preset_for(Drug::Epinephrine);
        assert_eq!((epi.amount_value, epi.volume_ml), (1.6, 100.0));

        let isop = preset_for(Drug::Isoproterenol);
        assert_eq!((isop.amount_unit, isop.dose_unit), (AmountUnit::Mcg, DoseUnit::McgMin));

        assert_eq!(preset_for(Drug::Morphine).dose_unit, DoseUnit::MgH);
        assert_eq!(preset_for(Drug::Milrinone10).amount_value, 10.0);
        assert_eq!(preset_for(Drug::Milrinone20).amount_value, 20.0);
        assert_eq!(preset_for(Drug::Dopamine200).volume_ml, 100.0);
    }

    #[test]
    fn catalog_lists_each_drug_once_in_order() {
        let presets = catalog();
        assert_eq!(presets.len(), Drug::ALL.len());
        for (p, drug) in presets.iter().zip(Drug::ALL) {
            assert_eq!(p.drug, drug);
        }
    }
}
