//! Derived pulmonary-artery-catheter parameters.
//!
//! Every metric is computed independently. A metric is `None` when one of its
//! operands is absent, when a strictly positive physical quantity (weight, height,
//! heart rate, cardiac output, BSA, hemoglobin) is zero or negative, or when its
//! denominator is too small to divide by. Results are never NaN or infinite.
//!
//! Resistances are reported both in dyn·s·cm⁻⁵ and in Wood units (`× 80` apart).

use crate::domain::{HemoInput, HemoResult};

/// Denominators at or below this are treated as zero.
const DIV_EPS: f64 = 1e-6;

/// Conversion factor from Wood units to dyn·s·cm⁻⁵.
pub const WU_TO_DYN: f64 = 80.0;

/// Hüfner's constant (mL O2 per g hemoglobin).
const O2_PER_G_HB: f64 = 1.34;

/// Assumed VO2 per m² BSA (mL/min/m²).
const VO2_PER_M2: f64 = 125.0;

/// Minimum a-v O2 content difference accepted by the Fick estimate.
const FICK_MIN_AV_DIFF: f64 = 0.1;

/// Watts per (mmHg·L/min).
const CPO_DIVISOR: f64 = 451.0;

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite() && *x > DIV_EPS)
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// `num / den`, or `None` if the denominator is near zero or the result is not finite.
fn ratio(num: f64, den: f64) -> Option<f64> {
    if den.abs() <= DIV_EPS {
        return None;
    }
    let r = num / den;
    r.is_finite().then_some(r)
}

pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let w = positive(weight_kg)?;
    let h_m = positive(height_cm)? / 100.0;
    ratio(w, h_m * h_m)
}

/// Body surface area (DuBois): `0.007184 · W^0.425 · H^0.725`.
pub fn bsa_dubois(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let w = positive(weight_kg)?;
    let h = positive(height_cm)?;
    Some(0.007184 * w.powf(0.425) * h.powf(0.725))
}

pub fn mean_arterial_pressure(sbp: Option<f64>, dbp: Option<f64>) -> Option<f64> {
    Some((finite(sbp)? + 2.0 * finite(dbp)?) / 3.0)
}

/// Systemic vascular resistance in dyn·s·cm⁻⁵ and Wood units.
pub fn svr(map: Option<f64>, rap: Option<f64>, co: Option<f64>) -> (Option<f64>, Option<f64>) {
    resistance(map, rap, co)
}

/// Pulmonary vascular resistance in dyn·s·cm⁻⁵ and Wood units.
pub fn pvr(mpap: Option<f64>, pcwp: Option<f64>, co: Option<f64>) -> (Option<f64>, Option<f64>) {
    resistance(mpap, pcwp, co)
}

fn resistance(upstream: Option<f64>, downstream: Option<f64>, co: Option<f64>) -> (Option<f64>, Option<f64>) {
    let wu = wood_units(upstream, downstream, co);
    (wu.map(|v| v * WU_TO_DYN), wu)
}

fn wood_units(upstream: Option<f64>, downstream: Option<f64>, co: Option<f64>) -> Option<f64> {
    let gradient = finite(upstream)? - finite(downstream)?;
    ratio(gradient, positive(co)?)
}

/// Pulmonary artery pulsatility index; RAP below 1 mmHg is taken as 1.
pub fn papi(spap: Option<f64>, dpap: Option<f64>, rap: Option<f64>) -> Option<f64> {
    let pulse = finite(spap)? - finite(dpap)?;
    ratio(pulse, finite(rap)?.max(1.0))
}

/// RAP/PCWP ratio; PCWP below 1 mmHg is taken as 1.
pub fn rap_pcwp_ratio(rap: Option<f64>, pcwp: Option<f64>) -> Option<f64> {
    ratio(finite(rap)?, finite(pcwp)?.max(1.0))
}

/// Cardiac power output (W).
pub fn cardiac_power_output(map: Option<f64>, co: Option<f64>) -> Option<f64> {
    Some(finite(map)? * positive(co)? / CPO_DIVISOR)
}

/// Oxygen content (mL O2/dL) for a hemoglobin and a saturation in percent.
pub fn oxygen_content(hb: Option<f64>, sat_pct: Option<f64>) -> Option<f64> {
    Some(O2_PER_G_HB * positive(hb)? * (finite(sat_pct)? / 100.0))
}

/// Intermediate and final values of the Fick cardiac output estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FickEstimate {
    pub vo2: Option<f64>,
    pub cao2: Option<f64>,
    pub cvo2: Option<f64>,
    pub av_diff: Option<f64>,
    pub co: Option<f64>,
}

/// Fick cardiac output with an assumed VO2 of 125 mL/min/m².
///
/// `co` is `None` unless the a-v content difference exceeds 0.1.
pub fn fick(bsa: Option<f64>, hb: Option<f64>, sao2: Option<f64>, svo2: Option<f64>) -> FickEstimate {
    let vo2 = positive(bsa).map(|b| VO2_PER_M2 * b);
    let cao2 = oxygen_content(hb, sao2);
    let cvo2 = oxygen_content(hb, svo2);
    let av_diff = cao2.zip(cvo2).map(|(a, v)| a - v);

    let co = match (vo2, av_diff) {
        (Some(vo2), Some(diff)) if diff > FICK_MIN_AV_DIFF => ratio(vo2, diff).map(|v| v / 1000.0),
        (Some(_), Some(diff)) => {
            log::debug!("Fick CO not computed: a-v O2 difference {diff:.3} too small");
            None
        }
        _ => None,
    };

    FickEstimate {
        vo2,
        cao2,
        cvo2,
        av_diff,
        co,
    }
}

/// Compute every derived parameter available from `input`.
pub fn derive(input: &HemoInput) -> HemoResult {
    let bsa = bsa_dubois(input.weight_kg, input.height_cm);
    let map = mean_arterial_pressure(input.systolic_bp, input.diastolic_bp);
    let co = positive(input.cardiac_output);

    let sv = co
        .zip(positive(input.heart_rate))
        .and_then(|(co, hr)| ratio(1000.0 * co, hr));
    let (svr, svr_wu) = svr(map, input.rap, co);
    let (pvr, pvr_wu) = pvr(input.mpap, input.pcwp, co);
    let fick = fick(bsa, input.hemoglobin, input.sao2, input.svo2);

    HemoResult {
        bmi: bmi(input.weight_kg, input.height_cm),
        bsa,
        map,
        tpg: finite(input.mpap).zip(finite(input.pcwp)).map(|(m, w)| m - w),
        dpg: finite(input.dpap).zip(finite(input.pcwp)).map(|(d, w)| d - w),
        ci: co.zip(bsa).and_then(|(co, bsa)| ratio(co, bsa)),
        sv,
        svi: sv.zip(bsa).and_then(|(sv, bsa)| ratio(sv, bsa)),
        svr,
        svr_wu,
        pvr,
        pvr_wu,
        papi: papi(input.spap, input.dpap, input.rap),
        rap_pcwp: rap_pcwp_ratio(input.rap, input.pcwp),
        cpo: cardiac_power_output(map, co),
        vo2: fick.vo2,
        cao2: fick.cao2,
        cvo2: fick.cvo2,
        av_diff: fick.av_diff,
        co_fick: fick.co,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Option<f64>, b: f64, tol: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() <= tol)
    }

    fn full_case() -> HemoInput {
        HemoInput {
            weight_kg: Some(70.0),
            height_cm: Some(170.0),
            heart_rate: Some(90.0),
            systolic_bp: Some(112.0),
            diastolic_bp: Some(64.0),
            rap: Some(8.0),
            spap: Some(40.0),
            dpap: Some(20.0),
            mpap: Some(28.0),
            pcwp: Some(18.0),
            cardiac_output: Some(4.5),
            hemoglobin: Some(12.0),
            sao2: Some(96.0),
            svo2: Some(62.0),
            ..HemoInput::default()
        }
    }

    #[test]
    fn dubois_bsa_reference() {
        assert!(close(bsa_dubois(Some(70.0), Some(170.0)), 1.81, 0.01));
        assert!(close(bmi(Some(70.0), Some(170.0)), 24.22, 0.01));
    }

    #[test]
    fn svr_reference() {
        let (dyn_, wu) = svr(Some(80.0), Some(8.0), Some(4.5));
        assert!(close(dyn_, 1280.0, 1e-9));
        assert!(close(wu, 16.0, 1e-12));
    }

    #[test]
    fn full_case_derives_every_metric() {
        let r = derive(&full_case());
        // MAP = (112 + 128) / 3 = 80
        assert!(close(r.map, 80.0, 1e-12));
        assert!(close(r.svr, 1280.0, 1e-9));
        assert!(close(r.tpg, 10.0, 1e-12));
        assert!(close(r.dpg, 2.0, 1e-12));
        assert!(close(r.sv, 50.0, 1e-9));
        // PVR = 80 * 10 / 4.5
        assert!(close(r.pvr, 177.777, 1e-3));
        assert!(close(r.pvr_wu, 2.2222, 1e-4));
        assert!(close(r.papi, 2.5, 1e-12));
        assert!(close(r.rap_pcwp, 8.0 / 18.0, 1e-12));
        assert!(close(r.cpo, 80.0 * 4.5 / 451.0, 1e-12));
        let bsa = r.bsa.unwrap();
        assert!(close(r.ci, 4.5 / bsa, 1e-12));
        assert!(close(r.svi, 50.0 / bsa, 1e-9));
        assert!(r.co_fick.is_some());
    }

    #[test]
    fn fick_follows_content_difference() {
        let f = fick(Some(2.0), Some(10.0), Some(100.0), Some(50.0));
        assert!(close(f.vo2, 250.0, 1e-12));
        assert!(close(f.cao2, 13.4, 1e-12));
        assert!(close(f.cvo2, 6.7, 1e-12));
        assert!(close(f.av_diff, 6.7, 1e-12));
        assert!(close(f.co, 250.0 / 6.7 / 1000.0, 1e-12));
    }

    #[test]
    fn fick_guards_small_or_negative_difference() {
        assert_eq!(fick(Some(2.0), Some(10.0), Some(70.0), Some(70.0)).co, None);
        assert_eq!(fick(Some(2.0), Some(10.0), Some(60.0), Some(70.0)).co, None);
    }

    #[test]
    fn zero_cardiac_output_only_drops_dependent_metrics() {
        let mut input = full_case();
        input.cardiac_output = Some(0.0);
        let r = derive(&input);
        assert_eq!(r.ci, None);
        assert_eq!(r.sv, None);
        assert_eq!(r.svr, None);
        assert_eq!(r.pvr_wu, None);
        assert_eq!(r.cpo, None);
        assert!(r.map.is_some());
        assert!(r.tpg.is_some());
        assert!(r.papi.is_some());
    }

    #[test]
    fn low_rap_and_pcwp_are_floored_at_one() {
        assert!(close(papi(Some(30.0), Some(10.0), Some(0.0)), 20.0, 1e-12));
        assert!(close(rap_pcwp_ratio(Some(5.0), Some(0.0)), 5.0, 1e-12));
    }

    #[test]
    fn empty_input_derives_nothing() {
        assert_eq!(derive(&HemoInput::default()), HemoResult::default());
    }

    #[test]
    fn zero_weight_or_height_yields_no_body_size() {
        assert_eq!(bsa_dubois(Some(0.0), Some(170.0)), None);
        assert_eq!(bmi(Some(70.0), Some(0.0)), None);
    }

    fn reading() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            Just(None),
            Just(Some(0.0)),
            Just(Some(1e-7)),
            (-1e4f64..1e4).prop_map(Some),
        ]
    }

    fn all_fields(r: &HemoResult) -> [Option<f64>; 20] {
        [
            r.bmi, r.bsa, r.map, r.tpg, r.dpg, r.ci, r.sv, r.svi, r.svr, r.svr_wu, r.pvr, r.pvr_wu, r.papi,
            r.rap_pcwp, r.cpo, r.vo2, r.cao2, r.cvo2, r.av_diff, r.co_fick,
        ]
    }

    proptest! {
        #[test]
        fn derived_values_are_always_finite(v in proptest::collection::vec(reading(), 14)) {
            let input = HemoInput {
                weight_kg: v[0],
                height_cm: v[1],
                heart_rate: v[2],
                systolic_bp: v[3],
                diastolic_bp: v[4],
                rap: v[5],
                spap: v[6],
                dpap: v[7],
                mpap: v[8],
                pcwp: v[9],
                cardiac_output: v[10],
                hemoglobin: v[11],
                sao2: v[12],
                svo2: v[13],
                ..HemoInput::default()
            };
            let r = derive(&input);
            for value in all_fields(&r).into_iter().flatten() {
                prop_assert!(value.is_finite(), "{r:?}");
            }
        }
    }
}
